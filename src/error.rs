use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum StampError {
    /// Logo file is missing, undecodable or zero-sized.
    InvalidImage(String),
    /// Malformed `#RRGGBB` / `R,G,B` color value.
    InvalidColorSpec(String),
    /// Payload does not fit any QR version at the chosen error correction level.
    EncodingFailure(String),
    /// Output file could not be written.
    WriteFailure(String),
}

impl Display for StampError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match self {
            Self::InvalidImage(msg) => write!(f, "invalid logo image: {msg}"),
            Self::InvalidColorSpec(msg) => write!(f, "invalid color: {msg}"),
            Self::EncodingFailure(msg) => write!(f, "QR encoding failed: {msg}"),
            Self::WriteFailure(msg) => write!(f, "failed to write output: {msg}"),
        }
    }
}

impl std::error::Error for StampError {}

pub type StampResult<T> = Result<T, StampError>;
