use thiserror::Error;

/// Every failure the texture pipeline can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("pixel ({x}, {y}) is outside the {width}x{height} matrix")]
    IndexOutOfRange { x: usize, y: usize, width: usize, height: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid hex colour {0:?}")]
    InvalidHex(String),

    #[error("{width}x{height} image does not fit a 32-bit bitmap header")]
    ImageTooLarge { width: usize, height: usize },
}

impl Error {
    /// Reclassify a colour parse failure as a configuration error, naming `what`.
    pub fn in_configuration(self, what: &str) -> Self {
        match self {
            Error::InvalidHex(hex) => {
                Error::InvalidConfiguration(format!("{what}: invalid hex colour {hex:?}"))
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
