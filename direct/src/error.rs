#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `[offset, offset + width)` does not fit in a region of `len` bytes.
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
    InvalidConstruction {
        expected: &'static str,
        got: &'static str,
    },
    UnknownSymbol(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_range(offset: usize, width: usize, len: usize) -> Self {
        Self::OutOfRange { offset, width, len }
    }

    pub(crate) fn invalid(expected: &'static str, got: &'static str) -> Self {
        Self::InvalidConstruction { expected, got }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OutOfRange { offset, width, len } => write!(
                f,
                "read of {width} bytes at offset {offset} is out of range \
                 for a region of {len} bytes"
            ),
            Error::InvalidConstruction { expected, got } => {
                write!(f, "invalid construction: expected {expected}, got {got}")
            }
            Error::UnknownSymbol(name) => write!(f, "unknown well-known symbol: {name}"),
        }
    }
}

impl std::error::Error for Error {}
