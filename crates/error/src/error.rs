pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Invalid data, which typically means the page table and frame table have diverged.
    InvalidData(String),
    /// Invalid user input, such as an unknown policy name.
    InvalidInput(String),
    /// A size or count that makes the simulation undefined, e.g. zero frames.
    InvalidConfiguration(String),
    /// A frame was requested for a page that is not mapped.
    NotResident(String),
    /// The configuration layer failed to load or deserialize settings.
    Config(String),
    /// An IO error has occurred.
    IO(String),
    /// An out-of-bounds frame access has occurred.
    OutOfBounds,
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::NotResident(msg) => write!(f, "Page not resident: {}", msg),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::IO(msg) => write!(f, "IO error: {}", msg),
            Error::OutOfBounds => write!(f, "Out of bounds"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(e: log::SetLoggerError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<log::ParseLevelError> for Error {
    fn from(e: log::ParseLevelError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            "Page not resident: page 7",
            Error::NotResident("page 7".to_string()).to_string()
        );
        assert_eq!(
            "Invalid configuration: frame count must be positive",
            Error::InvalidConfiguration("frame count must be positive".to_string()).to_string()
        );
        assert_eq!("Out of bounds", Error::OutOfBounds.to_string());
    }

    #[test]
    fn test_macros_build_errors() {
        let r: Result<()> = crate::errconfig!("frame size {} is invalid", 0);
        assert_eq!(
            Err(Error::InvalidConfiguration("frame size 0 is invalid".to_string())),
            r
        );
        let r: Result<()> = crate::errresident!("page {}", 3);
        assert_eq!(Err(Error::NotResident("page 3".to_string())), r);
    }
}
