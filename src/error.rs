use std::fmt;

/// Error types for reading flight logs and writing reports
#[derive(Debug)]
pub enum FlightStatError {
    /// I/O errors
    Io(std::io::Error),
    /// UTF-8 decoding errors
    Utf8(std::str::Utf8Error),
    /// Malformed record with context
    InvalidRecord(String),
    /// Flight log without a usable date header
    MissingDate(String),
    /// Flight log without a single position fix
    NoFixes(String),
    /// Report export error
    Export(String),
}

impl fmt::Display for FlightStatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightStatError::Io(err) => write!(f, "I/O error: {}", err),
            FlightStatError::Utf8(err) => write!(f, "UTF-8 error: {}", err),
            FlightStatError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
            FlightStatError::MissingDate(file) => write!(f, "No flight date found in {}", file),
            FlightStatError::NoFixes(file) => write!(f, "No position fixes found in {}", file),
            FlightStatError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for FlightStatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlightStatError::Io(err) => Some(err),
            FlightStatError::Utf8(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlightStatError {
    fn from(err: std::io::Error) -> Self {
        FlightStatError::Io(err)
    }
}

impl From<std::str::Utf8Error> for FlightStatError {
    fn from(err: std::str::Utf8Error) -> Self {
        FlightStatError::Utf8(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FlightStatError::MissingDate("track.igc".to_string());
        assert_eq!(err.to_string(), "No flight date found in track.igc");

        let err = FlightStatError::InvalidRecord("B record too short".to_string());
        assert_eq!(err.to_string(), "Invalid record: B record too short");
    }

    #[test]
    fn test_io_error_has_source() {
        let err: FlightStatError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
