use std::fmt;

/// Error types for xray operations
#[derive(Debug)]
pub enum XRayError {
    /// IO error (log file reads and writes)
    Io(std::io::Error),

    /// JSON (de)serialization error for the step log
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// File not found error
    FileNotFound(String),
}

impl fmt::Display for XRayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XRayError::Io(err) => write!(f, "IO error: {err}"),
            XRayError::Json(err) => write!(f, "JSON error: {err}"),
            XRayError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            XRayError::Config(msg) => write!(f, "Configuration error: {msg}"),
            XRayError::FileNotFound(path) => write!(f, "File not found: {path}"),
        }
    }
}

impl std::error::Error for XRayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XRayError::Io(err) => Some(err),
            XRayError::Json(err) => Some(err),
            XRayError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for XRayError {
    fn from(err: std::io::Error) -> Self {
        XRayError::Io(err)
    }
}

impl From<serde_json::Error> for XRayError {
    fn from(err: serde_json::Error) -> Self {
        XRayError::Json(err)
    }
}

impl From<toml::de::Error> for XRayError {
    fn from(err: toml::de::Error) -> Self {
        XRayError::TomlParsing(err)
    }
}

/// Type alias for Results using XRayError
pub type Result<T> = std::result::Result<T, XRayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = XRayError::Config("candidate_count cannot be 0".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: candidate_count cannot be 0"
        );

        let file_error = XRayError::FileNotFound("xray_log.json".to_string());
        assert_eq!(format!("{file_error}"), "File not found: xray_log.json");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let xray_error = XRayError::from(io_error);

        match xray_error {
            XRayError::Io(_) => {} // Expected
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let xray_error = XRayError::from(json_error);

        assert!(matches!(xray_error, XRayError::Json(_)));
        assert!(xray_error.source().is_some());
        assert!(format!("{xray_error}").contains("JSON error:"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let xray_error = XRayError::from(toml_error);

        assert!(matches!(xray_error, XRayError::TomlParsing(_)));
        assert!(format!("{xray_error}").contains("TOML parsing error:"));
    }

    #[test]
    fn test_error_no_source_variants() {
        let errors_without_source = vec![
            XRayError::Config("test".to_string()),
            XRayError::FileNotFound("test".to_string()),
        ];

        for error in errors_without_source {
            assert!(error.source().is_none());
            assert!(format!("{error}").contains(':'));
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<XRayError>();
    }
}
