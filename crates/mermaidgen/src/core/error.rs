//! Core error types for diagram construction and export
//!
//! Missing lookups are never errors; they are reported as `None` by the
//! `get_*` accessors. The variants below cover the operations that can
//! actually refuse to do something.

use thiserror::Error;

/// Core error types for diagram construction and export
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Duplicate {kind} id: {id} already exists")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Invalid task '{id}': {message}")]
    InvalidTask { id: String, message: String },

    #[error("Unsupported platform for opening a browser: {os}")]
    UnsupportedPlatform { os: String },

    #[error("Encoding error: {message}")]
    EncodingError { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new duplicate id error
    pub fn duplicate_id(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }

    /// Create a new invalid task error
    pub fn invalid_task(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTask {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Create a new unsupported platform error
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        Self::UnsupportedPlatform { os: os.into() }
    }

    /// Create a new encoding error
    pub fn encoding_error(message: impl Into<String>) -> Self {
        Self::EncodingError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_id_error() {
        let error = DiagramError::duplicate_id("task", "t1");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Duplicate task id"));
        assert!(error_msg.contains("t1"));
    }

    #[test]
    fn test_invalid_task_error() {
        let error = DiagramError::invalid_task("t1", "end is before start");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid task 't1'"));
        assert!(error_msg.contains("end is before start"));
    }

    #[test]
    fn test_unsupported_platform_error() {
        let error = DiagramError::unsupported_platform("plan9");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unsupported platform"));
        assert!(error_msg.contains("plan9"));
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "xdg-open not found");
        let error: DiagramError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("xdg-open not found"));
    }
}
