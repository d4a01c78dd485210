use thiserror::Error;

// The three classes of failure a gradebook operation can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
}

#[derive(Error, Debug)]
pub enum GradebookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed gradebook document: {0}")]
    Malformed(String),
}

impl GradebookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradebookError::Validation(_) => ErrorKind::Validation,
            GradebookError::NotFound(_) => ErrorKind::NotFound,
            // A document that cannot be decoded is a failed load like any other.
            GradebookError::Io(_) | GradebookError::Malformed(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for GradebookError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            GradebookError::Io(e.into())
        } else {
            GradebookError::Malformed(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, GradebookError>;
