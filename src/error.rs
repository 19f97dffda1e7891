use std::io;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Ownership errors
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OwnershipError {
    #[error("failed to allocate {size} bytes for {type_name}")]
    AllocationFailed {
        type_name: &'static str,
        size: usize,
    },
}

impl OwnershipError {
    pub fn allocation_failed<T>() -> Self {
        Self::AllocationFailed {
            type_name: std::any::type_name::<T>(),
            size: std::mem::size_of::<T>(),
        }
    }
}

pub type Result<T, E = OwnershipError> = std::result::Result<T, E>;

// =============================================================================
// Symbolizer errors
// =============================================================================

#[derive(Error, Debug)]
pub enum SymbolizeError {
    #[error("expected exactly one argument, got {0}")]
    Usage(usize),

    #[error("failed to read {}: {}", display_path(.path), .source)]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
}

impl SymbolizeError {
    pub fn io(path: Option<PathBuf>, source: io::Error) -> Self {
        Self::Io { path, source }
    }

    /// Process exit status for this error: 2 for bad usage, 1 for I/O.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Io { .. } => 1,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<stdin>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_failed_names_type() {
        let err = OwnershipError::allocation_failed::<u64>();
        assert_eq!(
            err,
            OwnershipError::AllocationFailed {
                type_name: "u64",
                size: 8
            }
        );
        assert_eq!(err.to_string(), "failed to allocate 8 bytes for u64");
    }

    #[test]
    fn test_io_error_mentions_stdin() {
        let err = SymbolizeError::io(None, io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.to_string(), "failed to read <stdin>: boom");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = SymbolizeError::io(
            Some(PathBuf::from("trace.log")),
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "failed to read trace.log: missing");
    }
}
