use thiserror::Error;

/// Failure classes surfaced by maze generation.
///
/// Configuration errors are fatal to the current request only; the caller can
/// adjust parameters and retry. Backend errors are fatal for the process.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Requested grid, buffer or parameter is outside what the backend accepts.
    Configuration,
    /// The compute or draw collaborator could not be acquired.
    BackendUnavailable,
    /// The backend failed while running or reading back a dispatch.
    Dispatch,
}

/// Errors produced by request validation, sizing and dispatch.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze needs a {requested}-byte working buffer but the backend allows at most {limit} bytes")]
    BufferTooLarge { requested: u64, limit: u64 },

    #[error("maze needs {requested} workgroups along {axis} but the backend allows at most {limit}")]
    DispatchTooLarge {
        axis: char,
        requested: u64,
        limit: u64,
    },

    #[error("maze needs {requested} vertices per draw but a draw call takes at most {limit}")]
    VertexCountTooLarge { requested: u64, limit: u64 },

    #[error("wall thickness {0} is outside (0, 1]")]
    InvalidThickness(f32),

    #[error("seed {seed} is not below the encodable limit {limit}")]
    SeedOutOfRange { seed: u32, limit: u32 },

    #[error("compute backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("compute dispatch failed: {0}")]
    Dispatch(String),
}

impl MazeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MazeError::BufferTooLarge { .. }
            | MazeError::DispatchTooLarge { .. }
            | MazeError::VertexCountTooLarge { .. }
            | MazeError::InvalidThickness(_)
            | MazeError::SeedOutOfRange { .. } => ErrorKind::Configuration,
            MazeError::BackendUnavailable(_) => ErrorKind::BackendUnavailable,
            MazeError::Dispatch(_) => ErrorKind::Dispatch,
        }
    }

    #[inline]
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizing_errors_are_configuration() {
        let e = MazeError::BufferTooLarge { requested: 10, limit: 4 };
        assert_eq!(e.kind(), ErrorKind::Configuration);
        assert!(e.is_configuration());
    }

    #[test]
    fn sizing_message_names_both_values() {
        let msg = MazeError::BufferTooLarge { requested: 960, limit: 128 }.to_string();
        assert!(msg.contains("960"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn backend_errors_are_not_configuration() {
        assert_eq!(
            MazeError::BackendUnavailable("no adapter".into()).kind(),
            ErrorKind::BackendUnavailable
        );
        assert!(!MazeError::Dispatch("map failed".into()).is_configuration());
    }
}
