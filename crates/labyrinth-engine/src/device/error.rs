use labyrinth_maze::MazeError;

/// What the frame loop does after the surface refuses a frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface reconfigured; the maze is drawn again next frame.
    Reconfigured,
    /// Transient; this frame is dropped, maze and camera are untouched.
    SkipFrame,
    /// The draw collaborator is gone. No retry.
    Fatal(String),
}

impl SurfaceErrorAction {
    #[inline]
    pub fn is_fatal(&self) -> bool {
        matches!(self, SurfaceErrorAction::Fatal(_))
    }

    /// A fatal action as [`MazeError::BackendUnavailable`]; `None` otherwise.
    pub fn into_error(self) -> Option<MazeError> {
        match self {
            SurfaceErrorAction::Fatal(reason) => Some(MazeError::BackendUnavailable(reason)),
            SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_maze::ErrorKind;

    #[test]
    fn only_fatal_becomes_an_error() {
        assert_eq!(SurfaceErrorAction::Reconfigured.into_error().map(|e| e.kind()), None);
        assert_eq!(SurfaceErrorAction::SkipFrame.into_error().map(|e| e.kind()), None);

        let fatal = SurfaceErrorAction::Fatal("surface out of memory".into());
        assert!(fatal.is_fatal());
        let err = fatal.into_error().unwrap();
        assert_eq!(err.kind(), ErrorKind::BackendUnavailable);
        assert!(err.to_string().contains("surface out of memory"));
    }
}
