/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Whether the frame loop can keep going after this error.
    #[inline]
    pub fn is_recoverable(self) -> bool {
        self != SurfaceErrorAction::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fatal_stops_the_loop() {
        assert!(SurfaceErrorAction::Reconfigured.is_recoverable());
        assert!(SurfaceErrorAction::SkipFrame.is_recoverable());
        assert!(!SurfaceErrorAction::Fatal.is_recoverable());
    }
}
