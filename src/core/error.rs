/// Failures surfaced by the backdrop lifecycle. The backdrop is decorative, so
/// callers log these and carry on without a scene.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackdropError {
    /// No primary window / canvas to render onto.
    #[error("render surface unavailable: {0}")]
    ContextUnavailable(String),
}
