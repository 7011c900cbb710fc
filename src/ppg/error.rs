use thiserror::Error;
#[derive(Debug, Error)]
pub enum PpgError {
    #[error("frame rate must be a positive finite number, got {0}")]
    InvalidFrameRate(f32),
    #[error("smoothing factor must lie in (0, 1], got {0}")]
    InvalidSmoothing(f32),
    #[error("peak threshold must be finite and non-negative, got {0}")]
    InvalidThreshold(f32),
    #[error("invalid estimator configuration: {0}")]
    InvalidConfig(String),
    #[error("sample must be finite, got {0}")]
    InvalidSample(f32),
    #[error("invalid RGBA frame: {0}")]
    InvalidFrame(String),
    #[error("lower rate limit must be greater than zero, got {0}")]
    InvalidLowerRateLimit(u32),
    #[error("line {line}: cannot parse sample {value:?}")]
    Parse { line: usize, value: String },
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for PpgError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        PpgError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for PpgError {
    fn from(value: image::ImageError) -> Self {
        PpgError::Plot(value.to_string())
    }
}
