use ledgrad_core::GradientError;

use crate::strip::StripError;

#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error(transparent)]
    Gradient(#[from] GradientError),

    #[error(transparent)]
    Strip(#[from] StripError),

    #[error("invalid fx config: {0}")]
    Config(#[from] serde_json::Error),
}
