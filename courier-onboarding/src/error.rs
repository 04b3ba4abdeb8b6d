//! Onboarding error types.

use courier_import::ImportError;
use thiserror::Error;

/// Result type for the onboarding flow.
pub type OnboardingResult<T> = Result<T, OnboardingError>;

/// Errors that terminate an onboarding run. Any of these leaves the
/// installation in a retryable "not yet onboarded" state — the first-run
/// flag is only persisted once finalization succeeds.
#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("import worker panicked: {0}")]
    ImportPanicked(String),

    #[error("remote download ended without signaling completion")]
    DownloadInterrupted,

    #[error("failed to persist configuration: {0}")]
    Config(String),
}
