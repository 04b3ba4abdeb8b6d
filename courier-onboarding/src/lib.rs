//! Onboarding flow for Courier.
//!
//! Drives a new installation end-to-end: request device permissions, run the
//! external setup/login step, then either bulk-import the device's existing
//! data into the local store or wait for a remote download job to populate
//! it, and finally hand off to the main application.
//!
//! The flow owns all state transitions; external concerns (permission
//! prompts, the login surface, remote sync jobs, the telephony provider)
//! are consumed through collaborator traits. There is no back navigation:
//! once setup has begun, the only exits are the defined terminal states.

mod context;
mod error;
mod hooks;
mod machine;
mod state;

pub use context::OnboardingContext;
pub use error::{OnboardingError, OnboardingResult};
pub use hooks::{ConfigStore, DeviceProfile, PermissionGate, SetupFlow, SyncJobs};
pub use machine::{Collaborators, OnboardingConfig, OnboardingFlow};
pub use state::{NextScreen, OnboardingEvent, OnboardingState, Outcome, SetupOutcome};
