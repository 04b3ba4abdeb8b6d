//! External collaborator contracts consumed by the onboarding flow.
//!
//! None of these are implemented by the core: the platform shell provides
//! the permission prompt, the login surface, the sync services, and the
//! durable configuration. The flow only starts them and listens.

use crate::state::SetupOutcome;
use async_trait::async_trait;
use tokio::sync::oneshot;

/// Device permission handling.
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// Whether the required permissions are already granted.
    fn already_granted(&self) -> bool;

    /// Prompts the user and resolves with the result. A `false` resolution
    /// halts the flow; platform default handling takes over.
    async fn request(&self) -> bool;
}

/// The external interactive setup/login step.
#[async_trait]
pub trait SetupFlow: Send + Sync {
    /// Runs setup to completion and reports exactly one outcome.
    async fn run(&self) -> SetupOutcome;
}

/// The remote download and upload jobs, running outside this process.
pub trait SyncJobs: Send + Sync {
    /// Starts the remote download job and returns the one-shot completion
    /// signal. Dropping the receiver tears the listener down, so every exit
    /// path — including early teardown — deregisters it.
    fn start_download(&self) -> oneshot::Receiver<()>;

    /// Fire-and-forget upload after a device-sync import. Never awaited.
    fn start_upload(&self);
}

/// Read-only facts about this device and its owner.
pub trait DeviceProfile: Send + Sync {
    /// Owner display name from the device's profile, empty when unknown.
    fn owner_name(&self) -> String;

    /// This device's phone number, in whatever format the platform reports.
    fn phone_number(&self) -> String;

    /// Whether the hardware has touch input; decides the hand-off screen.
    fn has_touchscreen(&self) -> bool;
}

/// Durable configuration surviving process restarts.
pub trait ConfigStore: Send + Sync {
    /// Persists the first-run-complete flag. Only called from finalization,
    /// after every import phase has succeeded.
    fn set_first_run_complete(&self) -> anyhow::Result<()>;

    /// Whether onboarding has completed on a previous run.
    fn first_run_complete(&self) -> bool;
}
