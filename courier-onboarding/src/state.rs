//! States, outcomes, and events of the onboarding flow.

use courier_import::{ImportProgress, ImportSummary};

/// Where the flow currently is. Transitions only move forward; the terminal
/// states are `Done` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingState {
    AwaitingPermissions,
    AwaitingSetupChoice,
    ImportingLocal,
    DownloadingRemote,
    Finalizing,
    Done,
    Failed,
}

/// The four discrete results the external setup step can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// User dismissed setup — this device becomes the primary data owner.
    Cancelled,
    /// Another local device is the data source; import locally, then upload.
    StartDeviceSync,
    /// A remote backend delivers the data via the external download job.
    StartNetworkSync,
    /// Setup itself failed; the flow terminates without finalizing.
    Failed,
}

/// Which surface the application hands off to after onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextScreen {
    /// Regular touch UI.
    Conversations,
    /// Remote-driven UI for touchless hardware.
    Leanback,
}

/// How a completed run ended.
#[derive(Debug)]
pub enum Outcome {
    Completed {
        next: NextScreen,
        /// Present on the local-import paths, absent after a network sync.
        summary: Option<ImportSummary>,
    },
    /// Required permissions were not granted; nothing was imported.
    PermissionDenied,
    /// The setup step reported failure; nothing was imported or finalized.
    SetupFailed,
}

/// Events emitted for the UI while the flow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingEvent {
    StateChanged(OnboardingState),
    Progress(ImportProgress),
}
