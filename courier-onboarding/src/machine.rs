//! The onboarding state machine.

use crate::context::OnboardingContext;
use crate::error::{OnboardingError, OnboardingResult};
use crate::hooks::{ConfigStore, DeviceProfile, PermissionGate, SetupFlow, SyncJobs};
use crate::state::{NextScreen, OnboardingEvent, OnboardingState, Outcome, SetupOutcome};
use courier_import::{DeviceProvider, ImportPipeline, ImportSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Configuration for the onboarding flow.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// Pause between the end of a local import and finalization, so the last
    /// progress update gets a chance to render before the hand-off.
    pub settle_delay: Duration,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(5),
        }
    }
}

/// The external collaborators one run is wired to.
pub struct Collaborators {
    pub permissions: Arc<dyn PermissionGate>,
    pub setup: Arc<dyn SetupFlow>,
    pub jobs: Arc<dyn SyncJobs>,
    pub profile: Arc<dyn DeviceProfile>,
    pub config_store: Arc<dyn ConfigStore>,
    pub provider: Arc<dyn DeviceProvider>,
}

/// Drives one onboarding run to a terminal state.
///
/// The flow runs on the tokio runtime; the import pipeline runs on a
/// dedicated blocking thread, and its progress events are re-delivered onto
/// the flow's event channel so UI-visible state only ever changes on the
/// consuming side.
pub struct OnboardingFlow {
    ctx: Arc<OnboardingContext>,
    hooks: Collaborators,
    config: OnboardingConfig,
    state: OnboardingState,
    event_tx: mpsc::UnboundedSender<OnboardingEvent>,
}

impl OnboardingFlow {
    /// Creates a flow and the event stream the UI listens on.
    pub fn new(
        ctx: Arc<OnboardingContext>,
        hooks: Collaborators,
        config: OnboardingConfig,
    ) -> (Self, mpsc::UnboundedReceiver<OnboardingEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let flow = Self {
            ctx,
            hooks,
            config,
            state: OnboardingState::AwaitingPermissions,
            event_tx,
        };
        (flow, event_rx)
    }

    /// Runs the flow to a terminal state. Consumes the flow: there is one
    /// onboarding run per installation, and no way back in.
    pub async fn run(mut self) -> OnboardingResult<Outcome> {
        let result = self.drive().await;
        if result.is_err() && self.state != OnboardingState::Failed {
            self.transition(OnboardingState::Failed);
        }
        result
    }

    async fn drive(&mut self) -> OnboardingResult<Outcome> {
        self.transition(OnboardingState::AwaitingPermissions);
        if !self.hooks.permissions.already_granted() && !self.hooks.permissions.request().await {
            info!("[ONBOARD] permissions denied; flow halts");
            return Ok(Outcome::PermissionDenied);
        }

        self.transition(OnboardingState::AwaitingSetupChoice);
        match self.hooks.setup.run().await {
            SetupOutcome::Cancelled => {
                // No remote account: this device owns the canonical data.
                self.ctx.account.lock().unwrap().mark_primary_owner();
                self.import_local(false).await
            }
            SetupOutcome::StartDeviceSync => self.import_local(true).await,
            SetupOutcome::StartNetworkSync => self.download_remote().await,
            SetupOutcome::Failed => {
                warn!("[ONBOARD] setup step failed; terminating");
                self.transition(OnboardingState::Failed);
                Ok(Outcome::SetupFailed)
            }
        }
    }

    /// Local import path: stamp the owner identity, run the pipeline on a
    /// worker thread, forward its progress, settle, finalize.
    async fn import_local(&mut self, upload_after: bool) -> OnboardingResult<Outcome> {
        self.transition(OnboardingState::ImportingLocal);

        {
            let name = self.hooks.profile.owner_name();
            let phone = self.hooks.profile.phone_number();
            self.ctx.account.lock().unwrap().set_identity(&name, &phone);
        }

        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
        let pipeline =
            ImportPipeline::new(self.ctx.store_path.clone(), self.ctx.cipher.clone());
        let provider = self.hooks.provider.clone();
        let worker =
            tokio::task::spawn_blocking(move || pipeline.run(provider.as_ref(), &progress_tx));

        while let Some(progress) = progress_rx.recv().await {
            let _ = self.event_tx.send(OnboardingEvent::Progress(progress));
        }

        let summary = worker
            .await
            .map_err(|e| OnboardingError::ImportPanicked(e.to_string()))??;

        tokio::time::sleep(self.config.settle_delay).await;
        self.finalize(upload_after, Some(summary))
    }

    /// Network sync path: the external download job fills the store; no
    /// local import and no settling delay.
    async fn download_remote(&mut self) -> OnboardingResult<Outcome> {
        self.transition(OnboardingState::DownloadingRemote);
        let finished = self.hooks.jobs.start_download();
        // One-shot completion signal; the receiver is dropped on every exit
        // path, which tears the listener down.
        finished
            .await
            .map_err(|_| OnboardingError::DownloadInterrupted)?;
        info!("[ONBOARD] remote download finished");
        self.finalize(false, None)
    }

    fn finalize(
        &mut self,
        upload_after: bool,
        summary: Option<ImportSummary>,
    ) -> OnboardingResult<Outcome> {
        self.transition(OnboardingState::Finalizing);

        self.hooks
            .config_store
            .set_first_run_complete()
            .map_err(|e| OnboardingError::Config(e.to_string()))?;

        let next = if self.hooks.profile.has_touchscreen() {
            NextScreen::Conversations
        } else {
            NextScreen::Leanback
        };

        if upload_after {
            info!("[ONBOARD] scheduling device-sync upload");
            self.hooks.jobs.start_upload();
        }

        self.transition(OnboardingState::Done);
        Ok(Outcome::Completed { next, summary })
    }

    fn transition(&mut self, next: OnboardingState) {
        debug!("[ONBOARD] {:?} -> {:?}", self.state, next);
        self.state = next;
        let _ = self.event_tx.send(OnboardingEvent::StateChanged(next));
    }
}
