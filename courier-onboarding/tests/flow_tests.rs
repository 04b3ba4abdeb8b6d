use async_trait::async_trait;
use courier_crypto::PassthroughCipher;
use courier_import::{DeviceProvider, ImportProgress, ProviderError, ProviderResult};
use courier_onboarding::{
    Collaborators, ConfigStore, DeviceProfile, NextScreen, OnboardingConfig, OnboardingContext,
    OnboardingEvent, OnboardingFlow, OnboardingState, Outcome, PermissionGate, SetupFlow,
    SetupOutcome, SyncJobs,
};
use courier_storage::{Contact, Conversation, MessageStore, SCHEMA_VERSION};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

// ── Mock collaborators ──────────────────────────────────────────

struct Permissions {
    granted: bool,
    grant_on_request: bool,
    requests: AtomicUsize,
}

impl Permissions {
    fn granted() -> Self {
        Self { granted: true, grant_on_request: false, requests: AtomicUsize::new(0) }
    }

    fn denied() -> Self {
        Self { granted: false, grant_on_request: false, requests: AtomicUsize::new(0) }
    }

    fn granted_on_request() -> Self {
        Self { granted: false, grant_on_request: true, requests: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl PermissionGate for Permissions {
    fn already_granted(&self) -> bool {
        self.granted
    }

    async fn request(&self) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.grant_on_request
    }
}

struct ScriptedSetup {
    outcome: SetupOutcome,
    runs: AtomicUsize,
}

impl ScriptedSetup {
    fn new(outcome: SetupOutcome) -> Self {
        Self { outcome, runs: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl SetupFlow for ScriptedSetup {
    async fn run(&self) -> SetupOutcome {
        self.runs.fetch_add(1, Ordering::SeqCst);
        self.outcome
    }
}

struct RecordingJobs {
    uploads: AtomicUsize,
    download_sender: Mutex<Option<oneshot::Sender<()>>>,
}

impl RecordingJobs {
    fn new() -> Self {
        Self { uploads: AtomicUsize::new(0), download_sender: Mutex::new(None) }
    }
}

impl SyncJobs for RecordingJobs {
    fn start_download(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        *self.download_sender.lock().unwrap() = Some(tx);
        rx
    }

    fn start_upload(&self) {
        self.uploads.fetch_add(1, Ordering::SeqCst);
    }
}

struct Profile {
    touchscreen: bool,
}

impl DeviceProfile for Profile {
    fn owner_name(&self) -> String {
        "Jess Klein".into()
    }

    fn phone_number(&self) -> String {
        "+1 (555) 867-5309".into()
    }

    fn has_touchscreen(&self) -> bool {
        self.touchscreen
    }
}

struct MemoryConfig {
    complete: AtomicBool,
}

impl MemoryConfig {
    fn new() -> Self {
        Self { complete: AtomicBool::new(false) }
    }
}

impl ConfigStore for MemoryConfig {
    fn set_first_run_complete(&self) -> anyhow::Result<()> {
        self.complete.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn first_run_complete(&self) -> bool {
        self.complete.load(Ordering::SeqCst)
    }
}

struct CountingProvider {
    conversations: usize,
    contacts: usize,
    queries: AtomicUsize,
}

impl CountingProvider {
    fn new(conversations: usize, contacts: usize) -> Self {
        Self { conversations, contacts, queries: AtomicUsize::new(0) }
    }
}

impl DeviceProvider for CountingProvider {
    fn load_conversations(&self) -> ProviderResult<Vec<Conversation>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok((0..self.conversations)
            .map(|i| Conversation::new(i as i64 + 1, &format!("555{i:04}"), &format!("Thread {i}")))
            .collect())
    }

    fn load_contacts(&self, _conversations: &[Conversation]) -> ProviderResult<Vec<Contact>> {
        Ok((0..self.contacts)
            .map(|i| Contact::new(i as i64 + 1, &format!("555{i:04}"), &format!("Person {i}")))
            .collect())
    }
}

struct BrokenProvider;

impl DeviceProvider for BrokenProvider {
    fn load_conversations(&self) -> ProviderResult<Vec<Conversation>> {
        Err(ProviderError::Conversations("provider offline".into()))
    }

    fn load_contacts(&self, _conversations: &[Conversation]) -> ProviderResult<Vec<Contact>> {
        unreachable!()
    }
}

// ── Harness ─────────────────────────────────────────────────────

struct Harness {
    ctx: Arc<OnboardingContext>,
    setup: Arc<ScriptedSetup>,
    jobs: Arc<RecordingJobs>,
    config_store: Arc<MemoryConfig>,
    provider: Arc<CountingProvider>,
    event_rx: mpsc::UnboundedReceiver<OnboardingEvent>,
    flow: Option<OnboardingFlow>,
    _dir: tempfile::TempDir,
}

fn harness(outcome: SetupOutcome) -> Harness {
    harness_with(outcome, Arc::new(Permissions::granted()), true)
}

fn harness_with(
    outcome: SetupOutcome,
    permissions: Arc<Permissions>,
    touchscreen: bool,
) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Arc::new(OnboardingContext::new(
        dir.path().join("messages.db"),
        Arc::new(PassthroughCipher),
    ));
    let setup = Arc::new(ScriptedSetup::new(outcome));
    let jobs = Arc::new(RecordingJobs::new());
    let config_store = Arc::new(MemoryConfig::new());
    let provider = Arc::new(CountingProvider::new(3, 5));

    let hooks = Collaborators {
        permissions,
        setup: setup.clone(),
        jobs: jobs.clone(),
        profile: Arc::new(Profile { touchscreen }),
        config_store: config_store.clone(),
        provider: provider.clone(),
    };
    let (flow, event_rx) = OnboardingFlow::new(
        ctx.clone(),
        hooks,
        OnboardingConfig { settle_delay: Duration::ZERO },
    );

    Harness {
        ctx,
        setup,
        jobs,
        config_store,
        provider,
        event_rx,
        flow: Some(flow),
        _dir: dir,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn drain_states(rx: &mut mpsc::UnboundedReceiver<OnboardingEvent>) -> Vec<OnboardingState> {
    let mut states = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let OnboardingEvent::StateChanged(state) = event {
            states.push(state);
        }
    }
    states
}

// ── Cancelled: local import as primary owner ────────────────────

#[tokio::test]
async fn cancelled_setup_imports_locally_as_primary_owner() {
    init_tracing();
    let mut h = harness(SetupOutcome::Cancelled);

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    let Outcome::Completed { next, summary } = outcome else {
        panic!("expected completion");
    };
    assert_eq!(next, NextScreen::Conversations);
    let summary = summary.expect("local import produces a summary");
    assert_eq!(summary.conversations, 3);
    assert_eq!(summary.contacts, 5);

    // Account is the primary owner with no remote device id, stamped with
    // the owner identity (phone normalized).
    let account = h.ctx.account.lock().unwrap().clone();
    assert!(account.primary);
    assert!(account.device_id.is_none());
    assert_eq!(account.name, "Jess Klein");
    assert_eq!(account.phone_number, "+15558675309");

    // The store holds exactly what the provider reported, at the current
    // schema version.
    let store =
        MessageStore::open(&h.ctx.store_path, Arc::new(PassthroughCipher)).unwrap();
    assert_eq!(store.version().unwrap(), SCHEMA_VERSION);
    assert_eq!(store.count_conversations().unwrap(), 3);
    assert_eq!(store.count_contacts().unwrap(), 5);

    assert!(h.config_store.first_run_complete());
    assert_eq!(h.jobs.uploads.load(Ordering::SeqCst), 0);

    assert_eq!(
        drain_states(&mut h.event_rx),
        vec![
            OnboardingState::AwaitingPermissions,
            OnboardingState::AwaitingSetupChoice,
            OnboardingState::ImportingLocal,
            OnboardingState::Finalizing,
            OnboardingState::Done,
        ]
    );
}

#[tokio::test]
async fn progress_events_are_forwarded_to_the_caller() {
    let mut h = harness(SetupOutcome::Cancelled);
    h.flow.take().unwrap().run().await.unwrap();

    let mut determinate = Vec::new();
    while let Ok(event) = h.event_rx.try_recv() {
        if let OnboardingEvent::Progress(ImportProgress::Conversations { current, total }) = event {
            determinate.push((current, total));
        }
    }
    assert_eq!(determinate, vec![(1, 3), (2, 3), (3, 3)]);
}

// ── Device sync: import then upload ─────────────────────────────

#[tokio::test]
async fn device_sync_imports_then_schedules_upload_exactly_once() {
    let mut h = harness(SetupOutcome::StartDeviceSync);

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    assert!(matches!(outcome, Outcome::Completed { summary: Some(_), .. }));

    assert_eq!(h.jobs.uploads.load(Ordering::SeqCst), 1);
    assert!(h.config_store.first_run_complete());
    // The upload path must not claim primary ownership.
    assert!(!h.ctx.account.lock().unwrap().primary);
}

// ── Network sync: external download fills the store ─────────────

#[tokio::test]
async fn network_sync_never_invokes_the_import_pipeline() {
    let mut h = harness(SetupOutcome::StartNetworkSync);
    let jobs = h.jobs.clone();

    let handle = tokio::spawn(h.flow.take().unwrap().run());

    // Wait for the flow to start the download job, then signal completion.
    let sender = loop {
        if let Some(sender) = jobs.download_sender.lock().unwrap().take() {
            break sender;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    };
    sender.send(()).unwrap();

    let outcome = handle.await.unwrap().unwrap();
    let Outcome::Completed { summary, .. } = outcome else {
        panic!("expected completion");
    };
    assert!(summary.is_none());

    assert_eq!(h.provider.queries.load(Ordering::SeqCst), 0);
    assert_eq!(h.jobs.uploads.load(Ordering::SeqCst), 0);
    assert!(h.config_store.first_run_complete());

    let states = drain_states(&mut h.event_rx);
    assert!(states.contains(&OnboardingState::DownloadingRemote));
    assert!(!states.contains(&OnboardingState::ImportingLocal));
    assert_eq!(states.last(), Some(&OnboardingState::Done));
}

#[tokio::test]
async fn dropped_download_job_fails_the_flow() {
    let mut h = harness(SetupOutcome::StartNetworkSync);
    let jobs = h.jobs.clone();

    let handle = tokio::spawn(h.flow.take().unwrap().run());

    let sender = loop {
        if let Some(sender) = jobs.download_sender.lock().unwrap().take() {
            break sender;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    };
    // The external job dies without ever signaling completion.
    drop(sender);

    assert!(handle.await.unwrap().is_err());
    assert!(!h.config_store.first_run_complete());
    assert_eq!(drain_states(&mut h.event_rx).last(), Some(&OnboardingState::Failed));
}

// ── Failure paths ───────────────────────────────────────────────

#[tokio::test]
async fn setup_failure_terminates_without_finalizing() {
    let mut h = harness(SetupOutcome::Failed);

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    assert!(matches!(outcome, Outcome::SetupFailed));

    assert!(!h.config_store.first_run_complete());
    assert_eq!(h.provider.queries.load(Ordering::SeqCst), 0);
    assert_eq!(drain_states(&mut h.event_rx).last(), Some(&OnboardingState::Failed));
}

#[tokio::test]
async fn permission_denial_halts_before_setup() {
    let mut h = harness_with(
        SetupOutcome::Cancelled,
        Arc::new(Permissions::denied()),
        true,
    );

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    assert!(matches!(outcome, Outcome::PermissionDenied));

    assert_eq!(h.setup.runs.load(Ordering::SeqCst), 0);
    assert!(!h.config_store.first_run_complete());
    assert_eq!(
        drain_states(&mut h.event_rx),
        vec![OnboardingState::AwaitingPermissions]
    );
}

#[tokio::test]
async fn permissions_granted_on_request_proceed() {
    let permissions = Arc::new(Permissions::granted_on_request());
    let mut h = harness_with(SetupOutcome::Cancelled, permissions.clone(), true);

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    assert!(matches!(outcome, Outcome::Completed { .. }));
    assert_eq!(permissions.requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn import_failure_marks_the_flow_failed() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = Arc::new(OnboardingContext::new(
        dir.path().join("messages.db"),
        Arc::new(PassthroughCipher),
    ));
    let config_store = Arc::new(MemoryConfig::new());
    let hooks = Collaborators {
        permissions: Arc::new(Permissions::granted()),
        setup: Arc::new(ScriptedSetup::new(SetupOutcome::Cancelled)),
        jobs: Arc::new(RecordingJobs::new()),
        profile: Arc::new(Profile { touchscreen: true }),
        config_store: config_store.clone(),
        provider: Arc::new(BrokenProvider),
    };
    let (flow, mut event_rx) = OnboardingFlow::new(
        ctx,
        hooks,
        OnboardingConfig { settle_delay: Duration::ZERO },
    );

    assert!(flow.run().await.is_err());
    assert!(!config_store.first_run_complete());
    assert_eq!(drain_states(&mut event_rx).last(), Some(&OnboardingState::Failed));
}

// ── Hand-off screen selection ───────────────────────────────────

#[tokio::test]
async fn touchless_hardware_routes_to_leanback() {
    let mut h = harness_with(
        SetupOutcome::Cancelled,
        Arc::new(Permissions::granted()),
        false,
    );

    let outcome = h.flow.take().unwrap().run().await.unwrap();
    let Outcome::Completed { next, .. } = outcome else {
        panic!("expected completion");
    };
    assert_eq!(next, NextScreen::Leanback);
}

// ── Config defaults ─────────────────────────────────────────────

#[test]
fn default_settle_delay_is_five_seconds() {
    assert_eq!(OnboardingConfig::default().settle_delay, Duration::from_secs(5));
}
