//! Shared fixtures for the boards product integration tests.
//!
//! - [`FakeHost`] implements every capability trait in memory and records
//!   hook registrations and log lines.
//! - [`RecordingApp`] is a boards app that records every call it receives.
//!
//! Both write to one [`Journal`] so tests can assert cross-component ordering.

#![allow(dead_code)]

use boards_product::{AppError, AppResult, BoardsApp, BoardsAppFactory, ServiceApi};
use host_api::{
    Bot, BotService, Channel, ChannelService, CloudService, ClusterEventOptions, ClusterService,
    ComplianceExporter, ConfigService, ExportCursor, ExportPage, FileInfo, FileInfoStoreService,
    FilestoreService, HookError, HookResult, HooksService, HostConfig, KvStoreService, License,
    LicenseService, LogField, LogLevel, LogService, PermissionService, PluginClusterEvent,
    PluginContext, Post, PostHookOutcome, PostService, Preference, PreferencesService,
    ProductHooks, ProductLimits, RouterService, ServiceError, ServiceHandle, ServiceKey,
    ServiceRegistry, ServiceResult, StoreService, SystemService, Team, TeamMember, TeamService,
    User, UserService, WebSocketRequest,
};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// JOURNAL
// =============================================================================

/// Ordered record of host and app events.
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries.lock().iter().position(|e| e == entry)
    }
}

// =============================================================================
// FAKE HOST
// =============================================================================

/// In-memory host implementing every capability.
pub struct FakeHost {
    journal: Arc<Journal>,
    config: RwLock<HostConfig>,
    logs: Mutex<Vec<(LogLevel, String, Vec<LogField>)>>,
    hooks: Mutex<BTreeMap<String, Arc<dyn ProductHooks>>>,
    reject_registration: AtomicBool,
    reject_unregistration: AtomicBool,
    kv: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl FakeHost {
    pub fn new(journal: Arc<Journal>, boards_enabled: bool) -> Arc<Self> {
        let mut config = HostConfig::default();
        config.feature_flags.boards_product = boards_enabled;
        Arc::new(Self {
            journal,
            config: RwLock::new(config),
            logs: Mutex::new(Vec::new()),
            hooks: Mutex::new(BTreeMap::new()),
            reject_registration: AtomicBool::new(false),
            reject_unregistration: AtomicBool::new(false),
            kv: Mutex::new(BTreeMap::new()),
        })
    }

    pub fn set_boards_enabled(&self, enabled: bool) {
        self.config.write().feature_flags.boards_product = enabled;
    }

    pub fn reject_registration(&self) {
        self.reject_registration.store(true, Ordering::SeqCst);
    }

    pub fn reject_unregistration(&self) {
        self.reject_unregistration.store(true, Ordering::SeqCst);
    }

    /// Hook receiver registered under `product_id`, if any.
    pub fn registered(&self, product_id: &str) -> Option<Arc<dyn ProductHooks>> {
        self.hooks.lock().get(product_id).cloned()
    }

    pub fn log_messages(&self) -> Vec<String> {
        self.logs.lock().iter().map(|(_, m, _)| m.clone()).collect()
    }

    pub fn logs(&self) -> Vec<(LogLevel, String, Vec<LogField>)> {
        self.logs.lock().clone()
    }
}

impl TeamService for FakeHost {
    fn get_team(&self, team_id: &str) -> ServiceResult<Team> {
        Err(ServiceError::NotFound(team_id.to_string()))
    }

    fn get_member(&self, team_id: &str, user_id: &str) -> ServiceResult<TeamMember> {
        Ok(TeamMember {
            team_id: team_id.to_string(),
            user_id: user_id.to_string(),
            ..TeamMember::default()
        })
    }
}

impl ChannelService for FakeHost {
    fn get_channel(&self, channel_id: &str) -> ServiceResult<Channel> {
        Err(ServiceError::NotFound(channel_id.to_string()))
    }

    fn get_direct_channel(&self, user_id_1: &str, user_id_2: &str) -> ServiceResult<Channel> {
        Err(ServiceError::NotFound(format!("{user_id_1}__{user_id_2}")))
    }
}

impl UserService for FakeHost {
    fn get_user(&self, user_id: &str) -> ServiceResult<User> {
        Err(ServiceError::NotFound(user_id.to_string()))
    }

    fn get_user_by_username(&self, username: &str) -> ServiceResult<User> {
        Err(ServiceError::NotFound(username.to_string()))
    }
}

impl PostService for FakeHost {
    fn create_post(&self, post: Post) -> ServiceResult<Post> {
        Ok(post)
    }

    fn get_post(&self, post_id: &str) -> ServiceResult<Post> {
        Err(ServiceError::NotFound(post_id.to_string()))
    }
}

impl PermissionService for FakeHost {
    fn has_permission_to(&self, _user_id: &str, _permission: &str) -> bool {
        true
    }

    fn has_permission_to_team(&self, _user_id: &str, _team_id: &str, _permission: &str) -> bool {
        true
    }
}

impl BotService for FakeHost {
    fn ensure_bot(&self, _product_id: &str, bot: Bot) -> ServiceResult<String> {
        Ok(bot.user_id)
    }
}

impl ClusterService for FakeHost {
    fn publish_plugin_cluster_event(
        &self,
        _product_id: &str,
        _event: PluginClusterEvent,
        _options: ClusterEventOptions,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

impl ConfigService for FakeHost {
    fn config(&self) -> Arc<HostConfig> {
        Arc::new(self.config.read().clone())
    }
}

impl LogService for FakeHost {
    fn log(&self, level: LogLevel, message: &str, fields: &[LogField]) {
        self.logs
            .lock()
            .push((level, message.to_string(), fields.to_vec()));
    }
}

impl LicenseService for FakeHost {
    fn get_license(&self) -> Option<License> {
        None
    }
}

impl FilestoreService for FakeHost {
    fn read_file(&self, path: &str) -> ServiceResult<Vec<u8>> {
        Err(ServiceError::NotFound(path.to_string()))
    }

    fn write_file(&self, _path: &str, data: &[u8]) -> ServiceResult<u64> {
        Ok(data.len() as u64)
    }

    fn remove_file(&self, _path: &str) -> ServiceResult<()> {
        Ok(())
    }
}

impl FileInfoStoreService for FakeHost {
    fn get_file_info(&self, file_id: &str) -> ServiceResult<FileInfo> {
        Err(ServiceError::NotFound(file_id.to_string()))
    }
}

impl RouterService for FakeHost {
    fn register_router(&self, _product_id: &str, _prefix: &str) -> ServiceResult<()> {
        Ok(())
    }
}

impl CloudService for FakeHost {
    fn get_cloud_limits(&self) -> ServiceResult<ProductLimits> {
        Ok(ProductLimits::default())
    }
}

impl KvStoreService for FakeHost {
    fn set(&self, product_id: &str, key: &str, value: &[u8]) -> ServiceResult<()> {
        self.kv
            .lock()
            .insert((product_id.to_string(), key.to_string()), value.to_vec());
        Ok(())
    }

    fn get(&self, product_id: &str, key: &str) -> ServiceResult<Option<Vec<u8>>> {
        Ok(self
            .kv
            .lock()
            .get(&(product_id.to_string(), key.to_string()))
            .cloned())
    }

    fn delete(&self, product_id: &str, key: &str) -> ServiceResult<()> {
        self.kv
            .lock()
            .remove(&(product_id.to_string(), key.to_string()));
        Ok(())
    }
}

impl StoreService for FakeHost {
    fn driver_name(&self) -> String {
        "postgres".to_string()
    }

    fn master_dsn(&self) -> String {
        "postgres://localhost/boards_test".to_string()
    }
}

impl SystemService for FakeHost {
    fn get_diagnostic_id(&self) -> String {
        "test-diagnostic-id".to_string()
    }

    fn server_version(&self) -> String {
        "9.0.0".to_string()
    }
}

impl PreferencesService for FakeHost {
    fn get_preferences_for_user(&self, _user_id: &str) -> ServiceResult<Vec<Preference>> {
        Ok(Vec::new())
    }

    fn update_preferences_for_user(
        &self,
        _user_id: &str,
        _preferences: Vec<Preference>,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

impl HooksService for FakeHost {
    fn register_hooks(&self, product_id: &str, hooks: Arc<dyn ProductHooks>) -> ServiceResult<()> {
        if self.reject_registration.load(Ordering::SeqCst) {
            return Err(ServiceError::Rejected(format!(
                "hooks for {product_id} refused"
            )));
        }
        self.journal.push(format!("host:register_hooks:{product_id}"));
        self.hooks.lock().insert(product_id.to_string(), hooks);
        Ok(())
    }

    fn unregister_hooks(&self, product_id: &str) -> ServiceResult<()> {
        if self.reject_unregistration.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("hooks service down".to_string()));
        }
        self.journal.push(format!("host:unregister_hooks:{product_id}"));
        self.hooks.lock().remove(product_id);
        Ok(())
    }
}

// =============================================================================
// REGISTRIES
// =============================================================================

/// Registry with every known capability backed by `host`.
pub fn full_registry(host: &Arc<FakeHost>) -> ServiceRegistry {
    ServiceRegistry::new()
        .with(ServiceKey::Team, ServiceHandle::Team(host.clone()))
        .with(ServiceKey::Channel, ServiceHandle::Channel(host.clone()))
        .with(ServiceKey::User, ServiceHandle::User(host.clone()))
        .with(ServiceKey::Post, ServiceHandle::Post(host.clone()))
        .with(ServiceKey::Permissions, ServiceHandle::Permissions(host.clone()))
        .with(ServiceKey::Bot, ServiceHandle::Bot(host.clone()))
        .with(ServiceKey::Cluster, ServiceHandle::Cluster(host.clone()))
        .with(ServiceKey::Config, ServiceHandle::Config(host.clone()))
        .with(ServiceKey::Log, ServiceHandle::Log(host.clone()))
        .with(ServiceKey::License, ServiceHandle::License(host.clone()))
        .with(ServiceKey::Filestore, ServiceHandle::Filestore(host.clone()))
        .with(ServiceKey::FileInfoStore, ServiceHandle::FileInfoStore(host.clone()))
        .with(ServiceKey::Router, ServiceHandle::Router(host.clone()))
        .with(ServiceKey::Cloud, ServiceHandle::Cloud(host.clone()))
        .with(ServiceKey::KvStore, ServiceHandle::KvStore(host.clone()))
        .with(ServiceKey::Store, ServiceHandle::Store(host.clone()))
        .with(ServiceKey::System, ServiceHandle::System(host.clone()))
        .with(ServiceKey::Preferences, ServiceHandle::Preferences(host.clone()))
        .with(ServiceKey::Hooks, ServiceHandle::Hooks(host.clone()))
}

/// Registry with only configuration and logging.
pub fn minimal_registry(host: &Arc<FakeHost>) -> ServiceRegistry {
    ServiceRegistry::new()
        .with(ServiceKey::Config, ServiceHandle::Config(host.clone()))
        .with(ServiceKey::Log, ServiceHandle::Log(host.clone()))
}

// =============================================================================
// RECORDING APP
// =============================================================================

/// Exporter that writes a fixed payload.
pub struct FixedExporter {
    pub payload: Vec<u8>,
}

impl ComplianceExporter for FixedExporter {
    fn name(&self) -> &str {
        "boards-fixed"
    }

    fn write_batch(&mut self, out: &mut dyn io::Write) -> io::Result<u64> {
        out.write_all(&self.payload)?;
        Ok(self.payload.len() as u64)
    }
}

/// Boards app that records every call.
pub struct RecordingApp {
    journal: Arc<Journal>,
    calls: Mutex<Vec<String>>,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    fail_configuration: AtomicBool,
    post_outcome: Mutex<Option<PostHookOutcome>>,
    retention_count: Mutex<i64>,
    constructions: AtomicUsize,
    received_api: Mutex<Option<ServiceApi>>,
}

impl RecordingApp {
    pub fn new(journal: Arc<Journal>) -> Arc<Self> {
        Arc::new(Self {
            journal,
            calls: Mutex::new(Vec::new()),
            fail_start: AtomicBool::new(false),
            fail_stop: AtomicBool::new(false),
            fail_configuration: AtomicBool::new(false),
            post_outcome: Mutex::new(None),
            retention_count: Mutex::new(0),
            constructions: AtomicUsize::new(0),
            received_api: Mutex::new(None),
        })
    }

    pub fn fail_start(&self) {
        self.fail_start.store(true, Ordering::SeqCst);
    }

    pub fn allow_start(&self) {
        self.fail_start.store(false, Ordering::SeqCst);
    }

    pub fn fail_stop(&self) {
        self.fail_stop.store(true, Ordering::SeqCst);
    }

    pub fn fail_configuration(&self) {
        self.fail_configuration.store(true, Ordering::SeqCst);
    }

    /// Outcome returned from both post interception hooks.
    pub fn respond_to_posts_with(&self, outcome: PostHookOutcome) {
        *self.post_outcome.lock() = Some(outcome);
    }

    pub fn set_retention_count(&self, count: i64) {
        *self.retention_count.lock() = count;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    pub fn received_api(&self) -> Option<ServiceApi> {
        self.received_api.lock().clone()
    }

    fn record(&self, call: String) {
        self.journal.push(format!("app:{call}"));
        self.calls.lock().push(call);
    }
}

impl BoardsApp for RecordingApp {
    fn start(&self) -> AppResult<()> {
        self.record("start".to_string());
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(AppError::Storage("database unreachable".to_string()));
        }
        Ok(())
    }

    fn stop(&self) -> AppResult<()> {
        self.record("stop".to_string());
        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(AppError::Other("shutdown timed out".to_string()));
        }
        Ok(())
    }

    fn on_configuration_change(&self) -> HookResult<()> {
        self.record("on_configuration_change".to_string());
        if self.fail_configuration.load(Ordering::SeqCst) {
            return Err(HookError::new("invalid boards settings"));
        }
        Ok(())
    }

    fn on_web_socket_connect(&self, web_conn_id: &str, user_id: &str) {
        self.record(format!("on_web_socket_connect:{web_conn_id}:{user_id}"));
    }

    fn on_web_socket_disconnect(&self, web_conn_id: &str, user_id: &str) {
        self.record(format!("on_web_socket_disconnect:{web_conn_id}:{user_id}"));
    }

    fn web_socket_message_has_been_posted(
        &self,
        web_conn_id: &str,
        user_id: &str,
        request: &WebSocketRequest,
    ) {
        self.record(format!(
            "web_socket_message_has_been_posted:{web_conn_id}:{user_id}:{}",
            request.action
        ));
    }

    fn on_plugin_cluster_event(&self, _ctx: &PluginContext, event: &PluginClusterEvent) {
        self.record(format!("on_plugin_cluster_event:{}", event.id));
    }

    fn message_will_be_posted(&self, _ctx: &PluginContext, post: Post) -> PostHookOutcome {
        self.record(format!("message_will_be_posted:{}", post.id));
        self.post_outcome
            .lock()
            .clone()
            .unwrap_or_else(|| PostHookOutcome::pass_through(post))
    }

    fn message_will_be_updated(
        &self,
        _ctx: &PluginContext,
        new_post: Post,
        old_post: &Post,
    ) -> PostHookOutcome {
        self.record(format!("message_will_be_updated:{}:{}", new_post.id, old_post.id));
        self.post_outcome
            .lock()
            .clone()
            .unwrap_or_else(|| PostHookOutcome::pass_through(new_post))
    }

    fn on_cloud_limits_updated(&self, limits: &ProductLimits) {
        let cards = limits.boards.and_then(|b| b.cards).unwrap_or(-1);
        self.record(format!("on_cloud_limits_updated:{cards}"));
    }

    fn run_data_retention(&self, now_millis: i64, batch_size: i64) -> HookResult<i64> {
        self.record(format!("run_data_retention:{now_millis}:{batch_size}"));
        Ok(*self.retention_count.lock())
    }

    fn exporter(&self, cursor: ExportCursor, limit: usize) -> HookResult<ExportPage> {
        self.record(format!("exporter:{limit}"));
        let mut next = cursor;
        next.insert("offset".to_string(), serde_json::json!(limit));
        Ok(ExportPage {
            exporter: Some(Box::new(FixedExporter {
                payload: b"board,card\n".to_vec(),
            })),
            cursor: Some(next),
        })
    }
}

// =============================================================================
// FACTORIES
// =============================================================================

/// Factory handing out `app` and recording the services it was given.
pub fn recording_factory(app: &Arc<RecordingApp>) -> BoardsAppFactory {
    let app = Arc::clone(app);
    Arc::new(move |api: ServiceApi| -> AppResult<Arc<dyn BoardsApp>> {
        app.constructions.fetch_add(1, Ordering::SeqCst);
        *app.received_api.lock() = Some(api);
        Ok(app.clone() as Arc<dyn BoardsApp>)
    })
}

/// Factory that always fails.
pub fn failing_factory(error: AppError) -> BoardsAppFactory {
    Arc::new(move |_api: ServiceApi| -> AppResult<Arc<dyn BoardsApp>> { Err(error.clone()) })
}

/// Journal, host, app and full registry with the feature flag set to `enabled`.
pub fn fixture(enabled: bool) -> (Arc<Journal>, Arc<FakeHost>, Arc<RecordingApp>, ServiceRegistry) {
    let journal = Journal::new();
    let host = FakeHost::new(journal.clone(), enabled);
    let app = RecordingApp::new(journal.clone());
    let registry = full_registry(&host);
    (journal, host, app, registry)
}
