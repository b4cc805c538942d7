//! # Service API
//!
//! The services handed to the boards app. Unlike [`BoundServices`], every
//! capability the app depends on is present, so the app never has to handle
//! a missing service.

use crate::binder::BoundServices;
use crate::error::{ProductError, ProductResult};
use crate::logging::ScopedLogger;
use crate::BOARDS_PRODUCT_ID;
use host_api::{
    BotService, ChannelService, CloudService, ClusterService, ConfigService, FileInfoStoreService,
    FilestoreService, HooksService, KvStoreService, LicenseService, LogService, PermissionService,
    PostService, PreferencesService, RouterService, ServiceKey, StoreService, SystemService,
    TeamService, UserService,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Capabilities the boards app cannot run without, as declared to the host.
pub const BOARDS_DEPENDENCIES: &[ServiceKey] = &[
    ServiceKey::Team,
    ServiceKey::Channel,
    ServiceKey::User,
    ServiceKey::Post,
    ServiceKey::Bot,
    ServiceKey::Cluster,
    ServiceKey::Config,
    ServiceKey::Log,
    ServiceKey::License,
    ServiceKey::Filestore,
    ServiceKey::FileInfoStore,
    ServiceKey::Router,
    ServiceKey::Cloud,
    ServiceKey::KvStore,
    ServiceKey::Store,
    ServiceKey::System,
    ServiceKey::Preferences,
];

/// Declared dependency set.
pub fn dependencies() -> BTreeSet<ServiceKey> {
    BOARDS_DEPENDENCIES.iter().cloned().collect()
}

fn require<T: ?Sized>(slot: &Option<Arc<T>>, key: ServiceKey) -> ProductResult<Arc<T>> {
    slot.clone().ok_or(ProductError::MissingCapability { key })
}

/// Services available to the boards app.
#[derive(Clone)]
pub struct ServiceApi {
    /// Product id to use for hook, cluster and KV routing.
    pub product_id: &'static str,
    pub team: Arc<dyn TeamService>,
    pub channel: Arc<dyn ChannelService>,
    pub user: Arc<dyn UserService>,
    pub post: Arc<dyn PostService>,
    /// Not every host supplies permission checks.
    pub permissions: Option<Arc<dyn PermissionService>>,
    pub bot: Arc<dyn BotService>,
    pub cluster: Arc<dyn ClusterService>,
    pub config: Arc<dyn ConfigService>,
    pub log: Arc<dyn LogService>,
    pub license: Arc<dyn LicenseService>,
    pub filestore: Arc<dyn FilestoreService>,
    pub file_info_store: Arc<dyn FileInfoStoreService>,
    pub router: Arc<dyn RouterService>,
    pub cloud: Arc<dyn CloudService>,
    pub kv_store: Arc<dyn KvStoreService>,
    pub store: Arc<dyn StoreService>,
    pub system: Arc<dyn SystemService>,
    pub preferences: Arc<dyn PreferencesService>,
    pub hooks: Arc<dyn HooksService>,
    /// Host logger scoped to the boards component.
    pub logger: ScopedLogger,
}

impl ServiceApi {
    /// Build from bound services; fails on the first missing dependency in
    /// key order. `Hooks` is required too since starting the app needs it.
    pub fn from_bound(bound: &BoundServices) -> ProductResult<Self> {
        Ok(Self {
            product_id: BOARDS_PRODUCT_ID,
            team: require(&bound.team, ServiceKey::Team)?,
            channel: require(&bound.channel, ServiceKey::Channel)?,
            user: require(&bound.user, ServiceKey::User)?,
            post: require(&bound.post, ServiceKey::Post)?,
            permissions: bound.permissions.clone(),
            bot: require(&bound.bot, ServiceKey::Bot)?,
            cluster: require(&bound.cluster, ServiceKey::Cluster)?,
            config: require(&bound.config, ServiceKey::Config)?,
            log: require(&bound.log, ServiceKey::Log)?,
            license: require(&bound.license, ServiceKey::License)?,
            filestore: require(&bound.filestore, ServiceKey::Filestore)?,
            file_info_store: require(&bound.file_info_store, ServiceKey::FileInfoStore)?,
            router: require(&bound.router, ServiceKey::Router)?,
            cloud: require(&bound.cloud, ServiceKey::Cloud)?,
            kv_store: require(&bound.kv_store, ServiceKey::KvStore)?,
            store: require(&bound.store, ServiceKey::Store)?,
            system: require(&bound.system, ServiceKey::System)?,
            preferences: require(&bound.preferences, ServiceKey::Preferences)?,
            hooks: require(&bound.hooks, ServiceKey::Hooks)?,
            logger: bound.logger.clone(),
        })
    }
}
