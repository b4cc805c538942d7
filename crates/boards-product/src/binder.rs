//! # Capability Binder
//!
//! Turns the host's [`ServiceRegistry`] into typed slots.
//!
//! ## Rules
//!
//! 1. Entries are visited in key order.
//! 2. A known key must carry the handle variant of the same capability,
//!    otherwise binding fails with `CapabilityMismatch` naming the key.
//!    Nothing partially bound escapes.
//! 3. `Custom` keys are ignored (hosts may supply more than we consume).
//! 4. No capability method is called while binding. The host logger is
//!    wrapped in a [`ScopedLogger`], not asked for a child logger.

use crate::error::{ProductError, ProductResult};
use crate::logging::ScopedLogger;
use crate::BOARDS_PRODUCT_NAME;
use host_api::{
    BotService, ChannelService, CloudService, ClusterService, ConfigService, FileInfoStoreService,
    FilestoreService, HooksService, KvStoreService, LicenseService, LogService, PermissionService,
    PostService, PreferencesService, RouterService, ServiceHandle, ServiceKey, ServiceRegistry,
    StoreService, SystemService, TeamService, UserService,
};
use std::sync::Arc;
use tracing::debug;

/// One optional slot per capability the adapter recognizes.
#[derive(Clone)]
pub struct BoundServices {
    pub team: Option<Arc<dyn TeamService>>,
    pub channel: Option<Arc<dyn ChannelService>>,
    pub user: Option<Arc<dyn UserService>>,
    pub post: Option<Arc<dyn PostService>>,
    pub permissions: Option<Arc<dyn PermissionService>>,
    pub bot: Option<Arc<dyn BotService>>,
    pub cluster: Option<Arc<dyn ClusterService>>,
    pub config: Option<Arc<dyn ConfigService>>,
    pub log: Option<Arc<dyn LogService>>,
    pub license: Option<Arc<dyn LicenseService>>,
    pub filestore: Option<Arc<dyn FilestoreService>>,
    pub file_info_store: Option<Arc<dyn FileInfoStoreService>>,
    pub router: Option<Arc<dyn RouterService>>,
    pub cloud: Option<Arc<dyn CloudService>>,
    pub kv_store: Option<Arc<dyn KvStoreService>>,
    pub store: Option<Arc<dyn StoreService>>,
    pub system: Option<Arc<dyn SystemService>>,
    pub preferences: Option<Arc<dyn PreferencesService>>,
    pub hooks: Option<Arc<dyn HooksService>>,
    /// Host logger scoped to the boards component.
    pub logger: ScopedLogger,
}

impl BoundServices {
    fn empty() -> Self {
        Self {
            team: None,
            channel: None,
            user: None,
            post: None,
            permissions: None,
            bot: None,
            cluster: None,
            config: None,
            log: None,
            license: None,
            filestore: None,
            file_info_store: None,
            router: None,
            cloud: None,
            kv_store: None,
            store: None,
            system: None,
            preferences: None,
            hooks: None,
            logger: ScopedLogger::new(None, BOARDS_PRODUCT_NAME),
        }
    }

    /// Bind every recognized entry of `registry`.
    pub fn bind(registry: &ServiceRegistry) -> ProductResult<Self> {
        let mut bound = Self::empty();

        for (key, handle) in registry.iter() {
            match (key, handle) {
                (ServiceKey::Team, ServiceHandle::Team(s)) => bound.team = Some(Arc::clone(s)),
                (ServiceKey::Channel, ServiceHandle::Channel(s)) => {
                    bound.channel = Some(Arc::clone(s));
                }
                (ServiceKey::User, ServiceHandle::User(s)) => bound.user = Some(Arc::clone(s)),
                (ServiceKey::Post, ServiceHandle::Post(s)) => bound.post = Some(Arc::clone(s)),
                (ServiceKey::Permissions, ServiceHandle::Permissions(s)) => {
                    bound.permissions = Some(Arc::clone(s));
                }
                (ServiceKey::Bot, ServiceHandle::Bot(s)) => bound.bot = Some(Arc::clone(s)),
                (ServiceKey::Cluster, ServiceHandle::Cluster(s)) => {
                    bound.cluster = Some(Arc::clone(s));
                }
                (ServiceKey::Config, ServiceHandle::Config(s)) => {
                    bound.config = Some(Arc::clone(s));
                }
                (ServiceKey::Log, ServiceHandle::Log(s)) => {
                    bound.logger = ScopedLogger::new(Some(Arc::clone(s)), BOARDS_PRODUCT_NAME);
                    bound.log = Some(Arc::clone(s));
                }
                (ServiceKey::License, ServiceHandle::License(s)) => {
                    bound.license = Some(Arc::clone(s));
                }
                (ServiceKey::Filestore, ServiceHandle::Filestore(s)) => {
                    bound.filestore = Some(Arc::clone(s));
                }
                (ServiceKey::FileInfoStore, ServiceHandle::FileInfoStore(s)) => {
                    bound.file_info_store = Some(Arc::clone(s));
                }
                (ServiceKey::Router, ServiceHandle::Router(s)) => {
                    bound.router = Some(Arc::clone(s));
                }
                (ServiceKey::Cloud, ServiceHandle::Cloud(s)) => bound.cloud = Some(Arc::clone(s)),
                (ServiceKey::KvStore, ServiceHandle::KvStore(s)) => {
                    bound.kv_store = Some(Arc::clone(s));
                }
                (ServiceKey::Store, ServiceHandle::Store(s)) => bound.store = Some(Arc::clone(s)),
                (ServiceKey::System, ServiceHandle::System(s)) => {
                    bound.system = Some(Arc::clone(s));
                }
                (ServiceKey::Preferences, ServiceHandle::Preferences(s)) => {
                    bound.preferences = Some(Arc::clone(s));
                }
                (ServiceKey::Hooks, ServiceHandle::Hooks(s)) => bound.hooks = Some(Arc::clone(s)),
                (ServiceKey::Custom(name), _) => {
                    debug!(product = BOARDS_PRODUCT_NAME, key = %name, "Ignoring unknown service key");
                }
                (key, handle) => {
                    return Err(ProductError::CapabilityMismatch {
                        key: key.clone(),
                        found: handle.kind(),
                    });
                }
            }
        }

        Ok(bound)
    }

    /// Whether the slot for `key` is filled.
    pub fn is_bound(&self, key: &ServiceKey) -> bool {
        match key {
            ServiceKey::Team => self.team.is_some(),
            ServiceKey::Channel => self.channel.is_some(),
            ServiceKey::User => self.user.is_some(),
            ServiceKey::Post => self.post.is_some(),
            ServiceKey::Permissions => self.permissions.is_some(),
            ServiceKey::Bot => self.bot.is_some(),
            ServiceKey::Cluster => self.cluster.is_some(),
            ServiceKey::Config => self.config.is_some(),
            ServiceKey::Log => self.log.is_some(),
            ServiceKey::License => self.license.is_some(),
            ServiceKey::Filestore => self.filestore.is_some(),
            ServiceKey::FileInfoStore => self.file_info_store.is_some(),
            ServiceKey::Router => self.router.is_some(),
            ServiceKey::Cloud => self.cloud.is_some(),
            ServiceKey::KvStore => self.kv_store.is_some(),
            ServiceKey::Store => self.store.is_some(),
            ServiceKey::System => self.system.is_some(),
            ServiceKey::Preferences => self.preferences.is_some(),
            ServiceKey::Hooks => self.hooks.is_some(),
            ServiceKey::Custom(_) => false,
        }
    }

    /// Keys with a filled slot, in key order.
    pub fn bound_keys(&self) -> Vec<ServiceKey> {
        ServiceKey::all()
            .into_iter()
            .filter(|key| self.is_bound(key))
            .collect()
    }

    /// The configuration service, required before the feature gate can be read.
    pub fn require_config(&self) -> ProductResult<&Arc<dyn ConfigService>> {
        self.config.as_ref().ok_or(ProductError::MissingCapability {
            key: ServiceKey::Config,
        })
    }
}
