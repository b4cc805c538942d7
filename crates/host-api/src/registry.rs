//! # Service Registry
//!
//! The bag of services a host hands to a product at construction time.
//!
//! A [`ServiceHandle`] is a tagged union: the variant says which capability
//! the service actually implements. Products check that the variant matches
//! the [`ServiceKey`] it was filed under before using it.
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::new()
//!     .with(ServiceKey::Config, ServiceHandle::Config(config))
//!     .with(ServiceKey::Log, ServiceHandle::Log(logger));
//! ```

use crate::keys::ServiceKey;
use crate::services::{
    BotService, ChannelService, CloudService, ClusterService, ConfigService, FileInfoStoreService,
    FilestoreService, HooksService, KvStoreService, LicenseService, LogService, PermissionService,
    PostService, PreferencesService, RouterService, StoreService, SystemService, TeamService,
    UserService,
};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A host-provided service, tagged with the capability it implements.
#[derive(Clone)]
pub enum ServiceHandle {
    Team(Arc<dyn TeamService>),
    Channel(Arc<dyn ChannelService>),
    User(Arc<dyn UserService>),
    Post(Arc<dyn PostService>),
    Permissions(Arc<dyn PermissionService>),
    Bot(Arc<dyn BotService>),
    Cluster(Arc<dyn ClusterService>),
    Config(Arc<dyn ConfigService>),
    Log(Arc<dyn LogService>),
    License(Arc<dyn LicenseService>),
    Filestore(Arc<dyn FilestoreService>),
    FileInfoStore(Arc<dyn FileInfoStoreService>),
    Router(Arc<dyn RouterService>),
    Cloud(Arc<dyn CloudService>),
    KvStore(Arc<dyn KvStoreService>),
    Store(Arc<dyn StoreService>),
    System(Arc<dyn SystemService>),
    Preferences(Arc<dyn PreferencesService>),
    Hooks(Arc<dyn HooksService>),
    /// A service with no typed contract known to this crate.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl ServiceHandle {
    /// Name of the capability this handle implements.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Team(_) => "team",
            Self::Channel(_) => "channel",
            Self::User(_) => "user",
            Self::Post(_) => "post",
            Self::Permissions(_) => "permissions",
            Self::Bot(_) => "bot",
            Self::Cluster(_) => "cluster",
            Self::Config(_) => "config",
            Self::Log(_) => "log",
            Self::License(_) => "license",
            Self::Filestore(_) => "filestore",
            Self::FileInfoStore(_) => "fileinfostore",
            Self::Router(_) => "router",
            Self::Cloud(_) => "cloud",
            Self::KvStore(_) => "kvstore",
            Self::Store(_) => "store",
            Self::System(_) => "system",
            Self::Preferences(_) => "preferences",
            Self::Hooks(_) => "hooks",
            Self::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceHandle::{}", self.kind())
    }
}

/// Services supplied by the host, keyed by capability.
///
/// Iteration follows key order, so anything walking the registry sees the
/// same sequence on every run.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<ServiceKey, ServiceHandle>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a service, builder style.
    #[must_use]
    pub fn with(mut self, key: ServiceKey, handle: ServiceHandle) -> Self {
        self.insert(key, handle);
        self
    }

    /// Add or replace a service. Returns the replaced handle.
    pub fn insert(&mut self, key: ServiceKey, handle: ServiceHandle) -> Option<ServiceHandle> {
        self.services.insert(key, handle)
    }

    /// Remove a service.
    pub fn remove(&mut self, key: &ServiceKey) -> Option<ServiceHandle> {
        self.services.remove(key)
    }

    pub fn get(&self, key: &ServiceKey) -> Option<&ServiceHandle> {
        self.services.get(key)
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.services.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceKey, &ServiceHandle)> {
        self.services.iter()
    }

    /// Keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.services.keys()
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.services.iter().map(|(k, v)| (k.to_string(), v.kind())))
            .finish()
    }
}
