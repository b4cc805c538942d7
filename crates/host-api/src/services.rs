//! # Capability Services
//!
//! One trait per [`crate::ServiceKey`]. A host implements the traits it
//! supports and hands the implementations to a product through the
//! [`crate::ServiceRegistry`]. Products depend on the traits only; the host
//! owns the implementations.

use crate::errors::ServiceResult;
use crate::hooks::ProductHooks;
use crate::model::{
    Bot, Channel, ClusterEventOptions, FileInfo, HostConfig, License, PluginClusterEvent, Post,
    Preference, ProductLimits, Team, TeamMember, User,
};
use std::fmt;
use std::sync::Arc;

/// Team lookup.
pub trait TeamService: Send + Sync {
    fn get_team(&self, team_id: &str) -> ServiceResult<Team>;
    fn get_member(&self, team_id: &str, user_id: &str) -> ServiceResult<TeamMember>;
}

/// Channel lookup.
pub trait ChannelService: Send + Sync {
    fn get_channel(&self, channel_id: &str) -> ServiceResult<Channel>;
    fn get_direct_channel(&self, user_id_1: &str, user_id_2: &str) -> ServiceResult<Channel>;
}

/// User lookup.
pub trait UserService: Send + Sync {
    fn get_user(&self, user_id: &str) -> ServiceResult<User>;
    fn get_user_by_username(&self, username: &str) -> ServiceResult<User>;
}

/// Post creation.
pub trait PostService: Send + Sync {
    fn create_post(&self, post: Post) -> ServiceResult<Post>;
    fn get_post(&self, post_id: &str) -> ServiceResult<Post>;
}

/// Permission checks.
pub trait PermissionService: Send + Sync {
    fn has_permission_to(&self, user_id: &str, permission: &str) -> bool;
    fn has_permission_to_team(&self, user_id: &str, team_id: &str, permission: &str) -> bool;
}

/// Bot account management.
pub trait BotService: Send + Sync {
    /// Create the bot if missing; returns its user id.
    fn ensure_bot(&self, product_id: &str, bot: Bot) -> ServiceResult<String>;
}

/// Cluster coordination.
pub trait ClusterService: Send + Sync {
    fn publish_plugin_cluster_event(
        &self,
        product_id: &str,
        event: PluginClusterEvent,
        options: ClusterEventOptions,
    ) -> ServiceResult<()>;
}

/// Host configuration access.
pub trait ConfigService: Send + Sync {
    /// Current configuration snapshot.
    fn config(&self) -> Arc<HostConfig>;
}

/// Log severity understood by the host logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A key/value pair attached to a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogField {
    pub key: String,
    pub value: String,
}

impl LogField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Host logger.
pub trait LogService: Send + Sync {
    fn log(&self, level: LogLevel, message: &str, fields: &[LogField]);
}

/// License information.
pub trait LicenseService: Send + Sync {
    fn get_license(&self) -> Option<License>;
}

/// File storage backend.
pub trait FilestoreService: Send + Sync {
    fn read_file(&self, path: &str) -> ServiceResult<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> ServiceResult<u64>;
    fn remove_file(&self, path: &str) -> ServiceResult<()>;
}

/// File metadata storage.
pub trait FileInfoStoreService: Send + Sync {
    fn get_file_info(&self, file_id: &str) -> ServiceResult<FileInfo>;
}

/// HTTP route registration.
pub trait RouterService: Send + Sync {
    /// Mount the product's routes under `prefix`.
    fn register_router(&self, product_id: &str, prefix: &str) -> ServiceResult<()>;
}

/// Cloud billing and limits.
pub trait CloudService: Send + Sync {
    fn get_cloud_limits(&self) -> ServiceResult<ProductLimits>;
}

/// Key-value storage scoped to a product.
pub trait KvStoreService: Send + Sync {
    fn set(&self, product_id: &str, key: &str, value: &[u8]) -> ServiceResult<()>;
    fn get(&self, product_id: &str, key: &str) -> ServiceResult<Option<Vec<u8>>>;
    fn delete(&self, product_id: &str, key: &str) -> ServiceResult<()>;
}

/// Generic relational store access.
pub trait StoreService: Send + Sync {
    /// Database driver name (e.g. `postgres`).
    fn driver_name(&self) -> String;
    /// Connection string of the primary database.
    fn master_dsn(&self) -> String;
}

/// System information.
pub trait SystemService: Send + Sync {
    fn get_diagnostic_id(&self) -> String;
    fn server_version(&self) -> String;
}

/// User preferences.
pub trait PreferencesService: Send + Sync {
    fn get_preferences_for_user(&self, user_id: &str) -> ServiceResult<Vec<Preference>>;
    fn update_preferences_for_user(
        &self,
        user_id: &str,
        preferences: Vec<Preference>,
    ) -> ServiceResult<()>;
}

/// Hook receiver registration.
pub trait HooksService: Send + Sync {
    /// Route host hooks for `product_id` to `hooks`.
    fn register_hooks(&self, product_id: &str, hooks: Arc<dyn ProductHooks>) -> ServiceResult<()>;

    /// Stop routing hooks for `product_id`.
    fn unregister_hooks(&self, product_id: &str) -> ServiceResult<()>;
}
