//! # Service Keys
//!
//! Identifiers for the capability services a host hands to a product at
//! construction time. The set a product can bind is closed; keys introduced by
//! newer hosts arrive as [`ServiceKey::Custom`] and are ignored by products
//! that do not know them.

use std::borrow::Cow;
use std::fmt;

/// Capability identifier used as the key of a [`crate::ServiceRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServiceKey {
    /// Team lookup and membership.
    Team,
    /// Channel lookup.
    Channel,
    /// User lookup.
    User,
    /// Post creation and lookup.
    Post,
    /// Permission checks.
    Permissions,
    /// Bot account management.
    Bot,
    /// Cluster coordination (inter-node events).
    Cluster,
    /// Host configuration access.
    Config,
    /// Host logger.
    Log,
    /// License information.
    License,
    /// File storage backend.
    Filestore,
    /// File metadata storage.
    FileInfoStore,
    /// HTTP route registration.
    Router,
    /// Cloud billing and product limits.
    Cloud,
    /// Key-value storage.
    KvStore,
    /// Generic relational store access.
    Store,
    /// System information.
    System,
    /// User preferences.
    Preferences,
    /// Hook receiver registration.
    Hooks,
    /// A key this crate does not define.
    Custom(String),
}

impl ServiceKey {
    /// Stable name used in logs and error messages. Custom keys are
    /// prefixed with `custom:`.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        let name = match self {
            Self::Team => "team",
            Self::Channel => "channel",
            Self::User => "user",
            Self::Post => "post",
            Self::Permissions => "permissions",
            Self::Bot => "bot",
            Self::Cluster => "cluster",
            Self::Config => "config",
            Self::Log => "log",
            Self::License => "license",
            Self::Filestore => "filestore",
            Self::FileInfoStore => "fileinfostore",
            Self::Router => "router",
            Self::Cloud => "cloud",
            Self::KvStore => "kvstore",
            Self::Store => "store",
            Self::System => "system",
            Self::Preferences => "preferences",
            Self::Hooks => "hooks",
            Self::Custom(name) => return Cow::Owned(format!("custom:{name}")),
        };
        Cow::Borrowed(name)
    }

    /// Whether this key is one of the well-known capabilities.
    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// All well-known keys, in key order.
    #[must_use]
    pub fn all() -> Vec<ServiceKey> {
        vec![
            Self::Team,
            Self::Channel,
            Self::User,
            Self::Post,
            Self::Permissions,
            Self::Bot,
            Self::Cluster,
            Self::Config,
            Self::Log,
            Self::License,
            Self::Filestore,
            Self::FileInfoStore,
            Self::Router,
            Self::Cloud,
            Self::KvStore,
            Self::Store,
            Self::System,
            Self::Preferences,
            Self::Hooks,
        ]
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
