//! # Host Data Model
//!
//! Entities returned by capability services and payloads delivered to
//! product hooks. Products treat payloads as opaque and pass them through.
//!
//! ## Groups
//!
//! - **Directory**: `Team`, `TeamMember`, `Channel`, `User`, `Bot`
//! - **Messaging**: `Post`, `WebSocketRequest`, `PluginContext`
//! - **Cluster & Cloud**: `PluginClusterEvent`, `ProductLimits`
//! - **Compliance**: `ExportCursor`, `ComplianceExporter`, `ExportPage`
//! - **Configuration**: `HostConfig`, `FeatureFlags`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::io;
use uuid::Uuid;

/// Generate a host-style entity id (26 lowercase hex-ish characters).
#[must_use]
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(26);
    id
}

// =============================================================================
// DIRECTORY
// =============================================================================

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub display_name: String,
}

/// Membership of a user in a team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamMember {
    pub team_id: String,
    pub user_id: String,
    pub roles: String,
}

/// Channel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelType {
    #[default]
    Open,
    Private,
    Direct,
    Group,
}

/// A channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub team_id: String,
    pub name: String,
    pub display_name: String,
    pub channel_type: ChannelType,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_bot: bool,
}

/// A bot account definition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bot {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub description: String,
    pub owner_id: String,
}

/// Installed license summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub sku_short_name: String,
    pub is_cloud: bool,
}

/// Metadata of a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: i64,
    pub mime_type: String,
}

/// A single user preference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preference {
    pub user_id: String,
    pub category: String,
    pub name: String,
    pub value: String,
}

// =============================================================================
// MESSAGING
// =============================================================================

/// A message posted to a channel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub user_id: String,
    pub channel_id: String,
    pub root_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub props: Map<String, Value>,
}

impl Post {
    /// Create a new post with a fresh id.
    pub fn new(
        channel_id: impl Into<String>,
        user_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            channel_id: channel_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Request context attached to hook invocations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginContext {
    pub session_id: String,
    pub request_id: String,
    pub ip_address: String,
    pub accept_language: String,
    pub user_agent: String,
}

impl PluginContext {
    /// Context for a host-originated call with a fresh request id.
    #[must_use]
    pub fn for_request() -> Self {
        Self {
            request_id: new_id(),
            ..Self::default()
        }
    }
}

/// A message received over a websocket connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WebSocketRequest {
    pub seq: i64,
    pub action: String,
    pub data: Map<String, Value>,
}

/// Outcome of a post interception hook.
///
/// `post == None` rejects the post; `rejection_reason` explains why.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostHookOutcome {
    pub post: Option<Post>,
    pub rejection_reason: Option<String>,
}

impl PostHookOutcome {
    /// Let the post through unchanged.
    #[must_use]
    pub fn pass_through(post: Post) -> Self {
        Self {
            post: Some(post),
            rejection_reason: None,
        }
    }

    /// Reject the post.
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            post: None,
            rejection_reason: Some(reason.into()),
        }
    }

    /// Whether the post was rejected.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        self.post.is_none()
    }
}

// =============================================================================
// CLUSTER & CLOUD
// =============================================================================

/// An event broadcast between cluster nodes on behalf of a product.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginClusterEvent {
    pub id: String,
    pub data: Vec<u8>,
}

/// Delivery guarantee for cluster events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClusterSendType {
    #[default]
    BestEffort,
    Reliable,
}

/// Options for publishing a cluster event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterEventOptions {
    pub send_type: ClusterSendType,
    /// Restrict delivery to one node.
    pub target_id: Option<String>,
}

/// Boards usage limits for a cloud workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardsLimits {
    pub cards: Option<i32>,
    pub views: Option<i32>,
}

/// Message history limits for a cloud workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessagesLimits {
    pub history: Option<i32>,
}

/// Team count limits for a cloud workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamsLimits {
    pub active: Option<i32>,
}

/// Per-product limits pushed by the cloud billing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductLimits {
    pub boards: Option<BoardsLimits>,
    pub messages: Option<MessagesLimits>,
    pub teams: Option<TeamsLimits>,
}

// =============================================================================
// COMPLIANCE
// =============================================================================

/// Opaque position in a paginated compliance export.
pub type ExportCursor = Map<String, Value>;

/// Writes one batch of compliance export data.
pub trait ComplianceExporter: Send {
    /// Exporter name shown in export job logs.
    fn name(&self) -> &str;

    /// Write the next batch to `out`, returning the number of bytes written.
    fn write_batch(&mut self, out: &mut dyn io::Write) -> io::Result<u64>;
}

/// One page of a compliance export.
#[derive(Default)]
pub struct ExportPage {
    /// Exporter for this page, if there is data.
    pub exporter: Option<Box<dyn ComplianceExporter>>,
    /// Cursor for the next page; `None` when the export is complete.
    pub cursor: Option<ExportCursor>,
}

impl ExportPage {
    /// A page with nothing to export.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the page carries neither an exporter nor a cursor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exporter.is_none() && self.cursor.is_none()
    }
}

impl fmt::Debug for ExportPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportPage")
            .field("exporter", &self.exporter.as_ref().map(|e| e.name()))
            .field("cursor", &self.cursor)
            .finish()
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Feature flags section of the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FeatureFlags {
    /// Run boards as a built-in product.
    pub boards_product: bool,
}

/// Service settings section of the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceSettings {
    #[serde(rename = "SiteURL")]
    pub site_url: Option<String>,
    pub enable_developer: bool,
}

/// Snapshot of the host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HostConfig {
    pub feature_flags: FeatureFlags,
    pub service_settings: ServiceSettings,
}
