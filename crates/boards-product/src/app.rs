//! # Boards App Contract
//!
//! The downstream subsystem the adapter gates. The adapter never looks inside
//! it: it builds one through a [`BoardsAppFactory`], starts and stops it, and
//! forwards host hooks to it with identical signatures.

use crate::services::ServiceApi;
use host_api::{
    ExportCursor, ExportPage, HookResult, PluginClusterEvent, PluginContext, Post,
    PostHookOutcome, ProductLimits, WebSocketRequest,
};
use std::sync::Arc;
use thiserror::Error;

/// Result alias for boards app lifecycle calls.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised by the boards app itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Board storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// App configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A host service the app relies on is unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

/// The boards application.
pub trait BoardsApp: Send + Sync {
    fn start(&self) -> AppResult<()>;
    fn stop(&self) -> AppResult<()>;

    fn on_configuration_change(&self) -> HookResult<()>;
    fn on_web_socket_connect(&self, web_conn_id: &str, user_id: &str);
    fn on_web_socket_disconnect(&self, web_conn_id: &str, user_id: &str);
    fn web_socket_message_has_been_posted(
        &self,
        web_conn_id: &str,
        user_id: &str,
        request: &WebSocketRequest,
    );
    fn on_plugin_cluster_event(&self, ctx: &PluginContext, event: &PluginClusterEvent);
    fn message_will_be_posted(&self, ctx: &PluginContext, post: Post) -> PostHookOutcome;
    fn message_will_be_updated(
        &self,
        ctx: &PluginContext,
        new_post: Post,
        old_post: &Post,
    ) -> PostHookOutcome;
    fn on_cloud_limits_updated(&self, limits: &ProductLimits);
    fn run_data_retention(&self, now_millis: i64, batch_size: i64) -> HookResult<i64>;
    fn exporter(&self, cursor: ExportCursor, limit: usize) -> HookResult<ExportPage>;
}

/// Builds the boards app from the bound services.
///
/// Called at most once per adapter, during construction.
pub type BoardsAppFactory =
    Arc<dyn Fn(ServiceApi) -> AppResult<Arc<dyn BoardsApp>> + Send + Sync>;
