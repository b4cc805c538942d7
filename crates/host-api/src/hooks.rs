//! # Product Hooks
//!
//! The callback surface the host drives once a product has registered itself
//! through [`crate::HooksService`], and the lifecycle contract every product
//! implements.
//!
//! The host may invoke hooks from many threads at once, including concurrent
//! invocations of the same hook for different events.

use crate::errors::{BoxError, HookResult};
use crate::model::{
    ExportCursor, ExportPage, PluginClusterEvent, PluginContext, Post, PostHookOutcome,
    ProductLimits, WebSocketRequest,
};

/// Host hooks a product can receive.
pub trait ProductHooks: Send + Sync {
    /// The host configuration changed.
    fn on_configuration_change(&self) -> HookResult<()>;

    /// A websocket connection was opened.
    fn on_web_socket_connect(&self, web_conn_id: &str, user_id: &str);

    /// A websocket connection was closed.
    fn on_web_socket_disconnect(&self, web_conn_id: &str, user_id: &str);

    /// A message arrived over a websocket connection.
    fn web_socket_message_has_been_posted(
        &self,
        web_conn_id: &str,
        user_id: &str,
        request: &WebSocketRequest,
    );

    /// Another cluster node published an event for this product.
    fn on_plugin_cluster_event(&self, ctx: &PluginContext, event: &PluginClusterEvent);

    /// A post is about to be created; the product may rewrite or reject it.
    fn message_will_be_posted(&self, ctx: &PluginContext, post: Post) -> PostHookOutcome;

    /// A post is about to be updated; the product may rewrite or reject it.
    fn message_will_be_updated(
        &self,
        ctx: &PluginContext,
        new_post: Post,
        old_post: &Post,
    ) -> PostHookOutcome;

    /// Cloud limits for the workspace changed.
    fn on_cloud_limits_updated(&self, limits: &ProductLimits);

    /// Delete up to `batch_size` records older than `now_millis`.
    /// Returns the number of records affected.
    fn run_data_retention(&self, now_millis: i64, batch_size: i64) -> HookResult<i64>;

    /// Advance a compliance export by at most `limit` records.
    fn exporter(&self, cursor: ExportCursor, limit: usize) -> HookResult<ExportPage>;
}

/// A product loaded by the host.
///
/// `start` and `stop` are each called once, in that order.
pub trait Product: ProductHooks {
    fn start(&self) -> Result<(), BoxError>;
    fn stop(&self) -> Result<(), BoxError>;
}
