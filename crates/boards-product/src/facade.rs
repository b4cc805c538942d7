//! # Delegation Facade
//!
//! Host hooks land here. While the product is `Active` each call goes
//! straight to the boards app with its arguments and result untouched. In any
//! other state the call is a no-op that returns a neutral value:
//!
//! | Hook                          | Not active                  |
//! |-------------------------------|-----------------------------|
//! | `on_configuration_change`     | `Ok(())`                    |
//! | websocket / cluster / cloud   | nothing                     |
//! | `message_will_be_posted`      | post passed through         |
//! | `message_will_be_updated`     | new post passed through     |
//! | `run_data_retention`          | `Ok(0)`                     |
//! | `exporter`                    | empty page                  |

use crate::gate::GateObservation;
use crate::lifecycle::BoardsProduct;
use crate::BOARDS_PRODUCT_NAME;
use host_api::{
    BoxError, ExportCursor, ExportPage, HookResult, LogField, LogLevel, PluginClusterEvent,
    PluginContext, Post, PostHookOutcome, Product, ProductHooks, ProductLimits, WebSocketRequest,
};
use tracing::trace;

impl ProductHooks for BoardsProduct {
    fn on_configuration_change(&self) -> HookResult<()> {
        if let Some(config) = &self.services().config {
            if let GateObservation::RestartRequired { now_enabled } =
                self.gate().observe(&**config)
            {
                self.logger().log(
                    LogLevel::Info,
                    "Boards product feature flag changed; restart required",
                    &[LogField::new("enabled", if now_enabled { "true" } else { "false" })],
                );
            }
        }

        let Some(app) = self.delegate() else {
            return Ok(());
        };
        app.on_configuration_change()
    }

    fn on_web_socket_connect(&self, web_conn_id: &str, user_id: &str) {
        let Some(app) = self.delegate() else {
            trace!(product = BOARDS_PRODUCT_NAME, "Dropping websocket connect");
            return;
        };
        app.on_web_socket_connect(web_conn_id, user_id);
    }

    fn on_web_socket_disconnect(&self, web_conn_id: &str, user_id: &str) {
        let Some(app) = self.delegate() else {
            trace!(product = BOARDS_PRODUCT_NAME, "Dropping websocket disconnect");
            return;
        };
        app.on_web_socket_disconnect(web_conn_id, user_id);
    }

    fn web_socket_message_has_been_posted(
        &self,
        web_conn_id: &str,
        user_id: &str,
        request: &WebSocketRequest,
    ) {
        let Some(app) = self.delegate() else {
            return;
        };
        app.web_socket_message_has_been_posted(web_conn_id, user_id, request);
    }

    fn on_plugin_cluster_event(&self, ctx: &PluginContext, event: &PluginClusterEvent) {
        let Some(app) = self.delegate() else {
            trace!(product = BOARDS_PRODUCT_NAME, event = %event.id, "Dropping cluster event");
            return;
        };
        app.on_plugin_cluster_event(ctx, event);
    }

    fn message_will_be_posted(&self, ctx: &PluginContext, post: Post) -> PostHookOutcome {
        let Some(app) = self.delegate() else {
            return PostHookOutcome::pass_through(post);
        };
        app.message_will_be_posted(ctx, post)
    }

    fn message_will_be_updated(
        &self,
        ctx: &PluginContext,
        new_post: Post,
        old_post: &Post,
    ) -> PostHookOutcome {
        let Some(app) = self.delegate() else {
            return PostHookOutcome::pass_through(new_post);
        };
        app.message_will_be_updated(ctx, new_post, old_post)
    }

    fn on_cloud_limits_updated(&self, limits: &ProductLimits) {
        let Some(app) = self.delegate() else {
            return;
        };
        app.on_cloud_limits_updated(limits);
    }

    fn run_data_retention(&self, now_millis: i64, batch_size: i64) -> HookResult<i64> {
        let Some(app) = self.delegate() else {
            return Ok(0);
        };
        app.run_data_retention(now_millis, batch_size)
    }

    fn exporter(&self, cursor: ExportCursor, limit: usize) -> HookResult<ExportPage> {
        let Some(app) = self.delegate() else {
            return Ok(ExportPage::empty());
        };
        app.exporter(cursor, limit)
    }
}

impl Product for BoardsProduct {
    fn start(&self) -> Result<(), BoxError> {
        BoardsProduct::start(self).map_err(Into::into)
    }

    fn stop(&self) -> Result<(), BoxError> {
        BoardsProduct::stop(self).map_err(Into::into)
    }
}
