//! # Boards Product
//!
//! Adapter that plugs the boards app into a host runtime.
//!
//! ## Flow
//!
//! ```text
//! ServiceRegistry ──bind──→ BoundServices ──gate──┬─ off ─→ Disabled (hooks no-op)
//!                                                 └─ on ──→ BoardsAppFactory ─→ Constructed
//!                                                                                   │ start
//!                    host hooks ──→ facade ──(Active only)──→ BoardsApp ←───────────┘
//! ```
//!
//! - **Binder** ([`binder`]): typed slots for every capability the host
//!   supplies; a handle under the wrong key fails construction.
//! - **Feature gate** ([`gate`]): the `BoardsProduct` flag decides at
//!   construction whether the boards app is built.
//! - **Lifecycle** ([`lifecycle`]): `Constructed`/`Disabled` → `Active` →
//!   `Stopped`.
//! - **Facade** ([`facade`]): `ProductHooks` for the host, forwarding to the
//!   boards app or returning neutral values.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut catalog = ProductCatalog::new();
//! boards_product::register(&mut catalog, factory)?;
//!
//! let product = catalog.initialize("boards", &registry)?;
//! product.start()?;
//! ```

pub mod app;
pub mod binder;
pub mod error;
pub mod facade;
pub mod gate;
pub mod lifecycle;
pub mod logging;
pub mod manifest;
pub mod services;
pub mod telemetry;

/// Name the product is registered and routed under.
pub const BOARDS_PRODUCT_NAME: &str = "boards";

/// Globally unique product id.
pub const BOARDS_PRODUCT_ID: &str = "com.mattermost.boards";

pub use app::{AppError, AppResult, BoardsApp, BoardsAppFactory};
pub use binder::BoundServices;
pub use error::{ProductError, ProductResult};
pub use gate::{FeatureGate, GateObservation};
pub use lifecycle::{BoardsProduct, LifecycleState};
pub use logging::{log_server_info, ScopedLogger, COMPONENT_FIELD};
pub use manifest::{manifest, register};
pub use services::{dependencies, ServiceApi, BOARDS_DEPENDENCIES};
pub use telemetry::{init_tracing, TelemetryConfig, TelemetryError};
