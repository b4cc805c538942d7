//! # Host API
//!
//! The contract between a host runtime and the products it loads.
//!
//! ## Flow
//!
//! ```text
//! Host ──ServiceRegistry──→ Product initializer ──→ Product
//!   │                                                 │
//!   │ ←──────────── HooksService::register_hooks ─────┘ (on start)
//!   │
//!   └──ProductHooks callbacks (websocket, posts, cluster, cloud, retention, export)──→ Product
//! ```
//!
//! - **Capabilities**: [`ServiceKey`] names a capability, [`services`] holds
//!   one trait per capability, [`ServiceHandle`] tags an implementation with
//!   the capability it provides.
//! - **Payloads**: [`model`] holds host data passed through hooks unchanged.
//! - **Products**: [`ProductHooks`] and [`Product`] are implemented by
//!   products; [`ProductCatalog`] keeps their manifests.

pub mod catalog;
pub mod errors;
pub mod hooks;
pub mod keys;
pub mod model;
pub mod registry;
pub mod services;

pub use catalog::{ProductCatalog, ProductInitializer, ProductManifest};
pub use errors::{BoxError, CatalogError, HookError, HookResult, ServiceError, ServiceResult};
pub use hooks::{Product, ProductHooks};
pub use keys::ServiceKey;
pub use model::*;
pub use registry::{ServiceHandle, ServiceRegistry};
pub use services::*;
