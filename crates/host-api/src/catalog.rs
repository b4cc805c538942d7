//! # Product Catalog
//!
//! Products announce themselves to the host with a [`ProductManifest`]: a
//! name, an id, the capability keys they depend on and an initializer that
//! builds the product from a [`ServiceRegistry`].
//!
//! ```rust,ignore
//! let mut catalog = ProductCatalog::new();
//! catalog.register(boards_product::manifest(factory))?;
//!
//! let product = catalog.initialize("boards", &registry)?;
//! product.start()?;
//! ```

use crate::errors::{BoxError, CatalogError};
use crate::hooks::Product;
use crate::keys::ServiceKey;
use crate::registry::ServiceRegistry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Builds a product from the host's services.
pub type ProductInitializer =
    Box<dyn Fn(&ServiceRegistry) -> Result<Arc<dyn Product>, BoxError> + Send + Sync>;

/// Registration record for one product.
pub struct ProductManifest {
    /// Short name the host refers to the product by.
    pub name: String,
    /// Globally unique product id (used for hook and cluster routing).
    pub id: String,
    /// Capabilities the product expects the host to supply.
    pub dependencies: BTreeSet<ServiceKey>,
    /// Product constructor.
    pub initializer: ProductInitializer,
}

impl fmt::Debug for ProductManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductManifest")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Products known to the host, by name.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: BTreeMap<String, ProductManifest>,
}

impl ProductCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product. Names must be unique.
    pub fn register(&mut self, manifest: ProductManifest) -> Result<(), CatalogError> {
        if self.products.contains_key(&manifest.name) {
            return Err(CatalogError::DuplicateProduct(manifest.name));
        }

        info!(
            "[Catalog] Registering product {} ({}) with {} dependencies",
            manifest.name,
            manifest.id,
            manifest.dependencies.len()
        );
        self.products.insert(manifest.name.clone(), manifest);
        Ok(())
    }

    pub fn manifest(&self, name: &str) -> Option<&ProductManifest> {
        self.products.get(name)
    }

    /// Registered product names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }

    /// Declared dependencies of `name` that `registry` does not supply.
    pub fn missing_dependencies(
        &self,
        name: &str,
        registry: &ServiceRegistry,
    ) -> Result<Vec<ServiceKey>, CatalogError> {
        let manifest = self
            .products
            .get(name)
            .ok_or_else(|| CatalogError::UnknownProduct(name.to_string()))?;

        Ok(manifest
            .dependencies
            .iter()
            .filter(|key| !registry.contains(key))
            .cloned()
            .collect())
    }

    /// Build the product `name` from `registry`.
    ///
    /// Missing declared dependencies are logged; the product's own
    /// initializer decides whether it can run without them.
    pub fn initialize(
        &self,
        name: &str,
        registry: &ServiceRegistry,
    ) -> Result<Arc<dyn Product>, CatalogError> {
        let missing = self.missing_dependencies(name, registry)?;
        if !missing.is_empty() {
            warn!(
                "[Catalog] Product {} is missing dependencies: {:?}",
                name,
                missing.iter().map(ServiceKey::name).collect::<Vec<_>>()
            );
        }

        let manifest = &self.products[name];
        info!("[Catalog] Initializing product {}", name);
        (manifest.initializer)(registry).map_err(|source| CatalogError::Initialization {
            name: name.to_string(),
            source,
        })
    }
}
