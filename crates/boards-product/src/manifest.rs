//! Registration of the boards product with a host [`ProductCatalog`].

use crate::app::BoardsAppFactory;
use crate::lifecycle::BoardsProduct;
use crate::services::dependencies;
use crate::{BOARDS_PRODUCT_ID, BOARDS_PRODUCT_NAME};
use host_api::{
    BoxError, CatalogError, Product, ProductCatalog, ProductManifest, ServiceRegistry,
};
use std::sync::Arc;

/// Manifest announcing the boards product and its dependencies.
///
/// The initializer builds a [`BoardsProduct`] from the registry it is handed;
/// `factory` is only called if the feature flag is on.
pub fn manifest(factory: BoardsAppFactory) -> ProductManifest {
    ProductManifest {
        name: BOARDS_PRODUCT_NAME.to_string(),
        id: BOARDS_PRODUCT_ID.to_string(),
        dependencies: dependencies(),
        initializer: Box::new(
            move |registry: &ServiceRegistry| -> Result<Arc<dyn Product>, BoxError> {
                let product = BoardsProduct::new(registry, Arc::clone(&factory))?;
                Ok(product as Arc<dyn Product>)
            },
        ),
    }
}

/// Register the boards product in `catalog`.
pub fn register(catalog: &mut ProductCatalog, factory: BoardsAppFactory) -> Result<(), CatalogError> {
    catalog.register(manifest(factory))
}
