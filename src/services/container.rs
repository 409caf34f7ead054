//! Service Container - Centralized service access.
//!
//! Services are built once per process over a shared [`Persistence`] and
//! handed to the HTTP layer as trait objects.

use std::sync::Arc;

use super::{
    AddressBook, AddressService, CartManager, CartService, DistrictDirectory, DistrictService,
    ProductCatalog, ProductService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn users(&self) -> Arc<dyn UserService>;

    fn addresses(&self) -> Arc<dyn AddressService>;

    fn carts(&self) -> Arc<dyn CartService>;

    fn products(&self) -> Arc<dyn ProductService>;

    fn districts(&self) -> Arc<dyn DistrictService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    user_service: Arc<dyn UserService>,
    address_service: Arc<dyn AddressService>,
    cart_service: Arc<dyn CartService>,
    product_service: Arc<dyn ProductService>,
    district_service: Arc<dyn DistrictService>,
}

impl Services {
    /// Assemble a container from already-built services
    pub fn new(
        user_service: Arc<dyn UserService>,
        address_service: Arc<dyn AddressService>,
        cart_service: Arc<dyn CartService>,
        product_service: Arc<dyn ProductService>,
        district_service: Arc<dyn DistrictService>,
    ) -> Self {
        Self {
            user_service,
            address_service,
            cart_service,
            product_service,
            district_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        let district_service: Arc<dyn DistrictService> =
            Arc::new(DistrictDirectory::new(uow.clone()));
        let address_service = Arc::new(AddressBook::new(
            uow.clone(),
            district_service.clone(),
            config.address_max_count,
        ));

        Self {
            user_service: Arc::new(UserManager::new(uow.clone())),
            address_service,
            cart_service: Arc::new(CartManager::new(uow.clone())),
            product_service: Arc::new(ProductCatalog::new(uow)),
            district_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn addresses(&self) -> Arc<dyn AddressService> {
        self.address_service.clone()
    }

    fn carts(&self) -> Arc<dyn CartService> {
        self.cart_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn districts(&self) -> Arc<dyn DistrictService> {
        self.district_service.clone()
    }
}
