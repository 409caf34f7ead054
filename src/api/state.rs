//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    AddressService, CartService, DistrictService, ProductService, ServiceContainer, Services,
    UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub address_service: Arc<dyn AddressService>,
    pub cart_service: Arc<dyn CartService>,
    pub product_service: Arc<dyn ProductService>,
    pub district_service: Arc<dyn DistrictService>,
    /// Used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Build every service over the given database.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::new(&container, database)
    }

    /// Take services from any container (tests pass hand-built ones).
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            user_service: container.users(),
            address_service: container.addresses(),
            cart_service: container.carts(),
            product_service: container.products(),
            district_service: container.districts(),
            database,
        }
    }
}
