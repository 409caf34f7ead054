//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod address_service;
mod cart_service;
pub mod container;
mod district_service;
mod product_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use address_service::{AddressBook, AddressService};
pub use cart_service::{CartManager, CartService};
pub use district_service::{DistrictDirectory, DistrictService};
pub use product_service::{ProductCatalog, ProductService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use district_service::MockDistrictService;
