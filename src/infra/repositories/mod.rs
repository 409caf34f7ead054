//! Repository layer - Data access abstraction
//!
//! Each repository is a trait (mockable in tests) plus a SeaORM store that
//! is generic over the connection, so the same store runs against the pool
//! or inside a transaction.

mod address_repository;
mod cart_repository;
mod district_repository;
pub(crate) mod entities;
mod product_repository;
mod user_repository;

pub use address_repository::{AddressRepository, AddressStore};
pub use cart_repository::{CartRepository, CartStore};
pub use district_repository::{DistrictRepository, DistrictStore};
pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use address_repository::MockAddressRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use cart_repository::MockCartRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use district_repository::MockDistrictRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
