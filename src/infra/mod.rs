//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - SeaORM repositories
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    AddressRepository, CartRepository, DistrictRepository, ProductRepository, UserRepository,
};
pub use unit_of_work::{Persistence, RepositoryScope, TransactionContext, UnitOfWork};
