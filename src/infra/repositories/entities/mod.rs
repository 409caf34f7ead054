//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod address;
pub mod cart;
pub mod district;
pub mod product;
pub mod user;
