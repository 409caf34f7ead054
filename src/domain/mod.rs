//! Domain layer - Core business entities and view objects
//!
//! Entities mirror the relational rows; view objects are the flattened
//! projections returned by the HTTP API. Nothing here touches SeaORM.

pub mod address;
pub mod cart;
pub mod district;
pub mod password;
pub mod product;
pub mod user;

pub use address::{Address, AddressDraft, AddressSummary, AddressView, DistrictNames, NewAddress};
pub use cart::{CartDraft, CartItem, CartView};
pub use district::{District, DistrictView};
pub use password::Password;
pub use product::{Product, ProductSummary};
pub use user::{Gender, NewUser, ProfileUpdate, User, UserProfile, UserResponse};
