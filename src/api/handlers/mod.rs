//! HTTP request handlers.

pub mod address_handler;
pub mod cart_handler;
pub mod catalog_handler;
pub mod user_handler;

pub use address_handler::address_routes;
pub use cart_handler::cart_routes;
pub use catalog_handler::{district_routes, product_routes};
pub use user_handler::user_routes;
