//! OpenAPI documentation configuration.
//!
//! Served by Swagger UI at `/swagger-ui`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{address_handler, cart_handler, catalog_handler, user_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{
    AddressSummary, AddressView, CartView, DistrictView, Gender, Product, ProductSummary,
    UserProfile, UserResponse,
};
use crate::types::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Store API",
        version = "0.1.0",
        description = "Storefront backend: accounts, address book, cart, products and districts",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "http://localhost:3000", description = "Local development server")),
    paths(
        user_handler::register,
        user_handler::login,
        user_handler::logout,
        user_handler::get_profile,
        user_handler::update_profile,
        user_handler::change_password,
        address_handler::list_addresses,
        address_handler::add_address,
        address_handler::get_address,
        address_handler::set_default_address,
        address_handler::delete_address,
        cart_handler::add_to_cart,
        cart_handler::list_cart,
        cart_handler::cart_selection,
        cart_handler::increment_cart_item,
        cart_handler::remove_cart_item,
        catalog_handler::hot_products,
        catalog_handler::get_product,
        catalog_handler::list_districts,
    ),
    components(
        schemas(
            Gender,
            UserResponse,
            UserProfile,
            AddressView,
            AddressSummary,
            CartView,
            Product,
            ProductSummary,
            DistrictView,
            MessageResponse,
            user_handler::RegisterRequest,
            user_handler::LoginRequest,
            user_handler::ChangePasswordRequest,
            user_handler::UpdateProfileRequest,
            address_handler::AddAddressRequest,
            cart_handler::AddCartRequest,
            cart_handler::CartQuantity,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login and profile"),
        (name = "Addresses", description = "Shipping address book"),
        (name = "Carts", description = "Shopping cart"),
        (name = "Catalogue", description = "Products and districts (public)")
    )
)]
pub struct ApiDoc;

/// Session cookie security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
        }
    }
}
