//! Public catalogue handlers: products and the district dictionary.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::config::ROOT_DISTRICT_CODE;
use crate::domain::{DistrictView, Product, ProductSummary};
use crate::errors::AppResult;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistrictQuery {
    /// Parent district code; provinces when omitted
    pub parent: Option<String>,
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/hot", get(hot_products))
        .route("/:id", get(get_product))
}

pub fn district_routes() -> Router<AppState> {
    Router::new().route("/", get(list_districts))
}

/// Top on-sale products by priority
#[utoipa::path(
    get,
    path = "/products/hot",
    tag = "Catalogue",
    responses((status = 200, description = "Hot products", body = Vec<ProductSummary>))
)]
pub async fn hot_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductSummary>>> {
    let products = state.product_service.hot_list().await?;
    Ok(Json(products))
}

/// Product details
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "Catalogue",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state.product_service.get(id).await?;
    Ok(Json(product))
}

/// Children of a district code
#[utoipa::path(
    get,
    path = "/districts",
    tag = "Catalogue",
    params(DistrictQuery),
    responses((status = 200, description = "Districts ordered by code", body = Vec<DistrictView>))
)]
pub async fn list_districts(
    State(state): State<AppState>,
    Query(query): Query<DistrictQuery>,
) -> AppResult<Json<Vec<DistrictView>>> {
    let parent = query.parent.as_deref().unwrap_or(ROOT_DISTRICT_CODE);
    let districts = state.district_service.list_by_parent(parent).await?;
    Ok(Json(districts))
}
