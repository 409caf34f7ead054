//! Shopping cart handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::CartView;
use crate::errors::{AppError, AppResult};
use crate::types::{Created, MessageResponse, NoContent};
use crate::utils::validation::parse_id_list;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddCartRequest {
    #[schema(example = 10000001)]
    pub pid: i32,
    #[validate(range(min = 1, max = 9999, message = "Amount must be between 1 and 9999"))]
    #[schema(example = 1, minimum = 1, maximum = 9999)]
    pub amount: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SelectionQuery {
    /// Comma separated cart ids, e.g. `1,2,3`
    pub cids: String,
}

/// Quantity after an increment
#[derive(Debug, Serialize, ToSchema)]
pub struct CartQuantity {
    pub cid: i32,
    pub num: i32,
}

/// Create cart routes (all require a session)
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cart).post(add_to_cart))
        .route("/selection", get(cart_selection))
        .route("/:cid/increment", put(increment_cart_item))
        .route("/:cid", delete(remove_cart_item))
}

/// Put a product in the cart, merging with an existing row
#[utoipa::path(
    post,
    path = "/carts",
    tag = "Carts",
    request_body = AddCartRequest,
    responses(
        (status = 201, description = "Cart updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AddCartRequest>,
) -> AppResult<Created<MessageResponse>> {
    state
        .cart_service
        .add(user.uid, payload.pid, payload.amount, user.username)
        .await?;

    Ok(Created(MessageResponse::new("Added to cart")))
}

/// Cart contents with current product data
#[utoipa::path(
    get,
    path = "/carts",
    tag = "Carts",
    responses(
        (status = 200, description = "Cart rows, newest first", body = Vec<CartView>),
        (status = 401, description = "Not logged in")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_cart(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<CartView>>> {
    let items = state.cart_service.list(user.uid).await?;
    Ok(Json(items))
}

/// Selected cart rows (for checkout); rows of other users are skipped
#[utoipa::path(
    get,
    path = "/carts/selection",
    tag = "Carts",
    params(SelectionQuery),
    responses(
        (status = 200, description = "Selected rows", body = Vec<CartView>),
        (status = 400, description = "Malformed id list")
    ),
    security(("session_cookie" = []))
)]
pub async fn cart_selection(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<SelectionQuery>,
) -> AppResult<Json<Vec<CartView>>> {
    let cids = parse_id_list(&query.cids)
        .ok_or_else(|| AppError::validation("cids must be a comma separated list of ids"))?;

    let items = state.cart_service.selection(user.uid, cids).await?;
    Ok(Json(items))
}

/// Add one unit to a cart row
#[utoipa::path(
    put,
    path = "/carts/{cid}/increment",
    tag = "Carts",
    params(("cid" = i32, Path, description = "Cart row id")),
    responses(
        (status = 200, description = "New quantity", body = CartQuantity),
        (status = 403, description = "Cart row belongs to someone else"),
        (status = 404, description = "Cart row not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn increment_cart_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(cid): Path<i32>,
) -> AppResult<Json<CartQuantity>> {
    let num = state
        .cart_service
        .increment(cid, user.uid, user.username)
        .await?;

    Ok(Json(CartQuantity { cid, num }))
}

/// Remove a row from the cart
#[utoipa::path(
    delete,
    path = "/carts/{cid}",
    tag = "Carts",
    params(("cid" = i32, Path, description = "Cart row id")),
    responses(
        (status = 204, description = "Row removed"),
        (status = 403, description = "Cart row belongs to someone else"),
        (status = 404, description = "Cart row not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(cid): Path<i32>,
) -> AppResult<NoContent> {
    state.cart_service.remove(cid, user.uid).await?;
    Ok(NoContent)
}
