//! Address book handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AddressSummary, AddressView, NewAddress};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};
use crate::utils::validation::{DISTRICT_CODE_RE, PHONE_RE, ZIP_RE};

/// New address; district names are looked up from the codes
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddAddressRequest {
    #[validate(length(min = 1, max = 20, message = "Receiver name must be 1 to 20 characters"))]
    #[schema(example = "Tom")]
    pub name: String,
    #[validate(regex(path = *DISTRICT_CODE_RE, message = "Invalid province code"))]
    #[schema(example = "130000")]
    pub province_code: String,
    #[validate(regex(path = *DISTRICT_CODE_RE, message = "Invalid city code"))]
    #[schema(example = "130100")]
    pub city_code: String,
    #[validate(regex(path = *DISTRICT_CODE_RE, message = "Invalid area code"))]
    #[schema(example = "130102")]
    pub area_code: String,
    #[validate(regex(path = *ZIP_RE, message = "Zip must be six digits"))]
    #[schema(example = "050000")]
    pub zip: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Address must be 1 to 50 characters"))]
    #[schema(example = "1 Main Street")]
    pub address: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number"))]
    #[schema(example = "13800000000")]
    pub phone: String,
    #[validate(regex(path = *PHONE_RE, message = "Invalid landline number"))]
    pub tel: Option<String>,
    #[validate(length(max = 6, message = "Tag must be at most 6 characters"))]
    #[schema(example = "Home")]
    pub tag: Option<String>,
}

impl From<AddAddressRequest> for NewAddress {
    fn from(req: AddAddressRequest) -> Self {
        Self {
            name: req.name,
            province_code: req.province_code,
            city_code: req.city_code,
            area_code: req.area_code,
            zip: req.zip,
            address: req.address,
            phone: req.phone,
            tel: req.tel,
            tag: req.tag,
        }
    }
}

/// Create address routes (all require a session)
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses).post(add_address))
        .route("/:aid", get(get_address).delete(delete_address))
        .route("/:aid/default", put(set_default_address))
}

/// List own addresses, default first
#[utoipa::path(
    get,
    path = "/addresses",
    tag = "Addresses",
    responses(
        (status = 200, description = "Address book", body = Vec<AddressSummary>),
        (status = 401, description = "Not logged in")
    ),
    security(("session_cookie" = []))
)]
pub async fn list_addresses(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<AddressSummary>>> {
    let addresses = state.address_service.list(user.uid).await?;
    Ok(Json(addresses))
}

/// Add an address
#[utoipa::path(
    post,
    path = "/addresses",
    tag = "Addresses",
    request_body = AddAddressRequest,
    responses(
        (status = 201, description = "Address added", body = AddressView),
        (status = 400, description = "Validation error or unknown district code"),
        (status = 422, description = "Address book is full")
    ),
    security(("session_cookie" = []))
)]
pub async fn add_address(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<AddAddressRequest>,
) -> AppResult<Created<AddressView>> {
    let address = state
        .address_service
        .add(user.uid, user.username, payload.into())
        .await?;

    Ok(Created(address))
}

/// One address of the logged-in user
#[utoipa::path(
    get,
    path = "/addresses/{aid}",
    tag = "Addresses",
    params(("aid" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address", body = AddressView),
        (status = 403, description = "Address belongs to someone else"),
        (status = 404, description = "Address not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn get_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(aid): Path<i32>,
) -> AppResult<Json<AddressView>> {
    let address = state.address_service.get(aid, user.uid).await?;
    Ok(Json(address))
}

/// Make an address the default one
#[utoipa::path(
    put,
    path = "/addresses/{aid}/default",
    tag = "Addresses",
    params(("aid" = i32, Path, description = "Address id")),
    responses(
        (status = 204, description = "Default address changed"),
        (status = 403, description = "Address belongs to someone else"),
        (status = 404, description = "Address not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn set_default_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(aid): Path<i32>,
) -> AppResult<NoContent> {
    state
        .address_service
        .set_default(aid, user.uid, user.username)
        .await?;

    Ok(NoContent)
}

/// Delete an address
#[utoipa::path(
    delete,
    path = "/addresses/{aid}",
    tag = "Addresses",
    params(("aid" = i32, Path, description = "Address id")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 403, description = "Address belongs to someone else"),
        (status = 404, description = "Address not found")
    ),
    security(("session_cookie" = []))
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(aid): Path<i32>,
) -> AppResult<NoContent> {
    state
        .address_service
        .delete(aid, user.uid, user.username)
        .await?;

    Ok(NoContent)
}
