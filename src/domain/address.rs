//! Address book entities and view objects.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Shipping address row
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub aid: i32,
    pub uid: i32,
    pub name: String,
    pub province_code: String,
    pub province_name: String,
    pub city_code: String,
    pub city_name: String,
    pub area_code: String,
    pub area_name: String,
    pub zip: Option<String>,
    pub address: String,
    pub phone: String,
    pub tel: Option<String>,
    pub tag: Option<String>,
    pub is_default: bool,
    pub created_user: String,
    pub created_time: DateTime<Utc>,
    pub modified_user: String,
    pub modified_time: DateTime<Utc>,
}

/// Address as entered by the user; district names are resolved by the service.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub name: String,
    pub province_code: String,
    pub city_code: String,
    pub area_code: String,
    pub zip: Option<String>,
    pub address: String,
    pub phone: String,
    pub tel: Option<String>,
    pub tag: Option<String>,
}

/// Fully resolved address ready to insert.
#[derive(Debug, Clone)]
pub struct AddressDraft {
    pub uid: i32,
    pub name: String,
    pub province_code: String,
    pub province_name: String,
    pub city_code: String,
    pub city_name: String,
    pub area_code: String,
    pub area_name: String,
    pub zip: Option<String>,
    pub address: String,
    pub phone: String,
    pub tel: Option<String>,
    pub tag: Option<String>,
    pub is_default: bool,
    /// Written to both audit user columns
    pub username: String,
}

/// District names resolved for a [`NewAddress`]
#[derive(Debug, Clone)]
pub struct DistrictNames {
    pub province: String,
    pub city: String,
    pub area: String,
}

impl AddressDraft {
    pub fn new(
        uid: i32,
        username: &str,
        input: NewAddress,
        names: DistrictNames,
        is_default: bool,
    ) -> Self {
        Self {
            uid,
            name: input.name,
            province_code: input.province_code,
            province_name: names.province,
            city_code: input.city_code,
            city_name: names.city,
            area_code: input.area_code,
            area_name: names.area,
            zip: input.zip,
            address: input.address,
            phone: input.phone,
            tel: input.tel,
            tag: input.tag,
            is_default,
            username: username.to_string(),
        }
    }
}

/// Detail view of one address (district codes and audit fields omitted)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressView {
    pub aid: i32,
    pub uid: i32,
    #[schema(example = "Tom")]
    pub name: String,
    #[schema(example = "Hebei")]
    pub province_name: String,
    pub city_name: String,
    pub area_name: String,
    pub zip: Option<String>,
    pub address: String,
    pub phone: String,
    pub tel: Option<String>,
    #[schema(example = "Home")]
    pub tag: Option<String>,
    pub is_default: bool,
}

impl From<Address> for AddressView {
    fn from(a: Address) -> Self {
        Self {
            aid: a.aid,
            uid: a.uid,
            name: a.name,
            province_name: a.province_name,
            city_name: a.city_name,
            area_name: a.area_name,
            zip: a.zip,
            address: a.address,
            phone: a.phone,
            tel: a.tel,
            tag: a.tag,
            is_default: a.is_default,
        }
    }
}

/// List entry of the address book (also hides landline and default flag)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressSummary {
    pub aid: i32,
    pub uid: i32,
    pub name: String,
    pub tag: Option<String>,
    pub province_name: String,
    pub city_name: String,
    pub area_name: String,
    pub address: String,
    pub phone: String,
    pub zip: Option<String>,
}

impl From<Address> for AddressSummary {
    fn from(a: Address) -> Self {
        Self {
            aid: a.aid,
            uid: a.uid,
            name: a.name,
            tag: a.tag,
            province_name: a.province_name,
            city_name: a.city_name,
            area_name: a.area_name,
            address: a.address,
            phone: a.phone,
            zip: a.zip,
        }
    }
}
