//! Province/city/area dictionary.

use serde::Serialize;
use utoipa::ToSchema;

/// One node of the district tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct District {
    pub id: i32,
    /// Code of the parent node ("86" for provinces)
    pub parent: String,
    pub code: String,
    pub name: String,
}

/// District as listed in a drop-down
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DistrictView {
    #[schema(example = "110000")]
    pub code: String,
    #[schema(example = "Beijing")]
    pub name: String,
}

impl From<District> for DistrictView {
    fn from(d: District) -> Self {
        Self {
            code: d.code,
            name: d.name,
        }
    }
}
