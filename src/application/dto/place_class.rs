//! Place class request/response shapes

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::PlaceClass;

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaceClassRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, i32>,
    #[serde(default)]
    pub demised_place_class_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceClassResponse {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub attributes: BTreeMap<String, i32>,
    pub demised_place_class_code: Option<String>,
}

impl From<CreatePlaceClassRequest> for PlaceClass {
    fn from(req: CreatePlaceClassRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            attributes: req.attributes,
            demised_place_class_code: req.demised_place_class_code,
        }
    }
}

impl From<PlaceClass> for PlaceClassResponse {
    fn from(class: PlaceClass) -> Self {
        Self {
            code: class.code,
            name: class.name,
            description: class.description,
            attributes: class.attributes,
            demised_place_class_code: class.demised_place_class_code,
        }
    }
}
