//! PlaceClass entity - Templates that places are stamped from

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A place class
///
/// Reference data shared by many places: the default attribute values a
/// place of this class carries, and optionally the class a place turns
/// into when it is destroyed ("demise") instead of vanishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceClass {
    /// Unique class code, e.g. "forest" or "ruins"
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Default attribute values keyed by attribute code
    pub attributes: BTreeMap<String, i32>,
    /// Class a destroyed place of this class transforms into
    pub demised_place_class_code: Option<String>,
}

impl PlaceClass {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            attributes: BTreeMap::new(),
            demised_place_class_code: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, code: impl Into<String>, value: i32) -> Self {
        self.attributes.insert(code.into(), value);
        self
    }

    pub fn with_demise(mut self, class_code: impl Into<String>) -> Self {
        self.demised_place_class_code = Some(class_code.into());
        self
    }
}
