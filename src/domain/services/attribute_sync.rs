//! Attribute reconciliation - merge a place's owned attributes with a
//! reference map
//!
//! Two variants drive the merge: the defaults of a place class (applied on
//! creation, reclassification and demise) or the raw attribute map of an
//! update request. After either call the attribute-code set of the place
//! equals exactly the key set of the driving reference.
//!
//! Existing attributes are updated in place, never recreated, so the store
//! treats a value change as an update of the same row.

use std::collections::BTreeMap;

use crate::domain::entities::{PlaceAttr, PlaceClass};

/// Sync attributes against a class definition.
///
/// Codes present in `previous` but absent from `next` are removed; every
/// code in `next` is set to the class default, reusing the existing
/// attribute when one exists. With no previous class (first assignment at
/// creation) nothing is removed.
pub fn sync_from_class(
    attrs: &mut Vec<PlaceAttr>,
    previous: Option<&PlaceClass>,
    next: &PlaceClass,
) {
    if let Some(previous) = previous {
        attrs.retain(|attr| {
            let in_previous = previous.attributes.contains_key(&attr.code);
            let in_next = next.attributes.contains_key(&attr.code);
            !(in_previous && !in_next)
        });
    }

    for (code, default_value) in &next.attributes {
        match attrs.iter_mut().find(|a| &a.code == code) {
            Some(attr) => attr.value = *default_value,
            None => attrs.push(PlaceAttr::new(code.clone(), *default_value)),
        }
    }
}

/// Sync attributes against a requested code-to-value map.
///
/// Attributes not present in the request are removed; requested codes are
/// updated in place or added.
pub fn sync_from_request(attrs: &mut Vec<PlaceAttr>, requested: &BTreeMap<String, i32>) {
    attrs.retain(|attr| requested.contains_key(&attr.code));

    for (code, value) in requested {
        match attrs.iter_mut().find(|a| &a.code == code) {
            Some(attr) => attr.value = *value,
            None => attrs.push(PlaceAttr::new(code.clone(), *value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(attrs: &[PlaceAttr]) -> Vec<&str> {
        let mut codes: Vec<&str> = attrs.iter().map(|a| a.code.as_str()).collect();
        codes.sort_unstable();
        codes
    }

    #[test]
    fn test_class_sync_matches_new_class_codes() {
        let previous = PlaceClass::new("cave", "Cave")
            .with_attribute("DARKNESS", 80)
            .with_attribute("HUMIDITY", 60);
        let next = PlaceClass::new("forest", "Forest")
            .with_attribute("HUMIDITY", 40)
            .with_attribute("FOLIAGE", 90);

        let mut attrs = vec![PlaceAttr::new("DARKNESS", 75), PlaceAttr::new("HUMIDITY", 55)];
        sync_from_class(&mut attrs, Some(&previous), &next);

        assert_eq!(codes(&attrs), vec!["FOLIAGE", "HUMIDITY"]);
        // Existing attribute reset to the class default
        assert_eq!(attrs.iter().find(|a| a.code == "HUMIDITY").unwrap().value, 40);
        assert_eq!(attrs.iter().find(|a| a.code == "FOLIAGE").unwrap().value, 90);
    }

    #[test]
    fn test_class_sync_without_previous_class_never_removes() {
        let next = PlaceClass::new("forest", "Forest").with_attribute("FOLIAGE", 90);

        // Attribute from an earlier request-driven sync, unknown to the class
        let mut attrs = vec![PlaceAttr::new("GRAFFITI", 1)];
        sync_from_class(&mut attrs, None, &next);

        assert_eq!(codes(&attrs), vec!["FOLIAGE", "GRAFFITI"]);
    }

    #[test]
    fn test_class_sync_keeps_codes_outside_both_classes() {
        let previous = PlaceClass::new("cave", "Cave").with_attribute("DARKNESS", 80);
        let next = PlaceClass::new("forest", "Forest").with_attribute("FOLIAGE", 90);

        // "HP" came from a request, neither class defines it
        let mut attrs = vec![PlaceAttr::new("DARKNESS", 75), PlaceAttr::new("HP", 12)];
        sync_from_class(&mut attrs, Some(&previous), &next);

        assert_eq!(codes(&attrs), vec!["FOLIAGE", "HP"]);
    }

    #[test]
    fn test_request_sync_matches_request_keys() {
        let mut attrs = vec![PlaceAttr::new("HP", 20), PlaceAttr::new("DARKNESS", 80)];
        let requested = BTreeMap::from([("HP".to_string(), 15), ("SMELL".to_string(), 3)]);

        sync_from_request(&mut attrs, &requested);

        assert_eq!(codes(&attrs), vec!["HP", "SMELL"]);
        assert_eq!(attrs.iter().find(|a| a.code == "HP").unwrap().value, 15);
        assert_eq!(attrs.iter().find(|a| a.code == "SMELL").unwrap().value, 3);
    }

    #[test]
    fn test_request_sync_empty_request_removes_everything() {
        let mut attrs = vec![PlaceAttr::new("HP", 20)];
        sync_from_request(&mut attrs, &BTreeMap::new());
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_existing_attr_is_updated_not_recreated() {
        let mut attrs = vec![PlaceAttr::new("OTHER", 1), PlaceAttr::new("HP", 20)];
        let requested = BTreeMap::from([("OTHER".to_string(), 2), ("HP".to_string(), 5)]);

        sync_from_request(&mut attrs, &requested);

        // In-place update preserves the original ordering of survivors
        assert_eq!(attrs[0].code, "OTHER");
        assert_eq!(attrs[0].value, 2);
        assert_eq!(attrs[1].code, "HP");
        assert_eq!(attrs[1].value, 5);
    }
}
