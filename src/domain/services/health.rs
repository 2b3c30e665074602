//! Place health evaluation
//!
//! A place whose class defines a MAXHP attribute can be destroyed. The
//! requested HP drives the verdict: exhausted HP destroys the place, HP
//! above the maximum is clamped back down. A place without MAXHP (or with
//! MAXHP 0) is indestructible and never clamped.

use std::collections::BTreeMap;

use crate::domain::entities::PlaceAttr;

/// Attribute code for a place's current hit points
pub const HP_ATTR: &str = "HP";

/// Attribute code for a place's maximum hit points
pub const MAX_HP_ATTR: &str = "MAXHP";

/// Evaluate place health against a requested attribute map.
///
/// `requested` is the same map the preceding request-driven attribute sync
/// consumed; an absent HP entry counts as 0. The clamp mutates the stored
/// HP attribute in place and applies over whatever value that sync just
/// wrote. Clamping and destruction are mutually exclusive outcomes of one
/// evaluation: a value above the maximum cannot also be `<= 0`.
///
/// Returns whether the place is to be destroyed.
pub fn evaluate(attrs: &mut [PlaceAttr], requested: &BTreeMap<String, i32>) -> bool {
    let max_hp = attrs
        .iter()
        .find(|a| a.code == MAX_HP_ATTR)
        .map(|a| a.value)
        .unwrap_or(0);

    let current_hp = requested.get(HP_ATTR).copied().unwrap_or(0);

    if max_hp == 0 {
        return false;
    }

    if current_hp > max_hp {
        if let Some(hp) = attrs.iter_mut().find(|a| a.code == HP_ATTR) {
            hp.value = max_hp;
        }
        return false;
    }

    current_hp <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(hp: i32, max_hp: i32) -> Vec<PlaceAttr> {
        vec![
            PlaceAttr::new(HP_ATTR, hp),
            PlaceAttr::new(MAX_HP_ATTR, max_hp),
        ]
    }

    fn request(hp: i32) -> BTreeMap<String, i32> {
        BTreeMap::from([(HP_ATTR.to_string(), hp)])
    }

    #[test]
    fn test_hp_above_max_is_clamped_not_destroyed() {
        let mut attrs = attrs(150, 100);

        let destroyed = evaluate(&mut attrs, &request(150));

        assert!(!destroyed);
        assert_eq!(attrs.iter().find(|a| a.code == HP_ATTR).unwrap().value, 100);
    }

    #[test]
    fn test_exhausted_hp_destroys() {
        let mut zero = attrs(0, 100);
        assert!(evaluate(&mut zero, &request(0)));

        let mut negative = attrs(-5, 100);
        assert!(evaluate(&mut negative, &request(-5)));
    }

    #[test]
    fn test_missing_hp_in_request_counts_as_zero() {
        let mut attrs = attrs(50, 100);
        assert!(evaluate(&mut attrs, &BTreeMap::new()));
    }

    #[test]
    fn test_indestructible_place_is_never_destroyed_or_clamped() {
        let mut attrs = vec![PlaceAttr::new(HP_ATTR, 9999)];

        assert!(!evaluate(&mut attrs, &request(9999)));
        assert!(!evaluate(&mut attrs, &request(0)));
        assert_eq!(attrs[0].value, 9999);
    }

    #[test]
    fn test_hp_within_bounds_is_untouched() {
        let mut attrs = attrs(60, 100);

        let destroyed = evaluate(&mut attrs, &request(60));

        assert!(!destroyed);
        assert_eq!(attrs.iter().find(|a| a.code == HP_ATTR).unwrap().value, 60);
    }
}
