//! Exit reconciliation - merge a place's owned exits with a requested
//! exit map
//!
//! Exits are identified by direction alone. A requested direction that
//! matches an existing exit reuses that exit and overwrites its flags; a
//! new direction builds a fresh exit from the requested state. The owned
//! collection is then replaced wholesale, which is how removals become
//! visible to the store's collection diffing.

use std::collections::BTreeMap;

use crate::domain::entities::{ExitState, PlaceExit};
use crate::domain::value_objects::Direction;

/// Sync exits against a requested direction-to-state map.
///
/// A request without exit data (`None`) leaves the collection untouched.
/// Target reassignment of an existing exit is not supported by this path;
/// only the `visible`, `opened` and `locked` flags are overwritten.
pub fn sync_exits(
    exits: &mut Vec<PlaceExit>,
    requested: Option<&BTreeMap<Direction, ExitState>>,
) {
    let Some(requested) = requested else {
        return;
    };

    let current = std::mem::take(exits);
    let mut kept: Vec<PlaceExit> = current
        .into_iter()
        .filter(|e| requested.contains_key(&e.direction))
        .collect();

    for (direction, state) in requested {
        match kept.iter_mut().find(|e| e.direction == *direction) {
            Some(exit) => {
                exit.visible = state.visible;
                exit.opened = state.opened;
                exit.locked = state.locked;
            }
            None => kept.push(state.to_exit(*direction)),
        }
    }

    *exits = kept;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::PlaceId;

    fn state(target: PlaceId, opened: bool, locked: bool) -> ExitState {
        ExitState {
            target_place: target,
            visible: true,
            opened,
            locked,
        }
    }

    #[test]
    fn test_no_exit_data_is_a_noop() {
        let target = PlaceId::new();
        let mut exits = vec![PlaceExit::new(Direction::North, target)];

        sync_exits(&mut exits, None);

        assert_eq!(exits.len(), 1);
        assert_eq!(exits[0].direction, Direction::North);
    }

    #[test]
    fn test_existing_exit_keeps_identity_and_target() {
        let original_target = PlaceId::new();
        let other_target = PlaceId::new();
        let mut exits = vec![PlaceExit::new(Direction::North, original_target)];

        // Request tries to point north somewhere else with new flags
        let requested = BTreeMap::from([(Direction::North, state(other_target, false, true))]);
        sync_exits(&mut exits, Some(&requested));

        assert_eq!(exits.len(), 1);
        // Flags follow the request, the target does not
        assert_eq!(exits[0].target_place, original_target);
        assert!(!exits[0].opened);
        assert!(exits[0].locked);
    }

    #[test]
    fn test_missing_directions_are_dropped_and_new_ones_added() {
        let target = PlaceId::new();
        let mut exits = vec![
            PlaceExit::new(Direction::North, target),
            PlaceExit::new(Direction::East, target),
        ];

        let requested = BTreeMap::from([
            (Direction::East, state(target, true, false)),
            (Direction::Up, state(target, true, false)),
        ]);
        sync_exits(&mut exits, Some(&requested));

        let mut directions: Vec<Direction> = exits.iter().map(|e| e.direction).collect();
        directions.sort();
        assert_eq!(directions, vec![Direction::East, Direction::Up]);
    }

    #[test]
    fn test_sync_is_idempotent() {
        let target = PlaceId::new();
        let mut exits = vec![PlaceExit::new(Direction::North, target)];
        let requested = BTreeMap::from([
            (Direction::North, state(target, false, false)),
            (Direction::South, state(target, true, true)),
        ]);

        sync_exits(&mut exits, Some(&requested));
        let after_first: Vec<(Direction, PlaceId, bool, bool)> = exits
            .iter()
            .map(|e| (e.direction, e.target_place, e.opened, e.locked))
            .collect();

        sync_exits(&mut exits, Some(&requested));
        let after_second: Vec<(Direction, PlaceId, bool, bool)> = exits
            .iter()
            .map(|e| (e.direction, e.target_place, e.opened, e.locked))
            .collect();

        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_empty_map_removes_all_exits() {
        let target = PlaceId::new();
        let mut exits = vec![PlaceExit::new(Direction::North, target)];

        sync_exits(&mut exits, Some(&BTreeMap::new()));

        assert!(exits.is_empty());
    }
}
