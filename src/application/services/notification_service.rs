//! Notification Service - Derives and dispatches place change notifications
//!
//! The differ compares a before/after pair of place snapshots and produces
//! an ordered list of notifications: class changes first, then newly
//! created exits, then flag changes on surviving exits. Destruction has
//! its own entry point since a destroyed place has no meaningful "after".
//!
//! Dispatch runs only after the state transition committed and never
//! feeds failures back into it.

use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::outbound::{NotificationPort, WorldContext};
use crate::domain::entities::Place;
use crate::domain::events::{PlaceEventKind, PlaceNotification};

/// Service pairing the pure change differ with the notification transport
pub struct NotificationService {
    port: Arc<dyn NotificationPort>,
}

impl NotificationService {
    pub fn new(port: Arc<dyn NotificationPort>) -> Self {
        Self { port }
    }

    /// Notifications for a destroyed place
    pub fn place_destroyed(place: &Place, ctx: &WorldContext) -> Vec<PlaceNotification> {
        vec![
            PlaceNotification::new(place.id, PlaceEventKind::PlaceDestroy)
                .with_args(vec![place.display_name().to_string()])
                .with_target(place.id)
                .with_world(ctx.world_name.clone()),
        ]
    }

    /// Notifications derived from a before/after pair of place snapshots
    pub fn place_changed(
        before: &Place,
        after: &Place,
        ctx: &WorldContext,
    ) -> Vec<PlaceNotification> {
        let mut notifications = Vec::new();

        Self::check_class_change(before, after, ctx, &mut notifications);
        Self::check_created_exits(before, after, ctx, &mut notifications);
        Self::check_updated_exits(before, after, ctx, &mut notifications);

        notifications
    }

    fn check_class_change(
        before: &Place,
        after: &Place,
        ctx: &WorldContext,
        notifications: &mut Vec<PlaceNotification>,
    ) {
        if before.place_class.code != after.place_class.code {
            notifications.push(
                PlaceNotification::new(after.id, PlaceEventKind::PlaceClassChange)
                    .with_args(vec![
                        before.display_name().to_string(),
                        after.place_class.name.clone(),
                    ])
                    .with_target(after.id)
                    .with_world(ctx.world_name.clone()),
            );
        }
    }

    /// Exits present after but not before, by direction identity.
    ///
    /// Each new exit announces itself twice: at the place, phrased from
    /// the new neighbor's perspective (the direction leading back), and
    /// at the exit's target place with the direction itself.
    fn check_created_exits(
        before: &Place,
        after: &Place,
        ctx: &WorldContext,
        notifications: &mut Vec<PlaceNotification>,
    ) {
        for exit in after
            .exits
            .iter()
            .filter(|e| !before.exits.iter().any(|b| b.same_exit(e)))
        {
            notifications.push(
                PlaceNotification::new(after.id, PlaceEventKind::PlaceExitCreate)
                    .with_args(vec![exit.direction.opposed().to_string()])
                    .with_target(after.id)
                    .with_world(ctx.world_name.clone()),
            );

            notifications.push(
                PlaceNotification::new(exit.target_place, PlaceEventKind::PlaceExitCreate)
                    .with_args(vec![exit.direction.to_string()])
                    .with_target(exit.target_place)
                    .with_world(ctx.world_name.clone()),
            );
        }
    }

    /// Flag edges on exits present both before and after.
    ///
    /// The four triggers are independent; one exit can fire more than one
    /// notification in a single diff.
    fn check_updated_exits(
        before: &Place,
        after: &Place,
        ctx: &WorldContext,
        notifications: &mut Vec<PlaceNotification>,
    ) {
        for before_exit in &before.exits {
            let Some(after_exit) = after.exits.iter().find(|a| a.same_exit(before_exit)) else {
                continue;
            };

            let direction = before_exit.direction.to_string();
            let mut push = |event: PlaceEventKind| {
                notifications.push(
                    PlaceNotification::new(after.id, event)
                        .with_args(vec![direction.clone()])
                        .with_world(ctx.world_name.clone()),
                );
            };

            if before_exit.opened && !after_exit.opened {
                push(PlaceEventKind::PlaceExitClose);
            }
            if !before_exit.opened && after_exit.opened {
                push(PlaceEventKind::PlaceExitOpen);
            }
            if before_exit.locked && !after_exit.locked {
                push(PlaceEventKind::PlaceExitUnlock);
            }
            if !before_exit.locked && after_exit.locked {
                push(PlaceEventKind::PlaceExitLock);
            }
        }
    }

    /// Send notifications through the transport, in order.
    ///
    /// A failed send is logged and skipped; the state transition these
    /// notifications describe has already committed.
    #[instrument(skip(self, notifications, ctx), fields(count = notifications.len()))]
    pub async fn dispatch(&self, notifications: Vec<PlaceNotification>, ctx: &WorldContext) {
        for notification in &notifications {
            if let Err(e) = self
                .port
                .send(notification, ctx.auth_token.as_deref())
                .await
            {
                tracing::warn!(
                    entity_id = %notification.entity_id,
                    event = ?notification.event,
                    "Failed to dispatch notification: {e}"
                );
                continue;
            }

            tracing::info!(
                world = notification.world_name.as_deref().unwrap_or("-"),
                entity_id = %notification.entity_id,
                event = ?notification.event,
                "Dispatched place notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use anyhow::{bail, Result};
    use async_trait::async_trait;

    use crate::domain::entities::{PlaceClass, PlaceExit};
    use crate::domain::value_objects::{Direction, PlaceId};

    fn forest_place() -> Place {
        Place::new(
            PlaceClass::new("forest", "Forest")
                .with_attribute("HP", 100)
                .with_attribute("MAXHP", 100),
        )
    }

    fn ctx_with_world(name: &str) -> WorldContext {
        WorldContext::new(Some(name.to_string()), None)
    }

    #[test]
    fn test_class_change_emits_one_notification_with_name_fallback() {
        let before = forest_place();
        let mut after = before.clone();
        after.place_class = PlaceClass::new("ruins", "Ruins");

        let notifications =
            NotificationService::place_changed(&before, &after, &ctx_with_world("aldebaran"));

        assert_eq!(notifications.len(), 1);
        let n = &notifications[0];
        assert_eq!(n.event, PlaceEventKind::PlaceClassChange);
        assert_eq!(n.message_key, "place.class.change");
        // No place name set, so the before display name is the class name
        assert_eq!(n.args, vec!["Forest".to_string(), "Ruins".to_string()]);
        assert_eq!(n.world_name.as_deref(), Some("aldebaran"));
    }

    #[test]
    fn test_class_change_prefers_place_name_over_class_name() {
        let before = forest_place().with_name("Whispering Woods");
        let mut after = before.clone();
        after.place_class = PlaceClass::new("ruins", "Ruins");

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        assert_eq!(notifications[0].args[0], "Whispering Woods");
        assert_eq!(notifications[0].world_name, None);
    }

    #[test]
    fn test_new_exit_emits_a_pair_of_notifications() {
        let before = forest_place();
        let target = PlaceId::new();
        let mut after = before.clone();
        after.exits.push(PlaceExit::new(Direction::East, target));

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        assert_eq!(notifications.len(), 2);

        // At the place itself: the direction leading back
        assert_eq!(notifications[0].event, PlaceEventKind::PlaceExitCreate);
        assert_eq!(notifications[0].entity_id, after.id);
        assert_eq!(notifications[0].args, vec!["west".to_string()]);

        // At the target: the direction of the new exit
        assert_eq!(notifications[1].event, PlaceEventKind::PlaceExitCreate);
        assert_eq!(notifications[1].entity_id, target);
        assert_eq!(notifications[1].args, vec!["east".to_string()]);
    }

    #[test]
    fn test_closed_exit_emits_exactly_one_close() {
        let target = PlaceId::new();
        let mut before = forest_place();
        before.exits.push(PlaceExit::new(Direction::North, target));

        let mut after = before.clone();
        after.exits[0].opened = false;

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].event, PlaceEventKind::PlaceExitClose);
        assert_eq!(notifications[0].args, vec!["north".to_string()]);
    }

    #[test]
    fn test_open_and_unlock_can_fire_for_the_same_exit() {
        let target = PlaceId::new();
        let mut before = forest_place();
        let mut exit = PlaceExit::new(Direction::Down, target);
        exit.opened = false;
        exit.locked = true;
        before.exits.push(exit);

        let mut after = before.clone();
        after.exits[0].opened = true;
        after.exits[0].locked = false;

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        let events: Vec<PlaceEventKind> = notifications.iter().map(|n| n.event).collect();
        assert_eq!(
            events,
            vec![PlaceEventKind::PlaceExitOpen, PlaceEventKind::PlaceExitUnlock]
        );
        assert!(notifications.iter().all(|n| n.args == vec!["down".to_string()]));
    }

    #[test]
    fn test_unchanged_place_emits_nothing() {
        let target = PlaceId::new();
        let mut before = forest_place();
        before.exits.push(PlaceExit::new(Direction::North, target));
        let after = before.clone();

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        assert!(notifications.is_empty());
    }

    #[test]
    fn test_class_change_is_reported_before_exit_changes() {
        let target = PlaceId::new();
        let mut before = forest_place();
        before.exits.push(PlaceExit::new(Direction::North, target));

        let mut after = before.clone();
        after.place_class = PlaceClass::new("ruins", "Ruins");
        after.exits[0].locked = true;
        after.exits.push(PlaceExit::new(Direction::East, target));

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());

        let events: Vec<PlaceEventKind> = notifications.iter().map(|n| n.event).collect();
        assert_eq!(
            events,
            vec![
                PlaceEventKind::PlaceClassChange,
                PlaceEventKind::PlaceExitCreate,
                PlaceEventKind::PlaceExitCreate,
                PlaceEventKind::PlaceExitLock,
            ]
        );
    }

    /// Transport that rejects class-change messages and accepts the rest
    #[derive(Default)]
    struct FlakyPort {
        delivered: Mutex<Vec<PlaceEventKind>>,
    }

    #[async_trait]
    impl NotificationPort for FlakyPort {
        async fn send(
            &self,
            notification: &PlaceNotification,
            _auth_token: Option<&str>,
        ) -> Result<()> {
            if notification.event == PlaceEventKind::PlaceClassChange {
                bail!("transport down");
            }
            self.delivered.lock().unwrap().push(notification.event);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_skips_failed_sends_and_continues() {
        let port = Arc::new(FlakyPort::default());
        let service = NotificationService::new(port.clone());

        let target = PlaceId::new();
        let mut before = forest_place();
        before.exits.push(PlaceExit::new(Direction::North, target));

        let mut after = before.clone();
        after.place_class = PlaceClass::new("ruins", "Ruins");
        after.exits[0].opened = false;

        let notifications =
            NotificationService::place_changed(&before, &after, &WorldContext::default());
        assert_eq!(notifications.len(), 2);

        // The failing class-change send is dropped, the close behind it
        // still goes out
        service.dispatch(notifications, &WorldContext::default()).await;
        assert_eq!(
            *port.delivered.lock().unwrap(),
            vec![PlaceEventKind::PlaceExitClose]
        );
    }

    #[test]
    fn test_destroyed_place_notification() {
        let place = forest_place().with_name("Old Mill");

        let notifications =
            NotificationService::place_destroyed(&place, &ctx_with_world("aldebaran"));

        assert_eq!(notifications.len(), 1);
        let n = &notifications[0];
        assert_eq!(n.event, PlaceEventKind::PlaceDestroy);
        assert_eq!(n.message_key, "place.destroy");
        assert_eq!(n.args, vec!["Old Mill".to_string()]);
        assert_eq!(n.entity_id, place.id);
        assert_eq!(n.target_entity_id, Some(place.id));
    }
}
