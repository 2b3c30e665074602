//! Place Service - Reconciles requested place state against stored state
//!
//! The update pipeline runs in a fixed order: request-driven attribute
//! sync, health evaluation (which may clamp HP or mark the place for
//! destruction), then class change and exit sync. Destruction
//! short-circuits the rest and may cascade into a class demise instead of
//! a delete. Notifications are derived from a before/after diff and
//! dispatched only after the transition persisted.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::application::dto::{CreatePlaceRequest, PlaceResponse, UpdatePlaceRequest};
use crate::application::ports::outbound::{
    PlaceClassRepositoryPort, PlaceRepositoryPort, WorldContext,
};
use crate::application::services::NotificationService;
use crate::domain::entities::{ExitState, Place, PlaceClass, PlaceExit};
use crate::domain::services::{attribute_sync, exit_sync, health};
use crate::domain::value_objects::{Direction, PlaceId};

/// Errors surfaced by place operations
///
/// Only two domain error kinds exist; everything else is a store failure
/// propagated unmodified.
#[derive(Debug, thiserror::Error)]
pub enum PlaceServiceError {
    #[error("Place not found: {0}")]
    PlaceNotFound(PlaceId),

    #[error("Place class not found: {0}")]
    PlaceClassNotFound(String),

    #[error("An exit already exists in direction {0}")]
    ExitAlreadyExists(Direction),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}

/// Place service trait defining the application use cases
#[async_trait]
pub trait PlaceService: Send + Sync {
    /// Get a place by id, with exit names resolved
    async fn get_place(&self, id: PlaceId) -> Result<PlaceResponse, PlaceServiceError>;

    /// Reconcile a place with a requested state
    async fn update_place(
        &self,
        id: PlaceId,
        request: UpdatePlaceRequest,
        ctx: &WorldContext,
    ) -> Result<PlaceResponse, PlaceServiceError>;

    /// Create a place connected to an existing one
    async fn create_place(
        &self,
        request: CreatePlaceRequest,
        ctx: &WorldContext,
    ) -> Result<PlaceResponse, PlaceServiceError>;

    /// Destroy a place, demising it into another class when its class
    /// defines one
    async fn destroy_place(&self, id: PlaceId, ctx: &WorldContext)
        -> Result<(), PlaceServiceError>;
}

/// Default implementation of PlaceService over the repository ports
pub struct PlaceServiceImpl {
    places: Arc<dyn PlaceRepositoryPort>,
    place_classes: Arc<dyn PlaceClassRepositoryPort>,
    notifications: NotificationService,
}

impl PlaceServiceImpl {
    pub fn new(
        places: Arc<dyn PlaceRepositoryPort>,
        place_classes: Arc<dyn PlaceClassRepositoryPort>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            places,
            place_classes,
            notifications,
        }
    }

    async fn fetch_place(&self, id: PlaceId) -> Result<Place, PlaceServiceError> {
        self.places
            .get(id)
            .await?
            .ok_or(PlaceServiceError::PlaceNotFound(id))
    }

    async fn fetch_class(&self, code: &str) -> Result<PlaceClass, PlaceServiceError> {
        self.place_classes
            .get(code)
            .await?
            .ok_or_else(|| PlaceServiceError::PlaceClassNotFound(code.to_string()))
    }

    /// Swap a place's class and resync its attributes to the new class.
    ///
    /// Used both by requested reclassification and by the demise cascade.
    async fn change_class(
        &self,
        place: &mut Place,
        new_class_code: &str,
    ) -> Result<(), PlaceServiceError> {
        let new_class = self.fetch_class(new_class_code).await?;
        attribute_sync::sync_from_class(&mut place.attrs, Some(&place.place_class), &new_class);
        place.place_class = new_class;
        Ok(())
    }

    /// Build a response, resolving each exit's display name from the
    /// target place's class.
    async fn to_response(&self, place: &Place) -> Result<PlaceResponse, PlaceServiceError> {
        let mut exit_names: BTreeMap<Direction, Option<String>> = BTreeMap::new();
        for exit in &place.exits {
            let name = self
                .places
                .get(exit.target_place)
                .await?
                .map(|target| target.place_class.name);
            exit_names.insert(exit.direction, name);
        }

        Ok(PlaceResponse::from_place(place, |exit| {
            exit_names.get(&exit.direction).cloned().flatten()
        }))
    }
}

#[async_trait]
impl PlaceService for PlaceServiceImpl {
    #[instrument(skip(self))]
    async fn get_place(&self, id: PlaceId) -> Result<PlaceResponse, PlaceServiceError> {
        let place = self.fetch_place(id).await?;
        self.to_response(&place).await
    }

    #[instrument(skip(self, request, ctx), fields(class_code = %request.class_code))]
    async fn update_place(
        &self,
        id: PlaceId,
        request: UpdatePlaceRequest,
        ctx: &WorldContext,
    ) -> Result<PlaceResponse, PlaceServiceError> {
        let mut place = self.fetch_place(id).await?;
        let before = place.clone();

        // 1. Sync attributes from the request
        attribute_sync::sync_from_request(&mut place.attrs, &request.attrs);

        // 2. Evaluate health on the post-sync values; may clamp HP
        let destroyed = health::evaluate(&mut place.attrs, &request.attrs);

        if destroyed {
            // Short-circuits class change and exit sync entirely
            self.destroy_place(id, ctx).await?;

            // Either the transformed (demised) place, or PlaceNotFound
            // when it was fully deleted
            return self.get_place(id).await;
        }

        // 3. Requested class change resyncs attributes to the new class
        if place.place_class.code != request.class_code {
            self.change_class(&mut place, &request.class_code).await?;
        }

        // 4. Sync exits; a request without exit data is a no-op
        let requested_exits: Option<BTreeMap<Direction, ExitState>> = request
            .exits
            .as_ref()
            .map(|m| m.iter().map(|(d, e)| (*d, ExitState::from(e))).collect());
        exit_sync::sync_exits(&mut place.exits, requested_exits.as_ref());

        self.places.save(&place).await?;
        info!(place_id = %id, "Updated place: {}", place.display_name());

        let notifications = NotificationService::place_changed(&before, &place, ctx);
        self.notifications.dispatch(notifications, ctx).await;

        self.to_response(&place).await
    }

    #[instrument(skip(self, ctx), fields(class_code = %request.place_class_code, direction = %request.direction))]
    async fn create_place(
        &self,
        request: CreatePlaceRequest,
        ctx: &WorldContext,
    ) -> Result<PlaceResponse, PlaceServiceError> {
        let place_class = self.fetch_class(&request.place_class_code).await?;
        let mut target = self.fetch_place(request.target_place_id).await?;

        // The exit mirrored onto the target runs the other way
        let opposed = request.direction.opposed();
        if target.has_exit(opposed) {
            return Err(PlaceServiceError::ExitAlreadyExists(opposed));
        }

        // Persist with minimum information first so the place has an
        // identity the mirrored exit can point at
        let mut place = Place::new(place_class.clone());
        self.places.save(&place).await?;

        attribute_sync::sync_from_class(&mut place.attrs, None, &place_class);
        place
            .exits
            .push(PlaceExit::new(request.direction, target.id));
        self.places.save(&place).await?;

        let target_before = target.clone();
        target.exits.push(PlaceExit::new(opposed, place.id));
        self.places.save(&target).await?;

        info!(
            place_id = %place.id,
            target_id = %target.id,
            "Created place of class {} {} of {}",
            place.place_class.code,
            opposed,
            target.display_name()
        );

        let notifications = NotificationService::place_changed(&target_before, &target, ctx);
        self.notifications.dispatch(notifications, ctx).await;

        self.to_response(&place).await
    }

    #[instrument(skip(self, ctx))]
    async fn destroy_place(
        &self,
        id: PlaceId,
        ctx: &WorldContext,
    ) -> Result<(), PlaceServiceError> {
        let place = self.fetch_place(id).await?;
        let demise_code = place.place_class.demised_place_class_code.clone();

        if let Some(demise_code) = demise_code {
            // The place survives, transformed into its demise class
            let mut demised = place.clone();
            self.change_class(&mut demised, &demise_code).await?;
            self.places.save(&demised).await?;
            info!(
                place_id = %id,
                "Place demised into class {}",
                demised.place_class.code
            );
        } else {
            self.places.delete(id).await?;
            info!(place_id = %id, "Destroyed place: {}", place.display_name());
        }

        let notifications = NotificationService::place_destroyed(&place, ctx);
        self.notifications.dispatch(notifications, ctx).await;

        Ok(())
    }
}
