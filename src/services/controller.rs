// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout controller: the application context behind every user action.
//!
//! Handles:
//! - Adding enriched workouts to the store
//! - Sorting the rendered list
//! - Editing, deleting, and clearing workouts
//! - Reloading the presentation from persisted state

use crate::error::{AppError, Result};
use crate::models::{Coordinates, WorkoutEdit, WorkoutRecord, WorkoutSubmission};
use crate::services::enrichment::{Enrichment, GeoEnricher};
use crate::services::presentation::{self, ListView, MapView, Marker, WorkoutListItem};
use crate::store::WorkoutStore;
use tokio::sync::Mutex;

/// Owns the store, the list ordering, and the current edit target.
pub struct WorkoutController {
    store: WorkoutStore,
    view: ListView,
    editing: Option<String>,
    map_zoom: u8,
}

impl WorkoutController {
    pub fn new(store: WorkoutStore, map_zoom: u8) -> Self {
        Self {
            store,
            view: ListView::default(),
            editing: None,
            map_zoom,
        }
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// ID of the workout whose edit form is open, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// The list as currently shown.
    pub fn list(&self) -> Vec<WorkoutListItem> {
        self.view.current(self.store.records())
    }

    pub fn find(&self, id: &str) -> Result<&WorkoutRecord> {
        self.store
            .find_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
    }

    /// Build a record from a submission and its lookups, then store it.
    pub fn add(
        &mut self,
        submission: &WorkoutSubmission,
        enrichment: Enrichment,
    ) -> Result<WorkoutRecord> {
        submission.validate()?;
        let record = WorkoutRecord::new(
            submission.kind,
            submission.coords(),
            submission.fields,
            enrichment.location,
            enrichment.weather,
        );
        self.store.append(record.clone())?;
        Ok(record)
    }

    pub fn sort_toggle(&mut self) -> Vec<WorkoutListItem> {
        self.view.sort_toggle(self.store.records())
    }

    /// Open the edit form for a workout.
    pub fn begin_edit(&mut self, id: &str) -> Result<WorkoutEdit> {
        let form = self.find(id)?.to_edit();
        self.editing = Some(id.to_string());
        tracing::debug!(id, "Editing workout");
        Ok(form)
    }

    /// Apply the edit form to the workout opened by `begin_edit`.
    ///
    /// On validation failure the edit target stays open so the user can fix
    /// the form.
    pub fn submit_edit(&mut self, edit: &WorkoutEdit) -> Result<Vec<WorkoutListItem>> {
        let id = self
            .editing
            .clone()
            .ok_or_else(|| AppError::BadRequest("No workout is being edited".to_string()))?;

        self.store.update(&id, edit)?;
        self.editing = None;
        Ok(self.reload())
    }

    pub fn delete(&mut self, id: &str) -> Result<Vec<WorkoutListItem>> {
        self.store.remove(id)?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        Ok(self.reload())
    }

    /// Delete every workout. Requires explicit confirmation.
    pub fn delete_all(&mut self, confirmed: bool) -> Result<Vec<WorkoutListItem>> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(
                "Are you sure you want to delete all?".to_string(),
            ));
        }
        self.store.clear()?;
        self.editing = None;
        Ok(self.reload())
    }

    /// Re-read the store from storage and render it in insertion order.
    pub fn reload(&mut self) -> Vec<WorkoutListItem> {
        self.store.reload();
        self.view.reset();
        self.list()
    }

    /// Center the map on a workout.
    pub fn focus(&mut self, id: &str) -> Result<MapView> {
        let record = self
            .store
            .record_click(id)?
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;
        Ok(MapView {
            center: Some(record.coords),
            zoom: self.map_zoom,
        })
    }

    /// Initial map view for a client position (if the client has one).
    pub fn map_view(&self, position: Option<Coordinates>) -> MapView {
        MapView {
            center: position.filter(Coordinates::is_valid),
            zoom: self.map_zoom,
        }
    }

    pub fn markers(&self) -> Vec<Marker> {
        presentation::markers(self.store.records())
    }
}

/// Validate, enrich, and store a new workout.
///
/// The controller lock is only held after both lookups finish, so slow
/// lookups never block other requests.
pub async fn create_workout(
    controller: &Mutex<WorkoutController>,
    enricher: &GeoEnricher,
    submission: &WorkoutSubmission,
) -> Result<WorkoutRecord> {
    submission.validate()?;

    let enrichment = enricher.enrich(submission.coords()).await?;

    let record = controller.lock().await.add(submission, enrichment)?;
    tracing::info!(id = %record.id, description = %record.description, "Created workout");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocationData, WeatherData, WorkoutFields, WorkoutKind};
    use crate::store::MemoryStorage;

    fn controller() -> WorkoutController {
        WorkoutController::new(WorkoutStore::open(Box::new(MemoryStorage::new())), 13)
    }

    fn submission(rating: f64) -> WorkoutSubmission {
        WorkoutSubmission {
            kind: WorkoutKind::Running,
            lat: 51.5,
            lng: -0.12,
            fields: WorkoutFields {
                distance: 5.0,
                duration: 30.0,
                rating,
            },
        }
    }

    fn enrichment() -> Enrichment {
        Enrichment {
            location: LocationData {
                city: "London".to_string(),
                country: "UK".to_string(),
                timezone: Some("Europe/London".to_string()),
            },
            weather: WeatherData {
                temperature: 15.0,
                weathercode: 2,
                windspeed: 10.0,
            },
        }
    }

    /// Add with distinct IDs (IDs come from the millisecond clock).
    fn add_with_id(c: &mut WorkoutController, rating: f64, id: &str) -> String {
        let mut record = c.add(&submission(rating), enrichment()).unwrap();
        c.store.remove(&record.id).unwrap();
        record.id = id.to_string();
        c.store.append(record).unwrap();
        id.to_string()
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let mut c = controller();
        assert!(matches!(
            c.add(&submission(0.0), enrichment()),
            Err(AppError::Validation(_))
        ));
        assert!(c.store().is_empty());
    }

    #[test]
    fn test_edit_flow() {
        let mut c = controller();
        let id = add_with_id(&mut c, 8.0, "1");

        let form = c.begin_edit(&id).unwrap();
        assert_eq!(form.rating, 8.0);
        assert_eq!(c.editing(), Some("1"));

        let bad = WorkoutEdit {
            rating: f64::NAN,
            ..form.clone()
        };
        assert!(c.submit_edit(&bad).is_err());
        assert_eq!(c.editing(), Some("1"));

        let good = WorkoutEdit {
            kind: WorkoutKind::Walking,
            rating: 3.0,
            ..form
        };
        let list = c.submit_edit(&good).unwrap();
        assert_eq!(list[0].kind, WorkoutKind::Walking);
        assert_eq!(list[0].rating, 3.0);
        assert_eq!(c.editing(), None);

        assert!(matches!(c.submit_edit(&good), Err(AppError::BadRequest(_))));
        assert!(matches!(c.begin_edit("nope"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_delete_and_delete_all() {
        let mut c = controller();
        let a = add_with_id(&mut c, 1.0, "a");
        let b = add_with_id(&mut c, 2.0, "b");
        let _ = add_with_id(&mut c, 3.0, "c");

        let list = c.delete(&b).unwrap();
        let ids: Vec<_> = list.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);

        // Unknown IDs are a no-op
        assert_eq!(c.delete("zzz").unwrap().len(), 2);

        assert!(matches!(
            c.delete_all(false),
            Err(AppError::ConfirmationRequired(_))
        ));
        assert_eq!(c.store().len(), 2);

        assert!(c.delete_all(true).unwrap().is_empty());
        assert!(c.store().find_by_id(&a).is_none());
        assert!(c.store().load_all().is_empty());
    }

    #[test]
    fn test_reload_resets_sort() {
        let mut c = controller();
        add_with_id(&mut c, 9.0, "a");
        add_with_id(&mut c, 1.0, "b");
        add_with_id(&mut c, 5.0, "c");

        let sorted: Vec<_> = c.sort_toggle().into_iter().map(|i| i.id).collect();
        assert_eq!(sorted, vec!["a", "c", "b"]);

        let reloaded: Vec<_> = c.reload().into_iter().map(|i| i.id).collect();
        assert_eq!(reloaded, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_focus_and_map_view() {
        let mut c = controller();
        let id = add_with_id(&mut c, 8.0, "a");

        let view = c.focus(&id).unwrap();
        assert_eq!(view.center, Some(Coordinates::new(51.5, -0.12)));
        assert_eq!(view.zoom, 13);
        assert_eq!(c.store().find_by_id(&id).unwrap().clicks, 1);

        assert!(c.focus("missing").is_err());
        assert_eq!(c.map_view(None).center, None);
        assert_eq!(c.map_view(Some(Coordinates::new(200.0, 0.0))).center, None);
        assert_eq!(c.markers().len(), 1);
    }
}
