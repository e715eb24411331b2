//! Tracked-location store
//!
//! In-memory ordered collection of locations plus the current selection,
//! mirrored to the persistence port on every mutation. Persistence failures
//! are logged and swallowed; the in-memory state change always wins. The
//! collection never drops below one location and the selection always
//! references a tracked location.

use std::sync::Arc;

use domain::{DomainError, Location};
use parking_lot::Mutex;
use tracing::warn;

use crate::ports::{LocationStatePort, PersistedLocationState};

struct LocationState {
    locations: Vec<Location>,
    selected_id: String,
}

impl LocationState {
    fn presets() -> Self {
        let locations = Location::presets();
        let selected_id = locations[0].id.clone();
        Self {
            locations,
            selected_id,
        }
    }

    fn snapshot(&self) -> PersistedLocationState {
        PersistedLocationState {
            locations: self.locations.clone(),
            selected_id: self.selected_id.clone(),
        }
    }
}

/// Service managing the tracked locations and the current selection
pub struct LocationService {
    store: Arc<dyn LocationStatePort>,
    state: Mutex<LocationState>,
}

impl std::fmt::Debug for LocationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationService").finish_non_exhaustive()
    }
}

impl LocationService {
    /// Create the service, hydrating from the persistence port
    ///
    /// Absent, empty, or corrupt stored state falls back to the preset list.
    pub fn new(store: Arc<dyn LocationStatePort>) -> Self {
        let state = match store.load() {
            Ok(Some(persisted)) if !persisted.locations.is_empty() => {
                let selected_id = if persisted
                    .locations
                    .iter()
                    .any(|l| l.id == persisted.selected_id)
                {
                    persisted.selected_id
                } else {
                    persisted.locations[0].id.clone()
                };
                LocationState {
                    locations: persisted.locations,
                    selected_id,
                }
            },
            Ok(_) => LocationState::presets(),
            Err(e) => {
                warn!(error = %e, "unable to hydrate locations from storage, using presets");
                LocationState::presets()
            },
        };
        Self {
            store,
            state: Mutex::new(state),
        }
    }

    /// Ordered list of tracked locations
    pub fn list(&self) -> Vec<Location> {
        self.state.lock().locations.clone()
    }

    /// The currently selected location
    pub fn selected(&self) -> Location {
        let state = self.state.lock();
        state
            .locations
            .iter()
            .find(|l| l.id == state.selected_id)
            .cloned()
            // Unreachable by invariant; first element is the safe recovery.
            .unwrap_or_else(|| state.locations[0].clone())
    }

    /// Track a location by query, or select the existing match
    ///
    /// A case-insensitive query match selects the existing entry instead of
    /// creating a duplicate. New locations are inserted at the front.
    pub fn add(&self, query: &str) -> Result<Location, DomainError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "location query must not be empty".to_string(),
            ));
        }

        let mut state = self.state.lock();
        if let Some(existing) = state
            .locations
            .iter()
            .find(|l| l.matches_query(trimmed))
            .cloned()
        {
            state.selected_id = existing.id.clone();
            self.persist(&state);
            return Ok(existing);
        }

        let location = Location::from_query(trimmed);
        state.locations.insert(0, location.clone());
        state.selected_id = location.id.clone();
        self.persist(&state);
        Ok(location)
    }

    /// Stop tracking a location
    ///
    /// Refuses to remove the last remaining location or an unknown id. When
    /// the selected location is removed, selection moves to the new first
    /// element.
    pub fn remove(&self, id: &str) -> Result<(), DomainError> {
        let mut state = self.state.lock();
        if state.locations.len() <= 1 {
            return Err(DomainError::NotPermitted(
                "at least one location must remain".to_string(),
            ));
        }
        let Some(index) = state.locations.iter().position(|l| l.id == id) else {
            return Err(DomainError::not_found("Location", id));
        };

        state.locations.remove(index);
        if state.selected_id == id {
            state.selected_id = state.locations[0].id.clone();
        }
        self.persist(&state);
        Ok(())
    }

    /// Select a tracked location by id
    ///
    /// Unknown ids are rejected; the previous selection is preserved.
    pub fn select(&self, id: &str) -> Result<Location, DomainError> {
        let mut state = self.state.lock();
        let Some(location) = state.locations.iter().find(|l| l.id == id).cloned() else {
            return Err(DomainError::not_found("Location", id));
        };
        state.selected_id = location.id.clone();
        self.persist(&state);
        Ok(location)
    }

    fn persist(&self, state: &LocationState) {
        if let Err(e) = self.store.save(&state.snapshot()) {
            warn!(error = %e, "unable to persist locations to storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockLocationStatePort, PersistenceError};

    fn service_with_presets() -> LocationService {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_save().returning(|_| Ok(()));
        LocationService::new(Arc::new(store))
    }

    #[test]
    fn hydrates_presets_when_store_is_empty() {
        let service = service_with_presets();
        let locations = service.list();
        assert_eq!(locations.len(), 5);
        assert_eq!(service.selected().id, "new-york");
    }

    #[test]
    fn hydrates_presets_when_store_fails() {
        let mut store = MockLocationStatePort::new();
        store
            .expect_load()
            .returning(|| Err(PersistenceError::Corrupt("bad json".to_string())));
        let service = LocationService::new(Arc::new(store));
        assert_eq!(service.list().len(), 5);
    }

    #[test]
    fn hydrates_persisted_state() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| {
            Ok(Some(PersistedLocationState {
                locations: vec![Location::from_query("Oslo"), Location::from_query("Bergen")],
                selected_id: "bergen".to_string(),
            }))
        });
        let service = LocationService::new(Arc::new(store));
        assert_eq!(service.list().len(), 2);
        assert_eq!(service.selected().id, "bergen");
    }

    #[test]
    fn unknown_persisted_selection_falls_back_to_first() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| {
            Ok(Some(PersistedLocationState {
                locations: vec![Location::from_query("Oslo")],
                selected_id: "gone".to_string(),
            }))
        });
        let service = LocationService::new(Arc::new(store));
        assert_eq!(service.selected().id, "oslo");
    }

    #[test]
    fn add_creates_selects_and_persists() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_save().times(1).returning(|_| Ok(()));
        let service = LocationService::new(Arc::new(store));

        let added = service.add("Lisbon").unwrap();
        assert_eq!(added.id, "lisbon");
        assert_eq!(service.list().len(), 6);
        assert_eq!(service.list()[0].id, "lisbon");
        assert_eq!(service.selected().id, "lisbon");
    }

    #[test]
    fn add_existing_query_selects_instead_of_duplicating() {
        let service = service_with_presets();
        let result = service.add("chicago").unwrap();
        assert_eq!(result.id, "chicago");
        assert_eq!(service.list().len(), 5);
        assert_eq!(service.selected().id, "chicago");
    }

    #[test]
    fn add_rejects_empty_query() {
        let service = service_with_presets();
        assert!(matches!(
            service.add("   "),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn remove_moves_selection_to_first() {
        let service = service_with_presets();
        service.remove("new-york").unwrap();
        assert_eq!(service.list().len(), 4);
        assert_eq!(service.selected().id, "san-francisco");
    }

    #[test]
    fn remove_keeps_selection_when_other_removed() {
        let service = service_with_presets();
        service.remove("miami").unwrap();
        assert_eq!(service.selected().id, "new-york");
    }

    #[test]
    fn remove_unknown_id_fails() {
        let service = service_with_presets();
        assert!(matches!(
            service.remove("atlantis"),
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(service.list().len(), 5);
    }

    #[test]
    fn remove_never_drops_below_one() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| {
            Ok(Some(PersistedLocationState {
                locations: vec![Location::from_query("Oslo")],
                selected_id: "oslo".to_string(),
            }))
        });
        let service = LocationService::new(Arc::new(store));

        assert!(matches!(
            service.remove("oslo"),
            Err(DomainError::NotPermitted(_))
        ));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn select_unknown_id_keeps_previous_selection() {
        let service = service_with_presets();
        assert!(service.select("atlantis").is_err());
        assert_eq!(service.selected().id, "new-york");
    }

    #[test]
    fn select_known_id_switches() {
        let service = service_with_presets();
        let selected = service.select("miami").unwrap();
        assert_eq!(selected.id, "miami");
        assert_eq!(service.selected().id, "miami");
    }

    #[test]
    fn selection_always_within_collection() {
        let service = service_with_presets();
        service.add("Tokyo").unwrap();
        service.remove("tokyo").unwrap();
        let _ = service.select("nowhere");
        let selected = service.selected();
        assert!(service.list().iter().any(|l| l.id == selected.id));
    }

    #[test]
    fn persistence_failure_is_swallowed() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| Ok(None));
        store
            .expect_save()
            .returning(|_| Err(PersistenceError::Storage("disk full".to_string())));
        let service = LocationService::new(Arc::new(store));

        let added = service.add("Lisbon").unwrap();
        assert_eq!(added.id, "lisbon");
        assert_eq!(service.selected().id, "lisbon");
    }

    #[test]
    fn every_mutation_persists() {
        let mut store = MockLocationStatePort::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_save().times(3).returning(|_| Ok(()));
        let service = LocationService::new(Arc::new(store));

        service.add("Tokyo").unwrap();
        service.select("miami").unwrap();
        service.remove("tokyo").unwrap();
    }
}
