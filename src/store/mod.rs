// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout store: the ordered in-memory workout list, mirrored to durable
//! storage as a single JSON snapshot after every mutation.

pub mod storage;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};

use crate::error::{AppError, Result};
use crate::models::{WorkoutEdit, WorkoutRecord};

/// Storage key holding the full workout snapshot.
pub const WORKOUTS_KEY: &str = "workouts";

/// Ordered collection of workouts backed by a key-value snapshot.
///
/// A mutation whose write fails is undone, so the in-memory list always
/// matches the last snapshot written.
pub struct WorkoutStore {
    storage: Box<dyn KeyValueStorage>,
    workouts: Vec<WorkoutRecord>,
}

impl WorkoutStore {
    /// Open the store and rehydrate it from the persisted snapshot.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let mut store = Self {
            storage,
            workouts: Vec::new(),
        };
        store.reload();
        tracing::info!(count = store.workouts.len(), "Workout store loaded");
        store
    }

    /// Workouts in insertion order.
    pub fn records(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Add a workout to the end of the list and persist.
    pub fn append(&mut self, record: WorkoutRecord) -> Result<()> {
        tracing::info!(id = %record.id, kind = %record.kind, "Appending workout");
        self.workouts.push(record);
        if let Err(e) = self.persist() {
            self.workouts.pop();
            return Err(e);
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&WorkoutRecord> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Validate and apply an edit in place, then persist.
    ///
    /// The record is left as it was if the edit is invalid or the write fails.
    pub fn update(&mut self, id: &str, edit: &WorkoutEdit) -> Result<()> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

        let previous = self.workouts[index].clone();
        self.workouts[index].apply_edit(edit)?;
        if let Err(e) = self.persist() {
            self.workouts[index] = previous;
            return Err(e);
        }
        tracing::info!(id, kind = %edit.kind, "Updated workout");
        Ok(())
    }

    /// Remove the first workout with this ID and persist.
    ///
    /// Returns `false` (and still persists) when no workout matched.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            tracing::debug!(id, "Remove requested for unknown workout");
            self.persist()?;
            return Ok(false);
        };

        let removed = self.workouts.remove(index);
        if let Err(e) = self.persist() {
            self.workouts.insert(index, removed);
            return Err(e);
        }
        tracing::info!(id, "Removed workout");
        Ok(true)
    }

    /// Count a map focus on the workout and persist.
    pub fn record_click(&mut self, id: &str) -> Result<Option<&WorkoutRecord>> {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            return Ok(None);
        };
        self.workouts[index].clicks += 1;
        if let Err(e) = self.persist() {
            self.workouts[index].clicks -= 1;
            return Err(e);
        }
        Ok(self.workouts.get(index))
    }

    /// Read the persisted snapshot.
    ///
    /// A missing, unreadable, or corrupt snapshot reads as an empty list.
    pub fn load_all(&self) -> Vec<WorkoutRecord> {
        let raw = match self.storage.get(WORKOUTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read workout snapshot");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring corrupt workout snapshot");
            Vec::new()
        })
    }

    /// Replace the in-memory list with the persisted snapshot.
    pub fn reload(&mut self) {
        self.workouts = self.load_all();
    }

    /// Erase the snapshot, then drop every workout.
    ///
    /// The list is kept if the snapshot could not be erased.
    pub fn clear(&mut self) -> Result<()> {
        tracing::info!(count = self.workouts.len(), "Clearing all workouts");
        self.storage.remove(WORKOUTS_KEY)?;
        self.workouts.clear();
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.workouts)
            .map_err(|e| AppError::Persistence(format!("Failed to encode workouts: {}", e)))?;
        self.storage.set(WORKOUTS_KEY, &json)?;
        tracing::debug!(count = self.workouts.len(), "Persisted workouts");
        Ok(())
    }
}
