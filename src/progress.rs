//! Level progress persistence
//!
//! The simulation only needs three things from storage: the best turn count
//! per level, the furthest level reached and the level to resume on.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PersistError;

/// Storage collaborator for level progress
pub trait ProgressStore {
    /// Stored best turn count for a level
    fn best_turns(&self, level: usize) -> Option<u32>;
    fn set_best_turns(&mut self, level: usize, turns: u32);
    /// Furthest level unlocked
    fn achieved_level(&self) -> usize;
    fn set_achieved_level(&mut self, level: usize);
    /// Level to resume on
    fn current_level(&self) -> usize;
    fn set_current_level(&mut self, level: usize);
}

/// Progress record, persisted as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub best_turns: BTreeMap<usize, u32>,
    pub achieved_level: usize,
    pub current_level: usize,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file; a missing file is a fresh record
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        if !path.exists() {
            log::info!("No progress at {}, starting fresh", path.display());
            return Ok(Self::new());
        }
        let json = std::fs::read_to_string(path)?;
        let progress: Progress = serde_json::from_str(&json)?;
        log::info!(
            "Loaded progress: level {} of {} reached",
            progress.current_level + 1,
            progress.achieved_level + 1
        );
        Ok(progress)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Progress saved ({} level bests)", self.best_turns.len());
        Ok(())
    }
}

impl ProgressStore for Progress {
    fn best_turns(&self, level: usize) -> Option<u32> {
        self.best_turns.get(&level).copied()
    }

    fn set_best_turns(&mut self, level: usize, turns: u32) {
        self.best_turns.insert(level, turns);
    }

    fn achieved_level(&self) -> usize {
        self.achieved_level
    }

    fn set_achieved_level(&mut self, level: usize) {
        self.achieved_level = level;
    }

    fn current_level(&self) -> usize {
        self.current_level
    }

    fn set_current_level(&mut self, level: usize) {
        self.current_level = level;
    }
}
