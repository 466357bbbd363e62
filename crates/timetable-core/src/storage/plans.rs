//! Named plans persisted as JSON.
//!
//! The book always holds at least one plan and always has a current plan.
//! Plans keep their insertion order; the first one is the fallback when the
//! stored current name is missing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::plan::Plan;

/// Plan book file name.
const PLANS_FILE: &str = "plans.json";

/// Name given to the plan a fresh book starts with.
pub const DEFAULT_PLAN: &str = "Plan 1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanBook {
    current: String,
    plans: IndexMap<String, Plan>,
}

impl Default for PlanBook {
    fn default() -> Self {
        let mut plans = IndexMap::new();
        plans.insert(DEFAULT_PLAN.to_string(), Plan::new());
        Self {
            current: DEFAULT_PLAN.to_string(),
            plans,
        }
    }
}

impl PlanBook {
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(PLANS_FILE)
    }

    /// Load the book from `dir`. A missing file yields a fresh book.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let mut book: PlanBook = serde_json::from_str(&content)?;
                book.repair();
                Ok(book)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save the book to `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), content)?;
        tracing::info!("saved {} plan(s), current '{}'", self.plans.len(), self.current);
        Ok(())
    }

    /// Restore the invariants after reading hand-edited or stale files.
    fn repair(&mut self) {
        if self.plans.is_empty() {
            self.plans.insert(DEFAULT_PLAN.to_string(), Plan::new());
        }
        if !self.plans.contains_key(&self.current) {
            if let Some(first) = self.plans.keys().next() {
                tracing::warn!("current plan '{}' missing, using '{}'", self.current, first);
                self.current = first.clone();
            }
        }
    }

    pub fn current_name(&self) -> &str {
        &self.current
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Plan> {
        self.plans.get(name)
    }

    /// The current plan.
    pub fn current(&self) -> &Plan {
        // The constructor and `repair` both guarantee the key exists.
        &self.plans[&self.current]
    }

    pub fn current_mut(&mut self) -> &mut Plan {
        let current = self.current.clone();
        self.plans.entry(current).or_default()
    }

    /// Switch to the named plan, creating an empty one if it does not
    /// exist yet. Names are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::EmptyName`] for blank names.
    pub fn use_plan(&mut self, name: &str) -> Result<&mut Plan> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::EmptyName.into());
        }
        if !self.plans.contains_key(name) {
            tracing::info!("created plan '{}'", name);
        }
        self.current = name.to_string();
        Ok(self.plans.entry(name.to_string()).or_default())
    }
}
