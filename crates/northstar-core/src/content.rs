//! Mission content table: focus area → ordered list of daily missions.
//!
//! The built-in table ships as TOML inside the binary. A replacement table
//! can be loaded from disk (`content.missions_path` in the config), so new
//! focus areas need no code change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result, ValidationError};
use crate::goal::GoalCategory;

const BUILTIN_MISSIONS: &str = include_str!("../content/missions.toml");

/// Missions registered for one focus area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusAreaContent {
    /// Category the focus area can be chosen under (body or mind).
    pub category: GoalCategory,
    /// Ordered, non-empty list of mission texts.
    pub missions: Vec<String>,
}

/// Static lookup from focus-area key to its mission list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionContentTable {
    #[serde(default)]
    focus_areas: BTreeMap<String, FocusAreaContent>,
}

impl MissionContentTable {
    /// The table compiled into the crate.
    pub fn builtin() -> Self {
        match Self::from_toml_str(BUILTIN_MISSIONS) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("built-in mission table is invalid: {e}");
                Self::default()
            }
        }
    }

    /// Parse and validate a table from TOML text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or any list is empty.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: MissionContentTable =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            focus_areas = table.focus_areas.len(),
            "loaded mission content table"
        );
        Ok(table)
    }

    /// Every list must be non-empty and belong to a focus-area category.
    ///
    /// # Errors
    /// Returns the first offending focus area.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (key, area) in &self.focus_areas {
            if area.missions.is_empty() {
                return Err(ValidationError::EmptyCollection(format!(
                    "missions for focus area '{key}'"
                )));
            }
            if !matches!(area.category, GoalCategory::Body | GoalCategory::Mind) {
                return Err(ValidationError::InvalidValue {
                    field: format!("focus_areas.{key}.category"),
                    message: format!("focus areas belong to body or mind, not {}", area.category),
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, focus_area: &str) -> Option<&FocusAreaContent> {
        self.focus_areas.get(focus_area)
    }

    pub fn missions(&self, focus_area: &str) -> Option<&[String]> {
        self.get(focus_area).map(|area| area.missions.as_slice())
    }

    /// Mission for `day` (day-of-year), cycling through the list.
    pub fn mission_for_day(&self, focus_area: &str, day: u32) -> Option<&str> {
        let missions = self.missions(focus_area)?;
        if missions.is_empty() {
            return None;
        }
        missions
            .get(day as usize % missions.len())
            .map(String::as_str)
    }

    /// Focus areas in key order.
    pub fn focus_areas(&self) -> impl Iterator<Item = (&str, &FocusAreaContent)> {
        self.focus_areas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Focus areas selectable under `category`.
    pub fn focus_areas_for(&self, category: GoalCategory) -> Vec<&str> {
        self.focus_areas()
            .filter(|(_, area)| area.category == category)
            .map(|(key, _)| key)
            .collect()
    }

    pub fn insert(&mut self, focus_area: impl Into<String>, content: FocusAreaContent) {
        self.focus_areas.insert(focus_area.into(), content);
    }
}
