//! Curriculum data: subject, grade and the ordered list of units.
//!
//! The curriculum is loaded once from a static JSON file and is read-only
//! afterwards. Loading either yields a fully validated tree or fails with a
//! [`DataLoadError`]; no partial unit list is ever exposed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;

/// Errors raised while loading curriculum data (fatal to the curriculum view)
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read curriculum file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed curriculum data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate unit_number {0}")]
    DuplicateUnitNumber(u32),

    #[error("Invalid unit_number {0}: unit numbers start at 1")]
    InvalidUnitNumber(u32),

    #[error("Unit {0} has an empty unit_title")]
    EmptyUnitTitle(u32),

    #[error("Unit {unit_number} has an empty topic at position {position}")]
    EmptyTopic { unit_number: u32, position: usize },
}

/// A curriculum chapter with its ordered topics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// 1-based unit number, unique within the curriculum
    pub unit_number: u32,

    /// Full descriptive title
    pub unit_title: String,

    /// Class periods allocated to the unit (informational)
    pub periods: u32,

    /// Topic titles, displayed as 1..N
    pub topics: Vec<String>,
}

impl Unit {
    /// Display label for the topic at a zero-based index ("3. Normalisation")
    pub fn topic_label(&self, index: usize) -> Option<String> {
        self.topics
            .get(index)
            .map(|topic| format!("{}. {}", index + 1, topic))
    }

    /// Resolve a topic from a 1-based index or an exact title
    ///
    /// Returns the zero-based index and the topic title.
    pub fn find_topic(&self, needle: &str) -> Option<(usize, &str)> {
        if let Some(index) = self.topics.iter().position(|t| t == needle) {
            return Some((index, self.topics[index].as_str()));
        }

        let number: usize = needle.trim().parse().ok()?;
        let index = number.checked_sub(1)?;
        self.topics.get(index).map(|t| (index, t.as_str()))
    }

    /// Emoji used to illustrate the unit
    pub fn icon(&self) -> &'static str {
        unit_icon(self.unit_number)
    }
}

/// The complete curriculum for one subject and grade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    pub subject: String,
    pub grade: String,
    pub units: Vec<Unit>,
}

impl Curriculum {
    /// Load and validate a curriculum file
    pub async fn load(path: &Path) -> Result<Self, DataLoadError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| DataLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let curriculum = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            units = curriculum.units.len(),
            "Loaded curriculum"
        );
        Ok(curriculum)
    }

    /// Parse and validate curriculum JSON
    pub fn from_json(json: &str) -> Result<Self, DataLoadError> {
        let curriculum: Curriculum = serde_json::from_str(json)?;
        curriculum.validate()?;
        Ok(curriculum)
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let mut seen = HashSet::new();

        for unit in &self.units {
            if unit.unit_number == 0 {
                return Err(DataLoadError::InvalidUnitNumber(unit.unit_number));
            }
            if !seen.insert(unit.unit_number) {
                return Err(DataLoadError::DuplicateUnitNumber(unit.unit_number));
            }
            if unit.unit_title.trim().is_empty() {
                return Err(DataLoadError::EmptyUnitTitle(unit.unit_number));
            }
            if let Some(position) = unit.topics.iter().position(|t| t.trim().is_empty()) {
                return Err(DataLoadError::EmptyTopic {
                    unit_number: unit.unit_number,
                    position: position + 1,
                });
            }
        }

        Ok(())
    }

    /// Find a unit by its number
    pub fn unit(&self, unit_number: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.unit_number == unit_number)
    }

    /// Units sorted by unit number (display order)
    pub fn units_in_order(&self) -> Vec<&Unit> {
        let mut units: Vec<_> = self.units.iter().collect();
        units.sort_by_key(|u| u.unit_number);
        units
    }

    /// Total number of topics across all units
    pub fn topic_count(&self) -> usize {
        self.units.iter().map(|u| u.topics.len()).sum()
    }
}

const UNIT_ICONS: [&str; 12] = [
    "💡", "🖥️", "🔢", "⚡", "🛠️", "🌐", "📋", "🗄️", "👨‍💻", "🌍", "🤖", "💼",
];

/// Emoji for a 1-based unit number, with a book as fallback
pub fn unit_icon(unit_number: u32) -> &'static str {
    (unit_number as usize)
        .checked_sub(1)
        .and_then(|i| UNIT_ICONS.get(i))
        .copied()
        .unwrap_or("📚")
}
