//! One-shot dataset loading.
//!
//! Loading never panics and never returns a bare error: callers get a [`LoadOutcome`] that is
//! either the validated dataset or an explicit failure marker, and decide how to render the
//! failure (the board renders its fallback message).

use crate::error::{Error, Result};
use crate::model::Dataset;
use std::path::Path;

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Dataset),
    Failed(LoadFailure),
}

#[derive(Debug)]
pub struct LoadFailure {
    /// Where the dataset was expected to come from (a path, or `<inline>`).
    pub origin: String,
    pub error: Error,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.error)
    }
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            Self::Loaded(d) => Some(d),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(f) => Some(f),
        }
    }

    pub fn into_result(self) -> Result<Dataset> {
        match self {
            Self::Loaded(d) => Ok(d),
            Self::Failed(f) => Err(f.error),
        }
    }

    fn from_result(origin: &str, result: Result<Dataset>) -> Self {
        match result {
            Ok(dataset) => {
                tracing::debug!(
                    origin,
                    persons = dataset.persons.len(),
                    evidence = dataset.evidence.len(),
                    extra_connections = dataset.extra_connections.len(),
                    "dataset loaded"
                );
                Self::Loaded(dataset)
            }
            Err(error) => {
                tracing::warn!(origin, %error, "dataset load failed");
                Self::Failed(LoadFailure {
                    origin: origin.to_string(),
                    error,
                })
            }
        }
    }
}

/// Parses and validates a dataset.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let dataset: Dataset = serde_json::from_str(text)?;
    validate(&dataset)?;
    Ok(dataset)
}

/// Rejects datasets with more than one tier-0 person.
///
/// Layout pins every tier-0 person at the board center and auto-edges need a single hub, so an
/// ambiguous center is a load error rather than a silent pick.
pub fn validate(dataset: &Dataset) -> Result<()> {
    let centers: Vec<&str> = dataset
        .persons
        .iter()
        .filter(|p| p.is_center())
        .map(|p| p.id.as_str())
        .collect();
    if centers.len() > 1 {
        return Err(Error::MultipleCenters {
            count: centers.len(),
            ids: centers.join(", "),
        });
    }
    Ok(())
}

pub fn load_str_sync(text: &str) -> LoadOutcome {
    LoadOutcome::from_result("<inline>", parse_dataset(text))
}

pub fn load_path_sync(path: impl AsRef<Path>) -> LoadOutcome {
    let path = path.as_ref();
    let origin = path.display().to_string();
    let result = std::fs::read_to_string(path)
        .map_err(|source| Error::Io {
            path: origin.clone(),
            source,
        })
        .and_then(|text| parse_dataset(&text));
    LoadOutcome::from_result(&origin, result)
}

/// Async variant of [`load_str_sync`]; runtime-agnostic and never yields.
pub async fn load_str(text: &str) -> LoadOutcome {
    load_str_sync(text)
}

/// Async variant of [`load_path_sync`]; runtime-agnostic (reads with `std::fs`).
pub async fn load_path(path: impl AsRef<Path>) -> LoadOutcome {
    load_path_sync(path)
}
