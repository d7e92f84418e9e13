//! Job descriptors as they arrive on the stream, and as the runner sees them.

use std::path::PathBuf;

use serde::Deserialize;
use stripefx_io::IoError;
use stripefx_ops::{Effect, OpsError};
use thiserror::Error;

/// One record of the job stream, before effect codes are checked.
///
/// ```json
/// {"inPath": "in.png", "outPath": "out/in.png", "effects": ["G", "B"]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub in_path: PathBuf,
    pub out_path: PathBuf,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// A validated job: source, destination and the effects to apply in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub effects: Vec<Effect>,
}

impl TryFrom<JobRecord> for Job {
    type Error = JobError;

    fn try_from(record: JobRecord) -> Result<Self, JobError> {
        let effects = record
            .effects
            .iter()
            .map(|code| code.parse::<Effect>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| JobError::Rejected {
                path: record.in_path.clone(),
                source,
            })?;
        Ok(Job {
            source: record.in_path,
            dest: record.out_path,
            effects,
        })
    }
}

/// Why a single job failed. Never aborts sibling jobs.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("rejected job for {}: {source}", path.display())]
    Rejected { path: PathBuf, source: OpsError },

    #[error("failed to load {}: {source}", path.display())]
    Load { path: PathBuf, source: IoError },

    #[error("failed to transform {}: {source}", path.display())]
    Transform { path: PathBuf, source: OpsError },

    #[error("failed to save {}: {source}", path.display())]
    Save { path: PathBuf, source: IoError },
}

impl JobError {
    /// The path the failure is reported against.
    pub fn path(&self) -> &std::path::Path {
        match self {
            JobError::Rejected { path, .. }
            | JobError::Load { path, .. }
            | JobError::Transform { path, .. }
            | JobError::Save { path, .. } => path,
        }
    }
}
