//! Record of deployed contracts, keyed by deployment name.
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::context::Deployment;

/// Errors raised while reading or writing a persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store directory or one of its records is not accessible.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Path of the directory or record.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A record is not valid JSON.
    #[error("malformed deployment record {path}: {source}")]
    Json {
        /// Path of the record.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Deployments made so far.
///
/// A store opened with [`DeploymentStore::open`] mirrors every record to
/// `<dir>/<name>.json`, so later runs see what earlier runs deployed.
#[derive(Debug, Default)]
pub struct DeploymentStore {
    dir: Option<PathBuf>,
    deployments: BTreeMap<String, Deployment>,
}

impl DeploymentStore {
    /// Creates an empty store that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the store persisted in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// * [`StoreError::Io`] - If `dir` or one of its records cannot be read.
    /// * [`StoreError::Json`] - If a record is malformed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .map_err(|source| StoreError::Io { path: dir.clone(), source })?;

        let entries = std::fs::read_dir(&dir)
            .map_err(|source| StoreError::Io { path: dir.clone(), source })?;

        let mut deployments = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|source| StoreError::Io { path: dir.clone(), source })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = std::fs::read_to_string(&path).map_err(|source| {
                StoreError::Io { path: path.clone(), source }
            })?;
            let deployment = serde_json::from_str(&raw).map_err(|source| {
                StoreError::Json { path: path.clone(), source }
            })?;
            deployments.insert(name.to_string(), deployment);
        }

        Ok(Self { dir: Some(dir), deployments })
    }

    /// Returns the deployment recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Deployment> {
        self.deployments.get(name)
    }

    /// Records `deployment` under `name`, replacing any previous record.
    ///
    /// # Errors
    ///
    /// * [`StoreError::Io`] - If the record cannot be written.
    /// * [`StoreError::Json`] - If the record cannot be serialized.
    pub fn record(
        &mut self,
        name: &str,
        deployment: Deployment,
    ) -> Result<(), StoreError> {
        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{name}.json"));
            let raw = serde_json::to_string_pretty(&deployment).map_err(
                |source| StoreError::Json { path: path.clone(), source },
            )?;
            std::fs::write(&path, raw)
                .map_err(|source| StoreError::Io { path, source })?;
        }

        self.deployments.insert(name.to_string(), deployment);
        Ok(())
    }

    /// Iterates over the records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Deployment)> {
        self.deployments.iter().map(|(name, d)| (name.as_str(), d))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}
