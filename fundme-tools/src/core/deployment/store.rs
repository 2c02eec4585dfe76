// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment records, kept per network under `deployments/<network>/<Name>.json`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;

use super::DeploymentRecord;
use crate::core::network::Network;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access deployment record {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid deployment record {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default)]
pub struct DeploymentStore {
    /// Directory holding the records, or `None` to keep them in memory only.
    root: Option<PathBuf>,
    records: Mutex<BTreeMap<String, DeploymentRecord>>,
}

impl DeploymentStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            records: Mutex::default(),
        }
    }

    /// Store for `network` under `deployments_dir`.
    ///
    /// The in-process network loses its chain state on exit, so its records are never written.
    pub fn for_network(deployments_dir: impl AsRef<Path>, network: &Network) -> Self {
        if network.is_ephemeral() {
            Self::in_memory()
        } else {
            Self::open(deployments_dir.as_ref().join(&network.name))
        }
    }

    pub fn get(&self, name: &str) -> Result<Option<DeploymentRecord>, StoreError> {
        let mut records = self.records.lock();
        if let Some(record) = records.get(name) {
            return Ok(Some(record.clone()));
        }

        let Some(path) = self.path(name) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let record: DeploymentRecord = serde_json::from_str(&contents)
            .map_err(|source| StoreError::Json { path, source })?;
        records.insert(name.to_owned(), record.clone());
        Ok(Some(record))
    }

    pub fn save(&self, name: &str, record: &DeploymentRecord) -> Result<(), StoreError> {
        if let Some(path) = self.path(name) {
            let io_err = |source| StoreError::Io {
                path: path.clone(),
                source,
            };
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir).map_err(io_err)?;
            }
            let contents = serde_json::to_string_pretty(record).map_err(|source| {
                StoreError::Json {
                    path: path.clone(),
                    source,
                }
            })?;
            fs::write(&path, contents).map_err(io_err)?;
        }
        self.records.lock().insert(name.to_owned(), record.clone());
        Ok(())
    }

    fn path(&self, name: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{name}.json")))
    }
}
