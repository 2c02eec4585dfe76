// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::utils::color::Color;

/// Confirmations to wait for when a network does not configure any.
pub const DEFAULT_WAIT_CONFIRMATIONS: i64 = 1;

/// Network whose chain state is thrown away after every run.
pub const EPHEMERAL_NETWORK: &str = "hardhat";

/// Settings for a single named network, as found under `[networks.<name>]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub block_confirmations: Option<i64>,
}

/// The network selected for this run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Network {
    pub name: String,
    pub config: NetworkConfig,
}

impl Network {
    pub fn new(name: impl Into<String>, config: NetworkConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.config.chain_id
    }

    /// Confirmations to wait for after each deployment.
    ///
    /// An unset or zero `block_confirmations` falls back to
    /// [`DEFAULT_WAIT_CONFIRMATIONS`]. Anything else is handed to the deployer unchanged.
    pub fn wait_confirmations(&self) -> i64 {
        match self.config.block_confirmations {
            None | Some(0) => DEFAULT_WAIT_CONFIRMATIONS,
            Some(confirmations) => confirmations,
        }
    }

    pub fn is_development(&self, chains: &DevelopmentChains) -> bool {
        chains.contains(&self.name)
    }

    pub fn is_ephemeral(&self) -> bool {
        self.name == EPHEMERAL_NETWORK
    }

    /// RPC endpoint for the network.
    pub fn endpoint(&self) -> Result<&str, NetworkError> {
        self.config
            .url
            .as_deref()
            .ok_or_else(|| NetworkError::NoEndpoint(self.name.clone()))
    }
}

/// Names of local networks that get a mock price feed instead of a real one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DevelopmentChains(BTreeSet<String>);

impl DevelopmentChains {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for DevelopmentChains {
    fn default() -> Self {
        ["hardhat", "localhost"].into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for DevelopmentChains {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("no RPC endpoint configured for network {}; set one in Deploy.toml or pass --endpoint", .0.red())]
    NoEndpoint(String),
}
