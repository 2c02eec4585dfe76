// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Static deployment configuration, loaded once from `Deploy.toml`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        accounts::{AccountRef, DEPLOYER},
        network::{DevelopmentChains, Network, NetworkConfig},
    },
    utils::color::Color,
};

/// Filename for the deployment manifest.
pub const FILENAME: &str = "Deploy.toml";

const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
const DEFAULT_DEPLOYMENTS_DIR: &str = "deployments";
const LOCAL_ENDPOINT: &str = "http://127.0.0.1:8545";
const LOCAL_CHAIN_ID: u64 = 31337;

/// Per-chain record of the Configuration Table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub name: String,
    pub eth_usd_price_feed: Address,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("chain id {} is configured more than once", .0.red())]
    DuplicateChain(u64),
    #[error("unknown network {}", .0.red())]
    UnknownNetwork(String),
}

/// On-disk layout of `Deploy.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Manifest {
    development_chains: Option<DevelopmentChains>,
    artifacts: Option<PathBuf>,
    deployments: Option<PathBuf>,
    networks: BTreeMap<String, NetworkConfig>,
    chains: Vec<ChainConfig>,
    named_accounts: BTreeMap<String, AccountRef>,
}

/// Immutable configuration handed to every deploy script.
#[derive(Clone, Debug)]
pub struct DeployConfig {
    pub development_chains: DevelopmentChains,
    pub networks: BTreeMap<String, NetworkConfig>,
    pub chains: BTreeMap<u64, ChainConfig>,
    pub named_accounts: BTreeMap<String, AccountRef>,
    pub artifacts: PathBuf,
    pub deployments: PathBuf,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let local = NetworkConfig {
            url: Some(LOCAL_ENDPOINT.to_owned()),
            chain_id: Some(LOCAL_CHAIN_ID),
            block_confirmations: None,
        };
        let networks = BTreeMap::from([
            ("hardhat".to_owned(), local.clone()),
            ("localhost".to_owned(), local),
            (
                "sepolia".to_owned(),
                NetworkConfig {
                    url: None,
                    chain_id: Some(11155111),
                    block_confirmations: Some(6),
                },
            ),
            (
                "polygon".to_owned(),
                NetworkConfig {
                    url: None,
                    chain_id: Some(137),
                    block_confirmations: Some(6),
                },
            ),
        ]);
        let chains = [
            ChainConfig {
                chain_id: 11155111,
                name: "sepolia".to_owned(),
                eth_usd_price_feed: address!("694AA1769357215DE4FAC081bf1f309aDC325306"),
            },
            ChainConfig {
                chain_id: 137,
                name: "polygon".to_owned(),
                eth_usd_price_feed: address!("F9680D99D6C9589e2a93a78A04A279e509205945"),
            },
        ]
        .into_iter()
        .map(|chain| (chain.chain_id, chain))
        .collect();

        Self {
            development_chains: DevelopmentChains::default(),
            networks,
            chains,
            named_accounts: BTreeMap::from([(DEPLOYER.to_owned(), AccountRef::Index(0))]),
            artifacts: DEFAULT_ARTIFACTS_DIR.into(),
            deployments: DEFAULT_DEPLOYMENTS_DIR.into(),
        }
    }
}

impl DeployConfig {
    /// Loads the config at `path`, falling back to the built-in defaults if it does not exist.
    ///
    /// Relative `artifacts` and `deployments` paths are resolved against the manifest's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(@grey, "no {} found, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        if let Some(root) = path.parent() {
            config.artifacts = root.join(&config.artifacts);
            config.deployments = root.join(&config.deployments);
        }
        Ok(config)
    }

    /// Parses a manifest, layering its entries on top of the built-in defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let manifest: Manifest = toml::from_str(contents)?;
        let mut config = Self::default();

        if let Some(chains) = manifest.development_chains {
            config.development_chains = chains;
        }
        if let Some(artifacts) = manifest.artifacts {
            config.artifacts = artifacts;
        }
        if let Some(deployments) = manifest.deployments {
            config.deployments = deployments;
        }
        config.networks.extend(manifest.networks);
        config.named_accounts.extend(manifest.named_accounts);

        let mut seen = Vec::with_capacity(manifest.chains.len());
        for chain in manifest.chains {
            if seen.contains(&chain.chain_id) {
                return Err(ConfigError::DuplicateChain(chain.chain_id));
            }
            seen.push(chain.chain_id);
            config.chains.insert(chain.chain_id, chain);
        }

        Ok(config)
    }

    /// Looks up a configured network by name.
    pub fn network(&self, name: &str) -> Result<Network, ConfigError> {
        self.networks
            .get(name)
            .cloned()
            .map(|config| Network::new(name, config))
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }

    /// Configuration Table lookup.
    pub fn chain(&self, chain_id: u64) -> Option<&ChainConfig> {
        self.chains.get(&chain_id)
    }
}
