// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::env;

use crate::core::{accounts::NamedAccounts, config::DeployConfig, network::Network};

/// Environment variable holding the block explorer API key.
pub const VERIFICATION_KEY_ENV: &str = "ETHERSCAN_API_KEY";

/// Reads the verification credential. An empty value counts as absent.
pub fn verification_key_from_env() -> Option<String> {
    non_empty_key(env::var(VERIFICATION_KEY_ENV).ok())
}

/// Drops a blank credential.
pub fn non_empty_key(key: Option<String>) -> Option<String> {
    key.filter(|key| !key.trim().is_empty())
}

/// Everything a deploy script can see: where it runs and who it talks to.
#[derive(Debug)]
pub struct DeployEnvironment<D, V> {
    pub network: Network,
    pub config: DeployConfig,
    pub accounts: NamedAccounts,
    pub deployments: D,
    pub verifier: V,
    pub verification_key: Option<String>,
}

impl<D, V> DeployEnvironment<D, V> {
    pub fn is_development(&self) -> bool {
        self.network.is_development(&self.config.development_chains)
    }

    /// Credential to verify with, if verification applies to this network at all.
    pub fn verification_key(&self) -> Option<&str> {
        if self.is_development() {
            return None;
        }
        self.verification_key.as_deref()
    }
}
