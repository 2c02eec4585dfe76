// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Summary of the configured networks.

use std::path::Path;

use crate::{core::config::DeployConfig, Result};

/// Loads the manifest at `path` and prints every configured network with its price feed source.
pub fn print_networks(path: impl AsRef<Path>) -> Result<()> {
    let config = DeployConfig::load(path)?;
    for (name, network) in &config.networks {
        let chain_id = network
            .chain_id
            .map_or_else(|| "?".to_owned(), |id| id.to_string());
        let feed = if config.development_chains.contains(name) {
            "mock".to_owned()
        } else {
            match network.chain_id.and_then(|id| config.chain(id)) {
                Some(chain) => chain.eth_usd_price_feed.to_string(),
                None => "unconfigured".to_owned(),
            }
        };
        mintln!("{name}");
        greyln!("  chain id:     {chain_id}");
        greyln!("  price feed:   {feed}");
        if let Some(url) = &network.url {
            greyln!("  endpoint:     {url}");
        }
    }
    Ok(())
}
