// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! ETH/USD price-feed selection.

use alloy::primitives::Address;

use crate::{
    core::{config::DeployConfig, network::Network},
    utils::color::Color,
};

/// Deployment name of the local stand-in oracle.
pub const MOCK_AGGREGATOR: &str = "MockV3Aggregator";

/// Where the price-feed address for a run comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedSource {
    /// Read the address of the already deployed [`MOCK_AGGREGATOR`].
    Mock,
    /// Address taken from the Configuration Table.
    Configured(Address),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("network {} has no chain id configured", .0.red())]
    MissingChainId(String),
    #[error("no price feed configured for chain id {}", .0.red())]
    UnknownChain(u64),
}

/// Picks the price-feed source for `network`.
///
/// Development networks always use the mock. Every other network must have its chain id in the
/// Configuration Table.
pub fn feed_source(
    network: &Network,
    config: &DeployConfig,
) -> Result<FeedSource, ConfigurationError> {
    if network.is_development(&config.development_chains) {
        return Ok(FeedSource::Mock);
    }

    let chain_id = network
        .chain_id()
        .ok_or_else(|| ConfigurationError::MissingChainId(network.name.clone()))?;
    let chain = config
        .chain(chain_id)
        .ok_or(ConfigurationError::UnknownChain(chain_id))?;
    Ok(FeedSource::Configured(chain.eth_usd_price_feed))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::core::network::NetworkConfig;

    fn network(name: &str, chain_id: Option<u64>) -> Network {
        Network::new(
            name,
            NetworkConfig {
                chain_id,
                ..Default::default()
            },
        )
    }

    #[test]
    fn development_networks_use_the_mock() {
        let config = DeployConfig::default();
        for name in config.development_chains.iter() {
            // Chain id is irrelevant, even one present in the table.
            assert_eq!(
                feed_source(&network(name, Some(11155111)), &config).unwrap(),
                FeedSource::Mock,
            );
            assert_eq!(feed_source(&network(name, None), &config).unwrap(), FeedSource::Mock);
        }
    }

    #[test]
    fn live_networks_use_the_table() {
        let config = DeployConfig::default();
        assert_eq!(
            feed_source(&network("sepolia", Some(11155111)), &config).unwrap(),
            FeedSource::Configured(address!("694AA1769357215DE4FAC081bf1f309aDC325306")),
        );
        assert_eq!(
            feed_source(&network("polygon", Some(137)), &config).unwrap(),
            FeedSource::Configured(address!("F9680D99D6C9589e2a93a78A04A279e509205945")),
        );
    }

    #[test]
    fn unknown_chain_is_a_configuration_error() {
        let config = DeployConfig::default();
        let err = feed_source(&network("goerli", Some(5)), &config).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownChain(5)));

        let err = feed_source(&network("goerli", None), &config).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingChainId(name) if name == "goerli"));
    }
}
