// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tagged deploy scripts.
//!
//! Scripts run in declaration order. A run selects them by tag, so `all` deploys everything while
//! `fundme` or `mocks` pick a single step.

use crate::{
    core::{
        accounts::{AccountsError, DEPLOYER},
        deployment::{DeployOptions, DeploymentError, DeploymentRecord, Deployments},
        environment::DeployEnvironment,
        feed::{feed_source, ConfigurationError, FeedSource, MOCK_AGGREGATOR},
        verification::{VerificationError, Verify, VerifyRequest},
    },
    utils::color::Color,
};

/// Deployment name of the contract under deployment.
pub const FUND_ME: &str = "FundMe";

/// Decimals reported by the mock price feed.
pub const MOCK_DECIMALS: u8 = 8;

/// Initial ETH/USD answer of the mock price feed: 2000 with [`MOCK_DECIMALS`] decimals.
pub const MOCK_INITIAL_ANSWER: i64 = 200_000_000_000;

/// Logged once the FundMe script is done.
pub const SEPARATOR: &str = "-------------------------------------------------";

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("{0}")]
    Accounts(#[from] AccountsError),
    #[error("{0}")]
    Configuration(#[from] ConfigurationError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Verification(#[from] VerificationError),

    #[error("no deploy script is tagged {}", .0.red())]
    UnknownTag(String),
    #[error("network {} is a development network and cannot be verified", .0.red())]
    DevelopmentNetwork(String),
    #[error("no block explorer API key set")]
    MissingVerificationKey,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Script {
    /// Deploys the mock price feed on development networks.
    DeployMocks,
    /// Deploys FundMe against the network's price feed and verifies it.
    DeployFundMe,
}

impl Script {
    /// Every script, in execution order.
    pub const ALL: [Script; 2] = [Script::DeployMocks, Script::DeployFundMe];

    pub fn name(self) -> &'static str {
        match self {
            Self::DeployMocks => "00-deploy-mocks",
            Self::DeployFundMe => "01-deploy-fund-me",
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Self::DeployMocks => &["all", "mocks"],
            Self::DeployFundMe => &["all", "fundme"],
        }
    }

    pub fn matches(self, tags: &[String]) -> bool {
        tags.is_empty() || tags.iter().any(|tag| self.tags().contains(&tag.as_str()))
    }

    pub async fn run<D: Deployments, V: Verify>(
        self,
        env: &DeployEnvironment<D, V>,
    ) -> Result<(), ScriptError> {
        match self {
            Self::DeployMocks => deploy_mocks(env).await.map(drop),
            Self::DeployFundMe => deploy_fund_me(env).await.map(drop),
        }
    }
}

/// Scripts to run for `tags`, in execution order. No tags selects everything.
pub fn select(tags: &[String]) -> Result<Vec<Script>, ScriptError> {
    if let Some(unknown) = tags
        .iter()
        .find(|tag| !Script::ALL.iter().any(|script| script.tags().contains(&tag.as_str())))
    {
        return Err(ScriptError::UnknownTag(unknown.clone()));
    }
    Ok(Script::ALL
        .into_iter()
        .filter(|script| script.matches(tags))
        .collect())
}

/// Deploys the mock aggregator, on development networks only.
pub async fn deploy_mocks<D: Deployments, V>(
    env: &DeployEnvironment<D, V>,
) -> Result<Option<DeploymentRecord>, ScriptError> {
    if !env.is_development() {
        return Ok(None);
    }

    let deployer = env.accounts.get(DEPLOYER)?;
    info!(@yellow, "Local network detected! Deploying mocks...");
    let options = DeployOptions::builder()
        .from(deployer)
        .args(vec![
            MOCK_DECIMALS.to_string(),
            MOCK_INITIAL_ANSWER.to_string(),
        ])
        .log(true)
        .build();
    let mock = env.deployments.deploy(MOCK_AGGREGATOR, options).await?;
    info!(@mint, "Mocks deployed!");
    info!(@grey, "{SEPARATOR}");
    Ok(Some(mock))
}

/// Deploys FundMe with the network's ETH/USD price feed as its only constructor argument, then
/// verifies it on live networks when an explorer key is available.
pub async fn deploy_fund_me<D: Deployments, V: Verify>(
    env: &DeployEnvironment<D, V>,
) -> Result<DeploymentRecord, ScriptError> {
    let deployer = env.accounts.get(DEPLOYER)?;

    let price_feed = match feed_source(&env.network, &env.config)? {
        FeedSource::Mock => env.deployments.get(MOCK_AGGREGATOR).await?.address,
        FeedSource::Configured(address) => address,
    };
    debug!(@grey, "using ETH/USD price feed {price_feed}");

    let args = vec![price_feed.to_string()];
    let options = DeployOptions::builder()
        .from(deployer)
        .args(args.clone())
        .log(true)
        .wait_confirmations(env.network.wait_confirmations())
        .build();
    let fund_me = env.deployments.deploy(FUND_ME, options).await?;

    if let Some(api_key) = env.verification_key() {
        let request = VerifyRequest {
            contract: FUND_ME.to_owned(),
            address: fund_me.address,
            args,
        };
        env.verifier.verify(api_key, &request).await?;
    }

    info!(@grey, "{SEPARATOR}");
    Ok(fund_me)
}
