// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tagged deployment runs.

use crate::{
    core::{
        deployment::Deployments, environment::DeployEnvironment, script, verification::Verify,
    },
    Result,
};

/// Runs every deploy script matching `tags` against `env`, stopping at the first failure.
pub async fn deploy<D: Deployments, V: Verify>(
    env: &DeployEnvironment<D, V>,
    tags: &[String],
) -> Result<()> {
    let scripts = script::select(tags)?;
    info!(@grey, "deploying to network {}", env.network.name);
    for script in scripts {
        debug!(@grey, "running deploy script {}", script.name());
        script.run(env).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            feed::MOCK_AGGREGATOR,
            script::{ScriptError, FUND_ME},
        },
        utils::testing::environment,
        Error,
    };

    #[tokio::test]
    async fn all_tag_deploys_mock_then_fund_me() {
        let env = environment("hardhat", None);
        deploy(&env, &["all".to_owned()]).await.unwrap();

        let calls = env.deployments.calls();
        let names: Vec<_> = calls.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, [MOCK_AGGREGATOR, FUND_ME]);
        let mock = env.deployments.get(MOCK_AGGREGATOR).await.unwrap();
        assert_eq!(calls[1].1.args, vec![mock.address.to_string()]);
    }

    #[tokio::test]
    async fn fund_me_tag_skips_mocks() {
        let env = environment("sepolia", None);
        deploy(&env, &["fundme".to_owned()]).await.unwrap();
        let calls = env.deployments.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, FUND_ME);
    }

    #[tokio::test]
    async fn unknown_tag_runs_nothing() {
        let env = environment("hardhat", None);
        let err = deploy(&env, &["everything".to_owned()]).await.unwrap_err();
        assert!(matches!(err, Error::Script(ScriptError::UnknownTag(_))));
        assert!(env.deployments.calls().is_empty());
    }
}
