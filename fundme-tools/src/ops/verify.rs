// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Verification of an earlier deployment.

use crate::{
    core::{
        deployment::Deployments,
        environment::DeployEnvironment,
        script::ScriptError,
        verification::{Verify, VerifyRequest},
    },
    Result,
};

/// Verifies the recorded deployment of `contract` on the environment's network.
pub async fn verify<D: Deployments, V: Verify>(
    env: &DeployEnvironment<D, V>,
    contract: &str,
) -> Result<()> {
    if env.is_development() {
        return Err(ScriptError::DevelopmentNetwork(env.network.name.clone()).into());
    }
    let api_key = env
        .verification_key()
        .ok_or(ScriptError::MissingVerificationKey)?;

    let record = env
        .deployments
        .get(contract)
        .await
        .map_err(ScriptError::from)?;
    let request = VerifyRequest {
        contract: contract.to_owned(),
        address: record.address,
        args: record.args,
    };
    env.verifier
        .verify(api_key, &request)
        .await
        .map_err(ScriptError::from)?;
    Ok(())
}
