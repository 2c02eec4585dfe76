// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use fundme_tools::{core::script::FUND_ME, ops};

use crate::{common_args::NetworkArgs, error::DeployCliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Name of the deployment to verify.
    #[arg(long, default_value = FUND_ME)]
    contract: String,

    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args) -> DeployCliResult {
    let env = args.network.environment().await?;
    ops::verify(&env, &args.contract).await?;
    Ok(())
}
