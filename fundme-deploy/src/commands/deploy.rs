// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use fundme_tools::{core::script, ops};

use crate::{common_args::NetworkArgs, error::DeployCliResult};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Only run deploy scripts with one of these tags, e.g. `fundme` or `mocks`. Runs every
    /// script if not set.
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,

    #[command(flatten)]
    network: NetworkArgs,
}

pub async fn exec(args: Args) -> DeployCliResult {
    // Reject unknown tags before connecting to anything.
    script::select(&args.tags)?;
    let env = args.network.environment().await?;
    ops::deploy(&env, &args.tags).await?;
    Ok(())
}
