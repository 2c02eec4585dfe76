// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::DeployCliResult;

mod deploy;
mod networks;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Run the tagged deploy scripts against a network
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List configured networks and their price feeds
    Networks(networks::Args),
    /// Verify a recorded deployment on the block explorer
    #[clap(visible_alias = "v")]
    Verify(verify::Args),
}

pub async fn exec(cmd: Command) -> DeployCliResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Networks(args) => networks::exec(args),
        Command::Verify(args) => verify::exec(args).await,
    }
}
