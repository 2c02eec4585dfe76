// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::{Address, TxHash, B256};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{
    core::{artifact::ArtifactError, network::DEFAULT_WAIT_CONFIRMATIONS},
    utils::color::{Color, DebugColor},
};

pub use request::DeploymentRequest;
pub use rpc::RpcDeployments;
pub use store::{DeploymentStore, StoreError};

mod request;
mod rpc;
mod store;

/// Options for a single contract deployment.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct DeployOptions {
    /// Account sending the deployment transaction.
    pub from: Address,
    /// Constructor arguments, parsed against the contract's ABI.
    #[builder(default)]
    pub args: Vec<String>,
    /// Whether to log progress of the deployment.
    #[builder(default)]
    pub log: bool,
    /// Confirmations to wait for before the deployment counts as done.
    #[builder(default = DEFAULT_WAIT_CONFIRMATIONS)]
    pub wait_confirmations: i64,
}

/// A contract deployed on the current network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Deployment name, usually the contract name.
    pub name: String,
    pub address: Address,
    #[serde(default)]
    pub transaction_hash: Option<TxHash>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub bytecode_hash: Option<B256>,
}

/// Deploys contracts by name and remembers where they went.
#[allow(async_fn_in_trait)]
pub trait Deployments {
    /// Looks up a previous deployment on the current network.
    async fn get(&self, name: &str) -> Result<DeploymentRecord, DeploymentError>;

    /// Deploys the named contract.
    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, DeploymentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),
    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("no deployment named {} on this network", .0.red())]
    NotFound(String),
    #[error("no signer available for account {}", .0.red())]
    UnknownSigner(Address),
    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}
