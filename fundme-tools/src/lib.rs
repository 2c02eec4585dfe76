// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying the FundMe contract, its price-feed mocks, and verifying the result on a
//! block explorer.
//!
//! The deployment flow mirrors a tagged deploy-script harness: each [script](core::script) is
//! selected by tag and run against a [`DeployEnvironment`](core::environment::DeployEnvironment),
//! which bundles the active network, the static configuration, and the deployment and
//! verification collaborators.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use error::{Error, Result};
