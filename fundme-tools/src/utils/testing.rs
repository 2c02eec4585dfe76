// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! In-memory collaborators and fixtures for deploy script tests.

use std::collections::BTreeMap;

use alloy::primitives::{address, Address};
use parking_lot::Mutex;

use crate::core::{
    accounts::DEPLOYER,
    artifact::Artifact,
    config::DeployConfig,
    deployment::{DeployOptions, DeploymentError, DeploymentRecord, Deployments},
    environment::{non_empty_key, DeployEnvironment},
    verification::{VerificationError, Verify, VerifyRequest},
};

pub const DEPLOYER_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const FUND_ME_ARTIFACT: &str = r#"{
  "_format": "hh-sol-artifact-1",
  "contractName": "FundMe",
  "sourceName": "contracts/FundMe.sol",
  "abi": [
    {
      "inputs": [{ "internalType": "address", "name": "priceFeed", "type": "address" }],
      "stateMutability": "nonpayable",
      "type": "constructor"
    },
    {
      "inputs": [],
      "name": "fund",
      "outputs": [],
      "stateMutability": "payable",
      "type": "function"
    }
  ],
  "bytecode": "0x60806040523480156100105760006000fd5b50",
  "deployedBytecode": "0x6080604052",
  "linkReferences": {},
  "deployedLinkReferences": {}
}"#;

pub const MOCK_ARTIFACT: &str = r#"{
  "contractName": "MockV3Aggregator",
  "sourceName": "contracts/test/MockV3Aggregator.sol",
  "abi": [
    {
      "inputs": [
        { "internalType": "uint8", "name": "_decimals", "type": "uint8" },
        { "internalType": "int256", "name": "_initialAnswer", "type": "int256" }
      ],
      "stateMutability": "nonpayable",
      "type": "constructor"
    }
  ],
  "bytecode": "0x608060405234801561001057600080fd5b50"
}"#;

pub fn fund_me_artifact() -> Artifact {
    serde_json::from_str(FUND_ME_ARTIFACT).unwrap()
}

pub fn mock_artifact() -> Artifact {
    serde_json::from_str(MOCK_ARTIFACT).unwrap()
}

/// Records every deployment and hands out sequential addresses.
#[derive(Debug, Default)]
pub struct FakeDeployments {
    records: Mutex<BTreeMap<String, DeploymentRecord>>,
    calls: Mutex<Vec<(String, DeployOptions)>>,
}

impl FakeDeployments {
    /// Pretends `name` was deployed by an earlier run.
    pub fn insert(&self, name: &str, address: Address) {
        let record = DeploymentRecord {
            name: name.to_owned(),
            address,
            transaction_hash: None,
            args: Vec::new(),
            bytecode_hash: None,
        };
        self.records.lock().insert(name.to_owned(), record);
    }

    pub fn calls(&self) -> Vec<(String, DeployOptions)> {
        self.calls.lock().clone()
    }
}

impl Deployments for FakeDeployments {
    async fn get(&self, name: &str) -> Result<DeploymentRecord, DeploymentError> {
        self.records
            .lock()
            .get(name)
            .cloned()
            .ok_or_else(|| DeploymentError::NotFound(name.to_owned()))
    }

    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, DeploymentError> {
        let mut calls = self.calls.lock();
        let record = DeploymentRecord {
            name: name.to_owned(),
            address: Address::with_last_byte(calls.len() as u8 + 1),
            transaction_hash: None,
            args: options.args.clone(),
            bytecode_hash: None,
        };
        calls.push((name.to_owned(), options));
        self.records.lock().insert(name.to_owned(), record.clone());
        Ok(record)
    }
}

/// Records verification requests, optionally failing all of them.
#[derive(Debug, Default)]
pub struct FakeVerifier {
    failure: Option<String>,
    calls: Mutex<Vec<(String, VerifyRequest)>>,
}

impl FakeVerifier {
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_owned()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, VerifyRequest)> {
        self.calls.lock().clone()
    }
}

impl Verify for FakeVerifier {
    async fn verify(
        &self,
        api_key: &str,
        request: &VerifyRequest,
    ) -> Result<(), VerificationError> {
        self.calls
            .lock()
            .push((api_key.to_owned(), request.clone()));
        match &self.failure {
            Some(reason) => Err(VerificationError::Failed(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Environment for a network from the built-in config, with fake collaborators.
pub fn environment(
    network: &str,
    verification_key: Option<&str>,
) -> DeployEnvironment<FakeDeployments, FakeVerifier> {
    let config = DeployConfig::default();
    DeployEnvironment {
        network: config.network(network).unwrap(),
        config,
        accounts: [(DEPLOYER, DEPLOYER_ADDRESS)].into_iter().collect(),
        deployments: FakeDeployments::default(),
        verifier: FakeVerifier::default(),
        verification_key: non_empty_key(verification_key.map(str::to_owned)),
    }
}
