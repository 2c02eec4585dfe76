// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! [`Deployments`] backed by a JSON-RPC node.

use alloy::{
    primitives::{Address, B256},
    providers::{Provider, WalletProvider},
    rpc::types::TransactionReceipt,
};

use super::{
    DeployOptions, DeploymentError, DeploymentRecord, DeploymentRequest, DeploymentStore,
    Deployments,
};
use crate::{
    core::artifact::ArtifactStore,
    utils::color::{Color, DebugColor},
};

/// Deploys compiled artifacts with the signers of a wallet provider.
#[derive(Debug)]
pub struct RpcDeployments<P> {
    provider: P,
    artifacts: ArtifactStore,
    store: DeploymentStore,
    max_fee_per_gas_wei: Option<u128>,
}

impl<P> RpcDeployments<P> {
    pub fn new(
        provider: P,
        artifacts: ArtifactStore,
        store: DeploymentStore,
        max_fee_per_gas_wei: Option<u128>,
    ) -> Self {
        Self {
            provider,
            artifacts,
            store,
            max_fee_per_gas_wei,
        }
    }
}

impl<P: Provider + WalletProvider> RpcDeployments<P> {
    /// Returns the previous deployment of `name` if deploying again would produce the same contract.
    async fn reusable(
        &self,
        name: &str,
        options: &DeployOptions,
        bytecode_hash: B256,
    ) -> Result<Option<DeploymentRecord>, DeploymentError> {
        let Some(record) = self.store.get(name)? else {
            return Ok(None);
        };
        if record.args != options.args || record.bytecode_hash != Some(bytecode_hash) {
            return Ok(None);
        }
        let code = self.provider.get_code_at(record.address).await?;
        if code.is_empty() {
            warn!(
                @yellow,
                "no code left at previous {name} address {}, deploying again",
                record.address
            );
            return Ok(None);
        }
        Ok(Some(record))
    }
}

impl<P: Provider + WalletProvider> Deployments for RpcDeployments<P> {
    async fn get(&self, name: &str) -> Result<DeploymentRecord, DeploymentError> {
        self.store
            .get(name)?
            .ok_or_else(|| DeploymentError::NotFound(name.to_owned()))
    }

    async fn deploy(
        &self,
        name: &str,
        options: DeployOptions,
    ) -> Result<DeploymentRecord, DeploymentError> {
        if !self
            .provider
            .signer_addresses()
            .any(|address| address == options.from)
        {
            return Err(DeploymentError::UnknownSigner(options.from));
        }

        let artifact = self.artifacts.load(name)?;
        let bytecode_hash = artifact.bytecode_hash();
        if let Some(record) = self.reusable(name, &options, bytecode_hash).await? {
            if options.log {
                info!(@grey, "reusing \"{name}\" at {}", record.address.lavender());
            }
            return Ok(record);
        }

        let code = artifact.creation_code(&options.args)?;
        if options.log {
            info!(@grey, "deploying \"{name}\" from {}", options.from.lavender());
        }

        let receipt = DeploymentRequest::new(options.from, code, self.max_fee_per_gas_wei)
            .exec(&self.provider, confirmations(options.wait_confirmations))
            .await?;
        let tx_hash = receipt.transaction_hash;
        let address = deployed_address(&receipt)?;

        if options.log {
            info!(
                @grey,
                "deployed \"{name}\" at {} (tx: {}) with {} gas",
                address.lavender(),
                tx_hash.debug_lavender(),
                receipt.gas_used
            );
        }

        let record = DeploymentRecord {
            name: name.to_owned(),
            address,
            transaction_hash: Some(tx_hash),
            args: options.args,
            bytecode_hash: Some(bytecode_hash),
        };
        self.store.save(name, &record)?;
        Ok(record)
    }
}

/// Confirmations to wait for. Anything below one would return before the receipt exists.
fn confirmations(wait_confirmations: i64) -> u64 {
    u64::try_from(wait_confirmations).unwrap_or_default().max(1)
}

fn deployed_address(receipt: &TransactionReceipt) -> Result<Address, DeploymentError> {
    receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress {
            tx_hash: receipt.transaction_hash,
        })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use alloy::{
        network::EthereumWallet,
        primitives::{address, b256, Bytes},
        providers::{mock::Asserter, ProviderBuilder},
        signers::local::PrivateKeySigner,
    };
    use serde_json::json;

    use super::*;
    use crate::utils::testing::{self, DEPLOYER_ADDRESS};

    const DEPLOYER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const PRICE_FEED: &str = "0x694AA1769357215DE4FAC081bf1f309aDC325306";

    fn deployments(
        asserter: &Asserter,
        artifacts: &Path,
    ) -> RpcDeployments<impl Provider + WalletProvider> {
        let signer: PrivateKeySigner = DEPLOYER_KEY.parse().unwrap();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::new(signer))
            .connect_mocked_client(asserter.clone());
        fs::write(artifacts.join("FundMe.json"), testing::FUND_ME_ARTIFACT).unwrap();
        RpcDeployments::new(
            provider,
            ArtifactStore::new(artifacts),
            DeploymentStore::in_memory(),
            None,
        )
    }

    fn fund_me_options() -> DeployOptions {
        DeployOptions::builder()
            .from(DEPLOYER_ADDRESS)
            .args(vec![PRICE_FEED.to_owned()])
            .build()
    }

    fn previous_deployment() -> DeploymentRecord {
        DeploymentRecord {
            name: "FundMe".to_owned(),
            address: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            transaction_hash: None,
            args: vec![PRICE_FEED.to_owned()],
            bytecode_hash: Some(testing::fund_me_artifact().bytecode_hash()),
        }
    }

    #[tokio::test]
    async fn unknown_signer_fails_before_any_request() {
        let dir = tempfile::tempdir().unwrap();
        let asserter = Asserter::new();
        let deployments = deployments(&asserter, dir.path());

        let stranger = Address::repeat_byte(0x42);
        let options = DeployOptions::builder().from(stranger).build();
        let err = deployments.deploy("FundMe", options).await.unwrap_err();
        assert!(matches!(err, DeploymentError::UnknownSigner(address) if address == stranger));
    }

    #[tokio::test]
    async fn identical_deployment_with_code_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        let asserter = Asserter::new();
        let deployments = deployments(&asserter, dir.path());
        deployments
            .store
            .save("FundMe", &previous_deployment())
            .unwrap();
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]));

        let record = deployments.deploy("FundMe", fund_me_options()).await.unwrap();
        assert_eq!(record, previous_deployment());
    }

    #[tokio::test]
    async fn missing_code_sends_a_new_deployment() {
        let dir = tempfile::tempdir().unwrap();
        let asserter = Asserter::new();
        let deployments = deployments(&asserter, dir.path());
        deployments
            .store
            .save("FundMe", &previous_deployment())
            .unwrap();
        // eth_getCode finds nothing, so the deployment goes on to gas estimation.
        asserter.push_success(&Bytes::new());
        asserter.push_failure_msg("insufficient funds for gas");

        let err = deployments.deploy("FundMe", fund_me_options()).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Rpc(_)), "{err}");
    }

    #[tokio::test]
    async fn changed_args_skip_reuse() {
        let dir = tempfile::tempdir().unwrap();
        let asserter = Asserter::new();
        let deployments = deployments(&asserter, dir.path());
        deployments
            .store
            .save("FundMe", &previous_deployment())
            .unwrap();

        let options = DeployOptions::builder()
            .from(DEPLOYER_ADDRESS)
            .args(vec![Address::repeat_byte(0x11).to_string()])
            .build();
        let hash = testing::fund_me_artifact().bytecode_hash();
        let reused = deployments.reusable("FundMe", &options, hash).await.unwrap();
        assert_eq!(reused, None);

        let reused = deployments
            .reusable("FundMe", &fund_me_options(), B256::ZERO)
            .await
            .unwrap();
        assert_eq!(reused, None);
    }

    #[test]
    fn confirmations_are_at_least_one() {
        assert_eq!(confirmations(-3), 1);
        assert_eq!(confirmations(0), 1);
        assert_eq!(confirmations(1), 1);
        assert_eq!(confirmations(6), 6);
    }

    fn receipt(contract_address: Option<Address>) -> TransactionReceipt {
        serde_json::from_value(json!({
            "type": "0x2",
            "status": "0x1",
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": "0x1f2d54cd4e4c6b8cd6d6a1e2b9a4cdb4b93e4c5c1d3e10ff3e6a3c4e0bce1a11",
            "transactionIndex": "0x0",
            "blockHash": "0x4acbdefb861ef4adedb135ca52865f6743451bfbfa35db78076f881a40401a5e",
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": DEPLOYER_ADDRESS,
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    #[test]
    fn receipt_without_contract_address_fails() {
        let err = deployed_address(&receipt(None)).unwrap_err();
        assert!(matches!(
            err,
            DeploymentError::NoContractAddress { tx_hash }
                if tx_hash == b256!("1f2d54cd4e4c6b8cd6d6a1e2b9a4cdb4b93e4c5c1d3e10ff3e6a3c4e0bce1a11")
        ));

        let created = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        assert_eq!(deployed_address(&receipt(Some(created))).unwrap(), created);
    }
}
