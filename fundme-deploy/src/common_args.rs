// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    network::EthereumWallet,
    primitives::B256,
    providers::{Provider, ProviderBuilder, WalletProvider},
    signers::{
        local::{LocalSigner, PrivateKeySigner},
        Signer,
    },
};
use eyre::{eyre, Context};
use fundme_tools::core::{
    accounts::NamedAccounts,
    artifact::ArtifactStore,
    config::{self, ConfigError, DeployConfig},
    deployment::{DeploymentStore, RpcDeployments},
    environment::{verification_key_from_env, DeployEnvironment},
    verification::EtherscanVerifier,
};

use crate::utils::{convert_gwei_to_wei, decode0x};

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Private key as a hex string. Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// Path to an Ethereum wallet keystore file (e.g. clef)
    #[arg(long)]
    keystore_path: Option<String>,
    /// Keystore password file
    #[arg(long)]
    keystore_password_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl AuthArgs {
    fn build_wallet(&self, chain_id: u64) -> eyre::Result<EthereumWallet> {
        if let Some(key) = &self.private_key {
            if key.is_empty() {
                return Err(eyre!("empty private key"));
            }
            return Ok(EthereumWallet::new(signer_from_hex(key, chain_id)?));
        }

        if let Some(file) = &self.private_key_path {
            let key = fs::read_to_string(file).wrap_err("could not open private key file")?;
            return Ok(EthereumWallet::new(signer_from_hex(&key, chain_id)?));
        }

        let keystore = self
            .keystore_path
            .as_ref()
            .ok_or(eyre!("no wallet given; pass --private-key, --private-key-path or --keystore-path"))?;
        let password = self
            .keystore_password_path
            .as_ref()
            .map(fs::read_to_string)
            .unwrap_or(Ok("".into()))?;

        let signer =
            LocalSigner::decrypt_keystore(keystore, password)?.with_chain_id(Some(chain_id));
        Ok(EthereumWallet::new(signer))
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

fn signer_from_hex(key: &str, chain_id: u64) -> eyre::Result<PrivateKeySigner> {
    let bytes = decode0x(key)?;
    let key = B256::try_from(bytes.as_slice()).wrap_err("private key must be 32 bytes")?;
    Ok(PrivateKeySigner::from_bytes(&key)?.with_chain_id(Some(chain_id)))
}

#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Path to the deployment manifest. Built-in defaults are used if it does not exist.
    #[arg(long, default_value = config::FILENAME)]
    config: PathBuf,
}

impl ConfigArgs {
    pub fn path(&self) -> &Path {
        &self.config
    }

    pub fn load(&self) -> Result<DeployConfig, ConfigError> {
        DeployConfig::load(&self.config)
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network to run against, as named in the deployment manifest
    #[arg(short, long, default_value = "hardhat")]
    pub network: String,
    /// RPC endpoint, overriding the one configured for the network
    #[arg(short, long)]
    endpoint: Option<String>,

    #[command(flatten)]
    config: ConfigArgs,
    /// Wallet source to use.
    #[command(flatten)]
    auth: AuthArgs,
}

impl NetworkArgs {
    /// Connects to the selected network and assembles the deployment environment.
    pub async fn environment(
        &self,
    ) -> eyre::Result<
        DeployEnvironment<RpcDeployments<impl Provider + WalletProvider>, EtherscanVerifier>,
    > {
        let config = self.config.load()?;
        let mut network = config.network(&self.network)?;
        if let Some(endpoint) = &self.endpoint {
            network.config.url = Some(endpoint.clone());
        }
        let endpoint = network.endpoint()?.to_owned();

        let provider = build_provider_with_wallet(&endpoint, &self.auth).await?;
        let chain_id = provider.get_chain_id().await?;
        if let Some(configured) = network.chain_id() {
            if configured != chain_id {
                log::warn!(
                    "network {} is configured with chain id {configured}, but {endpoint} reports {chain_id}",
                    network.name
                );
            }
        }

        let signers: Vec<_> = provider.signer_addresses().collect();
        let accounts = NamedAccounts::resolve(&config.named_accounts, &signers)?;
        let deployments = RpcDeployments::new(
            provider,
            ArtifactStore::new(&config.artifacts),
            DeploymentStore::for_network(&config.deployments, &network),
            self.auth.get_max_fee_per_gas_wei()?,
        );
        let verifier = EtherscanVerifier::builder()
            .chain_id(chain_id)
            .artifacts(ArtifactStore::new(&config.artifacts))
            .build();

        Ok(DeployEnvironment {
            network,
            config,
            accounts,
            deployments,
            verifier,
            verification_key: verification_key_from_env(),
        })
    }
}

async fn build_provider_with_wallet(
    endpoint: &str,
    auth: &AuthArgs,
) -> eyre::Result<impl Provider + WalletProvider> {
    let provider = ProviderBuilder::new().connect(endpoint).await?;
    let chain_id = provider.get_chain_id().await?;
    let wallet = auth.build_wallet(chain_id)?;
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect(endpoint)
        .await?;
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const HARDHAT_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn auth(private_key: Option<&str>, private_key_path: Option<PathBuf>) -> AuthArgs {
        AuthArgs {
            private_key_path,
            private_key: private_key.map(str::to_owned),
            keystore_path: None,
            keystore_password_path: None,
            max_fee_per_gas_gwei: None,
        }
    }

    #[test]
    fn hex_key_builds_signer() {
        let signer = signer_from_hex(HARDHAT_KEY, 31337).unwrap();
        assert_eq!(
            signer.address(),
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );
        assert_eq!(signer.chain_id(), Some(31337));
        assert!(auth(Some(HARDHAT_KEY), None).build_wallet(31337).is_ok());
    }

    #[test]
    fn short_private_key_is_an_error() {
        let err = auth(Some("0xdeadbeef"), None).build_wallet(1).unwrap_err();
        assert!(err.to_string().contains("32 bytes"), "{err}");

        let too_long = format!("{HARDHAT_KEY}00");
        assert!(auth(Some(&too_long), None).build_wallet(1).is_err());
    }

    #[test]
    fn short_private_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.txt");
        fs::write(&path, "deadbeef\n").unwrap();
        let err = auth(None, Some(path)).build_wallet(1).unwrap_err();
        assert!(err.to_string().contains("32 bytes"), "{err}");
    }

    #[test]
    fn missing_wallet_is_an_error() {
        assert!(auth(None, None).build_wallet(1).is_err());
        assert!(auth(Some(""), None).build_wallet(1).is_err());
    }
}
