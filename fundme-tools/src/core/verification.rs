// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification on a block explorer.

use std::time::Duration;

use alloy::primitives::Address;
use serde::Deserialize;
use typed_builder::TypedBuilder;

use crate::{
    core::artifact::{ArtifactError, ArtifactStore},
    utils::color::Color,
};

/// Etherscan multichain API endpoint.
pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_MAX_POLLS: usize = 12;

/// A deployed contract to verify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyRequest {
    pub contract: String,
    pub address: Address,
    pub args: Vec<String>,
}

/// Publishes the source of a deployed contract.
#[allow(async_fn_in_trait)]
pub trait Verify {
    async fn verify(&self, api_key: &str, request: &VerifyRequest)
        -> Result<(), VerificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("artifact for {} has no compiler input to verify with", .0.red())]
    MissingCompilerInput(String),
    #[error("artifact for {} has no source name", .0.red())]
    MissingSourceName(String),
    #[error("verification request rejected: {}", .0.red())]
    Rejected(String),
    #[error("verification failed: {}", .0.red())]
    Failed(String),
    #[error("verification still pending after {polls} checks (guid {guid})")]
    Timeout { guid: String, polls: usize },
}

/// Outcome of a `checkverifystatus` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyStatus {
    Pending,
    Verified,
    AlreadyVerified,
    Failed(String),
}

impl VerifyStatus {
    /// Interprets the `result` text of an explorer status response.
    pub fn classify(result: &str) -> Self {
        let lower = result.to_lowercase();
        if lower.contains("already verified") {
            Self::AlreadyVerified
        } else if lower.starts_with("pass") {
            Self::Verified
        } else if lower.contains("pending") || lower.contains("in queue") {
            Self::Pending
        } else {
            Self::Failed(result.to_owned())
        }
    }
}

#[derive(Debug, Deserialize)]
struct EtherscanResponse {
    status: String,
    #[allow(unused)]
    message: String,
    result: String,
}

impl EtherscanResponse {
    fn is_ok(&self) -> bool {
        self.status == "1"
    }
}

/// Verifies contracts through the Etherscan API.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct EtherscanVerifier {
    #[builder(!default)]
    chain_id: u64,
    #[builder(!default)]
    artifacts: ArtifactStore,

    #[builder(default = ETHERSCAN_API_URL.to_owned())]
    api_url: String,
    client: reqwest::Client,
    #[builder(default = DEFAULT_POLL_INTERVAL)]
    poll_interval: Duration,
    #[builder(default = DEFAULT_MAX_POLLS)]
    max_polls: usize,
}

impl EtherscanVerifier {
    async fn submit(
        &self,
        api_key: &str,
        request: &VerifyRequest,
    ) -> Result<String, VerificationError> {
        let artifact = self.artifacts.load(&request.contract)?;
        let compiler = artifact
            .compiler
            .as_ref()
            .ok_or_else(|| VerificationError::MissingCompilerInput(request.contract.clone()))?;
        let source_name = artifact
            .source_name
            .as_deref()
            .ok_or_else(|| VerificationError::MissingSourceName(request.contract.clone()))?;

        let source_code = serde_json::to_string(&compiler.input)?;
        let contract_name = format!("{source_name}:{}", artifact.contract_name);
        let compiler_version = if compiler.version.starts_with('v') {
            compiler.version.clone()
        } else {
            format!("v{}", compiler.version)
        };
        let constructor_args = hex::encode(artifact.encode_constructor_args(&request.args)?);
        let address = request.address.to_string();

        debug!(@grey, "submitting {contract_name} ({compiler_version}) for verification");
        let response: EtherscanResponse = self
            .client
            .post(&self.api_url)
            .query(&[("chainid", self.chain_id.to_string())])
            .form(&[
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "verifysourcecode"),
                ("contractaddress", address.as_str()),
                ("sourceCode", source_code.as_str()),
                ("codeformat", "solidity-standard-json-input"),
                ("contractname", contract_name.as_str()),
                ("compilerversion", compiler_version.as_str()),
                // Misspelling is part of the API.
                ("constructorArguements", constructor_args.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if response.is_ok() {
            Ok(response.result)
        } else {
            Err(VerificationError::Rejected(response.result))
        }
    }

    async fn status(&self, api_key: &str, guid: &str) -> Result<VerifyStatus, VerificationError> {
        let response: EtherscanResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("chainid", self.chain_id.to_string().as_str()),
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(VerifyStatus::classify(&response.result))
    }
}

impl Verify for EtherscanVerifier {
    async fn verify(
        &self,
        api_key: &str,
        request: &VerifyRequest,
    ) -> Result<(), VerificationError> {
        info!(@grey, "verifying {} at {}", request.contract, request.address.lavender());

        let guid = match self.submit(api_key, request).await {
            Ok(guid) => guid,
            Err(VerificationError::Rejected(reason))
                if VerifyStatus::classify(&reason) == VerifyStatus::AlreadyVerified =>
            {
                info!(@mint, "{} is already verified", request.contract);
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        for _ in 0..self.max_polls {
            tokio::time::sleep(self.poll_interval).await;
            match self.status(api_key, &guid).await? {
                VerifyStatus::Pending => debug!(@grey, "verification {guid} pending"),
                VerifyStatus::Verified => {
                    info!(@mint, "verified {} at {}", request.contract, request.address);
                    return Ok(());
                }
                VerifyStatus::AlreadyVerified => {
                    info!(@mint, "{} is already verified", request.contract);
                    return Ok(());
                }
                VerifyStatus::Failed(reason) => return Err(VerificationError::Failed(reason)),
            }
        }

        Err(VerificationError::Timeout {
            guid,
            polls: self.max_polls,
        })
    }
}
