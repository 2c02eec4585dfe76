// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts use the Hardhat layout (`contractName`, `sourceName`, `abi`, `bytecode`), one JSON
//! file per contract. An optional `compiler` section carries the standard-json input needed to
//! verify the contract on a block explorer.

use std::{fs, path::PathBuf};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    primitives::{keccak256, Bytes, B256},
};
use serde::Deserialize;

use crate::utils::color::Color;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: Option<String>,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    #[serde(default)]
    pub compiler: Option<CompilerInput>,
}

/// Compiler settings used to produce an artifact.
#[derive(Clone, Debug, Deserialize)]
pub struct CompilerInput {
    /// Full solc version, e.g. `0.8.24+commit.e11b9ed9`.
    pub version: String,
    /// Standard-json compiler input.
    pub input: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid artifact {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("mismatch number of constructor arguments for {contract} (want {want}; got {got})")]
    ArgumentCount {
        contract: String,
        want: usize,
        got: usize,
    },
    #[error("could not parse constructor arg {} as {ty}: {reason}", .arg.red())]
    InvalidArgument {
        arg: String,
        ty: String,
        reason: String,
    },
    #[error("failed to encode constructor args: {0}")]
    Encode(#[from] alloy::dyn_abi::Error),
}

impl Artifact {
    /// ABI-encodes string constructor arguments against the artifact's constructor.
    pub fn encode_constructor_args(&self, args: &[String]) -> Result<Vec<u8>, ArtifactError> {
        let Some(constructor) = self.abi.constructor() else {
            if !args.is_empty() {
                return Err(ArtifactError::ArgumentCount {
                    contract: self.contract_name.clone(),
                    want: 0,
                    got: args.len(),
                });
            }
            return Ok(Vec::new());
        };

        if args.len() != constructor.inputs.len() {
            return Err(ArtifactError::ArgumentCount {
                contract: self.contract_name.clone(),
                want: constructor.inputs.len(),
                got: args.len(),
            });
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let invalid = |reason: String| ArtifactError::InvalidArgument {
                arg: arg.clone(),
                ty: param.ty.clone(),
                reason,
            };
            let ty = param.resolve().map_err(|err| invalid(err.to_string()))?;
            let value = ty.coerce_str(arg).map_err(|err| invalid(err.to_string()))?;
            values.push(value);
        }

        Ok(constructor.abi_encode_input_raw(&values)?)
    }

    /// Creation code followed by the encoded constructor arguments.
    pub fn creation_code(&self, args: &[String]) -> Result<Bytes, ArtifactError> {
        let encoded = self.encode_constructor_args(args)?;
        let mut code = Vec::with_capacity(self.bytecode.len() + encoded.len());
        code.extend_from_slice(&self.bytecode);
        code.extend(encoded);
        Ok(code.into())
    }

    pub fn bytecode_hash(&self) -> B256 {
        keccak256(&self.bytecode)
    }
}

/// Directory of `<ContractName>.json` artifacts.
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let path = self.dir.join(format!("{name}.json"));
        let contents = fs::read_to_string(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ArtifactError::Json { path, source })
    }
}
