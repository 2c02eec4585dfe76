// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::collections::BTreeMap;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::utils::color::Color;

/// Named account used to send every deployment.
pub const DEPLOYER: &str = "deployer";

/// How a named account is declared in `[named_accounts]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountRef {
    /// Index into the wallet's signer list.
    Index(usize),
    /// Fixed address.
    Address(Address),
}

#[derive(Debug, thiserror::Error)]
pub enum AccountsError {
    #[error("no named account {}", .0.red())]
    Unknown(String),
    #[error("named account {} refers to signer #{index}, but only {signers} signer(s) are available", .name.red())]
    SignerOutOfRange {
        name: String,
        index: usize,
        signers: usize,
    },
}

/// Resolved named accounts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamedAccounts(BTreeMap<String, Address>);

impl NamedAccounts {
    /// Resolves account declarations against the addresses of the available signers.
    pub fn resolve(
        refs: &BTreeMap<String, AccountRef>,
        signers: &[Address],
    ) -> Result<Self, AccountsError> {
        refs.iter()
            .map(|(name, account)| -> Result<_, AccountsError> {
                let address = match *account {
                    AccountRef::Address(address) => address,
                    AccountRef::Index(index) => {
                        *signers
                            .get(index)
                            .ok_or_else(|| AccountsError::SignerOutOfRange {
                                name: name.clone(),
                                index,
                                signers: signers.len(),
                            })?
                    }
                };
                Ok((name.clone(), address))
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    pub fn get(&self, name: &str) -> Result<Address, AccountsError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| AccountsError::Unknown(name.to_owned()))
    }
}

impl<S: Into<String>> FromIterator<(S, Address)> for NamedAccounts {
    fn from_iter<I: IntoIterator<Item = (S, Address)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, address)| (name.into(), address))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    const SIGNER_0: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const SIGNER_1: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");

    #[test]
    fn resolves_indices_and_literals() {
        let treasury = address!("00000000000000000000000000000000000000aa");
        let refs = BTreeMap::from([
            (DEPLOYER.to_owned(), AccountRef::Index(1)),
            ("treasury".to_owned(), AccountRef::Address(treasury)),
        ]);
        let accounts = NamedAccounts::resolve(&refs, &[SIGNER_0, SIGNER_1]).unwrap();
        assert_eq!(accounts.get(DEPLOYER).unwrap(), SIGNER_1);
        assert_eq!(accounts.get("treasury").unwrap(), treasury);
    }

    #[test]
    fn index_past_signers_fails() {
        let refs = BTreeMap::from([(DEPLOYER.to_owned(), AccountRef::Index(2))]);
        let err = NamedAccounts::resolve(&refs, &[SIGNER_0]).unwrap_err();
        assert!(matches!(
            err,
            AccountsError::SignerOutOfRange { index: 2, signers: 1, .. }
        ));
    }

    #[test]
    fn unknown_name_fails() {
        let accounts: NamedAccounts = [(DEPLOYER, SIGNER_0)].into_iter().collect();
        assert!(matches!(accounts.get("player"), Err(AccountsError::Unknown(_))));
    }
}
