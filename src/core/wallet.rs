use crate::core::utils::checksum_address;
use alloy_primitives::Address;
use alloy_provider::{Provider, RootProvider};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{future::Future, str::FromStr};

/// Balance of an account as reported by the wallet backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
   /// Spendable balance in wei
   pub balance: String,

   /// Balance plus anything locked (delegations, pending rewards) in wei
   pub total_value: String,
}

impl AccountBalance {
   pub fn new(balance: impl Into<String>, total_value: impl Into<String>) -> Self {
      Self {
         balance: balance.into(),
         total_value: total_value.into(),
      }
   }
}

/// The wallet library the store delegates to
///
/// Errors are never handled by the store, they abort the operation that triggered them
pub trait WalletApi {
   /// Normalize an address to its checksummed form
   fn to_checksum_address(&self, address: &str) -> Result<String, anyhow::Error> {
      checksum_address(address)
   }

   fn get_balance(
      &self,
      address: &str,
   ) -> impl Future<Output = Result<AccountBalance, anyhow::Error>> + Send;
}

/// [WalletApi] backed by a JSON-RPC endpoint
///
/// A plain node has no staking data so `total_value` equals `balance`
#[derive(Clone)]
pub struct RpcWallet {
   client: RootProvider,
   url: String,
}

impl RpcWallet {
   pub fn new(url: &str) -> Result<Self, anyhow::Error> {
      let parsed = Url::parse(url)?;
      let client = RootProvider::new_http(parsed);
      Ok(Self {
         client,
         url: url.to_string(),
      })
   }

   pub fn url(&self) -> &str {
      &self.url
   }
}

impl WalletApi for RpcWallet {
   async fn get_balance(&self, address: &str) -> Result<AccountBalance, anyhow::Error> {
      let owner = Address::from_str(address)?;
      let balance = self.client.get_balance(owner).await?;
      tracing::trace!("Balance of {} is {}", address, balance);
      let balance = balance.to_string();
      Ok(AccountBalance::new(balance.clone(), balance))
   }
}
