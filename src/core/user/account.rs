use super::keystore::Keystore;
use crate::core::wallet::AccountBalance;
use serde::{Deserialize, Serialize};

/// Coin type used when deriving ledger accounts
pub const LEDGER_COIN_TYPE: u32 = 60;

/// Derivation indices of an account that lives on a hardware ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPath {
   pub account_id: u32,
   pub address_id: u32,
}

impl LedgerPath {
   pub fn new(account_id: u32, address_id: u32) -> Self {
      Self {
         account_id,
         address_id,
      }
   }

   /// BIP44 path without the leading `m/`
   pub fn derivation_path(&self) -> String {
      format!(
         "44'/{}'/{}'/0/{}",
         LEDGER_COIN_TYPE, self.account_id, self.address_id
      )
   }
}

/// Where the keys of an [Account] are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountKey {
   Keystore(Keystore),
   Ledger(LedgerPath),
}

/// A hardware account as reported by the ledger, before its balance is known
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
   pub address: String,

   #[serde(flatten)]
   pub path: LedgerPath,
}

impl LedgerAccount {
   pub fn new(address: impl Into<String>, path: LedgerPath) -> Self {
      Self {
         address: address.into(),
         path,
      }
   }
}

/// Rename and reorder request for an existing account
///
/// `order` is the 1-based position the account should end up at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUpdate {
   pub address: String,
   pub name: String,
   pub order: usize,
}

/// An imported account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
   /// Checksummed address, unique across the registry
   pub address: String,

   pub balance: String,

   pub total_balance: String,

   pub key: AccountKey,

   /// User given name, `None` means display the address
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub name: Option<String>,
}

impl Account {
   pub fn from_keystore(address: String, balance: AccountBalance, keystore: Keystore) -> Self {
      Self {
         address,
         balance: balance.balance,
         total_balance: balance.total_value,
         key: AccountKey::Keystore(keystore),
         name: None,
      }
   }

   pub fn from_ledger(address: String, balance: AccountBalance, path: LedgerPath) -> Self {
      Self {
         address,
         balance: balance.balance,
         total_balance: balance.total_value,
         key: AccountKey::Ledger(path),
         name: None,
      }
   }

   pub fn is_ledger_account(&self) -> bool {
      matches!(self.key, AccountKey::Ledger(_))
   }

   pub fn keystore(&self) -> Option<&Keystore> {
      match &self.key {
         AccountKey::Keystore(keystore) => Some(keystore),
         AccountKey::Ledger(_) => None,
      }
   }

   pub fn ledger_path(&self) -> Option<LedgerPath> {
      match self.key {
         AccountKey::Ledger(path) => Some(path),
         AccountKey::Keystore(_) => None,
      }
   }

   /// A copy of this account with fresh balance fields
   pub fn with_balance(&self, balance: AccountBalance) -> Self {
      Self {
         balance: balance.balance,
         total_balance: balance.total_value,
         ..self.clone()
      }
   }

   /// A copy of this account with a new name, an empty name clears it
   pub fn with_name(&self, name: impl Into<String>) -> Self {
      let name = name.into();
      Self {
         name: if name.is_empty() { None } else { Some(name) },
         ..self.clone()
      }
   }

   /// Get the account address truncated
   pub fn address_truncated(&self) -> String {
      match (self.address.get(..6), self.address.get(38..)) {
         (Some(head), Some(tail)) if self.address.len() >= 42 => format!("{}...{}", head, tail),
         _ => self.address.clone(),
      }
   }

   pub fn display_name(&self) -> String {
      match &self.name {
         Some(name) => name.clone(),
         None => self.address_truncated(),
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::Map;

   const ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

   fn balance(amount: &str) -> AccountBalance {
      AccountBalance::new(amount, amount)
   }

   #[test]
   fn ledger_account_is_flagged() {
      let account = Account::from_ledger(ADDRESS.to_string(), balance("1"), LedgerPath::new(0, 3));
      assert!(account.is_ledger_account());
      assert!(account.keystore().is_none());
      assert_eq!(account.ledger_path().unwrap().derivation_path(), "44'/60'/0'/0/3");
   }

   #[test]
   fn with_balance_swaps_only_balances() {
      let keystore = Keystore::new(ADDRESS, Map::new());
      let account = Account::from_keystore(ADDRESS.to_string(), balance("1"), keystore)
         .with_name("Main");
      let updated = account.with_balance(AccountBalance::new("5", "7"));

      assert_eq!(updated.balance, "5");
      assert_eq!(updated.total_balance, "7");
      assert_eq!(updated.name.as_deref(), Some("Main"));
      assert_eq!(updated.key, account.key);
   }

   #[test]
   fn empty_name_clears() {
      let account = Account::from_ledger(ADDRESS.to_string(), balance("0"), LedgerPath::default())
         .with_name("Cold");
      assert_eq!(account.display_name(), "Cold");

      let account = account.with_name("");
      assert_eq!(account.name, None);
      assert_eq!(account.display_name(), "0x5aAe...eAed");
   }

   #[test]
   fn truncation_never_splits_a_char() {
      let short = Account::from_ledger("0x1234".to_string(), balance("0"), LedgerPath::default());
      assert_eq!(short.address_truncated(), "0x1234");

      let address = format!("0x{}€bbb", "a".repeat(35));
      let account = Account::from_ledger(address.clone(), balance("0"), LedgerPath::default());
      assert_eq!(account.display_name(), address);
   }

   #[test]
   fn serializes_camel_case() {
      let account = Account::from_ledger(ADDRESS.to_string(), balance("2"), LedgerPath::new(1, 2));
      let json = serde_json::to_value(&account).unwrap();
      assert_eq!(json["totalBalance"], "2");
      assert_eq!(json["key"]["ledger"]["accountId"], 1);
      assert!(json.get("name").is_none());
   }
}
