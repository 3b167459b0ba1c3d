use crate::core::{user::Account, utils::checksum_address, wallet::WalletApi};
use std::collections::HashSet;

/// Ordered list of imported accounts and the currently active one
///
/// The position in the list is the display order, addresses are unique.
/// Invalid positions and unknown addresses are never an error, the call simply does nothing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountRegistry {
   accounts: Vec<Account>,
   active_index: Option<usize>,
}

impl AccountRegistry {
   pub fn new() -> Self {
      Self::default()
   }

   /// Build a registry from untrusted parts
   ///
   /// Addresses are checksummed, accounts with an invalid address and later duplicates
   /// are dropped, an out of range active index is cleared
   pub fn from_parts(accounts: Vec<Account>, active_index: Option<usize>) -> Self {
      let mut seen = HashSet::new();
      let mut unique = Vec::with_capacity(accounts.len());
      for mut account in accounts {
         match checksum_address(&account.address) {
            Ok(address) => account.address = address,
            Err(e) => {
               tracing::warn!("Dropping account with invalid address: {:?}", e);
               continue;
            }
         }

         if seen.insert(account.address.clone()) {
            unique.push(account);
         } else {
            tracing::warn!("Dropping duplicate account {}", account.address);
         }
      }

      let active_index = active_index.filter(|index| *index < unique.len());

      Self {
         accounts: unique,
         active_index,
      }
   }

   pub fn accounts(&self) -> &Vec<Account> {
      &self.accounts
   }

   pub fn len(&self) -> usize {
      self.accounts.len()
   }

   pub fn is_empty(&self) -> bool {
      self.accounts.is_empty()
   }

   pub fn active_index(&self) -> Option<usize> {
      self.active_index
   }

   /// The active account, if any
   pub fn current_account(&self) -> Option<&Account> {
      self.active_index.and_then(|index| self.accounts.get(index))
   }

   /// Exact match on an already checksummed address
   pub fn contains_address(&self, address: &str) -> bool {
      self.position_of(address).is_some()
   }

   fn position_of(&self, address: &str) -> Option<usize> {
      self.accounts.iter().position(|a| a.address == address)
   }

   pub fn get_account_by_address(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<Option<&Account>, anyhow::Error> {
      let address = wallet.to_checksum_address(address)?;
      Ok(self.accounts.iter().find(|a| a.address == address))
   }

   /// Same as [Self::get_account_by_address] but also returns the position of the account
   pub fn get_account_and_index(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<Option<(usize, &Account)>, anyhow::Error> {
      let address = wallet.to_checksum_address(address)?;
      Ok(self
         .accounts
         .iter()
         .enumerate()
         .find(|(_, a)| a.address == address))
   }

   /// Append the account unless one with the same address exists
   ///
   /// Returns true if the account was appended
   pub fn append_account(&mut self, account: Account) -> bool {
      if self.contains_address(&account.address) {
         tracing::debug!("Account {} already exists", account.address);
         return false;
      }
      self.accounts.push(account);
      true
   }

   /// Remove the active account and clear the active index
   pub fn remove_active_account(&mut self) -> Option<Account> {
      let index = self.active_index?;
      self.active_index = None;
      if index < self.accounts.len() {
         Some(self.accounts.remove(index))
      } else {
         None
      }
   }

   /// Point the active index to the account with this checksummed address
   ///
   /// Clears the index if there is none
   pub fn set_active_address(&mut self, address: &str) -> Option<usize> {
      self.active_index = self.position_of(address);
      self.active_index
   }

   pub fn clear_active_index(&mut self) {
      self.active_index = None;
   }

   /// Replace the whole record at `index`
   ///
   /// Returns false and does nothing when the index is missing or out of range
   pub fn set_account(&mut self, index: Option<usize>, account: Account) -> bool {
      let Some(slot) = index.and_then(|index| self.accounts.get_mut(index)) else {
         tracing::debug!("Ignoring account update at index {:?}", index);
         return false;
      };
      *slot = account;
      true
   }

   /// Move the account at `from` so that it ends up at `to`
   ///
   /// The active index keeps pointing at the same position, not at the moved account
   pub fn move_account(&mut self, from: usize, to: usize) -> bool {
      let len = self.accounts.len();
      if from == to || from >= len || to >= len {
         return false;
      }
      let account = self.accounts.remove(from);
      self.accounts.insert(to, account);
      true
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::core::{
      user::LedgerPath,
      wallet::{AccountBalance, mock::MockWallet},
   };

   const A: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
   const B: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
   const C: &str = "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB";

   fn account(address: &str) -> Account {
      Account::from_ledger(
         address.to_string(),
         AccountBalance::new("10", "10"),
         LedgerPath::default(),
      )
   }

   fn registry() -> AccountRegistry {
      AccountRegistry::from_parts(vec![account(A), account(B), account(C)], None)
   }

   fn addresses(registry: &AccountRegistry) -> Vec<&str> {
      registry.accounts().iter().map(|a| a.address.as_str()).collect()
   }

   #[test]
   fn lookup_normalizes_address() {
      let wallet = MockWallet::new();
      let registry = registry();

      let found = registry
         .get_account_by_address(&wallet, &B.to_lowercase())
         .unwrap();
      assert_eq!(found.unwrap().address, B);

      let (index, account) = registry
         .get_account_and_index(&wallet, &C.to_uppercase().replace("0X", "0x"))
         .unwrap()
         .unwrap();
      assert_eq!(index, 2);
      assert_eq!(account.address, C);
   }

   #[test]
   fn lookup_of_unknown_address_is_none() {
      let wallet = MockWallet::new();
      let registry = AccountRegistry::from_parts(vec![account(A)], None);

      assert!(registry.get_account_by_address(&wallet, B).unwrap().is_none());
      assert!(registry.get_account_and_index(&wallet, B).unwrap().is_none());
   }

   #[test]
   fn lookup_propagates_checksum_failure() {
      let wallet = MockWallet::new();
      assert!(registry().get_account_by_address(&wallet, "0xnope").is_err());
   }

   #[test]
   fn append_is_idempotent_by_address() {
      let mut registry = registry();
      assert!(!registry.append_account(account(B)));
      assert_eq!(registry.len(), 3);
   }

   #[test]
   fn remove_without_active_is_noop() {
      let mut registry = registry();
      let before = registry.clone();

      assert!(registry.remove_active_account().is_none());
      assert_eq!(registry, before);
   }

   #[test]
   fn remove_active_clears_index() {
      let mut registry = registry();
      assert_eq!(registry.set_active_address(B), Some(1));

      let removed = registry.remove_active_account().unwrap();
      assert_eq!(removed.address, B);
      assert_eq!(addresses(&registry), vec![A, C]);
      assert_eq!(registry.active_index(), None);
   }

   #[test]
   fn set_active_by_unknown_address_clears_index() {
      let mut registry = AccountRegistry::from_parts(vec![account(A), account(B)], Some(1));

      let index = registry.set_active_address(C);
      assert_eq!(index, None);
      assert_eq!(registry.active_index(), None);
      assert!(registry.current_account().is_none());
   }

   #[test]
   fn set_account_ignores_bad_index() {
      let mut registry = registry();
      let before = registry.clone();

      assert!(!registry.set_account(None, account(A).with_name("x")));
      assert!(!registry.set_account(Some(3), account(A).with_name("x")));
      assert_eq!(registry, before);

      assert!(registry.set_account(Some(0), account(A).with_name("x")));
      assert_eq!(registry.accounts()[0].name.as_deref(), Some("x"));
   }

   #[test]
   fn move_first_to_last() {
      let mut registry = registry();
      assert!(registry.move_account(0, 2));
      assert_eq!(addresses(&registry), vec![B, C, A]);
   }

   #[test]
   fn move_last_to_first() {
      let mut registry = registry();
      assert!(registry.move_account(2, 0));
      assert_eq!(addresses(&registry), vec![C, A, B]);
   }

   #[test]
   fn invalid_moves_are_noops() {
      let mut registry = registry();
      let before = registry.clone();

      assert!(!registry.move_account(1, 1));
      assert!(!registry.move_account(3, 0));
      assert!(!registry.move_account(0, 3));
      assert_eq!(registry, before);
   }

   #[test]
   fn move_keeps_active_position() {
      let mut registry = AccountRegistry::from_parts(vec![account(A), account(B), account(C)], Some(0));
      registry.move_account(0, 2);

      assert_eq!(registry.active_index(), Some(0));
      assert_eq!(registry.current_account().unwrap().address, B);
   }

   #[test]
   fn from_parts_validates_input() {
      let registry = AccountRegistry::from_parts(vec![account(A), account(A), account(B)], Some(2));
      assert_eq!(addresses(&registry), vec![A, B]);
      assert_eq!(registry.active_index(), None);
   }

   #[test]
   fn from_parts_checksums_addresses() {
      let registry = AccountRegistry::from_parts(
         vec![
            account(&A.to_lowercase()),
            account(A),
            account("0xnot-an-address"),
            account(&B.to_uppercase().replace("0X", "0x")),
         ],
         Some(1),
      );
      assert_eq!(addresses(&registry), vec![A, B]);
      assert_eq!(registry.active_index(), Some(1));

      let mut registry = registry;
      assert!(!registry.append_account(account(A)));
   }
}
