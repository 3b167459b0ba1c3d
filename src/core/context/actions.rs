use super::store::{Mutation, StoreHandle};
use crate::core::{
   user::{Account, AccountUpdate, Keystore, LedgerAccount},
   wallet::{AccountBalance, WalletApi},
};

impl StoreHandle {
   /// Import a keystore account
   ///
   /// The balance is always fetched, the account is appended only if its address is not imported yet.
   /// Returns true if the account was appended
   pub async fn add_account(
      &self,
      wallet: &impl WalletApi,
      keystore: Keystore,
   ) -> Result<bool, anyhow::Error> {
      let address = wallet.to_checksum_address(&keystore.address)?;
      let balance = wallet.get_balance(&address).await?;
      let account = Account::from_keystore(address, balance, keystore);
      let address = account.address.clone();

      let appended = self.append_account(account);
      if appended {
         tracing::info!("Imported keystore account {}", address);
      } else {
         tracing::debug!("Keystore account {} is already imported", address);
      }
      Ok(appended)
   }

   /// Import a hardware ledger account
   ///
   /// Known addresses return early without a balance request.
   /// The check happens before the request so two concurrent calls for a new address both fetch,
   /// only one of them appends
   pub async fn add_ledger_account(
      &self,
      wallet: &impl WalletApi,
      ledger_account: LedgerAccount,
   ) -> Result<bool, anyhow::Error> {
      let address = wallet.to_checksum_address(&ledger_account.address)?;

      if self.get_account_by_address(wallet, &address)?.is_some() {
         tracing::debug!("Ledger account {} is already imported", address);
         return Ok(false);
      }

      let balance = wallet.get_balance(&address).await?;
      let account = Account::from_ledger(address.clone(), balance, ledger_account.path);

      let appended = self.append_account(account);
      if appended {
         tracing::info!(
            "Imported ledger account {} at {}",
            address,
            ledger_account.path.derivation_path()
         );
      }
      Ok(appended)
   }

   /// Refresh the balance of `account`, or of the active account when `None`
   ///
   /// Returns false if there is no such account in the registry
   pub async fn update_account_balance(
      &self,
      wallet: &impl WalletApi,
      account: Option<&Account>,
   ) -> Result<bool, anyhow::Error> {
      let address = match account {
         Some(account) => account.address.clone(),
         None => match self.current_account() {
            Some(account) => account.address,
            None => return Ok(false),
         },
      };

      let Some((_, account)) = self.get_account_and_index(wallet, &address)? else {
         tracing::debug!("No account {} to refresh", address);
         return Ok(false);
      };

      let balance = wallet.get_balance(&account.address).await?;
      Ok(self.set_account_balance(&account.address, balance))
   }

   /// Refresh the balance of every account, one request at a time in list order
   ///
   /// A failed request aborts the loop, accounts before it keep their new balance.
   /// Returns the number of accounts updated
   pub async fn update_accounts_balances(
      &self,
      wallet: &impl WalletApi,
   ) -> Result<usize, anyhow::Error> {
      let addresses: Vec<String> =
         self.read(|store| store.accounts().iter().map(|a| a.address.clone()).collect());

      let mut updated = 0;
      for address in &addresses {
         let balance = wallet.get_balance(address).await?;
         if self.set_account_balance(address, balance) {
            updated += 1;
         }
      }

      tracing::debug!("Updated {} of {} balances", updated, addresses.len());
      Ok(updated)
   }

   /// Rename an account and move it to `update.order`
   ///
   /// A name equal to the address clears the name. Rename and move are two separate mutations.
   /// Returns false if the address is not imported
   pub fn update_account(
      &self,
      wallet: &impl WalletApi,
      update: AccountUpdate,
   ) -> Result<bool, anyhow::Error> {
      let Some((index, account)) = self.get_account_and_index(wallet, &update.address)? else {
         return Ok(false);
      };

      let name = if update.name != account.address {
         update.name
      } else {
         String::new()
      };
      self.set_account(Some(index), account.with_name(name));

      if let Some(to) = update.order.checked_sub(1) {
         if to != index {
            self.move_account(index, to);
         }
      }

      Ok(true)
   }

   /// Swap in a record with the new balance, resolving the position at commit time
   /// so a reorder during the request can not hit the wrong account
   fn set_account_balance(&self, address: &str, balance: AccountBalance) -> bool {
      self.commit(Mutation::SetAccount, |store| {
         let found = store
            .accounts()
            .iter()
            .position(|a| a.address == address)
            .map(|index| (index, store.accounts()[index].with_balance(balance)));

         let replaced = match found {
            Some((index, account)) => store.registry.set_account(Some(index), account),
            None => false,
         };
         (replaced, replaced)
      })
   }
}
