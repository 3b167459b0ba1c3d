use super::{
   preferences::{Breakpoint, Preferences},
   registry::AccountRegistry,
};
use crate::core::{user::Account, wallet::WalletApi};
use anyhow::anyhow;
use std::sync::{Arc, RwLock};

/// Every way the state can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
   SetBreakpoint,
   SetTokenPrice,
   SetCurrency,
   SetFractionDigits,
   SetActiveAccountByAddress,
   SetActiveAccountAddress,
   DeactivateActiveAccount,
   AppendAccount,
   RemoveActiveAccount,
   SetAccount,
   MoveAccount,
   /// The whole state was replaced
   ReplaceState,
}

/// Notified after each mutation that changed the state
///
/// Called while the store is still write-locked, so subscribers see the commits in order.
/// Implementations must not call back into the [StoreHandle]
pub trait StateSubscriber: Send + Sync {
   fn on_change(&self, mutation: Mutation, store: &Store);
}

/// The wallet front-end state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
   pub registry: AccountRegistry,

   pub preferences: Preferences,

   /// Checksummed address of the selected account, empty if none
   ///
   /// Set independently of the registry so it can be shown before the index is resolved
   pub active_account_address: String,
}

impl Store {
   pub fn new(registry: AccountRegistry, preferences: Preferences) -> Self {
      Self {
         registry,
         preferences,
         active_account_address: String::new(),
      }
   }

   pub fn accounts(&self) -> &Vec<Account> {
      self.registry.accounts()
   }

   pub fn current_account(&self) -> Option<&Account> {
      self.registry.current_account()
   }
}

/// Thread-safe handle to the [Store]
///
/// All writes go through [StoreHandle::commit] so subscribers see every change.
/// The lock is never held across an await
#[derive(Clone, Default)]
pub struct StoreHandle {
   store: Arc<RwLock<Store>>,
   subscribers: Arc<RwLock<Vec<Arc<dyn StateSubscriber>>>>,
}

impl StoreHandle {
   pub fn new(store: Store) -> Self {
      Self {
         store: Arc::new(RwLock::new(store)),
         subscribers: Arc::new(RwLock::new(Vec::new())),
      }
   }

   /// Shared access to the store
   pub fn read<R>(&self, reader: impl FnOnce(&Store) -> R) -> R {
      reader(&self.store.read().expect("Store is poisoned"))
   }

   pub fn subscribe(&self, subscriber: Arc<dyn StateSubscriber>) {
      self
         .subscribers
         .write()
         .expect("Subscribers are poisoned")
         .push(subscriber);
   }

   /// Apply a mutation
   ///
   /// `writer` returns its result and whether it changed anything, subscribers are only told about changes
   pub fn commit<R>(&self, mutation: Mutation, writer: impl FnOnce(&mut Store) -> (R, bool)) -> R {
      let mut store = self.store.write().expect("Store is poisoned");
      let (result, changed) = writer(&mut store);

      if changed {
         tracing::trace!("Committed {:?}", mutation);
         let subscribers = self.subscribers.read().expect("Subscribers are poisoned");
         for subscriber in subscribers.iter() {
            subscriber.on_change(mutation, &store);
         }
      } else {
         tracing::trace!("{:?} changed nothing", mutation);
      }

      result
   }

   /// Replace the whole state, subscribers are always notified
   pub fn replace(&self, new_store: Store) {
      self.commit(Mutation::ReplaceState, |store| {
         *store = new_store;
         ((), true)
      });
   }

   // Getters

   pub fn accounts(&self) -> Vec<Account> {
      self.read(|store| store.accounts().clone())
   }

   pub fn current_account(&self) -> Option<Account> {
      self.read(|store| store.current_account().cloned())
   }

   pub fn current_account_address(&self) -> String {
      self.read(|store| store.active_account_address.clone())
   }

   pub fn active_account_index(&self) -> Option<usize> {
      self.read(|store| store.registry.active_index())
   }

   pub fn preferences(&self) -> Preferences {
      self.read(|store| store.preferences.clone())
   }

   pub fn get_account_by_address(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<Option<Account>, anyhow::Error> {
      self.read(|store| {
         let account = store.registry.get_account_by_address(wallet, address)?;
         Ok(account.cloned())
      })
   }

   pub fn get_account_and_index(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<Option<(usize, Account)>, anyhow::Error> {
      self.read(|store| {
         let found = store.registry.get_account_and_index(wallet, address)?;
         Ok(found.map(|(index, account)| (index, account.clone())))
      })
   }

   // Mutations

   pub fn set_breakpoint(&self, breakpoint: Breakpoint) {
      self.commit(Mutation::SetBreakpoint, |store| {
         store.preferences.set_breakpoint(breakpoint);
         ((), true)
      });
   }

   /// NaN and infinite prices are rejected, they can not be saved as JSON
   pub fn set_token_price(&self, token_price: f64) -> Result<(), anyhow::Error> {
      if !token_price.is_finite() {
         return Err(anyhow!("Invalid token price {}", token_price));
      }
      self.commit(Mutation::SetTokenPrice, |store| {
         store.preferences.token_price = token_price;
         ((), true)
      });
      Ok(())
   }

   pub fn set_currency(&self, currency: impl Into<String>) {
      let currency = currency.into();
      self.commit(Mutation::SetCurrency, |store| {
         store.preferences.currency = currency;
         ((), true)
      });
   }

   pub fn set_fraction_digits(&self, fraction_digits: u8) {
      self.commit(Mutation::SetFractionDigits, |store| {
         store.preferences.fraction_digits = fraction_digits;
         ((), true)
      });
   }

   /// Point the active index to the account with this address, `None` if it is not imported
   pub fn set_active_account_by_address(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<Option<usize>, anyhow::Error> {
      let address = wallet.to_checksum_address(address)?;
      let index = self.commit(Mutation::SetActiveAccountByAddress, |store| {
         let before = store.registry.active_index();
         let index = store.registry.set_active_address(&address);
         (index, index != before)
      });
      Ok(index)
   }

   pub fn set_active_account_address(
      &self,
      wallet: &impl WalletApi,
      address: &str,
   ) -> Result<(), anyhow::Error> {
      let address = wallet.to_checksum_address(address)?;
      self.commit(Mutation::SetActiveAccountAddress, |store| {
         store.active_account_address = address;
         ((), true)
      });
      Ok(())
   }

   pub fn deactivate_active_account(&self) {
      self.commit(Mutation::DeactivateActiveAccount, |store| {
         store.registry.clear_active_index();
         store.active_account_address.clear();
         ((), true)
      });
   }

   pub fn append_account(&self, account: Account) -> bool {
      self.commit(Mutation::AppendAccount, |store| {
         let appended = store.registry.append_account(account);
         (appended, appended)
      })
   }

   /// Remove the active account, nothing happens if no account is active
   pub fn remove_active_account(&self) -> Option<Account> {
      let removed = self.commit(Mutation::RemoveActiveAccount, |store| {
         let removed = store.registry.remove_active_account();
         let changed = removed.is_some();
         (removed, changed)
      });

      if let Some(account) = &removed {
         tracing::info!("Removed account {}", account.address);
      }
      removed
   }

   pub fn set_account(&self, index: Option<usize>, account: Account) -> bool {
      self.commit(Mutation::SetAccount, |store| {
         let replaced = store.registry.set_account(index, account);
         (replaced, replaced)
      })
   }

   pub fn move_account(&self, from: usize, to: usize) -> bool {
      self.commit(Mutation::MoveAccount, |store| {
         let moved = store.registry.move_account(from, to);
         (moved, moved)
      })
   }
}
