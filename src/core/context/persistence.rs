use super::{
   preferences::{DEFAULT_CURRENCY, DEFAULT_FRACTION_DIGITS, Preferences},
   registry::AccountRegistry,
   store::{Mutation, StateSubscriber, Store, StoreHandle},
};
use crate::core::user::Account;
use serde::{Deserialize, Serialize};
use std::{
   collections::HashMap,
   path::PathBuf,
   sync::{Arc, RwLock},
};

/// Key the state is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "vuex";

/// Key-value storage for serialized state
pub trait Storage: Send + Sync {
   fn get_item(&self, key: &str) -> Result<Option<String>, anyhow::Error>;

   fn set_item(&self, key: &str, value: &str) -> Result<(), anyhow::Error>;

   fn remove_item(&self, key: &str) -> Result<(), anyhow::Error>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
   dir: PathBuf,
}

impl FileStorage {
   pub fn new(dir: impl Into<PathBuf>) -> Result<Self, anyhow::Error> {
      let dir = dir.into();
      if !dir.exists() {
         std::fs::create_dir_all(&dir)?;
      }
      Ok(Self { dir })
   }

   fn path(&self, key: &str) -> PathBuf {
      self.dir.join(format!("{}.json", key))
   }
}

impl Storage for FileStorage {
   fn get_item(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
      let path = self.path(key);
      if !path.exists() {
         return Ok(None);
      }
      Ok(Some(std::fs::read_to_string(path)?))
   }

   fn set_item(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
      std::fs::write(self.path(key), value)?;
      Ok(())
   }

   fn remove_item(&self, key: &str) -> Result<(), anyhow::Error> {
      let path = self.path(key);
      if path.exists() {
         std::fs::remove_file(path)?;
      }
      Ok(())
   }
}

#[derive(Debug, Default)]
pub struct MemoryStorage(RwLock<HashMap<String, String>>);

impl MemoryStorage {
   pub fn new() -> Self {
      Self::default()
   }
}

impl Storage for MemoryStorage {
   fn get_item(&self, key: &str) -> Result<Option<String>, anyhow::Error> {
      Ok(self.0.read().expect("MemoryStorage is poisoned").get(key).cloned())
   }

   fn set_item(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
      self
         .0
         .write()
         .expect("MemoryStorage is poisoned")
         .insert(key.to_string(), value.to_string());
      Ok(())
   }

   fn remove_item(&self, key: &str) -> Result<(), anyhow::Error> {
      self.0.write().expect("MemoryStorage is poisoned").remove(key);
      Ok(())
   }
}

fn default_currency() -> String {
   DEFAULT_CURRENCY.to_string()
}

fn default_fraction_digits() -> u8 {
   DEFAULT_FRACTION_DIGITS
}

/// The persisted part of the [Store]
///
/// Breakpoints and the active account address are left out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
   /// `null` reads as 0
   #[serde(default, deserialize_with = "token_price")]
   pub token_price: f64,

   #[serde(default = "default_currency")]
   pub currency: String,

   #[serde(default = "default_fraction_digits")]
   pub fraction_digits: u8,

   #[serde(default)]
   pub accounts: Vec<Account>,

   /// `-1` when no account is active
   #[serde(default, with = "active_index")]
   pub active_account_index: Option<usize>,
}

impl Snapshot {
   pub fn from_store(store: &Store) -> Self {
      Self {
         token_price: store.preferences.token_price,
         currency: store.preferences.currency.clone(),
         fraction_digits: store.preferences.fraction_digits,
         accounts: store.accounts().clone(),
         active_account_index: store.registry.active_index(),
      }
   }

   /// Build a fresh [Store] seeded with this snapshot
   pub fn into_store(self) -> Store {
      let registry = AccountRegistry::from_parts(self.accounts, self.active_account_index);
      let preferences = Preferences {
         token_price: self.token_price,
         currency: self.currency,
         fraction_digits: self.fraction_digits,
         ..Preferences::default()
      };
      Store::new(registry, preferences)
   }

   pub fn to_json(&self) -> Result<String, anyhow::Error> {
      Ok(serde_json::to_string(self)?)
   }

   pub fn from_json(data: &str) -> Result<Self, anyhow::Error> {
      Ok(serde_json::from_str(data)?)
   }
}

fn token_price<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
   let price = Option::<f64>::deserialize(deserializer)?;
   Ok(price.filter(|price| price.is_finite()).unwrap_or_default())
}

mod active_index {
   use serde::{Deserialize, Deserializer, Serializer};

   pub fn serialize<S: Serializer>(index: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
      match index {
         Some(index) => serializer.serialize_i64(*index as i64),
         None => serializer.serialize_i64(-1),
      }
   }

   pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
      let index = i64::deserialize(deserializer)?;
      Ok(usize::try_from(index).ok())
   }
}

/// Writes a [Snapshot] to [Storage] after every change of the store
#[derive(Clone)]
pub struct PersistedState {
   storage: Arc<dyn Storage>,
   key: String,
}

impl PersistedState {
   pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
      Self {
         storage,
         key: key.into(),
      }
   }

   pub fn key(&self) -> &str {
      &self.key
   }

   /// Load the saved snapshot, if any
   pub fn load(&self) -> Result<Option<Snapshot>, anyhow::Error> {
      match self.storage.get_item(&self.key)? {
         Some(data) => Ok(Some(Snapshot::from_json(&data)?)),
         None => Ok(None),
      }
   }

   pub fn save(&self, store: &Store) -> Result<(), anyhow::Error> {
      let data = Snapshot::from_store(store).to_json()?;
      self.storage.set_item(&self.key, &data)
   }

   /// Forget the saved snapshot, the next [Self::restore] starts from the defaults
   pub fn clear(&self) -> Result<(), anyhow::Error> {
      self.storage.remove_item(&self.key)?;
      tracing::info!("Cleared saved state {}", self.key);
      Ok(())
   }

   /// Create a [StoreHandle] seeded from storage that persists itself on every change
   ///
   /// A missing snapshot starts from the defaults, an unreadable one is an error
   pub fn restore(self) -> Result<StoreHandle, anyhow::Error> {
      let store = match self.load()? {
         Some(snapshot) => {
            tracing::info!(
               "Restored {} accounts from {}",
               snapshot.accounts.len(),
               self.key
            );
            snapshot.into_store()
         }
         None => Store::default(),
      };

      let handle = StoreHandle::new(store);
      handle.subscribe(Arc::new(self));
      Ok(handle)
   }
}

impl StateSubscriber for PersistedState {
   fn on_change(&self, mutation: Mutation, store: &Store) {
      if let Err(e) = self.save(store) {
         tracing::error!("Failed to persist state after {:?}: {:?}", mutation, e);
      }
   }
}
