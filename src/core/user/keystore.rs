use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Keystore format version this wallet reads
pub const KEYSTORE_VERSION: u64 = 3;

/// An encrypted V3 keystore document
///
/// Only the `address` is read, every other field (`crypto`, `id`, `version`, ...)
/// is kept as is so the document can be handed back to the key manager untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keystore {
   pub address: String,

   #[serde(flatten)]
   pub fields: Map<String, Value>,
}

impl Keystore {
   pub fn new(address: impl Into<String>, fields: Map<String, Value>) -> Self {
      Self {
         address: address.into(),
         fields,
      }
   }

   /// Deserialize from slice
   ///
   /// A missing `version` is accepted, any version other than 3 is not
   pub fn from_slice(data: &[u8]) -> Result<Self, anyhow::Error> {
      let keystore: Keystore = serde_json::from_slice(data)?;
      if keystore.address.trim().is_empty() {
         return Err(anyhow!("Keystore has an empty address"));
      }
      if keystore.fields.contains_key("version") && keystore.version() != Some(KEYSTORE_VERSION) {
         return Err(anyhow!(
            "Unsupported keystore version {}",
            keystore.fields["version"]
         ));
      }
      Ok(keystore)
   }

   pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
      let data = std::fs::read(path)?;
      Self::from_slice(&data)
   }

   pub fn version(&self) -> Option<u64> {
      self.fields.get("version").and_then(Value::as_u64)
   }
}
