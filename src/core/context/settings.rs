use super::persistence::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_RPC_URL: &str = "https://rpcapi.fantom.network";

fn default_rpc_url() -> String {
   DEFAULT_RPC_URL.to_string()
}

fn default_storage_key() -> String {
   DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
   /// JSON-RPC endpoint used for balances
   #[serde(default = "default_rpc_url")]
   pub rpc_url: String,

   /// Key the state snapshot is saved under
   #[serde(default = "default_storage_key")]
   pub storage_key: String,
}

impl Default for Settings {
   fn default() -> Self {
      Self {
         rpc_url: default_rpc_url(),
         storage_key: default_storage_key(),
      }
   }
}

impl Settings {
   pub fn load_from_file(dir: &Path) -> Result<Self, anyhow::Error> {
      let data = std::fs::read(dir.join(SETTINGS_FILE))?;
      let settings = serde_json::from_slice(&data)?;
      Ok(settings)
   }

   pub fn save_to_file(&self, dir: &Path) -> Result<(), anyhow::Error> {
      if !dir.exists() {
         std::fs::create_dir_all(dir)?;
      }
      let data = serde_json::to_string_pretty(self)?;
      std::fs::write(dir.join(SETTINGS_FILE), data)?;
      Ok(())
   }

   /// Load the settings from `dir`
   ///
   /// If there is no settings file the defaults are written there so they can be edited
   pub fn load_or_default(dir: &Path) -> Result<Self, anyhow::Error> {
      if !dir.join(SETTINGS_FILE).exists() {
         let settings = Self::default();
         settings.save_to_file(dir)?;
         tracing::info!("Created {} in {}", SETTINGS_FILE, dir.display());
         return Ok(settings);
      }
      Self::load_from_file(dir)
   }
}
