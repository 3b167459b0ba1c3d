use std::path::PathBuf;

pub mod eth;
pub mod trace;

pub use eth::*;

/// Wallet data directory
pub fn data_dir() -> Result<PathBuf, anyhow::Error> {
   let dir = std::env::current_dir()?.join("data");

   if !dir.exists() {
      std::fs::create_dir_all(dir.clone())?;
   }

   Ok(dir)
}
