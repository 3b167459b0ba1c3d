use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fwallet")]
#[command(about = "Manage the accounts of the wallet front-end", long_about = None)]
pub struct Cli {
   /// Directory holding settings and the saved state, defaults to ./data
   #[arg(long, global = true)]
   pub data_dir: Option<PathBuf>,

   /// Override the JSON-RPC endpoint from the settings
   #[arg(long, global = true)]
   pub rpc: Option<String>,

   #[command(subcommand)]
   pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
   /// List the imported accounts
   List,
   /// Import an account from a V3 keystore file
   Import { keystore: PathBuf },
   /// Import a hardware ledger account
   AddLedger {
      address: String,
      #[arg(long, default_value_t = 0)]
      account_id: u32,
      #[arg(long, default_value_t = 0)]
      address_id: u32,
   },
   /// Make an account the active one
   Activate { address: String },
   /// Clear the active account
   Deactivate,
   /// Remove the active account
   Remove,
   /// Rename an account and move it to a 1-based position
   Update {
      address: String,
      #[arg(long, default_value = "")]
      name: String,
      #[arg(long)]
      order: usize,
   },
   /// Move the account at one 0-based position to another
   Move { from: usize, to: usize },
   /// Refresh one balance, or all of them when no address is given
   Refresh { address: Option<String> },
   /// Set the fiat currency code
   SetCurrency { currency: String },
   /// Set the native token price in the current currency
   SetPrice { price: f64 },
   /// Set the number of fraction digits shown
   SetDigits { digits: u8 },
   /// Forget every account and preference
   Reset,
}
