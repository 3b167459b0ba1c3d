use clap::Parser;
use fwallet_store::core::{
   FileStorage, PersistedState, Settings, Store, StoreHandle,
   user::{AccountUpdate, Keystore, LedgerAccount, LedgerPath},
   utils::{data_dir, trace::setup_tracing},
   wallet::{RpcWallet, WalletApi},
};
use std::{panic, sync::Arc};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
   panic::set_hook(Box::new(|panic_info| {
      let message = panic_info
         .payload()
         .downcast_ref::<&str>()
         .map_or("Unknown panic", |s| s);
      let location = panic_info
         .location()
         .map_or("Unknown location".to_string(), |loc| {
            format!("{}:{}:{}", loc.file(), loc.line(), loc.column())
         });
      tracing::error!("Panic occurred: '{}' at {}", message, location);
   }));

   let _tracing_guard = setup_tracing();
   let cli = Cli::parse();

   let dir = match cli.data_dir {
      Some(dir) => dir,
      None => data_dir()?,
   };

   let mut settings = Settings::load_or_default(&dir)?;
   if let Some(rpc) = cli.rpc {
      settings.rpc_url = rpc;
   }

   let storage = Arc::new(FileStorage::new(dir.clone())?);
   let persisted = PersistedState::new(storage, settings.storage_key.clone());
   let store = persisted.clone().restore()?;
   let wallet = RpcWallet::new(&settings.rpc_url)?;
   tracing::debug!("Using {}", wallet.url());

   run(cli.command, &store, &persisted, &wallet).await
}

async fn run(
   command: Commands,
   store: &StoreHandle,
   persisted: &PersistedState,
   wallet: &impl WalletApi,
) -> Result<(), anyhow::Error> {
   match command {
      Commands::List => print_accounts(store)?,
      Commands::Import { keystore } => {
         let keystore = Keystore::from_file(keystore)?;
         if !store.add_account(wallet, keystore).await? {
            println!("Account is already imported");
         }
         print_accounts(store)?;
      }
      Commands::AddLedger {
         address,
         account_id,
         address_id,
      } => {
         let ledger_account = LedgerAccount::new(address, LedgerPath::new(account_id, address_id));
         if !store.add_ledger_account(wallet, ledger_account).await? {
            println!("Account is already imported");
         }
         print_accounts(store)?;
      }
      Commands::Activate { address } => {
         store.set_active_account_address(wallet, &address)?;
         if store.set_active_account_by_address(wallet, &address)?.is_none() {
            println!("No imported account with address {}", address);
         }
      }
      Commands::Deactivate => store.deactivate_active_account(),
      Commands::Remove => match store.remove_active_account() {
         Some(account) => println!("Removed {}", account.address),
         None => println!("No active account"),
      },
      Commands::Update {
         address,
         name,
         order,
      } => {
         let update = AccountUpdate {
            address,
            name,
            order,
         };
         if !store.update_account(wallet, update)? {
            println!("No such account");
         }
         print_accounts(store)?;
      }
      Commands::Move { from, to } => {
         if !store.move_account(from, to) {
            println!("Nothing to move");
         }
         print_accounts(store)?;
      }
      Commands::Refresh { address } => {
         match address {
            Some(address) => match store.get_account_by_address(wallet, &address)? {
               Some(account) => {
                  store.update_account_balance(wallet, Some(&account)).await?;
               }
               None => println!("No imported account with address {}", address),
            },
            None => {
               store.update_accounts_balances(wallet).await?;
            }
         }
         print_accounts(store)?;
      }
      Commands::SetCurrency { currency } => store.set_currency(currency.to_uppercase()),
      Commands::SetPrice { price } => store.set_token_price(price)?,
      Commands::SetDigits { digits } => store.set_fraction_digits(digits),
      Commands::Reset => {
         store.replace(Store::default());
         persisted.clear()?;
         println!("Removed all accounts and preferences saved under {}", persisted.key());
      }
   }

   Ok(())
}

fn print_accounts(store: &StoreHandle) -> Result<(), anyhow::Error> {
   let prefs = store.preferences();
   let active = store.active_account_index();
   let accounts = store.accounts();

   if accounts.is_empty() {
      println!("No accounts");
      return Ok(());
   }

   for (index, account) in accounts.iter().enumerate() {
      let marker = if Some(index) == active { "*" } else { " " };
      let kind = if account.is_ledger_account() { "ledger" } else { "keystore" };
      println!(
         "{} {:>2} {:<20} {} {:>8} {} ({})",
         marker,
         index + 1,
         account.display_name(),
         account.address,
         kind,
         prefs.format_amount(&account.total_balance)?,
         prefs.format_value(&account.total_balance)?,
      );
   }

   Ok(())
}
