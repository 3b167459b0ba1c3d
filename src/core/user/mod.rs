pub mod account;
pub mod keystore;

pub use account::{Account, AccountKey, AccountUpdate, LedgerAccount, LedgerPath};
pub use keystore::Keystore;
