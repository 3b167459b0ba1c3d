pub mod context;
pub mod user;
pub mod utils;
pub mod wallet;


pub use context::*;
pub use user::*;
pub use wallet::{AccountBalance, RpcWallet, WalletApi};
