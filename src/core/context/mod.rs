pub mod actions;
pub mod persistence;
pub mod preferences;
pub mod registry;
pub mod settings;
pub mod store;

pub use persistence::{
   DEFAULT_STORAGE_KEY, FileStorage, MemoryStorage, PersistedState, Snapshot, Storage,
};
pub use preferences::{Breakpoint, Preferences};
pub use registry::AccountRegistry;
pub use settings::Settings;
pub use store::{Mutation, StateSubscriber, Store, StoreHandle};
