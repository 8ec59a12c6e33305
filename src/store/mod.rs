pub mod card_store;
pub mod rehydrate;

pub use card_store::{CardStore, StoreError};
pub use rehydrate::{PersistedState, load_persisted, spawn_rehydration};
