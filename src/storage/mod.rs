//! Persistence for the league document
//!
//! - `local`: SQLite key/value cache on this machine
//! - `remote`: cloud copy over the Firebase REST API
//! - `migrate`: upgrade of older document shapes at load time
//! - `store`: the load/save facade the commands use

pub mod local;
pub mod migrate;
pub mod remote;
pub mod store;


pub use local::LocalCache;
pub use migrate::league_from_document;
pub use remote::RemoteStore;
pub use store::{
    classify_remote, AppStore, LoadSource, RemoteState, DEFAULT_SEED_PATH, STORAGE_KEY,
};
