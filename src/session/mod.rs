//! Session state: data model, stores, and the cookie bridge for the web tier.

pub mod cookies;
pub mod file_store;
pub mod store;
pub mod types;

pub use file_store::FileStore;
pub use store::{MemoryStore, SessionStore};
pub use types::{Session, SessionData, User};
