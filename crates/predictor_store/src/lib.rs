//! Predictor store: the page's durable key-value store and the two records
//! kept in it (theme flag and form draft).
mod file_store;
mod persist;
mod prefs;
mod store;

pub use file_store::{FileStore, STORE_FILENAME};
pub use persist::{ensure_store_dir, AtomicFileWriter};
pub use prefs::{decode_draft, load_draft, load_theme, save_draft, save_theme, DRAFT_KEY, THEME_KEY};
pub use store::{LocalStore, MemoryStore, StoreError};
