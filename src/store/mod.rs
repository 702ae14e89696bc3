// QuickPath store component
// The store owns the bookmark collection and all conflict-resolution logic.

pub mod path_store;

pub use path_store::{PathBookmarkStore, PathStoreTrait, COLLECTION_KEY, SETTINGS_KEY};
