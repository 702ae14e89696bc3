use serde::{Deserialize, Serialize};

/// User-facing store settings, persisted under their own storage key.
///
/// Missing fields deserialize to their defaults, so settings written by an
/// older version stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    pub show_notifications: bool,
    pub auto_suggest: bool,
    pub keyboard_shortcuts: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            show_notifications: true,
            auto_suggest: true,
            keyboard_shortcuts: true,
        }
    }
}
