use crate::config::{default_desktop_notifications, default_message};

use serde::{Deserialize, Serialize};

/// Alert dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Message sent to every contact on a trigger.
    #[serde(default = "default_message")]
    pub message: String,
    /// Whether each dispatch also raises a desktop notification.
    #[serde(default = "default_desktop_notifications")]
    pub desktop_notifications: bool,
}
