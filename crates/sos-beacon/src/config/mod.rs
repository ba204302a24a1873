mod alarm_config;
mod alert_config;
#[allow(clippy::module_inception)]
mod config;
mod location_config;
mod recording_config;

pub(crate) use {
    alarm_config::AlarmConfig, alert_config::AlertConfig, config::Config,
    location_config::LocationConfig, recording_config::RecordingConfig,
};

pub(crate) const DEFAULT_MESSAGE: &str = "Emergency! I need help.";
pub(crate) const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 5;
pub(crate) const DEFAULT_DESKTOP_NOTIFICATIONS: bool = true;

pub(crate) fn default_message() -> String {
    DEFAULT_MESSAGE.to_string()
}

pub(crate) fn default_update_interval_secs() -> u64 {
    DEFAULT_UPDATE_INTERVAL_SECS
}

pub(crate) fn default_desktop_notifications() -> bool {
    DEFAULT_DESKTOP_NOTIFICATIONS
}
