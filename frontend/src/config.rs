use shared::SpinConfig;
use web_sys::{window, Storage};

pub const CONFIG_KEY: &str = "moodspin_config";
pub const ENTRIES_KEY: &str = "moodspin_entries";
pub const MOOD_KEY: &str = "moodspin_mood";
pub const SOUND_KEY: &str = "moodspin_sound";

pub fn local_storage() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

/// Wheel timing for this browser. A JSON override under `moodspin_config`
/// wins over the defaults as long as it validates.
pub fn get_spin_config() -> SpinConfig {
    let raw = match local_storage().and_then(|s| s.get_item(CONFIG_KEY).ok().flatten()) {
        Some(raw) => raw,
        None => return SpinConfig::default(),
    };

    match parse_spin_config(&raw) {
        Ok(config) => {
            log::info!("using spin config override from local storage");
            config
        }
        Err(err) => {
            log::warn!("ignoring {}: {}", CONFIG_KEY, err);
            SpinConfig::default()
        }
    }
}

pub fn parse_spin_config(raw: &str) -> Result<SpinConfig, String> {
    let config: SpinConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}
