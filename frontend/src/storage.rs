use std::str::FromStr;

use shared::entries::EntryList;
use shared::theme::Mood;

use crate::config::{local_storage, ENTRIES_KEY, MOOD_KEY, SOUND_KEY};

/// Host-side preferences kept between visits. Reads and writes are best
/// effort: a blocked or corrupt store just means defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub mood: Mood,
    pub sound_enabled: bool,
    pub entries: EntryList,
}

impl Preferences {
    pub fn load(max_entries: usize) -> Self {
        let storage = local_storage();
        let read = |key: &str| storage.as_ref().and_then(|s| s.get_item(key).ok().flatten());

        let mood = read(MOOD_KEY)
            .and_then(|tag| Mood::from_str(&tag).ok())
            .unwrap_or_default();
        let sound_enabled = read(SOUND_KEY).map(|v| v != "false").unwrap_or(true);

        let mut entries = EntryList::new(max_entries);
        let restored = read(ENTRIES_KEY).and_then(|raw| {
            match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(saved) => Some(saved),
                Err(err) => {
                    log::warn!("discarding saved entries: {}", err);
                    None
                }
            }
        });
        match restored {
            Some(saved) => {
                if let Err(err) = entries.replace_all(&saved) {
                    log::warn!("saved entries rejected ({}), loading presets", err);
                    entries = EntryList::from_preset(mood, max_entries);
                }
            }
            None => entries = EntryList::from_preset(mood, max_entries),
        }

        Self {
            mood,
            sound_enabled,
            entries,
        }
    }
}

pub fn save_mood(mood: Mood) {
    write(MOOD_KEY, mood.as_ref());
}

pub fn save_sound_enabled(enabled: bool) {
    write(SOUND_KEY, if enabled { "true" } else { "false" });
}

pub fn save_entries(entries: &EntryList) {
    match serde_json::to_string(entries.as_slice()) {
        Ok(json) => write(ENTRIES_KEY, &json),
        Err(err) => log::warn!("could not serialize entries: {}", err),
    }
}

fn write(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("local storage rejected {}", key);
        }
    }
}
