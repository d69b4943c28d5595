use std::borrow::Cow;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ENTRIES, MAX_ENTRY_CHARS, MIN_ENTRIES};
use crate::error::EntryError;
use crate::theme::Mood;

/// The ordered entries on a wheel. Order is slice order; values are unique
/// ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryList {
    entries: Vec<String>,
    max: usize,
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new(MAX_ENTRIES)
    }
}

impl EntryList {
    pub fn new(max: usize) -> Self {
        Self {
            entries: Vec::new(),
            max: max.min(MAX_ENTRIES),
        }
    }

    pub fn from_preset(mood: Mood, max: usize) -> Self {
        let mut list = Self::new(max);
        for preset in mood.presets() {
            // presets are unique and short; a small `max` just truncates them
            if list.add(preset).is_err() {
                break;
            }
        }
        list
    }

    /// Trims and appends `raw`.
    pub fn add(&mut self, raw: &str) -> Result<(), EntryError> {
        let entry = Self::check(raw)?;
        if self.contains(entry) {
            return Err(EntryError::DuplicateEntryRejected(entry.to_string()));
        }
        if self.entries.len() >= self.max {
            return Err(EntryError::EntryLimitExceeded { max: self.max });
        }
        self.entries.push(entry.to_string());
        Ok(())
    }

    /// Replaces every entry at once; on error the list is left untouched.
    pub fn replace_all<I, S>(&mut self, entries: I) -> Result<(), EntryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = Self::new(self.max);
        for entry in entries {
            next.add(entry.as_ref())?;
        }
        self.entries = next.entries;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }

    pub fn contains(&self, entry: &str) -> bool {
        let needle = entry.trim().to_lowercase();
        self.entries.iter().any(|e| e.to_lowercase() == needle)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max
    }

    pub fn can_spin(&self) -> bool {
        self.entries.len() >= MIN_ENTRIES
    }

    fn check(raw: &str) -> Result<&str, EntryError> {
        let entry = raw.trim();
        if entry.is_empty() {
            return Err(EntryError::Blank);
        }
        if entry.chars().count() > MAX_ENTRY_CHARS {
            return Err(EntryError::TooLong { max: MAX_ENTRY_CHARS });
        }
        Ok(entry)
    }
}

/// Shortens `entry` to `max_chars` characters for drawing on a slice.
pub fn display_label(entry: &str, max_chars: usize) -> Cow<'_, str> {
    if entry.chars().count() <= max_chars {
        return Cow::Borrowed(entry);
    }
    let keep = max_chars.saturating_sub(1);
    let mut label: String = entry.chars().take(keep).collect();
    label.push('…');
    Cow::Owned(label)
}
