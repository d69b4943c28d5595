pub mod entry_editor;
pub mod mood_picker;
pub mod sound_toggle;
pub mod spin_history;

pub use entry_editor::EntryEditor;
pub use mood_picker::MoodPicker;
pub use sound_toggle::SoundToggle;
pub use spin_history::SpinHistoryPanel;
