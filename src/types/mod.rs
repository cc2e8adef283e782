pub mod events;
pub mod note;
pub mod waveform;

pub use events::{BeepEvent, event_log};
pub use note::{Note, Tuning, midi_note_to_frequency};
pub use waveform::Waveform;
