//! Note list to waveform rendering
//!
//! - Assembler: filters notes, renders one tone per note and concatenates them
//! - PCM: peak normalization and 16-bit quantization

pub mod assembler;
pub mod pcm;

pub use assembler::{Rendering, SequenceAssembler, assemble};
pub use pcm::{normalize_peak, to_pcm16};
