use std::fmt;

/// One rendered note in the text artifact.
/// Printed as `beep(<frequency>, <duration>)`, both rounded to 2 decimal places
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeepEvent {
    /// Frequency in Hz
    pub frequency: f64,
    /// Duration in seconds
    pub duration: f64,
}

impl BeepEvent {
    pub fn new(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
        }
    }
}

impl fmt::Display for BeepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "beep({}, {})",
            format_rounded(self.frequency),
            format_rounded(self.duration)
        )
    }
}

/// Text artifact contents: one newline-terminated line per event
pub fn event_log(events: &[BeepEvent]) -> String {
    events.iter().map(|event| format!("{}\n", event)).collect()
}

/// Round to 2 decimal places and print as a plain decimal without trailing
/// zeros, keeping at least one fractional digit
/// (440 -> "440.0", 261.6256 -> "261.63", 0.5 -> "0.5").
fn format_rounded(value: f64) -> String {
    let mut text = format!("{:.2}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.push('0');
        }
    }
    text
}
