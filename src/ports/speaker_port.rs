//! Text-to-speech / console output port.

/// Fire-and-forget output. Implementations log their own failures.
pub trait SpeakerPort {
    fn say(&self, text: &str);
}
