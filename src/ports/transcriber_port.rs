//! Speech-to-text port.

use crate::domain::error::SigtraderError;

pub trait TranscriberPort {
    /// Block until one utterance is captured and return its text.
    fn listen_and_transcribe(&mut self) -> Result<String, SigtraderError>;
}
