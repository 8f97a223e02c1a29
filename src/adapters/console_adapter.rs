//! Console stand-ins for speech: typed input as the transcription, printed
//! output as the spoken reply.

use crate::domain::error::SigtraderError;
use crate::ports::speaker_port::SpeakerPort;
use crate::ports::transcriber_port::TranscriberPort;
use std::io::{BufRead, Write};
use std::sync::Mutex;
use tracing::{info, warn};

const PROVIDER: &str = "transcriber";

/// Reads one line per utterance. EOF means the source is gone.
pub struct LineTranscriber<R> {
    reader: R,
}

impl<R: BufRead> LineTranscriber<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> TranscriberPort for LineTranscriber<R> {
    fn listen_and_transcribe(&mut self) -> Result<String, SigtraderError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| SigtraderError::unavailable(PROVIDER, "-", e.to_string()))?;
        if read == 0 {
            return Err(SigtraderError::unavailable(PROVIDER, "-", "end of input"));
        }
        Ok(line.trim().to_string())
    }
}

pub struct ConsoleSpeaker<W> {
    out: Mutex<W>,
    muted: bool,
}

impl<W: Write> ConsoleSpeaker<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            muted: false,
        }
    }

    /// Muted speakers only log what they would have said.
    pub fn muted(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            muted: true,
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write> SpeakerPort for ConsoleSpeaker<W> {
    fn say(&self, text: &str) {
        if self.muted {
            info!(text, "speech muted");
            return;
        }
        let Ok(mut out) = self.out.lock() else {
            warn!("speaker output lock poisoned");
            return;
        };
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!(error = %e, "speaker output failed");
        }
    }
}
