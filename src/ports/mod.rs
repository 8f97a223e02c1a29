//! Port traits for the external collaborators the domain consumes.

pub mod config_port;
pub mod history_port;
pub mod quote_port;
pub mod transcriber_port;
pub mod document_port;
pub mod speaker_port;
