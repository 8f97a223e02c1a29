//! Concrete adapter implementations for ports.

pub mod console_adapter;
pub mod csv_adapter;
pub mod document_adapter;
pub mod file_config_adapter;
pub mod quote_adapter;
