//! Core of the embedded C code generator: a datasheet text extraction chain
//! and a keyword-driven responder that returns MISRA-annotated C templates.
//!
//! PDF libraries live in the `embedc-pdf-*` crates; this crate only defines
//! the [`PdfBackend`] seam they plug into.

pub mod backend;
pub mod config_file;
pub mod extract;
pub mod responder;
pub mod rules;
pub mod templates;

// Re-export for convenience
pub use backend::{BackendError, PdfBackend, PdfDocument};
pub use config_file::ConfigFile;
pub use extract::{DatasheetPayload, Extraction, ReadSeek, TextExtractor};
pub use responder::{GeneratedResponse, render_header, respond, respond_as};
pub use rules::MISRA_RULES;
pub use templates::Peripheral;
