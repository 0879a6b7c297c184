//! Registers the PDF backends compiled into this build and assembles them
//! into a [`TextExtractor`].
//!
//! Which backends exist is decided at build time by cargo features:
//! - `lopdf` (pure Rust, tried first)
//! - `mupdf` (native MuPDF, fallback)
//!
//! A build with neither still works; every extraction yields empty text.

use embedc_core::{ConfigFile, PdfBackend};

// Re-export domain types for convenience
pub use embedc_core::{DatasheetPayload, Extraction, TextExtractor};

/// Environment variable holding a comma-separated backend order.
pub const BACKENDS_ENV: &str = "EMBEDC_BACKENDS";

/// Names of the backends compiled into this build, in default order.
pub fn compiled_backends() -> Vec<&'static str> {
    #[allow(unused_mut)]
    let mut names = Vec::new();
    #[cfg(feature = "lopdf")]
    names.push("lopdf");
    #[cfg(feature = "mupdf")]
    names.push("mupdf");
    names
}

/// Instantiate a backend by name (case-insensitive). `None` if the name is
/// unknown or its feature is not compiled in.
pub fn backend_by_name(name: &str) -> Option<Box<dyn PdfBackend>> {
    match name.trim().to_ascii_lowercase().as_str() {
        #[cfg(feature = "lopdf")]
        "lopdf" => Some(Box::new(embedc_pdf_lopdf::LopdfBackend::new())),
        #[cfg(feature = "mupdf")]
        "mupdf" => Some(Box::new(embedc_pdf_mupdf::MupdfBackend::new())),
        _ => None,
    }
}

/// Every compiled-in backend, in default order.
pub fn available_backends() -> Vec<Box<dyn PdfBackend>> {
    compiled_backends()
        .into_iter()
        .filter_map(backend_by_name)
        .collect()
}

/// Backends in the requested order. Unknown or uncompiled names and
/// duplicates are skipped. Falls back to [`available_backends`] when
/// nothing usable was named.
pub fn backends_in_order<S: AsRef<str>>(names: &[S]) -> Vec<Box<dyn PdfBackend>> {
    let mut backends: Vec<Box<dyn PdfBackend>> = Vec::new();

    for name in names {
        let name = name.as_ref();
        match backend_by_name(name) {
            Some(backend) if backends.iter().any(|b| b.name() == backend.name()) => {}
            Some(backend) => backends.push(backend),
            None => {
                tracing::warn!(backend = name, compiled = ?compiled_backends(), "skipping unavailable PDF backend");
            }
        }
    }

    if backends.is_empty() {
        if !names.is_empty() {
            tracing::warn!("no configured PDF backend is available, using defaults");
        }
        return available_backends();
    }
    backends
}

/// Split a comma-separated backend list, dropping empty entries.
pub fn parse_backend_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve the backend order: explicit list > `EMBEDC_BACKENDS` > config file.
/// `None` means "use the default order".
pub fn resolve_backend_order(explicit: &[String], config: &ConfigFile) -> Option<Vec<String>> {
    if !explicit.is_empty() {
        return Some(explicit.to_vec());
    }
    if let Ok(list) = std::env::var(BACKENDS_ENV) {
        let names = parse_backend_list(&list);
        if !names.is_empty() {
            return Some(names);
        }
    }
    config.backends().map(<[String]>::to_vec)
}

pub fn default_extractor() -> TextExtractor {
    TextExtractor::new(available_backends())
}

pub fn extractor_with_order(order: Option<&[String]>) -> TextExtractor {
    let backends = match order {
        Some(names) => backends_in_order(names),
        None => available_backends(),
    };
    let extractor = TextExtractor::new(backends);
    tracing::debug!(backends = ?extractor.backend_names(), "registered PDF backends");
    extractor
}
