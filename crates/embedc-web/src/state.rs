use embedc_core::TextExtractor;

/// Shared application state accessible from all handlers.
///
/// Everything in here is read-only after startup, so handlers share it
/// through an `Arc` without locking.
pub struct AppState {
    pub extractor: TextExtractor,
}
