//! Instrumentation and summaries of finished solves

/// Placement counts per entry
pub mod summary;
/// Span timing through an injected recorder
pub mod timing;
