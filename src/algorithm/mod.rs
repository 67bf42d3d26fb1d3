//! Propagation engine, weighted selection and the synthesis executor

/// Bitsets over catalog entries and over possibility indices
pub mod bitset;
/// Main synthesis executor and its lifecycle
pub mod executor;
/// Placement and completion notifications
pub mod observer;
/// Arc-consistency propagation and footprint checks
pub mod propagation;
/// Adjacency rules compiled per possibility
pub mod rules;
/// Seeded weighted selection
pub mod selection;
/// Background solving with channel-delivered events
pub mod worker;
/// Deduplicating direction-aware worklist
pub mod worklist;
