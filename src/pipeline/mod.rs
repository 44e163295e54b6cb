//! Pipeline composition and execution.
//!
//! The pipeline is a directed acyclic graph of typed stages. Each stage
//! declares the record kinds it consumes and produces; wiring checks those
//! contracts when a connection is made, and evaluation is a lazy,
//! single-threaded, depth-first pull from the terminal node.
//!
//! - [`stage`] defines the [`Stage`] contract every transformation
//!   implements.
//! - [`graph`] wires stages into [`StageNode`]s and evaluates them.
//! - [`stages`] holds the concrete sources, filters, sorts, and playlist
//!   stages shipped with the crate.

pub mod graph;
pub mod stage;
pub mod stages;

pub use graph::StageNode;
pub use stage::{single_input, Stage};
