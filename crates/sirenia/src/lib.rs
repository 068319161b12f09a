#![forbid(unsafe_code)]

//! Dummy-node lifecycle for layered graph layout.
//!
//! Layered layout algorithms want every edge to connect adjacent layers, every node to fit into
//! one layer, and room reserved for edge labels. The processors in this crate establish that
//! structure by inserting dummy nodes into an [`LGraph`](lgraph::LGraph) before layering and
//! crossing minimization, and remove the dummies again after edges have been routed, merging
//! geometry back into the original edges and nodes.
//!
//! Each processor module exposes a `run(&mut LGraph) -> Result<()>` entry point; [`pipeline`]
//! groups them into the slots of a layout run.

pub use sirenia_lgraph as lgraph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod big_nodes_intermediate;
pub mod big_nodes_postprocessor;
pub mod big_nodes_preprocessor;
pub mod error;
pub mod hyperedge_dummy_merger;
pub mod label_dummy_chains;
pub mod label_dummy_inserter;
pub mod label_dummy_remover;
pub mod label_side_selector;
pub mod long_edge_joiner;
pub mod long_edge_splitter;
pub mod pipeline;
pub mod util;

pub use error::{Error, Result};
pub use pipeline::Processor;
