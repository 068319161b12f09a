//! Processor registry and the slots they run in.
//!
//! A layered layout run calls into this crate four times: before layering, before crossing
//! minimization, before node placement and after edge routing. The phases in between (layering,
//! ordering, placement, routing) belong to the caller.

use crate::lgraph::{LGraph, LayoutOptions};
use crate::{
    Result, big_nodes_intermediate, big_nodes_postprocessor, big_nodes_preprocessor,
    hyperedge_dummy_merger, label_dummy_chains, label_dummy_inserter, label_dummy_remover,
    label_side_selector, long_edge_joiner, long_edge_splitter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Processor {
    BigNodesPreprocessor,
    LabelDummyInserter,
    BigNodesIntermediate,
    LongEdgeSplitter,
    LabelDummyChains,
    HyperedgeDummyMerger,
    LabelSideSelector,
    BigNodesPostprocessor,
    LabelDummyRemover,
    LongEdgeJoiner,
}

pub const BEFORE_LAYERING: &[Processor] = &[
    Processor::BigNodesPreprocessor,
    Processor::LabelDummyInserter,
];

pub const BEFORE_CROSSING_MINIMIZATION: &[Processor] = &[
    Processor::BigNodesIntermediate,
    Processor::LongEdgeSplitter,
    Processor::LabelDummyChains,
];

pub const BEFORE_NODE_PLACEMENT: &[Processor] = &[
    Processor::HyperedgeDummyMerger,
    Processor::LabelSideSelector,
];

pub const AFTER_EDGE_ROUTING: &[Processor] = &[
    Processor::BigNodesPostprocessor,
    Processor::LabelDummyRemover,
    Processor::LongEdgeJoiner,
];

impl Processor {
    pub fn name(self) -> &'static str {
        match self {
            Processor::BigNodesPreprocessor => "big_nodes_preprocessor",
            Processor::LabelDummyInserter => "label_dummy_inserter",
            Processor::BigNodesIntermediate => "big_nodes_intermediate",
            Processor::LongEdgeSplitter => "long_edge_splitter",
            Processor::LabelDummyChains => "label_dummy_chains",
            Processor::HyperedgeDummyMerger => "hyperedge_dummy_merger",
            Processor::LabelSideSelector => "label_side_selector",
            Processor::BigNodesPostprocessor => "big_nodes_postprocessor",
            Processor::LabelDummyRemover => "label_dummy_remover",
            Processor::LongEdgeJoiner => "long_edge_joiner",
        }
    }

    pub fn process(self, g: &mut LGraph) -> Result<()> {
        match self {
            Processor::BigNodesPreprocessor => big_nodes_preprocessor::run(g),
            Processor::LabelDummyInserter => label_dummy_inserter::run(g),
            Processor::BigNodesIntermediate => big_nodes_intermediate::run(g),
            Processor::LongEdgeSplitter => long_edge_splitter::run(g),
            Processor::LabelDummyChains => label_dummy_chains::run(g),
            Processor::HyperedgeDummyMerger => hyperedge_dummy_merger::run(g),
            Processor::LabelSideSelector => label_side_selector::run(g),
            Processor::BigNodesPostprocessor => big_nodes_postprocessor::run(g),
            Processor::LabelDummyRemover => label_dummy_remover::run(g),
            Processor::LongEdgeJoiner => long_edge_joiner::run(g),
        }
    }
}

/// Runs `processors` in order and stops at the first error.
///
/// Set `SIRENIA_TIMING=1` to get one line per call on stderr with the time spent in each
/// processor.
pub fn run_all(g: &mut LGraph, processors: &[Processor]) -> Result<()> {
    let timing_enabled = std::env::var("SIRENIA_TIMING")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let total_start = timing_enabled.then(std::time::Instant::now);
    let mut timings: Vec<(&'static str, std::time::Duration)> = Vec::new();

    for &processor in processors {
        let start = timing_enabled.then(std::time::Instant::now);
        processor.process(g)?;
        if let Some(s) = start {
            timings.push((processor.name(), s.elapsed()));
        }
    }

    if let Some(s) = total_start {
        let steps = timings
            .iter()
            .map(|(name, d)| format!("{name}={d:?}"))
            .collect::<Vec<_>>()
            .join(" ");
        eprintln!(
            "[sirenia-timing] nodes={} edges={} total={:?} {}",
            g.node_count(),
            g.edge_count(),
            s.elapsed(),
            steps
        );
    }
    Ok(())
}

/// Parses layout options from the JSON a layout driver passes around; missing keys fall back
/// to their defaults.
pub fn options_from_json(json: &str) -> Result<LayoutOptions> {
    Ok(serde_json::from_str(json)?)
}
