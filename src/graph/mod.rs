//! The directed flow graph and the two core operations over it:
//! edge-direction normalization and top-N subgraph selection.

pub mod flow_graph;
pub mod normalize;
pub mod selection;
