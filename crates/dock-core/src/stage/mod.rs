//! Etapas del pipeline y grafo de transiciones.

mod graph;
mod status;

pub use graph::{edge_kind, edges_from, Edge, EdgeKind};
pub use status::Stage;
