pub mod config;
pub mod error;
pub mod extract;
pub mod inspect;
pub mod io;

pub use config::{default_output_name, ExtractConfig};
pub use error::{MtxError, Result};
pub use extract::{ExtractSummary, Extraction, ThresholdEdgeExtractor};
pub use inspect::EdgeListStats;
pub use io::mtx::{read_edge_list, write_edge_list, Edge, EdgeList};
