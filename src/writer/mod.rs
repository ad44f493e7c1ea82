//! Output writers for graph record streams

mod jsonl;
mod traits;

pub use jsonl::JsonLinesWriter;
pub use traits::{write_edges, write_nodes, GraphWriter, WriterError};
