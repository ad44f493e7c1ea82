//! Writer abstraction shared by all record sinks

use crate::adapter::{EdgeRecord, NodeRecord};
use thiserror::Error;

/// Errors from writing records.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for adapter record streams.
///
/// Object safe, so one writer can collect the output of several adapters.
pub trait GraphWriter {
    fn write_node(&mut self, record: &NodeRecord) -> Result<(), WriterError>;
    fn write_edge(&mut self, record: &EdgeRecord) -> Result<(), WriterError>;

    /// Flush buffered output; called once after every stream is drained.
    fn flush(&mut self) -> Result<(), WriterError> {
        Ok(())
    }
}

/// Drain a node stream into a writer; returns how many records were written.
pub fn write_nodes<W, I>(writer: &mut W, records: I) -> Result<usize, WriterError>
where
    W: GraphWriter + ?Sized,
    I: IntoIterator<Item = NodeRecord>,
{
    let mut count = 0;
    for record in records {
        writer.write_node(&record)?;
        count += 1;
    }
    Ok(count)
}

/// Drain an edge stream into a writer; returns how many records were written.
pub fn write_edges<W, I>(writer: &mut W, records: I) -> Result<usize, WriterError>
where
    W: GraphWriter + ?Sized,
    I: IntoIterator<Item = EdgeRecord>,
{
    let mut count = 0;
    for record in records {
        writer.write_edge(&record)?;
        count += 1;
    }
    Ok(count)
}
