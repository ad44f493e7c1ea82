//! JSON Lines writer: one record per line, nodes and edges in separate files

use super::traits::{GraphWriter, WriterError};
use crate::adapter::{EdgeRecord, NodeRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `nodes.jsonl` and `edges.jsonl` under one directory.
pub struct JsonLinesWriter {
    nodes: BufWriter<File>,
    edges: BufWriter<File>,
    node_path: PathBuf,
    edge_path: PathBuf,
    node_count: usize,
    edge_count: usize,
}

impl JsonLinesWriter {
    /// Create (or truncate) both output files under `dir`.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self, WriterError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let node_path = dir.join("nodes.jsonl");
        let edge_path = dir.join("edges.jsonl");
        Ok(Self {
            nodes: BufWriter::new(File::create(&node_path)?),
            edges: BufWriter::new(File::create(&edge_path)?),
            node_path,
            edge_path,
            node_count: 0,
            edge_count: 0,
        })
    }

    /// Records written so far, as (nodes, edges).
    pub fn counts(&self) -> (usize, usize) {
        (self.node_count, self.edge_count)
    }

    /// Flush everything and log the final tally.
    pub fn finish(mut self) -> Result<(usize, usize), WriterError> {
        self.flush()?;
        info!(
            "wrote {} nodes to {} and {} edges to {}",
            self.node_count,
            self.node_path.display(),
            self.edge_count,
            self.edge_path.display()
        );
        Ok((self.node_count, self.edge_count))
    }
}

impl GraphWriter for JsonLinesWriter {
    fn write_node(&mut self, record: &NodeRecord) -> Result<(), WriterError> {
        serde_json::to_writer(&mut self.nodes, record)?;
        self.nodes.write_all(b"\n")?;
        self.node_count += 1;
        Ok(())
    }

    fn write_edge(&mut self, record: &EdgeRecord) -> Result<(), WriterError> {
        serde_json::to_writer(&mut self.edges, record)?;
        self.edges.write_all(b"\n")?;
        self.edge_count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), WriterError> {
        self.nodes.flush()?;
        self.edges.flush()?;
        Ok(())
    }
}
