//! Sparse edge-list files.
//!
//! Layout: the first line is the matrix dimension (rows read), each following line is
//! `"<row> <col>"`. Readers also accept leading `%` comment lines and ignore lines
//! with fewer than two fields.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{MtxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub row: usize,
    pub col: usize,
}

impl Edge {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_self_pair(&self) -> bool {
        self.row == self.col
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    pub dimension: usize,
    pub edges: Vec<Edge>,
}

/// Write `rows` as the header line followed by one line per edge, in order.
///
/// The file is created (or truncated) only when this is called.
pub fn write_edge_list(path: impl AsRef<Path>, rows: usize, edges: &[Edge]) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| MtxError::io(path, e))?;
    let mut w = BufWriter::new(file);
    write_edges(&mut w, rows, edges).map_err(|e| MtxError::io(path, e))?;
    w.flush().map_err(|e| MtxError::io(path, e))?;
    Ok(())
}

fn write_edges<W: Write>(w: &mut W, rows: usize, edges: &[Edge]) -> std::io::Result<()> {
    writeln!(w, "{}", rows)?;
    for e in edges {
        writeln!(w, "{} {}", e.row, e.col)?;
    }
    Ok(())
}

pub fn read_edge_list(path: impl AsRef<Path>) -> Result<EdgeList> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| MtxError::io(path, e))?;
    parse_edge_list(BufReader::new(file)).map_err(|err| match err {
        MtxError::Io { source, .. } => MtxError::io(path, source),
        other => other,
    })
}

pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<EdgeList> {
    let mut dimension: Option<usize> = None;
    let mut edges = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| MtxError::io("<edge list>", e))?;

        if dimension.is_none() {
            if line.starts_with('%') {
                continue;
            }
            let first = line.split_whitespace().next().ok_or_else(|| MtxError::Malformed {
                line: line_no,
                reason: "missing dimension header".to_string(),
            })?;
            dimension = Some(parse_index(first, line_no)?);
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(a), Some(b)) = (fields.next(), fields.next()) else {
            continue;
        };
        edges.push(Edge::new(parse_index(a, line_no)?, parse_index(b, line_no)?));
    }

    let dimension = dimension.ok_or_else(|| MtxError::Malformed {
        line: 0,
        reason: "empty edge list".to_string(),
    })?;
    Ok(EdgeList { dimension, edges })
}

fn parse_index(field: &str, line: usize) -> Result<usize> {
    field.parse::<usize>().map_err(|e| MtxError::Malformed {
        line,
        reason: format!("{:?} is not an index: {}", field, e),
    })
}
