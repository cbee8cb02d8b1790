use std::path::Path;

use serde::Serialize;

use crate::config::ExtractConfig;
use crate::error::{MtxError, Result};
use crate::io::mtx::{write_edge_list, Edge};
use crate::io::similarity::{open_similarity_csv, RowCells};

/// Result of one scan: rows read and the qualifying edges in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub rows: usize,
    pub edges: Vec<Edge>,
}

impl Extraction {
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractSummary {
    pub rows: usize,
    pub edges: usize,
    pub cutoff: f64,
    pub upper: f64,
    pub output: String,
}

/// Thresholds the strict lower triangle of a similarity matrix into an edge list.
#[derive(Debug, Clone)]
pub struct ThresholdEdgeExtractor {
    cfg: ExtractConfig,
}

impl ThresholdEdgeExtractor {
    pub fn new(cfg: ExtractConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }

    fn qualifies(&self, v: f64) -> bool {
        v > self.cfg.cutoff && v < self.cfg.upper
    }

    /// Scan rows in order. Row `i` is read only in columns `0..min(i, len)`, and
    /// only those cells are parsed.
    pub fn extract_rows<R, I>(&self, rows: I) -> Result<Extraction>
    where
        R: RowCells,
        I: IntoIterator<Item = Result<R>>,
    {
        let mut edges = Vec::new();
        let mut i = 0usize;

        for row in rows {
            let row = row?;
            if i % self.cfg.progress_interval == 0 {
                tracing::info!(row = i, edges = edges.len(), "scanning");
            }

            let len_c = i.min(row.cell_count());
            for j in 0..len_c {
                if j == i {
                    continue;
                }
                let raw = row.cell(j).unwrap_or_default();
                let v = parse_cell(raw, i, j)?;
                if self.qualifies(v) {
                    edges.push(Edge::new(i, j));
                }
            }
            i += 1;
        }

        tracing::debug!(rows = i, edges = edges.len(), "scan complete");
        Ok(Extraction { rows: i, edges })
    }

    pub fn extract_file(&self, input: impl AsRef<Path>) -> Result<Extraction> {
        let rows = open_similarity_csv(input, self.cfg.delimiter as u8)?;
        tracing::info!(input = ?rows.path(), cutoff = self.cfg.cutoff, upper = self.cfg.upper, "reading similarity matrix");
        self.extract_rows(rows)
    }

    /// Scan `input` and write the edge list to `output`.
    ///
    /// Nothing is written if the scan fails.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ExtractSummary> {
        let output = output.as_ref();
        let extraction = self.extract_file(input)?;
        write_edge_list(output, extraction.rows, &extraction.edges)?;
        tracing::info!(output = ?output, rows = extraction.rows, edges = extraction.edge_count(), "wrote edge list");

        Ok(ExtractSummary {
            rows: extraction.rows,
            edges: extraction.edge_count(),
            cutoff: self.cfg.cutoff,
            upper: self.cfg.upper,
            output: output.display().to_string(),
        })
    }
}

fn parse_cell(raw: &str, row: usize, col: usize) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| MtxError::Parse {
        row,
        col,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Result<Vec<String>>> {
        data.iter()
            .map(|r| Ok(r.iter().map(|s| s.to_string()).collect()))
            .collect()
    }

    fn extractor(cutoff: f64) -> ThresholdEdgeExtractor {
        ThresholdEdgeExtractor::new(ExtractConfig { cutoff, ..Default::default() }).unwrap()
    }

    #[test]
    fn reference_example() {
        let out = extractor(0.4)
            .extract_rows(rows(&[&["x"], &["0.1", "0.5"], &["0.2", "0.9", "0.3"]]))
            .unwrap();
        assert_eq!(out.rows, 3);
        assert_eq!(out.edges, vec![Edge::new(2, 1)]);
        assert_eq!(out.edge_count(), 1);
    }

    #[test]
    fn bounds_are_strict() {
        let out = extractor(0.4)
            .extract_rows(rows(&[&["1"], &["0.4"], &["1.0", "0.41"], &["0.999", "1", " 0.5 "]]))
            .unwrap();
        assert_eq!(out.edges, vec![Edge::new(2, 1), Edge::new(3, 0), Edge::new(3, 2)]);
    }

    #[test]
    fn short_rows_bound_the_scan() {
        // Row 3 has a single cell; columns 1 and 2 are never looked at.
        let out = extractor(0.4)
            .extract_rows(rows(&[&[], &["0.9"], &["0.9", "0.9"], &["0.9"]]))
            .unwrap();
        assert_eq!(out.rows, 4);
        assert_eq!(
            out.edges,
            vec![Edge::new(1, 0), Edge::new(2, 0), Edge::new(2, 1), Edge::new(3, 0)]
        );
    }

    #[test]
    fn cells_on_and_above_diagonal_are_not_parsed() {
        let out = extractor(0.4)
            .extract_rows(rows(&[&["self", "junk"], &["0.5", "self", "junk"]]))
            .unwrap();
        assert_eq!(out.edges, vec![Edge::new(1, 0)]);
    }

    #[test]
    fn parse_failure_reports_location() {
        let err = extractor(0.4)
            .extract_rows(rows(&[&["x"], &["0.1"], &["0.2", "oops"]]))
            .unwrap_err();
        match err {
            MtxError::Parse { row, col, value } => {
                assert_eq!((row, col), (2, 1));
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn nan_never_qualifies() {
        let out = extractor(0.0).extract_rows(rows(&[&["x"], &["NaN"]])).unwrap();
        assert!(out.edges.is_empty());
        assert_eq!(out.rows, 2);
    }

    #[test]
    fn custom_upper_bound() {
        let cfg = ExtractConfig { cutoff: 0.4, upper: 0.8, ..Default::default() };
        let out = ThresholdEdgeExtractor::new(cfg)
            .unwrap()
            .extract_rows(rows(&[&["x"], &["0.7"], &["0.8", "0.9"]]))
            .unwrap();
        assert_eq!(out.edges, vec![Edge::new(1, 0)]);
    }

    #[test]
    fn empty_input_has_no_rows() {
        let out = extractor(0.4).extract_rows(rows(&[])).unwrap();
        assert_eq!(out, Extraction { rows: 0, edges: vec![] });
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = ExtractConfig { cutoff: f64::NAN, ..Default::default() };
        assert!(matches!(ThresholdEdgeExtractor::new(cfg), Err(MtxError::Config(_))));
    }

    #[test]
    fn cutoff_at_or_above_upper_yields_no_edges() {
        let out = extractor(1.0)
            .extract_rows(rows(&[&["x"], &["0.99"], &["1", "1.0"]]))
            .unwrap();
        assert_eq!(out.rows, 3);
        assert!(out.edges.is_empty());
    }
}
