use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MtxError, Result};

pub const DEFAULT_CUTOFF: f64 = 0.4;
pub const DEFAULT_UPPER: f64 = 1.0;
pub const DEFAULT_PROGRESS_INTERVAL: usize = 200;

/// Thresholds and parsing options for one extraction run.
///
/// A value `v` at `(i, j)` with `j < i` becomes an edge when `cutoff < v < upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub cutoff: f64,
    pub upper: f64,
    /// Field delimiter of the input CSV. Must be ASCII.
    pub delimiter: char,
    /// Rows between progress events.
    pub progress_interval: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            upper: DEFAULT_UPPER,
            delimiter: ',',
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ExtractConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MtxError::io(path, e))?;
        let cfg: Self = serde_json::from_str(&text).map_err(|source| MtxError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cutoff.is_finite() {
            return Err(MtxError::Config(format!("cutoff must be finite, got {}", self.cutoff)));
        }
        if !self.upper.is_finite() {
            return Err(MtxError::Config(format!("upper must be finite, got {}", self.upper)));
        }
        if !self.delimiter.is_ascii() {
            return Err(MtxError::Config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )));
        }
        if self.progress_interval == 0 {
            return Err(MtxError::Config("progress_interval must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Conventional output file name for a cutoff, e.g. `over0.4.mtx`.
///
/// The cutoff is spelled in shortest round-trip form. Whole numbers keep a trailing
/// `.0` (`over1.0.mtx`). Magnitudes below `1e-4` or from `1e16` up use an exponent
/// with a sign and at least two digits (`over1e-05.mtx`).
pub fn default_output_name(cutoff: f64) -> String {
    format!("over{}.mtx", cutoff_label(cutoff))
}

fn cutoff_label(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", v);
        return match sci.split_once('e') {
            Some((mantissa, exp)) => {
                let exp: i32 = exp.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => sci,
        };
    }
    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        v.to_string()
    }
}
