//! CSV/TSV parser with delimiter detection and type inference.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{SourceMetadata, format_for_delimiter};
use crate::dataset::{Column, ColumnType, DataRow, Dataset};
use crate::error::{QuarryError, Result};
use crate::validation::{InferenceConfig, ValidatorSet, infer_column_type};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Cell texts loaded as missing by default. Blank cells are always missing.
pub const DEFAULT_NULL_TOKENS: &[&str] = &["", "null", "NULL", "Null"];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter byte to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Trimmed cell texts treated as missing.
    pub null_tokens: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Parses tabular data files into datasets.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    validators: Arc<ValidatorSet>,
    inference: InferenceConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            validators: Arc::new(ValidatorSet::default()),
            inference: InferenceConfig::default(),
        }
    }

    /// Use these validators and settings for column type inference.
    pub fn with_inference(mut self, validators: Arc<ValidatorSet>, inference: InferenceConfig) -> Self {
        self.validators = validators;
        self.inference = inference;
        self
    }

    /// Parse a file and return the dataset and its source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |e| QuarryError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let size_bytes = file.metadata().map_err(io_err)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let dataset = self.parse_with_delimiter(&contents, delimiter, &name)?;

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format_for_delimiter(delimiter).to_string(),
            dataset.row_count(),
            dataset.column_count(),
        );

        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            format = %source.format,
            "loaded dataset"
        );
        Ok((dataset, source))
    }

    /// Parse in-memory bytes, detecting the delimiter unless one is configured.
    pub fn parse_bytes(&self, bytes: &[u8], name: &str) -> Result<Dataset> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_with_delimiter(bytes, delimiter, name)
    }

    fn parse_with_delimiter(&self, bytes: &[u8], delimiter: u8, name: &str) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.trim().to_string()).collect(),
                None => return Err(QuarryError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for result in records {
            if self.config.max_rows.is_some_and(|max| raw_rows.len() >= max) {
                break;
            }
            let record = result?;
            raw_rows.push(record.iter().map(str::to_string).collect());
        }

        let headers = if self.config.has_header {
            headers
        } else {
            let width = raw_rows.first().map_or(0, Vec::len);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(QuarryError::EmptyData("No columns found".to_string()));
        }
        if raw_rows.is_empty() {
            return Err(QuarryError::EmptyData("No data rows found".to_string()));
        }

        let width = headers.len();
        let rows = raw_rows
            .into_iter()
            .map(|mut raw| {
                raw.resize(width, String::new());
                DataRow::new(raw.into_iter().map(|cell| self.to_cell(cell)).collect())
            })
            .collect();

        let columns = headers
            .into_iter()
            .map(|h| Column::new(h, ColumnType::Categorical))
            .collect();
        let mut dataset = Dataset::new(name, columns, rows)?;

        for col in 0..dataset.column_count() {
            let inferred = infer_column_type(dataset.column_values(col), &self.validators, &self.inference);
            if let Some(column) = dataset.column_mut(col) {
                debug!(column = %column.header, column_type = %inferred, "inferred type");
                column.column_type = inferred;
            }
        }

        Ok(dataset)
    }

    fn to_cell(&self, raw: String) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.config.null_tokens.iter().any(|t| t == trimmed) {
            None
        } else {
            Some(raw)
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(QuarryError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Consistent counts dominate; tab wins ties since it rarely shows up in values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
