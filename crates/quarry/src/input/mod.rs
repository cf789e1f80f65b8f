//! Loading tables from delimited files and writing them back.

mod parser;
mod source;
mod writer;

pub use parser::{DEFAULT_NULL_TOKENS, Parser, ParserConfig};
pub use source::{SourceMetadata, delimiter_for_path, format_for_delimiter};
pub use writer::write_dataset;
