//! CIMEX decode pipeline: header, extraction and the top-level parser.

mod extract;
mod header;
mod probe;

pub use extract::{extract_coordinates, extract_tools};
pub use header::{decode_header, DecodedHeader};
pub use probe::{parse_cimex, parse_cimex_file, CimexParser};
