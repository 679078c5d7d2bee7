pub mod sentence_parser;

// Re-export the parser seam for convenience
pub use sentence_parser::{CommandParser, ConstituencyParser, ParseError};
