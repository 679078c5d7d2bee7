// Declare all modules that are part of this library
pub mod config;
pub mod types;
pub mod parsing;
pub mod records_io;
pub mod splitter;
pub mod batch_converter;
pub mod merger;
