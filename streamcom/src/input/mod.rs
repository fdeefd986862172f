//! Input stage: raw line → verified line → token, remainder → parameters.

pub mod buffer;
pub mod parser;
pub mod tokenizer;

pub use buffer::ParamScratch;
pub use parser::{split_command, verify};
pub use tokenizer::Tokenizer;
