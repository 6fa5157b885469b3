mod model;
mod parse;

pub use model::GraphSnapshot;
pub use parse::{ParseError, parse_adjacency};
