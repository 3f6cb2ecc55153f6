mod header;
pub mod segments;

pub use header::{Header, TOKEN_TYPE};
pub use segments::Segments;
