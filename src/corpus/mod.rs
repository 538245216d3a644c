// Corpus handling: the comment record type, the unified file reader, and the
// dataset partitioning policies.

pub mod comment;
pub mod dataset;
pub mod reader;

pub use comment::Comment;
pub use dataset::{Dataset, Provenance, DEFAULT_TEST_RATIO};
