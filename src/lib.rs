// Chaff: labeled comment-corpus preparation for spam classification.
//
// This is the library root. Each module corresponds to one step of the
// preparation pipeline: corpus loading and partitioning, token-stream
// preprocessing, vocabulary encoding, and cross-validation fold generation.

pub mod corpus;
pub mod crossval;
pub mod output;
pub mod preprocess;
pub mod vocab;
