// Preprocessing: a composable chain of token-stream transforms.
//
// Each stage consumes the full output of the previous one; the chain is a
// single pass over comments and order is significant by design.

pub mod chain;
pub mod lemma;
pub mod slang;
pub mod stages;
pub mod traits;

pub use chain::{Chain, StageKind};
pub use stages::tokenize;
pub use traits::Stage;
