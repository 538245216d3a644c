// Stage trait — the seam every preprocessing unit plugs into.
//
// The chain composes stages through this one capability without knowing
// any concrete stage type, so arbitrary stages can be mixed and ordered
// freely by the caller.

/// One token-stream transform in a preprocessing chain.
pub trait Stage {
    /// Consume a comment's token sequence and produce the normalized one.
    /// A stage always sees the complete output of the previous stage.
    fn optimize(&self, tokens: Vec<String>) -> Vec<String>;
}
