/// Errors returned by the checked accessors of both trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested key is not stored in the tree.
    #[error("key not found in tree")]
    KeyNotFound,
}
