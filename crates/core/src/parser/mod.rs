use crate::error::Result;
use crate::model::FileDeclarations;

/// Turns raw source text into the declaration tree the core works on.
///
/// Implementations must be shareable across worker threads; both pipeline phases call
/// `parse_declarations` concurrently for different files.
pub trait DeclarationParser: Send + Sync {
    fn name(&self) -> &str;

    /// Fails with [`TypemineError::Parsing`](crate::error::TypemineError::Parsing) when no
    /// declaration tree can be produced.
    fn parse_declarations(&self, source: &str) -> Result<FileDeclarations>;
}
