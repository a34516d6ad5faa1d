//! Per-file symbol resolution
//!
//! A [`FileResolver`] pairs one file's [`FileContext`] with the finished corpus
//! [`ClassIndex`] and turns type text from method signatures into fully-qualified names.

pub mod builtin;
pub mod context;
pub mod tokens;

pub use context::{FileContext, WildcardFallback};

use crate::index::{ClassIndex, IndexSnapshot};
use crate::model::{FileDeclarations, qualify};
use tokens::Segment;
use tracing::trace;

/// Marker written in place of a generic type parameter.
pub const TYPE_PARAMETER: &str = "__T__";

/// Outcome of resolving a whole piece of type text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Fully-qualified text. Embedded generic parameters appear as [`TYPE_PARAMETER`].
    Qualified(String),
    /// The entire type is a generic type parameter.
    TypeParameter,
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }

    /// Text to emit, with the marker standing in for a bare type parameter.
    pub fn into_text(self) -> Option<String> {
        match self {
            Resolution::Qualified(text) => Some(text),
            Resolution::TypeParameter => Some(TYPE_PARAMETER.to_string()),
            Resolution::Unresolved => None,
        }
    }
}

/// Outcome of resolving one identifier-like token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenResolution {
    /// Primitive, keyword or already-qualified path; emitted as written.
    Unchanged,
    Qualified(String),
    TypeParameter,
}

pub struct FileResolver<'a> {
    context: FileContext,
    index: &'a ClassIndex,
}

impl<'a> FileResolver<'a> {
    pub fn new(context: FileContext, index: &'a ClassIndex) -> Self {
        Self { context, index }
    }

    /// Builds the file's context against a finished snapshot.
    pub fn for_file(repo: &str, decls: &FileDeclarations, snapshot: &'a IndexSnapshot) -> Self {
        let context = FileContext::build(repo, decls, &snapshot.repo_packages);
        Self::new(context, &snapshot.index)
    }

    pub fn context(&self) -> &FileContext {
        &self.context
    }

    /// Resolves type text written inside `method` of the class at `class_path`.
    ///
    /// Every identifier-like token must resolve; a single failure makes the whole type
    /// unresolved. Everything between tokens is copied through unchanged.
    pub fn resolve(&self, raw: &str, class_path: &str, method: &str) -> Resolution {
        let mut out = String::with_capacity(raw.len() + 16);
        for segment in tokens::split(raw) {
            match segment {
                Segment::Verbatim(text) => out.push_str(text),
                Segment::Token(token) => match self.resolve_token(token, class_path, method) {
                    Some(TokenResolution::Unchanged) => out.push_str(token),
                    Some(TokenResolution::Qualified(fqn)) => out.push_str(&fqn),
                    Some(TokenResolution::TypeParameter) => out.push_str(TYPE_PARAMETER),
                    None => {
                        trace!("unresolved token {} in {}", token, raw);
                        return Resolution::Unresolved;
                    }
                },
            }
        }

        if out == TYPE_PARAMETER {
            Resolution::TypeParameter
        } else {
            Resolution::Qualified(out)
        }
    }

    /// Resolves a single token; `None` means it cannot be resolved with confidence.
    pub fn resolve_token(
        &self,
        token: &str,
        class_path: &str,
        method: &str,
    ) -> Option<TokenResolution> {
        let first = token.chars().next()?;
        if first.is_lowercase() {
            return Some(TokenResolution::Unchanged);
        }
        if self.context.is_type_parameter(token, class_path, method) {
            return Some(TokenResolution::TypeParameter);
        }

        match token.split_once('.') {
            None => self.resolve_simple(token),
            // A reference through an enclosing type, e.g. `Outer.Inner`.
            Some((head, _)) => self
                .context
                .local_class(head)
                .map(|path| TokenResolution::Qualified(qualify(path, token))),
        }
    }

    fn resolve_simple(&self, name: &str) -> Option<TokenResolution> {
        if let Some(path) = self.context.local_class(name) {
            return Some(TokenResolution::Qualified(qualify(path, name)));
        }
        if builtin::is_java_lang(name) {
            return Some(TokenResolution::Qualified(qualify(builtin::JAVA_LANG, name)));
        }

        if let Some(packages) = self.index.packages(name) {
            let repo = self.context.repo();
            let mut candidates = packages
                .iter()
                .filter(|(package, repos)| self.context.knows_wildcard(package) && repos.contains(repo))
                .map(|(package, _)| package);
            let package = candidates.next()?;
            if candidates.next().is_some() {
                trace!("{} is declared in several visible packages", name);
                return None;
            }
            return Some(TokenResolution::Qualified(qualify(package, name)));
        }

        match self.context.wildcard_fallback() {
            WildcardFallback::Single(package) => {
                Some(TokenResolution::Qualified(qualify(package, name)))
            }
            WildcardFallback::None | WildcardFallback::Ambiguous => None,
        }
    }
}
