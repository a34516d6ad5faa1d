//! Per-file declaration tree produced by the parsing collaborator.
//!
//! The core never looks at raw source text. A [`DeclarationParser`](crate::parser::DeclarationParser)
//! turns a file into [`FileDeclarations`], and every consumer (index ingest, file context
//! construction, method extraction) reads it through [`FileDeclarations::events`], which
//! yields enter/exit events in file order without recursion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the resolution core needs to know about one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDeclarations {
    /// `None` for files in the default package.
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Qualified name without the trailing `.*`.
    pub path: String,
    pub is_wildcard: bool,
    pub is_static: bool,
}

impl ImportDecl {
    pub fn single(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_wildcard: false,
            is_static: false,
        }
    }

    pub fn wildcard(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_wildcard: true,
            is_static: false,
        }
    }

    /// Last dotted segment of the imported path.
    pub fn simple_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// The path up to (not including) the last segment, if the import is qualified at all.
    pub fn qualifier(&self) -> Option<&str> {
        self.path.rsplit_once('.').map(|(qualifier, _)| qualifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    /// Generic parameter names in declaration order.
    pub type_parameters: Vec<String>,
    /// Methods and nested types, in file order.
    pub members: Vec<Member>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_parameters: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn with_type_parameters<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.members.push(Member::Method(method));
        self
    }

    pub fn with_nested(mut self, nested: TypeDecl) -> Self {
        self.members.push(Member::Type(nested));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Method(MethodDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub type_parameters: Vec<String>,
    /// Return type exactly as written (whitespace collapsed).
    pub return_type: String,
    pub params: Vec<ParamDecl>,
    pub doc: Option<Javadoc>,
    /// Source text of the whole declaration.
    pub source: String,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, type_text: impl Into<String>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            type_text: type_text.into(),
        });
        self
    }

    pub fn with_type_parameters<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_doc(mut self, doc: Javadoc) -> Self {
        self.doc = Some(doc);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
    pub name: String,
    pub type_text: String,
}

/// Documentation comment split into its description and block tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Javadoc {
    pub description: String,
    /// `@param` tags by parameter name. The first tag for a name wins.
    pub params: BTreeMap<String, String>,
    /// Text of the first `@return` tag.
    pub returns: Option<String>,
}

impl Javadoc {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    pub fn returns(&self) -> Option<&str> {
        self.returns.as_deref().filter(|text| !text.is_empty())
    }
}

/// One step of a depth-first walk over a file's declarations.
#[derive(Debug, Clone, Copy)]
pub enum DeclEvent<'a> {
    EnterType(&'a TypeDecl),
    Method(&'a MethodDecl),
    ExitType(&'a TypeDecl),
}

enum Step<'a> {
    Enter(&'a TypeDecl),
    Method(&'a MethodDecl),
    Exit(&'a TypeDecl),
}

/// Iterator behind [`FileDeclarations::events`].
pub struct DeclEvents<'a> {
    pending: Vec<Step<'a>>,
}

impl<'a> Iterator for DeclEvents<'a> {
    type Item = DeclEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.pending.pop()? {
            Step::Enter(ty) => {
                self.pending.push(Step::Exit(ty));
                for member in ty.members.iter().rev() {
                    self.pending.push(match member {
                        Member::Method(method) => Step::Method(method),
                        Member::Type(nested) => Step::Enter(nested),
                    });
                }
                Some(DeclEvent::EnterType(ty))
            }
            Step::Method(method) => Some(DeclEvent::Method(method)),
            Step::Exit(ty) => Some(DeclEvent::ExitType(ty)),
        }
    }
}

impl FileDeclarations {
    /// Package name, with the default package as `""`.
    pub fn package_name(&self) -> &str {
        self.package.as_deref().unwrap_or("")
    }

    /// Walks every type and method in file order.
    pub fn events(&self) -> DeclEvents<'_> {
        DeclEvents {
            pending: self.types.iter().rev().map(Step::Enter).collect(),
        }
    }
}

/// Joins a qualifier and a name with a dot, omitting the dot for an empty qualifier.
pub fn qualify(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
