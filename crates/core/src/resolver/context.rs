use crate::index::RepoPackages;
use crate::model::{DeclEvent, FileDeclarations, ImportDecl, qualify};
use std::collections::{BTreeSet, HashMap, HashSet};

/// The single package wildcard import that cannot be checked against the owning repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WildcardFallback {
    #[default]
    None,
    Single(String),
    /// More than one such import; no fallback for the rest of the file.
    Ambiguous,
}

/// Everything a single file contributes to resolving its own type names.
#[derive(Debug, Clone, Default)]
pub struct FileContext {
    repo: String,
    known_wildcard_imports: HashSet<String>,
    /// Simple name -> package or enclosing class path that qualifies it.
    local_class_index: HashMap<String, String>,
    wildcard_fallback: WildcardFallback,
    class_type_parameters: HashMap<String, HashSet<String>>,
    method_type_parameters: HashMap<String, HashSet<String>>,
}

impl FileContext {
    /// Builds the context of one file owned by `repo`.
    ///
    /// `repo_packages` decides whether a package wildcard import points inside the owning
    /// repository (resolvable through the class index) or outside of it.
    pub fn build(repo: &str, decls: &FileDeclarations, repo_packages: &RepoPackages) -> Self {
        let package = decls.package_name();
        let mut context = Self {
            repo: repo.to_string(),
            ..Default::default()
        };
        context.known_wildcard_imports.insert(package.to_string());

        let own_packages = repo_packages.get(repo);
        for import in &decls.imports {
            context.add_import(import, own_packages);
        }

        let mut scope: Vec<&str> = Vec::new();
        for event in decls.events() {
            match event {
                DeclEvent::EnterType(ty) => {
                    let enclosing = scope_path(package, &scope);
                    let class_path = qualify(&enclosing, &ty.name);
                    context
                        .class_type_parameters
                        .entry(class_path)
                        .or_default()
                        .extend(ty.type_parameters.iter().cloned());
                    context
                        .local_class_index
                        .insert(ty.name.clone(), enclosing);
                    scope.push(&ty.name);
                }
                DeclEvent::Method(method) => {
                    let key = format!("{}.{}", scope_path(package, &scope), method.name);
                    context
                        .method_type_parameters
                        .entry(key)
                        .or_default()
                        .extend(method.type_parameters.iter().cloned());
                }
                DeclEvent::ExitType(_) => {
                    scope.pop();
                }
            }
        }

        context
    }

    fn add_import(&mut self, import: &ImportDecl, own_packages: Option<&BTreeSet<String>>) {
        if import.is_static {
            return;
        }
        // Imports must be fully qualified.
        let Some(qualifier) = import.qualifier() else {
            return;
        };

        if !import.is_wildcard {
            self.local_class_index
                .insert(import.simple_name().to_string(), qualifier.to_string());
            return;
        }

        // `a.b.C.*` imports the members of a class, which is not supported.
        if starts_uppercase(import.simple_name()) {
            return;
        }

        if own_packages.is_some_and(|packages| packages.contains(&import.path)) {
            self.known_wildcard_imports.insert(import.path.clone());
            return;
        }

        self.wildcard_fallback = match std::mem::take(&mut self.wildcard_fallback) {
            WildcardFallback::None => WildcardFallback::Single(import.path.clone()),
            WildcardFallback::Single(existing) if existing == import.path => {
                WildcardFallback::Single(existing)
            }
            WildcardFallback::Single(_) | WildcardFallback::Ambiguous => {
                WildcardFallback::Ambiguous
            }
        };
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn knows_wildcard(&self, package: &str) -> bool {
        self.known_wildcard_imports.contains(package)
    }

    /// Qualifier recorded for a simple name, from an explicit import or a declaration.
    pub fn local_class(&self, name: &str) -> Option<&str> {
        self.local_class_index.get(name).map(String::as_str)
    }

    pub fn wildcard_fallback(&self) -> &WildcardFallback {
        &self.wildcard_fallback
    }

    /// True when `name` is a generic parameter of `method` in `class_path` or of the class itself.
    pub fn is_type_parameter(&self, name: &str, class_path: &str, method: &str) -> bool {
        let method_key = format!("{}.{}", class_path, method);
        self.method_type_parameters
            .get(&method_key)
            .is_some_and(|params| params.contains(name))
            || self
                .class_type_parameters
                .get(class_path)
                .is_some_and(|params| params.contains(name))
    }
}

fn scope_path(package: &str, scope: &[&str]) -> String {
    scope
        .iter()
        .fold(package.to_string(), |path, name| qualify(&path, name))
}

fn starts_uppercase(segment: &str) -> bool {
    segment.chars().next().is_some_and(char::is_uppercase)
}
