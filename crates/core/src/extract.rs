//! Documented-method extraction.
//!
//! Walks one file's declarations with an explicit class stack and emits a
//! [`MethodRecord`] for every method that carries documentation text, with its return
//! and parameter types resolved by the file's [`FileResolver`].

use crate::config::{PipelineConfig, UnresolvedPolicy};
use crate::model::{
    CorpusRecord, DeclEvent, FileDeclarations, FileRecord, MethodDecl, MethodRecord, ParamRecord,
    TypedDoc, qualify,
};
use crate::resolver::FileResolver;
use crate::stats::ExtractStats;

pub struct MethodExtractor<'r, 'a> {
    /// `None` emits types exactly as written.
    resolver: Option<&'r FileResolver<'a>>,
    config: &'r PipelineConfig,
}

/// A type after applying the unresolved policy.
enum Typed {
    Emit(String),
    Omit,
}

impl<'r, 'a> MethodExtractor<'r, 'a> {
    pub fn new(resolver: Option<&'r FileResolver<'a>>, config: &'r PipelineConfig) -> Self {
        Self { resolver, config }
    }

    /// Produces the record for one file; `classes` stays empty when nothing qualifies.
    pub fn extract(
        &self,
        record: &CorpusRecord,
        decls: &FileDeclarations,
        stats: &mut ExtractStats,
    ) -> FileRecord {
        let mut out = FileRecord {
            repo: record.repo_name.clone(),
            path: record.path.clone(),
            ..Default::default()
        };

        // Qualified path of every open type, innermost last.
        let mut owners: Vec<String> = Vec::new();
        for event in decls.events() {
            match event {
                DeclEvent::EnterType(ty) => {
                    let enclosing = owners.last().map_or(decls.package_name(), String::as_str);
                    let path = qualify(enclosing, &ty.name);
                    owners.push(path);
                }
                DeclEvent::Method(method) => {
                    if let Some(owner) = owners.last() {
                        if let Some(extracted) = self.method(owner, method, stats) {
                            out.classes.entry(owner.clone()).or_default().push(extracted);
                        }
                    }
                }
                DeclEvent::ExitType(_) => {
                    owners.pop();
                }
            }
        }

        out
    }

    fn method(
        &self,
        owner: &str,
        method: &MethodDecl,
        stats: &mut ExtractStats,
    ) -> Option<MethodRecord> {
        stats.methods_total += 1;
        let doc = method.doc.as_ref()?;

        let docstring = self.config.clip_doc(doc.description.trim());
        let return_doc = doc.returns().map(|text| self.config.clip_doc(text));
        let param_docs: Vec<Option<String>> = method
            .params
            .iter()
            .map(|param| doc.param(&param.name).map(|text| self.config.clip_doc(text)))
            .collect();

        let has_docs =
            !docstring.is_empty() || return_doc.is_some() || param_docs.iter().any(Option::is_some);
        if !has_docs {
            return None;
        }
        stats.methods_with_docs += 1;

        let returns = match self.type_of(&method.return_type, owner, &method.name, stats)? {
            Typed::Emit(type_name) => Some(TypedDoc {
                type_name,
                doc: return_doc,
            }),
            Typed::Omit => None,
        };

        let mut params = Vec::with_capacity(method.params.len());
        for (param, doc) in method.params.iter().zip(param_docs) {
            if let Typed::Emit(type_name) = self.type_of(&param.type_text, owner, &method.name, stats)? {
                params.push(ParamRecord {
                    name: param.name.clone(),
                    typed: TypedDoc { type_name, doc },
                });
            }
        }

        stats.methods_emitted += 1;
        Some(MethodRecord {
            name: method.name.clone(),
            returns,
            params,
            docstring,
            source: method.source.clone(),
        })
    }

    /// `None` drops the whole method.
    fn type_of(
        &self,
        raw: &str,
        owner: &str,
        method: &str,
        stats: &mut ExtractStats,
    ) -> Option<Typed> {
        let Some(resolver) = self.resolver else {
            return Some(Typed::Emit(raw.to_string()));
        };

        if let Some(text) = resolver.resolve(raw, owner, method).into_text() {
            return Some(Typed::Emit(text));
        }

        stats.unresolved_types += 1;
        match self.config.unresolved_policy {
            UnresolvedPolicy::DropMethod => None,
            UnresolvedPolicy::DropField => Some(Typed::Omit),
            UnresolvedPolicy::KeepBlank => Some(Typed::Emit(String::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ClassIndex;
    use crate::model::{ImportDecl, Javadoc, TypeDecl, TypeKind};
    use crate::resolver::FileContext;

    fn doc(description: &str, params: &[(&str, &str)], returns: Option<&str>) -> Javadoc {
        Javadoc {
            description: description.to_string(),
            params: params
                .iter()
                .map(|(n, t)| (n.to_string(), t.to_string()))
                .collect(),
            returns: returns.map(str::to_string),
        }
    }

    fn record() -> CorpusRecord {
        CorpusRecord {
            repo_name: "acme".to_string(),
            path: "src/com/acme/Widget.java".to_string(),
            content: None,
        }
    }

    fn widget(methods: Vec<MethodDecl>) -> FileDeclarations {
        let mut ty = TypeDecl::new("Widget", TypeKind::Class);
        for m in methods {
            ty = ty.with_method(m);
        }
        FileDeclarations {
            package: Some("com.acme".to_string()),
            imports: vec![ImportDecl::single("java.util.List")],
            types: vec![ty],
        }
    }

    fn run(decls: &FileDeclarations, config: &PipelineConfig) -> (FileRecord, ExtractStats) {
        let index = ClassIndex::new();
        let context = FileContext::build("acme", decls, &index.repo_packages());
        let resolver = FileResolver::new(context, &index);
        let mut stats = ExtractStats::default();
        let out = MethodExtractor::new(Some(&resolver), config).extract(&record(), decls, &mut stats);
        (out, stats)
    }

    #[test]
    fn test_undocumented_methods_are_skipped() {
        let decls = widget(vec![
            MethodDecl::new("plain", "void"),
            MethodDecl::new("blank", "void").with_doc(doc("  ", &[], None)),
        ]);
        let (out, stats) = run(&decls, &PipelineConfig::default());
        assert!(out.classes.is_empty());
        assert_eq!(stats.methods_total, 2);
        assert_eq!(stats.methods_with_docs, 0);
    }

    #[test]
    fn test_policy_drop_method() {
        let decls = widget(vec![
            MethodDecl::new("load", "Mystery")
                .with_param("items", "List<String>")
                .with_doc(doc("Loads.", &[], None)),
        ]);
        let (out, stats) = run(&decls, &PipelineConfig::default());
        assert!(out.classes.is_empty());
        assert_eq!(stats.unresolved_types, 1);
        assert_eq!(stats.methods_emitted, 0);
    }

    #[test]
    fn test_policy_drop_field_and_keep_blank() {
        let decls = widget(vec![
            MethodDecl::new("load", "Mystery")
                .with_param("items", "List<String>")
                .with_param("other", "Unknown")
                .with_doc(doc("Loads.", &[("items", "the items")], None)),
        ]);

        let drop_field = PipelineConfig {
            unresolved_policy: UnresolvedPolicy::DropField,
            ..Default::default()
        };
        let (out, _) = run(&decls, &drop_field);
        let method = &out.classes["com.acme.Widget"][0];
        assert!(method.returns.is_none());
        assert_eq!(method.params.len(), 1);
        assert_eq!(method.params[0].typed.type_name, "java.util.List<java.lang.String>");
        assert_eq!(method.params[0].typed.doc.as_deref(), Some("the items"));

        let keep_blank = PipelineConfig {
            unresolved_policy: UnresolvedPolicy::KeepBlank,
            ..Default::default()
        };
        let (out, stats) = run(&decls, &keep_blank);
        let method = &out.classes["com.acme.Widget"][0];
        assert_eq!(method.returns.as_ref().unwrap().type_name, "");
        assert_eq!(method.params[1].typed.type_name, "");
        assert_eq!(stats.unresolved_types, 2);
    }

    #[test]
    fn test_raw_mode_keeps_written_types() {
        let decls = widget(vec![
            MethodDecl::new("load", "Mystery").with_doc(doc("", &[], Some("the mystery"))),
        ]);
        let config = PipelineConfig {
            resolve_types: false,
            ..Default::default()
        };
        let mut stats = ExtractStats::default();
        let out = MethodExtractor::new(None, &config).extract(&record(), &decls, &mut stats);
        let method = &out.classes["com.acme.Widget"][0];
        assert_eq!(method.returns.as_ref().unwrap().type_name, "Mystery");
        assert_eq!(method.returns.as_ref().unwrap().doc.as_deref(), Some("the mystery"));
    }

    #[test]
    fn test_nested_class_owner_name() {
        let decls = FileDeclarations {
            package: Some("com.acme".to_string()),
            imports: vec![],
            types: vec![TypeDecl::new("Widget", TypeKind::Class).with_nested(
                TypeDecl::new("Part", TypeKind::Class).with_method(
                    MethodDecl::new("weight", "double").with_doc(doc("Weight.", &[], None)),
                ),
            )],
        };
        let (out, _) = run(&decls, &PipelineConfig::default());
        assert!(out.classes.contains_key("com.acme.Widget.Part"));
    }

    #[test]
    fn test_same_named_nested_classes_keep_their_paths() {
        let decls = FileDeclarations {
            package: Some("p".to_string()),
            imports: vec![],
            types: vec![TypeDecl::new("F", TypeKind::Class)
                .with_nested(TypeDecl::new("A", TypeKind::Class).with_nested(
                    TypeDecl::new("Node", TypeKind::Class)
                        .with_type_parameters(["T"])
                        .with_method(MethodDecl::new("get", "T").with_doc(doc("Doc.", &[], None))),
                ))
                .with_nested(TypeDecl::new("B", TypeKind::Class).with_nested(
                    TypeDecl::new("Node", TypeKind::Class)
                        .with_method(MethodDecl::new("other", "int").with_doc(doc("Doc.", &[], None))),
                ))],
        };
        let (out, stats) = run(&decls, &PipelineConfig::default());

        let classes: Vec<_> = out.classes.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["p.F.A.Node", "p.F.B.Node"]);
        let get = &out.classes["p.F.A.Node"][0];
        assert_eq!(get.returns.as_ref().unwrap().type_name, "__T__");
        assert_eq!(out.classes["p.F.B.Node"][0].name, "other");
        assert_eq!(stats.unresolved_types, 0);
        assert_eq!(stats.methods_emitted, 2);
    }
}
