//! Walks a Java syntax tree into [`FileDeclarations`].

use super::{JavaParser, node_text};
use crate::javadoc::{is_javadoc, parse_javadoc};
use tree_sitter::Node;
use typemine_core::model::{
    FileDeclarations, ImportDecl, Javadoc, Member, MethodDecl, TypeDecl, TypeKind,
};

fn type_kind(kind: &str) -> Option<TypeKind> {
    match kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "record_declaration" => Some(TypeKind::Record),
        "annotation_type_declaration" => Some(TypeKind::Annotation),
        _ => None,
    }
}

impl JavaParser {
    pub(crate) fn collect_declarations(&self, root: Node, source: &str) -> FileDeclarations {
        let mut decls = FileDeclarations::default();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => {
                    if decls.package.is_none() {
                        decls.package = self.package_name(child, source);
                    }
                }
                "import_declaration" => {
                    if let Some(import) = self.import(child, source) {
                        decls.imports.push(import);
                    }
                }
                kind => {
                    if let Some(kind) = type_kind(kind) {
                        if let Some(ty) = self.type_declaration(child, kind, source) {
                            decls.types.push(ty);
                        }
                    }
                }
            }
        }

        decls
    }

    fn package_name(&self, node: Node, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))?;
        Some(node_text(name, source).to_string())
    }

    fn import(&self, node: Node, source: &str) -> Option<ImportDecl> {
        let mut path = None;
        let mut is_static = false;
        let mut is_wildcard = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => is_wildcard = true,
                "scoped_identifier" | "identifier" => {
                    path = Some(node_text(child, source).to_string());
                }
                _ => {}
            }
        }

        Some(ImportDecl {
            path: path?,
            is_wildcard,
            is_static,
        })
    }

    fn type_declaration(&self, node: Node, kind: TypeKind, source: &str) -> Option<TypeDecl> {
        let name = node.child_by_field_name("name")?;
        let mut ty = TypeDecl::new(node_text(name, source), kind)
            .with_type_parameters(self.type_parameter_names(node, source));

        if let Some(body) = node.child_by_field_name("body") {
            self.collect_members(body, source, &mut ty.members);
        }
        Some(ty)
    }

    /// Members of a class, interface, enum, record or annotation body in source order.
    fn collect_members(&self, body: Node, source: &str, members: &mut Vec<Member>) {
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "method_declaration" => {
                    if let Some(method) = self.method_declaration(child, source) {
                        members.push(Member::Method(method));
                    }
                }
                // Members of an enum that follow its constants.
                "enum_body_declarations" => self.collect_members(child, source, members),
                kind => {
                    if let Some(kind) = type_kind(kind) {
                        if let Some(nested) = self.type_declaration(child, kind, source) {
                            members.push(Member::Type(nested));
                        }
                    }
                }
            }
        }
    }

    fn method_declaration(&self, node: Node, source: &str) -> Option<MethodDecl> {
        let name = node.child_by_field_name("name")?;
        Some(MethodDecl {
            name: node_text(name, source).to_string(),
            type_parameters: self.type_parameter_names(node, source),
            return_type: self.return_type_text(node, source),
            params: self.method_parameters(node, source),
            doc: self.attached_javadoc(node, source),
            source: node_text(node, source).to_string(),
        })
    }

    /// The `/** */` comment directly before a declaration (annotations belong to the
    /// declaration, so they may sit in between).
    fn attached_javadoc(&self, node: Node, source: &str) -> Option<Javadoc> {
        let comment = node.prev_named_sibling()?;
        if comment.kind() != "block_comment" {
            return None;
        }
        let text = node_text(comment, source);
        is_javadoc(text).then(|| parse_javadoc(text))
    }
}
