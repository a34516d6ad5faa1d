use super::{JavaParser, node_text};
use tree_sitter::Node;
use typemine_core::model::ParamDecl;

impl JavaParser {
    /// Source text of a type node with whitespace runs collapsed to one space.
    pub(crate) fn type_text(&self, node: Node, source: &str) -> String {
        node_text(node, source)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Names declared by a `type_parameters` node, e.g. `<K, V extends Comparable<V>>`.
    pub(crate) fn type_parameter_names(&self, declaration: Node, source: &str) -> Vec<String> {
        let Some(params) = declaration.child_by_field_name("type_parameters") else {
            return Vec::new();
        };

        let mut names = Vec::new();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            if param.kind() != "type_parameter" {
                continue;
            }
            let mut inner = param.walk();
            let name = param
                .named_children(&mut inner)
                .find(|child| matches!(child.kind(), "type_identifier" | "identifier"));
            if let Some(name) = name {
                names.push(node_text(name, source).to_string());
            }
        }
        names
    }

    /// Return type text, including dimensions written after the parameter list.
    pub(crate) fn return_type_text(&self, method: Node, source: &str) -> String {
        let mut text = method
            .child_by_field_name("type")
            .map(|node| self.type_text(node, source))
            .unwrap_or_default();
        if let Some(dims) = method.child_by_field_name("dimensions") {
            text.push_str(&self.type_text(dims, source));
        }
        text
    }

    /// Ordered parameters of a method; varargs are rendered as arrays.
    pub(crate) fn method_parameters(&self, method: Node, source: &str) -> Vec<ParamDecl> {
        let Some(params_node) = method.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut cursor = params_node.walk();
        for child in params_node.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => {
                    let Some(type_node) = child.child_by_field_name("type") else {
                        continue;
                    };
                    let mut type_text = self.type_text(type_node, source);
                    if let Some(dims) = child.child_by_field_name("dimensions") {
                        type_text.push_str(&self.type_text(dims, source));
                    }
                    let name = child
                        .child_by_field_name("name")
                        .map(|n| node_text(n, source))
                        .unwrap_or("arg");
                    result.push(ParamDecl {
                        name: name.to_string(),
                        type_text,
                    });
                }
                "spread_parameter" => {
                    let mut name = "arg";
                    let mut type_text = String::new();
                    let mut inner = child.walk();
                    for gc in child.named_children(&mut inner) {
                        match gc.kind() {
                            "variable_declarator" => {
                                if let Some(n) = gc.child_by_field_name("name") {
                                    name = node_text(n, source);
                                }
                            }
                            "modifiers" | "annotation" | "marker_annotation" => {}
                            _ if type_text.is_empty() => {
                                type_text = format!("{}[]", self.type_text(gc, source));
                            }
                            _ => {}
                        }
                    }
                    result.push(ParamDecl {
                        name: name.to_string(),
                        type_text,
                    });
                }
                // Receiver parameters (`Foo this`) are not real parameters.
                _ => {}
            }
        }
        result
    }
}
