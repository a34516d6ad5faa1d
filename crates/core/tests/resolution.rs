use typemine_core::index::{ClassIndex, IndexSnapshot};
use typemine_core::model::{FileDeclarations, ImportDecl, MethodDecl, TypeDecl, TypeKind};
use typemine_core::resolver::{FileResolver, Resolution};

fn widget(imports: Vec<ImportDecl>) -> FileDeclarations {
    FileDeclarations {
        package: Some("com.acme".to_string()),
        imports,
        types: vec![
            TypeDecl::new("Widget", TypeKind::Class)
                .with_type_parameters(["E"])
                .with_method(MethodDecl::new("apply", "F").with_type_parameters(["F"])),
        ],
    }
}

fn qualified(text: &str) -> Resolution {
    Resolution::Qualified(text.to_string())
}

#[test]
fn test_explicit_import_beats_index() {
    let mut index = ClassIndex::new();
    index.record("Helper", "com.acme", "acme");
    index.record("Helper", "org.other", "other");
    let snapshot = IndexSnapshot::from_index(index);

    let decls = widget(vec![ImportDecl::single("com.acme.util.Helper")]);
    let resolver = FileResolver::for_file("acme", &decls, &snapshot);
    assert_eq!(
        resolver.resolve("Helper", "com.acme.Widget", "run"),
        qualified("com.acme.util.Helper")
    );
}

#[test]
fn test_java_lang_without_imports() {
    let snapshot = IndexSnapshot::from_index(ClassIndex::new());
    let decls = widget(vec![]);
    let resolver = FileResolver::for_file("acme", &decls, &snapshot);

    for name in ["String", "Integer", "Object", "Runnable", "Thread", "Iterable"] {
        assert_eq!(
            resolver.resolve(name, "com.acme.Widget", "run"),
            qualified(&format!("java.lang.{}", name))
        );
    }
}

#[test]
fn test_type_parameters_always_win() {
    let mut index = ClassIndex::new();
    index.record("E", "com.acme", "acme");
    index.record("F", "com.acme", "acme");
    let snapshot = IndexSnapshot::from_index(index);

    let decls = widget(vec![ImportDecl::single("com.acme.model.E")]);
    let resolver = FileResolver::for_file("acme", &decls, &snapshot);
    assert_eq!(
        resolver.resolve("E", "com.acme.Widget", "run"),
        Resolution::TypeParameter
    );
    assert_eq!(
        resolver.resolve("F", "com.acme.Widget", "apply"),
        Resolution::TypeParameter
    );
}

#[test]
fn test_outside_wildcard_count_controls_fallback() {
    let snapshot = IndexSnapshot::from_index(ClassIndex::new());

    let one = widget(vec![ImportDecl::wildcard("org.one")]);
    let resolver = FileResolver::for_file("acme", &one, &snapshot);
    assert_eq!(
        resolver.resolve("Gadget", "com.acme.Widget", "run"),
        qualified("org.one.Gadget")
    );

    let two = widget(vec![
        ImportDecl::wildcard("org.one"),
        ImportDecl::wildcard("org.two"),
    ]);
    let resolver = FileResolver::for_file("acme", &two, &snapshot);
    assert_eq!(
        resolver.resolve("Gadget", "com.acme.Widget", "run"),
        Resolution::Unresolved
    );
}

#[test]
fn test_own_package_resolves_through_index() {
    let mut index = ClassIndex::new();
    index.record("Gear", "com.acme", "acme");
    let snapshot = IndexSnapshot::from_index(index);

    let decls = widget(vec![]);
    let resolver = FileResolver::for_file("acme", &decls, &snapshot);
    assert_eq!(
        resolver.resolve("List<Gear>", "com.acme.Widget", "run"),
        Resolution::Unresolved,
        "List is neither imported nor indexed"
    );
    assert_eq!(
        resolver.resolve("Gear[]", "com.acme.Widget", "run"),
        qualified("com.acme.Gear[]")
    );
}
