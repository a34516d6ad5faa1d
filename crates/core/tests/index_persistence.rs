use typemine_core::index::{ClassIndex, IndexSnapshot};

fn sample(entries: &[(&str, &str, &str)]) -> ClassIndex {
    let mut index = ClassIndex::new();
    for (name, package, repo) in entries {
        index.record(name, package, repo);
    }
    index
}

#[test]
fn test_binary_snapshot_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.bin");
    let snapshot = IndexSnapshot::from_index(sample(&[
        ("Foo", "p", "r1"),
        ("Bar", "p", "r1"),
        ("Foo", "p", "r2"),
        ("Solo", "", "r3"),
    ]));

    snapshot.save(&path).unwrap();
    let loaded = IndexSnapshot::load(&path).unwrap();

    assert_eq!(loaded.repo_sizes, snapshot.repo_sizes);
    assert_eq!(loaded.repo_packages, snapshot.repo_packages);
    assert_eq!(loaded.valid_repos, snapshot.valid_repos);
    assert_eq!(loaded.valid_repos.iter().collect::<Vec<_>>(), vec!["r1"]);
}

#[test]
fn test_json_index_recomputes_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.json");
    let snapshot = IndexSnapshot::from_index(sample(&[
        ("Foo", "p", "r2"),
        ("Foo", "p", "r1"),
        ("Foo", "q", "r1"),
    ]));

    snapshot.save(&path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!({ "Foo": { "p": ["r1", "r2"], "q": ["r1"] } }));

    let loaded = IndexSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_views_do_not_depend_on_insertion_order() {
    let forward = [("Foo", "p", "r1"), ("Foo", "p", "r2"), ("Bar", "q", "r2")];
    let mut backward = forward;
    backward.reverse();

    let one = IndexSnapshot::from_index(sample(&forward));
    let two = IndexSnapshot::from_index(sample(&backward));
    assert_eq!(one, two);
}
