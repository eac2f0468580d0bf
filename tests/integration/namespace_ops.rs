use folio::tree::{ComparerKind, Ordinal};
use folio::{FileSystem, NamespaceError, NodeId, Outcome, PathNode, SortMode};

fn names(fs: &FileSystem<u32>, folder: NodeId, mode: SortMode) -> Vec<String> {
    fs.get(folder)
        .unwrap()
        .children(mode)
        .map(|c| c.name().to_string())
        .collect()
}

#[test]
fn path_round_trip() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let folder = fs.find_or_create_all_folders("a/b").unwrap();
    let (leaf, _) = fs.create_leaf(folder, "c", 1).unwrap();

    assert_eq!(fs.full_name(leaf).unwrap(), "a/b/c");
    assert_eq!(fs.find("a/b/c"), (true, leaf));
    assert_eq!(fs.find("/a//b/c/"), (true, leaf));
    assert_eq!(fs.get(leaf).unwrap().depth(), 2);
}

#[test]
fn partial_find_reports_deepest_node() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a = fs.find_or_create_all_folders("a").unwrap();
    let (leaf, _) = fs.create_leaf(a, "item", 0).unwrap();

    assert_eq!(fs.find("a/missing/deeper"), (false, a));
    assert_eq!(fs.find("a/item/below"), (false, leaf));
    assert_eq!(fs.find(""), (true, NodeId::ROOT));
}

#[test]
fn case_insensitive_names_collide() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    fs.create_folder(NodeId::ROOT, "Foo").unwrap();
    let err = fs.create_leaf(NodeId::ROOT, "foo", 1).unwrap_err();
    assert!(matches!(err, NamespaceError::NameCollision { .. }));
    assert!(fs.get_by_path("FOO").is_some());
}

#[test]
fn ordinal_comparer_keeps_case_variants_apart() {
    let mut fs: FileSystem<u32> = FileSystem::with_comparer(Box::new(Ordinal));
    fs.create_leaf(NodeId::ROOT, "b", 1).unwrap();
    fs.create_leaf(NodeId::ROOT, "B", 2).unwrap();
    fs.create_leaf(NodeId::ROOT, "a", 3).unwrap();
    assert_eq!(
        names(&fs, NodeId::ROOT, SortMode::Lexicographic),
        vec!["B", "a", "b"]
    );
}

#[test]
fn comparer_from_config() {
    let config = folio::config::NamespaceConfig {
        comparer: ComparerKind::Ordinal,
        ..Default::default()
    };
    let mut fs: FileSystem<u32> = FileSystem::with_config(&config);
    fs.create_leaf(NodeId::ROOT, "x", 1).unwrap();
    assert!(fs.create_leaf(NodeId::ROOT, "X", 2).is_ok());
}

#[test]
fn names_are_sanitized() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let (slashed, _) = fs.create_leaf(NodeId::ROOT, " a/b ", 1).unwrap();
    let (blank, _) = fs.create_leaf(NodeId::ROOT, "   ", 2).unwrap();

    assert_eq!(fs.get(slashed).unwrap().name(), "a\\b");
    assert_eq!(fs.get(blank).unwrap().name(), "<None>");
    assert_eq!(fs.get_by_path("a\\b"), Some(slashed));
}

#[test]
fn duplicate_leaves_get_numbered() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    for i in 0..3 {
        fs.create_duplicate_leaf(NodeId::ROOT, "item", i).unwrap();
    }
    assert_eq!(
        names(&fs, NodeId::ROOT, SortMode::Lexicographic),
        vec!["item", "item (2)", "item (3)"]
    );
}

#[test]
fn duplicate_limit_is_reported() {
    let config = folio::config::NamespaceConfig {
        max_duplicates: 2,
        ..Default::default()
    };
    let mut fs: FileSystem<u32> = FileSystem::with_config(&config);
    fs.create_duplicate_leaf(NodeId::ROOT, "x", 1).unwrap();
    fs.create_duplicate_leaf(NodeId::ROOT, "x", 2).unwrap();
    let err = fs.create_duplicate_leaf(NodeId::ROOT, "x", 3).unwrap_err();
    assert_eq!(err, NamespaceError::NoUniqueName("x".to_string()));
}

#[test]
fn folders_first_presentation() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    fs.create_leaf(NodeId::ROOT, "alpha", 1).unwrap();
    fs.create_folder(NodeId::ROOT, "zeta").unwrap();
    fs.create_leaf(NodeId::ROOT, "Beta", 2).unwrap();

    assert_eq!(
        names(&fs, NodeId::ROOT, SortMode::FoldersFirst),
        vec!["zeta", "alpha", "Beta"]
    );
    assert_eq!(
        names(&fs, NodeId::ROOT, SortMode::Lexicographic),
        vec!["alpha", "Beta", "zeta"]
    );
}

#[test]
fn move_into_descendant_is_rejected() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a = fs.find_or_create_all_folders("a").unwrap();
    let c = fs.find_or_create_all_folders("a/b/c").unwrap();

    let err = fs.move_node(a, c).unwrap_err();
    assert!(matches!(err, NamespaceError::CircularReference { .. }));
    assert_eq!(fs.full_name(c).unwrap(), "a/b/c");
    assert_eq!(fs.root().total_descendants(), 3);
}

#[test]
fn move_updates_depth_and_counters() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let src = fs.find_or_create_all_folders("src/inner").unwrap();
    fs.create_leaf(src, "one", 1).unwrap();
    fs.create_leaf(src, "two", 2).unwrap();
    let dst = fs.find_or_create_all_folders("x/y/z").unwrap();

    let outcome = fs.move_node(src, dst).unwrap();
    assert_eq!(outcome, Outcome::Done);

    let moved = fs.get_by_path("x/y/z/inner/two").unwrap();
    assert_eq!(fs.get(moved).unwrap().depth(), 4);

    let src_root = fs.get_by_path("src").unwrap();
    assert_eq!(fs.get(src_root).unwrap().total_descendants(), 0);
    let x = fs.get_by_path("x").unwrap();
    assert_eq!(fs.get(x).unwrap().total_descendants(), 5);
    assert_eq!(fs.get(x).unwrap().total_leaves(), 2);
    assert_eq!(fs.root().total_leaves(), 2);
}

#[test]
fn move_leaf_onto_same_name_fails() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a = fs.find_or_create_all_folders("a").unwrap();
    let b = fs.find_or_create_all_folders("b").unwrap();
    let (leaf, _) = fs.create_leaf(a, "file", 1).unwrap();
    fs.create_leaf(b, "FILE", 2).unwrap();

    let err = fs.move_node(leaf, b).unwrap_err();
    assert!(matches!(err, NamespaceError::NameCollision { .. }));
    assert_eq!(fs.full_name(leaf).unwrap(), "a/file");
}

#[test]
fn partial_merge_keeps_blocked_children() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let from = fs.find_or_create_all_folders("from").unwrap();
    let to = fs.find_or_create_all_folders("to").unwrap();
    fs.create_leaf(from, "x", 1).unwrap();
    fs.create_leaf(from, "y", 2).unwrap();
    fs.create_leaf(to, "x", 3).unwrap();

    assert_eq!(fs.merge(from, to).unwrap(), Outcome::PartialMerge);
    assert_eq!(names(&fs, from, SortMode::Lexicographic), vec!["x"]);
    assert_eq!(names(&fs, to, SortMode::Lexicographic), vec!["x", "y"]);
    assert_eq!(fs.get(to).unwrap().total_leaves(), 2);
}

#[test]
fn full_merge_removes_source_and_merges_subfolders() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let shared = fs.find_or_create_all_folders("from/shared").unwrap();
    fs.create_leaf(shared, "a", 1).unwrap();
    let target_shared = fs.find_or_create_all_folders("to/shared").unwrap();
    fs.create_leaf(target_shared, "b", 2).unwrap();
    let from = fs.get_by_path("from").unwrap();
    let to = fs.get_by_path("to").unwrap();

    assert_eq!(fs.merge(from, to).unwrap(), Outcome::Merged);
    assert!(!fs.contains(from));
    assert!(!fs.contains(shared));
    assert_eq!(
        names(&fs, target_shared, SortMode::Lexicographic),
        vec!["a", "b"]
    );
    assert_eq!(fs.root().total_descendants(), 4);
}

#[test]
fn nested_merge_keeps_blocked_grandchildren() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a_y = fs.find_or_create_all_folders("A/y").unwrap();
    let (blocked, _) = fs.create_leaf(a_y, "x", 1).unwrap();
    let (moved, _) = fs.create_leaf(a_y, "z", 2).unwrap();
    let b_y = fs.find_or_create_all_folders("B/y").unwrap();
    fs.create_leaf(b_y, "x", 3).unwrap();
    let a = fs.get_by_path("A").unwrap();
    let b = fs.get_by_path("B").unwrap();

    assert_eq!(fs.merge(a, b).unwrap(), Outcome::PartialMerge);
    assert_eq!(fs.full_name(blocked).unwrap(), "A/y/x");
    assert_eq!(fs.full_name(moved).unwrap(), "B/y/z");
    assert_eq!(names(&fs, b_y, SortMode::Lexicographic), vec!["x", "z"]);
    assert_eq!(fs.get(moved).unwrap().depth(), 2);
    assert!(fs.contains(a_y));
}

#[test]
fn merge_with_nothing_movable_fails_untouched() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let from = fs.find_or_create_all_folders("from").unwrap();
    let to = fs.find_or_create_all_folders("to").unwrap();
    fs.create_leaf(from, "x", 1).unwrap();
    fs.create_leaf(to, "x", 2).unwrap();

    let err = fs.merge(from, to).unwrap_err();
    assert!(matches!(err, NamespaceError::NothingToMerge { .. }));
    assert!(fs.get_by_path("from/x").is_some());
}

#[test]
fn rename_and_move_creates_folders() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let (leaf, _) = fs.create_leaf(NodeId::ROOT, "old", 1).unwrap();

    let outcome = fs.rename_and_move(leaf, "new/place/renamed").unwrap();
    assert_eq!(outcome, Outcome::Done);
    assert_eq!(fs.full_name(leaf).unwrap(), "new/place/renamed");
    assert_eq!(fs.get(leaf).unwrap().depth(), 2);
    assert_eq!(fs.get_by_path("old"), None);
}

#[test]
fn folder_chain_blocked_by_leaf() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a = fs.find_or_create_all_folders("a").unwrap();
    fs.create_leaf(a, "b", 1).unwrap();

    let err = fs.find_or_create_all_folders("a/b/c").unwrap_err();
    match err {
        NamespaceError::FolderPathBlocked {
            segment,
            reached,
            reached_path,
        } => {
            assert_eq!(segment, "b");
            assert_eq!(reached, a);
            assert_eq!(reached_path, "a");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fs.len(), 2);
}

#[test]
fn delete_removes_subtree() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let b = fs.find_or_create_all_folders("a/b").unwrap();
    let (leaf, _) = fs.create_leaf(b, "c", 1).unwrap();
    let a = fs.get_by_path("a").unwrap();

    fs.delete(b).unwrap();
    assert!(!fs.contains(b));
    assert!(!fs.contains(leaf));
    assert_eq!(fs.get(a).unwrap().total_descendants(), 0);
    assert_eq!(fs.len(), 1);
}

#[test]
fn root_operations_are_rejected() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let a = fs.find_or_create_all_folders("a").unwrap();
    assert!(matches!(
        fs.rename(NodeId::ROOT, "x"),
        Err(NamespaceError::RootOperation(_))
    ));
    assert!(matches!(
        fs.move_node(NodeId::ROOT, a),
        Err(NamespaceError::RootOperation(_))
    ));
    assert!(matches!(
        fs.delete(NodeId::ROOT),
        Err(NamespaceError::RootOperation(_))
    ));
}

#[test]
fn ids_are_never_reused() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let (first, _) = fs.create_leaf(NodeId::ROOT, "x", 1).unwrap();
    fs.delete(first).unwrap();
    let (second, _) = fs.create_leaf(NodeId::ROOT, "x", 2).unwrap();
    assert_ne!(first, second);
}

#[test]
fn folder_state_flags() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let b = fs.find_or_create_all_folders("a/b").unwrap();
    let a = fs.get_by_path("a").unwrap();
    let (leaf, _) = fs.create_leaf(b, "leaf", 1).unwrap();

    assert!(fs.toggle_state(a).unwrap());
    assert!(!fs.get(b).unwrap().state());

    fs.set_state_recursive(a, true).unwrap();
    assert!(fs.get(b).unwrap().state());

    fs.set_state(leaf, true).unwrap();
    assert!(!fs.get(leaf).unwrap().state());
}

#[test]
fn find_leaf_by_payload() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    let b = fs.find_or_create_all_folders("a/b").unwrap();
    fs.create_leaf(b, "seven", 7).unwrap();
    let (nine, _) = fs.create_leaf(NodeId::ROOT, "nine", 9).unwrap();

    assert_eq!(fs.find_leaf(|v| *v == 9), Some(nine));
    assert_eq!(fs.find_leaf(|v| *v == 100), None);
    *fs.value_mut(nine).unwrap() = 10;
    assert_eq!(fs.find_leaf(|v| *v == 10), Some(nine));
}

#[test]
fn multi_char_uppercase_names_stay_distinct() {
    let mut fs: FileSystem<u32> = FileSystem::new();
    fs.create_leaf(NodeId::ROOT, "straße", 1).unwrap();
    assert!(fs.create_leaf(NodeId::ROOT, "STRASSE", 2).is_ok());
    let err = fs.create_leaf(NodeId::ROOT, "STRAßE", 3).unwrap_err();
    assert!(matches!(err, NamespaceError::NameCollision { .. }));
}
