//! Random operation sequences must keep the tree structurally sound.

use folio::{FileSystem, NamespaceError, NodeId, NodeRef, PathNode, SortMode};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Folder(String),
    Leaf(String),
    Move(usize, usize),
    Merge(usize, usize),
    Rename(usize, String),
    RenameDuplicate(usize, String),
    Relocate(usize, String),
    Delete(usize),
}

fn name() -> impl Strategy<Value = String> {
    "[aAbBc]{1,2}"
}

fn path() -> impl Strategy<Value = String> {
    "[aAbB]{1,2}(/[aAbB]{1,2}){0,2}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        path().prop_map(Op::Folder),
        path().prop_map(Op::Leaf),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Move(a, b)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Merge(a, b)),
        (any::<usize>(), name()).prop_map(|(a, n)| Op::Rename(a, n)),
        (any::<usize>(), name()).prop_map(|(a, n)| Op::RenameDuplicate(a, n)),
        (any::<usize>(), path()).prop_map(|(a, p)| Op::Relocate(a, p)),
        any::<usize>().prop_map(Op::Delete),
    ]
}

/// Root first, then every node in storage order.
fn all_ids(fs: &FileSystem<u32>) -> Vec<NodeId> {
    std::iter::once(NodeId::ROOT)
        .chain(fs.root().descendants(SortMode::Lexicographic).map(|n| n.id()))
        .collect()
}

fn pick(fs: &FileSystem<u32>, i: usize) -> NodeId {
    let ids = all_ids(fs);
    ids[i % ids.len()]
}

fn snapshot(fs: &FileSystem<u32>) -> Vec<(NodeId, String)> {
    let mut paths: Vec<_> = fs
        .root()
        .descendants(SortMode::Lexicographic)
        .map(|n| (n.id(), n.full_name()))
        .collect();
    paths.sort();
    paths
}

fn upper(name: &str) -> String {
    name.to_ascii_uppercase()
}

fn check_folder(
    fs: &FileSystem<u32>,
    folder: NodeRef<'_, u32>,
) -> Result<(usize, usize), TestCaseError> {
    let children: Vec<_> = folder.children(SortMode::Lexicographic).collect();
    let mut descendants = 0;
    let mut leaves = 0;
    for (i, child) in children.iter().enumerate() {
        prop_assert_eq!(child.parent(), Some(folder.id()));
        prop_assert_eq!(child.index(), i);
        prop_assert_eq!(child.depth(), folder.depth().wrapping_add(1));
        prop_assert_eq!(fs.get_by_path(&child.full_name()), Some(child.id()));
        if i > 0 {
            prop_assert!(upper(children[i - 1].name()) < upper(child.name()));
        }
        if child.is_folder() {
            let (d, l) = check_folder(fs, *child)?;
            descendants += d + 1;
            leaves += l;
        } else {
            descendants += 1;
            leaves += 1;
        }
    }
    prop_assert_eq!(folder.total_descendants(), descendants);
    prop_assert_eq!(folder.total_leaves(), leaves);
    Ok((descendants, leaves))
}

fn check_tree(fs: &FileSystem<u32>) -> Result<(), TestCaseError> {
    let (descendants, _) = check_folder(fs, fs.root())?;
    prop_assert_eq!(descendants, fs.len());
    Ok(())
}

/// Failed structural operations must leave the tree exactly as it was.
fn check_untouched(
    before: &[(NodeId, String)],
    fs: &FileSystem<u32>,
    result: Result<(), NamespaceError>,
) -> Result<(), TestCaseError> {
    if result.is_err() {
        let after = snapshot(fs);
        prop_assert_eq!(before, after.as_slice());
    }
    Ok(())
}

fn apply(fs: &mut FileSystem<u32>, op: &Op, counter: &mut u32) -> Result<(), TestCaseError> {
    let before = snapshot(fs);
    match op {
        Op::Folder(path) => {
            let _ = fs.find_or_create_all_folders(path);
        }
        Op::Leaf(path) => {
            let (parent_path, leaf) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
            if let Ok(parent) = fs.find_or_create_all_folders(parent_path) {
                *counter += 1;
                let _ = fs.create_leaf(parent, leaf, *counter);
            }
        }
        Op::Move(a, b) => {
            let (node, target) = (pick(fs, *a), pick(fs, *b));
            let result = fs.move_node(node, target).map(|_| ());
            check_untouched(&before, fs, result)?;
        }
        Op::Merge(a, b) => {
            let (from, to) = (pick(fs, *a), pick(fs, *b));
            let result = fs.merge(from, to).map(|_| ());
            check_untouched(&before, fs, result)?;
        }
        Op::Rename(a, name) => {
            let node = pick(fs, *a);
            let result = fs.rename(node, name).map(|_| ());
            check_untouched(&before, fs, result)?;
        }
        Op::RenameDuplicate(a, name) => {
            let node = pick(fs, *a);
            let _ = fs.rename_with_duplicates(node, name);
        }
        Op::Relocate(a, path) => {
            let node = pick(fs, *a);
            let _ = fs.rename_and_move(node, path);
        }
        Op::Delete(a) => {
            let node = pick(fs, *a);
            let _ = fs.delete(node);
        }
    }
    check_tree(fs)
}

proptest! {
    #[test]
    fn random_operations_preserve_structure(ops in prop::collection::vec(op(), 1..40)) {
        let mut fs: FileSystem<u32> = FileSystem::new();
        let mut counter = 0;
        for op in &ops {
            apply(&mut fs, op, &mut counter)?;
        }
    }

    #[test]
    fn moves_never_create_cycles(paths in prop::collection::vec(path(), 1..10), a in any::<usize>(), b in any::<usize>()) {
        let mut fs: FileSystem<u32> = FileSystem::new();
        for path in &paths {
            let _ = fs.find_or_create_all_folders(path);
        }
        let (node, target) = (pick(&fs, a), pick(&fs, b));
        let _ = fs.move_node(node, target);
        for id in all_ids(&fs).into_iter().skip(1) {
            let parents: Vec<NodeId> = fs.get(id).unwrap().parents().iter().map(|p| p.id()).collect();
            prop_assert!(!parents.contains(&id));
            prop_assert!(parents.len() < fs.len());
        }
        check_tree(&fs)?;
    }
}
