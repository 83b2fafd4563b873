use super::*;
use crate::{
    FsError, Op,
    testing::{Calls, CountingFs, make_tree},
};
use std::path::Path;

#[test]
fn by_depth_descending_groups_deepest_first() {
    let dirs = ["r", "r/a", "r/b", "r/a/c"]
        .into_iter()
        .map(PathRecord::new)
        .collect();

    let levels: Vec<Vec<String>> = by_depth_descending(dirs)
        .into_iter()
        .map(|level| {
            level
                .iter()
                .map(|r| r.path().display().to_string())
                .collect()
        })
        .collect();

    assert_eq!(levels, vec![vec!["r/a/c"], vec!["r/a", "r/b"], vec!["r"]]);
}

#[tokio::test]
async fn unlink_operator_removes_each_record() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    make_tree(tmp.path(), &["a.log", "b.log", "keep/"]);
    let fs = FileSystem::default();

    let removed = fs
        .list(tmp.path())
        .is_file()
        .unlink()
        .collect_records()
        .await
        .expect("unlink ok");

    assert_eq!(removed.len(), 2);
    assert!(!tmp.path().join("a.log").exists());
    assert!(tmp.path().join("keep").is_dir());
}

#[tokio::test]
async fn unlinking_missing_file_is_a_not_found_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let (records, errors) = FileSystem::default()
        .of([tmp.path().join("nope.txt")])
        .unlink()
        .settle()
        .await;

    assert!(records.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], FsError::NotFound { op: Op::Unlink, .. }));
}

#[tokio::test]
async fn unlink_dir_honours_extension() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    make_tree(tmp.path(), &["a.tmp", "b.tmp", "c.txt", "sub/"]);

    let removed = FileSystem::default()
        .unlink_dir(tmp.path(), Some(".tmp"))
        .collect_records()
        .await
        .expect("unlink ok");

    assert_eq!(removed.len(), 2);
    assert!(tmp.path().join("c.txt").exists());
    assert!(tmp.path().join("sub").is_dir());
}

#[tokio::test]
async fn clear_dir_unlinks_before_removing_directory() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("box");
    make_tree(tmp.path(), &["box/1", "box/2", "box/3"]);

    let order = FileSystem::default()
        .clear_dir(&dir, None)
        .paths()
        .await
        .expect("clear ok");

    assert_eq!(order.len(), 4);
    assert_eq!(order.last(), Some(&dir));
    assert!(!dir.exists());
}

#[tokio::test]
async fn clear_dir_with_subdirectory_fails_not_empty() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir = tmp.path().join("box");
    make_tree(tmp.path(), &["box/file", "box/inner/"]);

    let (records, errors) = FileSystem::default().clear_dir(&dir, None).settle().await;

    assert_eq!(records.len(), 1);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], FsError::NotEmpty { .. }));
    assert!(dir.join("inner").is_dir());
}

#[tokio::test]
async fn nuke_dir_removes_the_whole_tree() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("root");
    // root/
    //   a/file1
    //   b/c/file2
    make_tree(tmp.path(), &["root/a/file1", "root/b/c/file2"]);
    let (fs, calls) = CountingFs::filesystem();

    let removed = fs.nuke_dir(&root).paths().await.expect("nuke ok");

    assert!(!root.exists());
    assert!(tmp.path().exists());
    // 2 files + root, a, b, c
    assert_eq!(removed.len(), 6);
    assert_eq!(Calls::get(&calls.unlink), 2);
    assert_eq!(Calls::get(&calls.remove_dir), 4);
    assert_eq!(removed.last(), Some(&root));
}

#[tokio::test]
async fn nuke_dir_handles_deep_and_wide_trees() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("t");
    let mut entries = Vec::new();
    for i in 0..5 {
        for j in 0..4 {
            entries.push(format!("t/d{i}/e{j}/f.txt"));
            entries.push(format!("t/d{i}/e{j}/g/h/i.bin"));
        }
    }
    let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
    make_tree(tmp.path(), &refs);

    let fs = FileSystem::default().with_config(crate::FsConfig::default().with_concurrency(4));
    let (_, errors) = fs.nuke_dir(&root).settle().await;

    assert!(errors.is_empty(), "{errors:?}");
    assert!(!root.exists());
}

#[tokio::test]
async fn nuke_dir_of_missing_root_reports_not_found() {
    let tmp = tempfile::tempdir().expect("create temp dir");

    let (records, errors) = FileSystem::default()
        .nuke_dir(tmp.path().join("absent"))
        .settle()
        .await;

    assert!(records.is_empty());
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_not_found());
}

#[cfg(unix)]
#[tokio::test]
async fn nuke_dir_unlinks_symlinks_without_touching_targets() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    make_tree(tmp.path(), &["keep/precious.txt", "doomed/inner/x"]);
    std::os::unix::fs::symlink(tmp.path().join("keep"), tmp.path().join("doomed/inner/link"))
        .expect("symlink");

    let fs = FileSystem::default().with_config(crate::FsConfig::default().with_follow_links(true));
    let (_, errors) = fs.nuke_dir(tmp.path().join("doomed")).settle().await;

    assert!(errors.is_empty(), "{errors:?}");
    assert!(!tmp.path().join("doomed").exists());
    assert!(Path::new(&tmp.path().join("keep/precious.txt")).exists());
}

#[cfg(unix)]
#[tokio::test]
async fn nuke_dir_removes_dangling_links_without_errors() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("root");
    make_tree(&root, &["a/f"]);
    std::os::unix::fs::symlink(root.join("nowhere"), root.join("a/dangling")).expect("symlink");

    let (records, errors) = FileSystem::default().nuke_dir(&root).settle().await;

    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(records.len(), 4, "f, dangling, a and root");
    assert!(!root.exists());
}
