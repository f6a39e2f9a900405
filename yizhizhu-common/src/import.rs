//! File Browser & Import
//!
//! Lists a directory tree for the code browser and copies or moves dropped
//! files into a target directory. An entry with the same name in the target
//! is overwritten; no renaming is attempted.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("target is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One row of the file tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: PathBuf,
    pub name: String,
    /// 0 for direct children of the root
    pub depth: usize,
    pub is_dir: bool,
}

/// Recursively list `root`, depth-first, siblings sorted by name
///
/// Unreadable subdirectories and symlinked directories are listed but not
/// descended into.
pub fn list_tree(root: &Path) -> Result<Vec<TreeEntry>, ImportError> {
    let mut entries = Vec::new();
    let children = sorted_children(root).map_err(|source| ImportError::ReadDir {
        path: root.to_path_buf(),
        source,
    })?;
    walk(children, 0, &mut entries);
    Ok(entries)
}

fn sorted_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    children.sort_by_key(|p| file_name_of(p).to_lowercase());
    Ok(children)
}

fn walk(children: Vec<PathBuf>, depth: usize, out: &mut Vec<TreeEntry>) {
    for path in children {
        let is_dir = path.is_dir();
        // Links can point back up the tree
        let is_link = fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        out.push(TreeEntry {
            name: file_name_of(&path),
            path: path.clone(),
            depth,
            is_dir,
        });

        if is_dir && !is_link {
            match sorted_children(&path) {
                Ok(grandchildren) => walk(grandchildren, depth + 1, out),
                Err(e) => tracing::warn!("Skipping unreadable directory {}: {}", path.display(), e),
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Directory an import should land in
///
/// A selected directory is used as is, a selected file means its parent,
/// and without a selection the browsed root is used.
pub fn resolve_target(selected: Option<&Path>, root: &Path) -> PathBuf {
    match selected {
        Some(path) if path.is_dir() => path.to_path_buf(),
        Some(path) => path
            .parent()
            .filter(|p| p.is_dir())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf()),
        None => root.to_path_buf(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    Copy,
    Move,
}

/// Outcome of a multi-file import
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Destination paths that now hold imported content
    pub imported: Vec<PathBuf>,
    /// Sources that could not be imported, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Copy or move every source into `target_dir`
///
/// Sources are processed in order, so with two sources sharing a base name
/// the later one wins. A failing source is skipped and recorded.
pub fn import_paths(
    sources: &[PathBuf],
    target_dir: &Path,
    mode: ImportMode,
) -> Result<ImportReport, ImportError> {
    if !target_dir.is_dir() {
        return Err(ImportError::NotADirectory(target_dir.to_path_buf()));
    }

    let mut report = ImportReport::default();
    for source in sources {
        match import_one(source, target_dir, mode) {
            Ok(dest) => {
                tracing::info!("Imported {} -> {}", source.display(), dest.display());
                report.imported.push(dest);
            }
            Err(e) => {
                tracing::warn!("Failed to import {}: {}", source.display(), e);
                report.failed.push((source.clone(), e.to_string()));
            }
        }
    }

    Ok(report)
}

fn import_one(source: &Path, target_dir: &Path, mode: ImportMode) -> std::io::Result<PathBuf> {
    let name = source.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "source has no file name")
    })?;
    let dest = target_dir.join(name);

    // Dropping a file onto its own directory must not truncate it
    if same_file(source, &dest) {
        return Ok(dest);
    }

    if source.is_dir() {
        // Refuse to copy a directory into itself
        if target_dir.canonicalize()?.starts_with(source.canonicalize()?) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "cannot import a directory into itself",
            ));
        }
    }

    // Same name replaces, never merges
    if let Ok(meta) = fs::symlink_metadata(&dest) {
        if meta.is_dir() && source.canonicalize()?.starts_with(dest.canonicalize()?) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "cannot replace a directory containing the source",
            ));
        }
        remove_existing(&dest, &meta)?;
    }

    match mode {
        ImportMode::Copy => copy_recursive(source, &dest)?,
        ImportMode::Move => move_path(source, &dest)?,
    }

    Ok(dest)
}

fn remove_existing(path: &Path, meta: &fs::Metadata) -> std::io::Result<()> {
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn copy_recursive(source: &Path, dest: &Path) -> std::io::Result<()> {
    if source.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(source)? {
            let entry = entry?;
            if entry.file_type()?.is_symlink() && entry.path().is_dir() {
                tracing::warn!("Skipping directory link {}", entry.path().display());
                continue;
            }
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        fs::copy(source, dest)?;
    }
    Ok(())
}

fn move_path(source: &Path, dest: &Path) -> std::io::Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) => {
            // Different filesystem
            tracing::debug!("rename failed ({}), falling back to copy", e);
            copy_recursive(source, dest)?;
            if source.is_dir() {
                fs::remove_dir_all(source)
            } else {
                fs::remove_file(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_list_tree_is_depth_first_alphabetical() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("b.txt"), "b");
        write(&dir.path().join("a/z.rs"), "z");
        write(&dir.path().join("a/c/d.rs"), "d");
        write(&dir.path().join("C.md"), "c");

        let tree = list_tree(dir.path()).unwrap();
        let rows: Vec<(String, usize)> = tree.iter().map(|e| (e.name.clone(), e.depth)).collect();
        assert_eq!(
            rows,
            vec![
                ("a".to_string(), 0),
                ("c".to_string(), 1),
                ("d.rs".to_string(), 2),
                ("z.rs".to_string(), 1),
                ("b.txt".to_string(), 0),
                ("C.md".to_string(), 0),
            ]
        );
        assert!(tree[0].is_dir);
        assert!(!tree[2].is_dir);
    }

    #[test]
    fn test_list_tree_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_tree(&dir.path().join("missing")),
            Err(ImportError::ReadDir { .. })
        ));
    }

    #[test]
    fn test_resolve_target() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        write(&sub.join("f.txt"), "f");

        assert_eq!(resolve_target(None, dir.path()), dir.path());
        assert_eq!(resolve_target(Some(sub.as_path()), dir.path()), sub);
        assert_eq!(resolve_target(Some(sub.join("f.txt").as_path()), dir.path()), sub);
    }

    #[test]
    fn test_same_name_last_copy_wins() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&target.path().join("main.rs"), "existing");
        write(&src.path().join("one/main.rs"), "first");
        write(&src.path().join("two/main.rs"), "second");

        let report = import_paths(
            &[src.path().join("one/main.rs"), src.path().join("two/main.rs")],
            target.path(),
            ImportMode::Copy,
        )
        .unwrap();

        assert!(report.is_complete());
        let names: Vec<_> = fs::read_dir(target.path()).unwrap().collect();
        assert_eq!(names.len(), 1);
        assert_eq!(
            fs::read_to_string(target.path().join("main.rs")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_failed_source_is_skipped() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&src.path().join("ok.txt"), "ok");

        let report = import_paths(
            &[src.path().join("missing.txt"), src.path().join("ok.txt")],
            target.path(),
            ImportMode::Copy,
        )
        .unwrap();

        assert_eq!(report.imported, vec![target.path().join("ok.txt")]);
        assert_eq!(report.failed.len(), 1);
        assert!(target.path().join("ok.txt").exists());
    }

    #[test]
    fn test_move_removes_source() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&src.path().join("pkg/lib.rs"), "lib");

        let report = import_paths(&[src.path().join("pkg")], target.path(), ImportMode::Move).unwrap();
        assert!(report.is_complete());
        assert!(!src.path().join("pkg").exists());
        assert_eq!(
            fs::read_to_string(target.path().join("pkg/lib.rs")).unwrap(),
            "lib"
        );
    }

    #[test]
    fn test_import_onto_itself_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("keep.txt"), "data");

        let report =
            import_paths(&[dir.path().join("keep.txt")], dir.path(), ImportMode::Copy).unwrap();
        assert!(report.is_complete());
        assert_eq!(fs::read_to_string(dir.path().join("keep.txt")).unwrap(), "data");
    }

    #[test]
    fn test_directory_into_itself_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pkg = dir.path().join("pkg");
        fs::create_dir_all(pkg.join("inner")).unwrap();

        let report = import_paths(&[pkg.clone()], &pkg.join("inner"), ImportMode::Copy).unwrap();
        assert_eq!(report.failed.len(), 1);
    }

    #[test]
    fn test_target_must_be_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        write(&file, "x");
        assert!(matches!(
            import_paths(&[], &file, ImportMode::Copy),
            Err(ImportError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_tree_does_not_follow_symlink_loops() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("src/main.rs"), "fn main() {}");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("src/loop")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("b")).unwrap();

        let tree = list_tree(dir.path()).unwrap();
        let names: Vec<&str> = tree.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "src", "loop", "main.rs"]);
        // Links are still valid drop targets
        assert!(tree[0].is_dir);
    }

    #[test]
    fn test_same_name_directory_is_replaced() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&target.path().join("pkg/old.rs"), "old");
        write(&src.path().join("pkg/new.rs"), "new");

        let report = import_paths(&[src.path().join("pkg")], target.path(), ImportMode::Copy).unwrap();
        assert!(report.is_complete());
        assert!(!target.path().join("pkg/old.rs").exists());
        assert_eq!(fs::read_to_string(target.path().join("pkg/new.rs")).unwrap(), "new");
    }

    #[test]
    fn test_same_name_directory_is_replaced_on_move() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&target.path().join("pkg/old.rs"), "old");
        write(&src.path().join("pkg/new.rs"), "new");

        let report = import_paths(&[src.path().join("pkg")], target.path(), ImportMode::Move).unwrap();
        assert!(report.is_complete());
        assert!(!src.path().join("pkg").exists());
        assert!(!target.path().join("pkg/old.rs").exists());
        assert!(target.path().join("pkg/new.rs").exists());
    }

    #[test]
    fn test_file_replaces_same_name_directory() {
        let src = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write(&target.path().join("notes/a.txt"), "a");
        write(&src.path().join("notes"), "plain file");

        let report = import_paths(&[src.path().join("notes")], target.path(), ImportMode::Copy).unwrap();
        assert!(report.is_complete());
        assert_eq!(fs::read_to_string(target.path().join("notes")).unwrap(), "plain file");
    }
}
