//! File system utilities for merging package trees.
//!
//! Directory copies merge into existing destinations, recreate symlinks and
//! tolerate a partially populated destination tree.

use std::io;
use std::path::Path;

use tokio::fs;

use crate::universal::error::{Error, ErrorExt, Result};

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Removes whatever non-directory entry sits at `path`, if any.
fn clear_entry(path: &Path) -> io::Result<()> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => std::fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Removes a file if it exists.
///
/// A missing file is not an error, so repeated calls succeed.
pub async fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing stale file", path),
    }
}

/// Recursively copies the directory `from` into `to`.
///
/// Unlike a plain copy, the destination may already exist: files and symlinks
/// in it are overwritten, directories are merged and entries not present in
/// `from` are kept. Parent directories of `to` are created as needed.
pub async fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating destination directory", &to)?;

        for entry in walkdir::WalkDir::new(&from).min_depth(1) {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from).map_err(|_| {
                Error::GenericError(format!(
                    "{} escaped {}",
                    entry.path().display(),
                    from.display()
                ))
            })?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                clear_entry(&dest_path).fs_context("replacing entry", &dest_path)?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                clear_entry(&dest_path).fs_context("replacing entry", &dest_path)?;
                std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
            } else {
                clear_entry(&dest_path).fs_context("replacing entry", &dest_path)?;
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok::<(), Error>(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_tree_merges_into_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        std::fs::create_dir_all(src.join("Headers")).unwrap();
        std::fs::write(src.join("Info.plist"), "new").unwrap();
        std::fs::write(src.join("Headers/a.h"), "a").unwrap();
        std::fs::create_dir_all(dst.join("Headers")).unwrap();
        std::fs::write(dst.join("Info.plist"), "old").unwrap();
        std::fs::write(dst.join("stale.txt"), "keep").unwrap();

        copy_tree(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("Info.plist")).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(dst.join("Headers/a.h")).unwrap(), "a");
        assert_eq!(std::fs::read_to_string(dst.join("stale.txt")).unwrap(), "keep");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_tree_recreates_symlinks_over_existing_ones() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        std::fs::create_dir_all(src.join("Versions/A")).unwrap();
        std::os::unix::fs::symlink("A", src.join("Versions/Current")).unwrap();

        copy_tree(&src, &dst).await.unwrap();
        copy_tree(&src, &dst).await.unwrap();

        let link = std::fs::read_link(dst.join("Versions/Current")).unwrap();
        assert_eq!(link, Path::new("A"));
    }

    #[tokio::test]
    async fn copy_tree_rejects_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let result = copy_tree(&tmp.path().join("missing"), &tmp.path().join("dst")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn removing_missing_file_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        remove_file_if_exists(&tmp.path().join("nope")).await.unwrap();
    }
}
