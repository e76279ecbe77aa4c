//! Capability-based filesystem helpers over UTF-8 paths.
//!
//! Every helper opens the nearest directory with ambient authority and works
//! relative to it, so callers can pass absolute or relative `camino` paths.

use std::io;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` for reading.
///
/// # Errors
/// Propagates the underlying I/O error, including `NotFound`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` names a regular file.
///
/// # Errors
/// Returns `NotFound` when the path or its parent directory is missing, and
/// `InvalidInput` when the path has no file name.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{path} does not name a file"),
        )
    })?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent_or_cwd(path), ambient_authority())?;
    Ok(dir.metadata(name)?.is_file())
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates failures to open the anchoring directory or create the
/// missing ones.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) else {
        return Ok(());
    };
    let (anchor, relative) = split_anchor(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?.create_dir_all(&relative)
}

fn parent_or_cwd(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Split `path` into the root or prefix it hangs from and the remainder.
///
/// Relative paths anchor at the current directory.
fn split_anchor(path: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir if relative.as_str().is_empty() => {
                anchor.push(component);
            }
            other => relative.push(other),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    (anchor, relative)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn utf8_root(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir")
    }

    #[rstest]
    #[case("/var/cache/scores.db", "/", "var/cache/scores.db")]
    #[case("cache/scores.db", ".", "cache/scores.db")]
    #[case("./scores.db", ".", "./scores.db")]
    fn anchors_split_at_the_root(
        #[case] path: &str,
        #[case] anchor: &str,
        #[case] relative: &str,
    ) {
        let (got_anchor, got_relative) = split_anchor(Utf8Path::new(path));
        assert_eq!(got_anchor, Utf8PathBuf::from(anchor));
        assert_eq!(got_relative, Utf8PathBuf::from(relative));
    }

    #[test]
    fn missing_parents_are_created() {
        let tmp = TempDir::new().expect("tempdir");
        let target = utf8_root(&tmp).join("state/cache/scores.db");

        ensure_parent_dir(&target).expect("create parents");

        assert!(target.parent().expect("has parent").is_dir());
        ensure_parent_dir(&target).expect("second call is a no-op");
    }

    #[test]
    fn bare_file_names_need_no_parent() {
        ensure_parent_dir(Utf8Path::new("scores.db")).expect("nothing to create");
    }

    #[test]
    fn directories_are_not_files() {
        let tmp = TempDir::new().expect("tempdir");
        let root = utf8_root(&tmp);
        fs::write(root.join("dataset.json"), b"{}").expect("write file");
        fs::create_dir(root.join("nested")).expect("create dir");

        assert!(file_is_file(&root.join("dataset.json")).expect("inspect file"));
        assert!(!file_is_file(&root.join("nested")).expect("inspect dir"));
    }

    #[test]
    fn missing_files_report_not_found() {
        let tmp = TempDir::new().expect("tempdir");
        let err = file_is_file(&utf8_root(&tmp).join("absent/dataset.json"))
            .expect_err("parent is missing");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
