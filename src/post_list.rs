use std::path::{Component, Path, PathBuf};
use std::{fs, io};

use spdlog::error;
use walkdir::{DirEntry, WalkDir};

const MARKDOWN_EXTENSION: &str = "md";

/// Finds the post files under `root_dir`. The walk is sorted by file name so
/// the result is always in the same order for the same tree.
pub struct PostList {
    pub root_dir: PathBuf,
    /// Paths relative to `root_dir` that are never scanned, e.g. the index
    /// itself.
    pub excluded: Vec<PathBuf>,
}

impl PostList {
    /// Only a failure to read the root itself is an error. Entries below it
    /// that can't be read are logged and left out.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let excluded = self.excluded_relative();

        let mut posts = vec![];
        let walker = WalkDir::new(&self.root_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !Self::is_ignored(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                    error!("Could not read {}: {}", path, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !Self::is_markdown(entry.path()) {
                continue;
            }
            let relative = normalize(entry.path().strip_prefix(&self.root_dir).unwrap_or(entry.path()));
            if excluded.contains(&relative) {
                continue;
            }
            posts.push(entry.into_path());
        }

        Ok(posts)
    }

    /// Excluded paths relative to the root. Absolute ones are made relative
    /// to the canonical root when they live under it.
    fn excluded_relative(&self) -> Vec<PathBuf> {
        let canonical_root = fs::canonicalize(&self.root_dir).ok();
        self.excluded.iter()
            .map(|p| {
                if p.is_absolute() {
                    if let Some(rel) = canonical_root.as_ref().and_then(|root| p.strip_prefix(root).ok()) {
                        return normalize(rel);
                    }
                }
                normalize(p)
            })
            .collect()
    }

    fn is_ignored(entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || (entry.file_type().is_dir() && name == "target")
    }

    fn is_markdown(path: &Path) -> bool {
        path.extension().map_or(false, |ext| ext == MARKDOWN_EXTENSION)
    }
}

/// Drops `.` components so `./README.md` and `README.md` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}
