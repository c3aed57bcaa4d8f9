use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, error, info, warn};

use crate::config::Config;
use crate::content::content_file::ContentFile;
use crate::content::PostRecord;
use crate::post_list::PostList;
use crate::view::index_renderer::IndexRenderer;

/// Posts found under the root and the ones that could be parsed, in scan
/// order.
pub struct PostCollection {
    pub found: usize,
    pub records: Vec<PostRecord>,
}

#[derive(Debug)]
pub struct IndexSummary {
    pub found: usize,
    pub processed: usize,
    pub output_file: PathBuf,
}

#[derive(Debug)]
pub enum IndexError {
    /// The root directory could not be walked.
    Scan { root: PathBuf, err: io::Error },
    /// Not a single post with a valid frontmatter was found.
    NoValidPosts { root: PathBuf, found: usize },
    /// The index could not be written.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexError::Scan { root, err } => {
                write!(f, "Scanning directory '{}': {}", root.display(), err)
            }
            IndexError::NoValidPosts { root, found } => {
                write!(f, "No valid posts found in '{}' ({} markdown files scanned)", root.display(), found)
            }
            IndexError::Write { path, err } => {
                write!(f, "Writing index '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Scan { root: _, err } => Some(err),
            IndexError::NoValidPosts { .. } => None,
            IndexError::Write { path: _, err } => Some(err),
        }
    }
}

/// Reads every post under `root_dir`. A post that can't be read or has no
/// usable frontmatter is logged and left out, it never stops the scan.
pub fn collect_posts(root_dir: &Path, excluded: Vec<PathBuf>) -> Result<PostCollection, IndexError> {
    let post_list = PostList {
        root_dir: root_dir.to_path_buf(),
        excluded,
    };

    let files = post_list.retrieve_files().map_err(|err| IndexError::Scan {
        root: root_dir.to_path_buf(),
        err,
    })?;
    info!("Found {} markdown files in {}", files.len(), root_dir.display());

    let found = files.len();
    let mut records = Vec::with_capacity(found);
    for file_path in files {
        let content_file = match ContentFile::from_file(root_dir, file_path.clone()) {
            Ok(content_file) => content_file,
            Err(e) => {
                error!("Could not read {}: {}", file_path.display(), e);
                continue;
            }
        };

        match content_file.to_record() {
            Ok(record) => {
                debug!("Parsed {}", record.identity.relative_path);
                records.push(record);
            }
            Err(e) => warn!("Skipping {}: {}", content_file.identity.relative_path, e),
        }
    }

    Ok(PostCollection {
        found,
        records,
    })
}

pub fn render_index(config: &Config, records: &[PostRecord]) -> String {
    IndexRenderer::new(&config.site, &config.tag_groups).render(records)
}

/// Replaces `output_file` with `content`. The content goes to a sibling
/// temporary file first so the previous index survives a failed write.
pub fn write_index(output_file: &Path, content: &str) -> io::Result<()> {
    let file_name = output_file.file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Output path has no file name"))?;
    let tmp_file = output_file.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    fs::write(&tmp_file, content)?;
    if let Err(e) = fs::rename(&tmp_file, output_file) {
        let _ = fs::remove_file(&tmp_file);
        return Err(e);
    }

    Ok(())
}

/// Scans `root_dir`, renders the index and writes it. Nothing is written when
/// no valid post is found.
pub fn generate_index(root_dir: &Path, config: &Config) -> Result<IndexSummary, IndexError> {
    let output_file = root_dir.join(&config.paths.output_file);
    let collection = collect_posts(root_dir, excluded_paths(config))?;

    if collection.records.is_empty() {
        return Err(IndexError::NoValidPosts {
            root: root_dir.to_path_buf(),
            found: collection.found,
        });
    }

    let rendered = render_index(config, &collection.records);
    write_index(&output_file, &rendered).map_err(|err| IndexError::Write {
        path: output_file.clone(),
        err,
    })?;
    info!("Index written to {}", output_file.display());

    Ok(IndexSummary {
        found: collection.found,
        processed: collection.records.len(),
        output_file,
    })
}

/// The output file is always excluded on top of the configured paths.
pub fn excluded_paths(config: &Config) -> Vec<PathBuf> {
    let mut excluded = vec![config.paths.output_file.clone()];
    excluded.extend(config.paths.exclude.iter().cloned());
    excluded
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use crate::test_data::{NO_FRONTMATTER, POST_DATA, UNTERMINATED_FRONTMATTER};

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) -> io::Result<()> {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap())?;
        fs::write(path, content)
    }

    #[test]
    fn test_collect_skips_invalid_posts() -> io::Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();
        write(root, "posts/flaky_ci.md", POST_DATA)?;
        write(root, "posts/notes.md", NO_FRONTMATTER)?;
        write(root, "posts/wip.md", UNTERMINATED_FRONTMATTER)?;
        write(root, "README.md", "---\ntitle: not a post\n---\n")?;

        let collection = collect_posts(root, excluded_paths(&Config::default())).unwrap();
        assert_eq!(collection.found, 3);
        assert_eq!(collection.records.len(), 1);
        assert_eq!(collection.records[0].identity.relative_path, "posts/flaky_ci.md");
        Ok(())
    }

    #[test]
    fn test_collect_skips_unreadable_posts() -> io::Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();
        write(root, "good.md", POST_DATA)?;
        fs::write(root.join("bad.md"), [0xffu8, 0xfe, 0x00])?;

        let collection = collect_posts(root, vec![]).unwrap();
        assert_eq!(collection.found, 2);
        assert_eq!(collection.records.len(), 1);
        assert_eq!(collection.records[0].identity.relative_path, "good.md");
        Ok(())
    }

    #[test]
    fn test_generate_index() -> io::Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();
        write(root, "posts/flaky_ci.md", POST_DATA)?;
        write(root, "posts/newer.md", "---\ntitle: Newer\ncreated: 2025-07-18\ncategories: [DevOps]\n---\n")?;
        write(root, "README.md", "old index")?;

        let config = Config::default();
        let summary = generate_index(root, &config).unwrap();
        assert_eq!(summary.found, 2);
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.output_file, root.join("README.md"));

        let readme = fs::read_to_string(root.join("README.md"))?;
        assert_eq!(readme, render_index(&config, &collect_posts(root, excluded_paths(&config)).unwrap().records));
        assert!(readme.contains("### DevOps\n\n- [Fixing a flaky CI job, for good](posts/flaky_ci.md)\n- [Newer](posts/newer.md)\n"));
        assert!(readme.contains("- **Total Posts:** 2\n- **Categories:** 1\n- **Most Recent:** July 18, 2025\n"));
        assert!(!root.join(".README.md.tmp").exists());

        // Same tree, same output
        generate_index(root, &config).unwrap();
        assert_eq!(fs::read_to_string(root.join("README.md"))?, readme);
        Ok(())
    }

    #[test]
    fn test_no_valid_posts_keeps_old_index() -> io::Result<()> {
        let dir = TempDir::new()?;
        let root = dir.path();
        write(root, "notes.md", NO_FRONTMATTER)?;
        write(root, "README.md", "old index")?;

        match generate_index(root, &Config::default()) {
            Err(IndexError::NoValidPosts { found, .. }) => assert_eq!(found, 1),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(fs::read_to_string(root.join("README.md"))?, "old index");
        Ok(())
    }

    #[test]
    fn test_missing_root() {
        let result = generate_index(Path::new("/this/directory/does/not/exist"), &Config::default());
        assert!(matches!(result, Err(IndexError::Scan { .. })));
    }
}
