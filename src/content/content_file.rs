use std::{fs, io};
use std::path::{Path, PathBuf};

use crate::content::frontmatter::{extract, ExtractError};
use crate::content::{PostIdentity, PostRecord};

pub struct ContentFile {
    pub identity: PostIdentity,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(root_dir: &Path, file_path: PathBuf) -> io::Result<ContentFile> {
        let identity = Self::identity_of(root_dir, &file_path);
        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            identity,
            file_path,
            raw_content,
        })
    }

    pub fn to_record(&self) -> Result<PostRecord, ExtractError> {
        extract(&self.raw_content, self.identity.clone())
    }

    fn identity_of(root_dir: &Path, file_path: &Path) -> PostIdentity {
        let file_name = file_path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let relative = file_path.strip_prefix(root_dir).unwrap_or(file_path);
        let relative_path = relative.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        PostIdentity {
            file_name,
            relative_path,
        }
    }
}
