//! Sheet upload collaborator.
//!
//! Uploaders turn encoded sheet bytes into a URL the simulator can load.
//! Failure is reported as `None`, not as an error: callers abort the batch.

use std::path::PathBuf;

use tracing::warn;

/// Destination for finished sheet images.
pub trait SheetUploader {
    /// Store `bytes` under `filename`. Returns the public URL, or `None` on failure.
    fn upload(&mut self, bytes: &[u8], filename: &str) -> Option<String>;
}

impl<U: SheetUploader + ?Sized> SheetUploader for &mut U {
    fn upload(&mut self, bytes: &[u8], filename: &str) -> Option<String> {
        (**self).upload(bytes, filename)
    }
}

/// Writes sheets into a local directory.
///
/// URLs are `<base_url>/<filename>` when a base URL is set (e.g. a directory
/// served over HTTP), otherwise `file://` URLs.
#[derive(Clone, Debug)]
pub struct DirectoryUploader {
    dir: PathBuf,
    base_url: Option<String>,
}

impl DirectoryUploader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

impl SheetUploader for DirectoryUploader {
    fn upload(&mut self, bytes: &[u8], filename: &str) -> Option<String> {
        let path = self.dir.join(filename);
        let written = std::fs::create_dir_all(&self.dir).and_then(|()| std::fs::write(&path, bytes));
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "sheet upload failed");
            return None;
        }
        match &self.base_url {
            Some(base) => Some(format!("{}/{}", base.trim_end_matches('/'), filename)),
            None => {
                let absolute = path.canonicalize().unwrap_or(path);
                Some(format!("file://{}", absolute.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_uploader_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut uploader = DirectoryUploader::new(dir.path());

        let url = uploader.upload(b"png", "sheet.png").unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("sheet.png"));
        assert_eq!(std::fs::read(dir.path().join("sheet.png")).unwrap(), b"png");
    }

    #[test]
    fn test_directory_uploader_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut uploader = DirectoryUploader::new(dir.path()).with_base_url("https://cdn.example/decks/");

        let url = uploader.upload(b"png", "a.png").unwrap();
        assert_eq!(url, "https://cdn.example/decks/a.png");
    }

    #[test]
    fn test_directory_uploader_failure_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let mut uploader = DirectoryUploader::new(&blocker);
        assert!(uploader.upload(b"png", "a.png").is_none());
    }
}
