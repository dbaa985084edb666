use std::path::PathBuf;

use compact_str::CompactString;
use derive_more::Deref;
use strum::IntoStaticStr;

/// Directory every request target is resolved against.
///
/// Targets are appended as plain strings: no normalisation, no `..` checks and
/// no symlink checks are done, so a target can reach outside the root.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct DocumentRoot(String);

impl DocumentRoot {
    pub fn new(root: impl Into<String>) -> Self {
        Self(root.into())
    }

    pub fn join(&self, target: &str) -> PathBuf {
        let mut path = String::with_capacity(self.0.len() + target.len());
        path.push_str(&self.0);
        path.push_str(target);
        path.into()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum ContentType {
    /// Used for every image extension, gif and png included.
    #[strum(serialize = "image/jpeg")]
    Image,
    #[strum(serialize = "text/html")]
    Html,
}

impl ContentType {
    const IMAGE_MARKERS: [&'static str; 3] = [".gif", ".jpg", ".png"];

    /// Case-sensitive substring match anywhere in the name, not an extension check.
    pub fn for_resource(name: &str) -> Self {
        if Self::IMAGE_MARKERS.iter().any(|m| name.contains(m)) {
            Self::Image
        } else {
            Self::Html
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// What a request target points at on disk, looked up once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub path: PathBuf,
    pub name: CompactString,
    len: Option<u64>,
}

impl ResolvedResource {
    /// Only regular files exist for this server; directories and anything that
    /// cannot be stat'ed resolve as absent.
    pub async fn resolve(root: &DocumentRoot, target: &str) -> Self {
        let path = root.join(target);
        let len = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(meta.len()),
            _ => None,
        };

        Self {
            path,
            name: target.into(),
            len,
        }
    }

    pub fn exists(&self) -> bool {
        self.len.is_some()
    }

    /// Zero when the resource does not exist.
    pub fn content_length(&self) -> u64 {
        self.len.unwrap_or(0)
    }

    pub fn content_type(&self) -> ContentType {
        ContentType::for_resource(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_is_plain_concatenation() {
        let root = DocumentRoot::new("/srv");
        assert_eq!(root.join("/index.html"), PathBuf::from("/srv/index.html"));
        assert_eq!(root.join("/../etc/passwd"), PathBuf::from("/srv/../etc/passwd"));
        assert_eq!(&*root, "/srv");
    }

    #[test]
    fn content_type_by_substring() {
        assert_eq!(ContentType::for_resource("/cat.gif"), ContentType::Image);
        assert_eq!(ContentType::for_resource("/cat.png"), ContentType::Image);
        assert_eq!(ContentType::for_resource("/cat.jpg.html"), ContentType::Image);
        assert_eq!(ContentType::for_resource("/cat.JPG"), ContentType::Html);
        assert_eq!(ContentType::for_resource("/cat.jpeg"), ContentType::Html);
        assert_eq!(ContentType::for_resource("/index.html"), ContentType::Html);
        assert_eq!(ContentType::Image.as_str(), "image/jpeg");
    }

    #[tokio::test]
    async fn resolve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), b"hi").unwrap();
        let root = DocumentRoot::new(dir.path().to_str().unwrap());

        let resource = ResolvedResource::resolve(&root, "/index.html").await;
        assert!(resource.exists());
        assert_eq!(resource.content_length(), 2);
        assert_eq!(resource.content_type(), ContentType::Html);
    }

    #[tokio::test]
    async fn resolve_missing_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let root = DocumentRoot::new(dir.path().to_str().unwrap());

        let missing = ResolvedResource::resolve(&root, "/missing.html").await;
        assert!(!missing.exists());
        assert_eq!(missing.content_length(), 0);

        let directory = ResolvedResource::resolve(&root, "/sub").await;
        assert!(!directory.exists());
        assert_eq!(directory.content_length(), 0);
    }
}
