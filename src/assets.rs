use std::path::{Component, Path, PathBuf};

use futures::future::join_all;
use log::debug;
use url::Url;

use crate::config::Config;
use crate::models::{
    ImageRef, NewsItem, ResolvedItem, ResolvedSnapshot, SnapshotPayload, UsableImage,
};

pub struct AssetResolver {
    asset_dir: PathBuf,
    base_path: String,
}

/// Empty, or `/segment[/segment…]` with no trailing slash.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Interprets `src` relative to the asset store. Anything that could step
/// outside of it is refused.
fn relative_asset_path(src: &str) -> Option<PathBuf> {
    let rel = Path::new(src.trim_start_matches('/'));
    let mut clean = PathBuf::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

impl AssetResolver {
    pub fn new(asset_dir: PathBuf, base_path: &str) -> Self {
        AssetResolver {
            asset_dir,
            base_path: normalize_base_path(base_path),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.asset_dir.clone(), cfg.base_path.as_deref().unwrap_or(""))
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Public URL for a path inside the asset store, each segment
    /// percent-encoded.
    pub fn public_url(&self, rel: &Path) -> Option<String> {
        let mut url = Url::parse("file:///").ok()?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .extend(rel.components().map(|c| c.as_os_str().to_string_lossy()));
        Some(format!("{}{}", self.base_path, url.path()))
    }

    /// A usable image, or `None` to render the item as text only.
    pub async fn resolve(&self, image: Option<&ImageRef>) -> Option<UsableImage> {
        let image = image?;
        let Some(rel) = relative_asset_path(&image.src) else {
            debug!("Refusing image path {:?}", image.src);
            return None;
        };

        match tokio::fs::metadata(self.asset_dir.join(&rel)).await {
            Ok(meta) if meta.is_file() => Some(UsableImage {
                url: self.public_url(&rel)?,
                alt: image.alt.clone(),
                width: image.width,
                height: image.height,
            }),
            Ok(_) => {
                debug!("Image {} is not a file", image.src);
                None
            }
            Err(e) => {
                debug!("Image {} unavailable: {}", image.src, e);
                None
            }
        }
    }

    pub async fn resolve_item(&self, item: &NewsItem) -> ResolvedItem {
        ResolvedItem {
            text: item.text.clone(),
            url: item.url.clone(),
            image: self.resolve(item.image.as_ref()).await,
        }
    }

    async fn resolve_column(&self, items: &[NewsItem]) -> Vec<ResolvedItem> {
        join_all(items.iter().map(|item| self.resolve_item(item))).await
    }

    pub async fn resolve_snapshot(&self, payload: &SnapshotPayload) -> ResolvedSnapshot {
        let (main_headline, top_stories, left_column, center_column, right_column) = tokio::join!(
            self.resolve_item(&payload.main_headline),
            self.resolve_column(&payload.top_stories),
            self.resolve_column(&payload.left_column),
            self.resolve_column(&payload.center_column),
            self.resolve_column(&payload.right_column),
        );

        ResolvedSnapshot {
            main_headline,
            top_stories,
            left_column,
            center_column,
            right_column,
            last_updated: payload.last_updated.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn image(src: &str) -> ImageRef {
        ImageRef {
            src: src.to_string(),
            alt: "alt".to_string(),
            width: 600,
            height: 400,
        }
    }

    fn item(text: &str, src: Option<&str>) -> NewsItem {
        NewsItem {
            text: text.to_string(),
            url: format!("https://example.com/{text}"),
            image: src.map(image),
        }
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path(""), "");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path("byte-report"), "/byte-report");
        assert_eq!(normalize_base_path("/byte-report/"), "/byte-report");
    }

    #[test]
    fn escaping_paths_are_refused() {
        assert_eq!(relative_asset_path("../secret.jpg"), None);
        assert_eq!(relative_asset_path("images/../../etc/passwd"), None);
        assert_eq!(relative_asset_path("/"), None);
        assert_eq!(relative_asset_path(""), None);
        assert_eq!(
            relative_asset_path("/images/./a.jpg"),
            Some(PathBuf::from("images/a.jpg"))
        );
    }

    #[tokio::test]
    async fn absent_reference_resolves_to_none() {
        let dir = tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path().to_path_buf(), "");
        assert_eq!(resolver.resolve(None).await, None);
    }

    #[tokio::test]
    async fn missing_file_resolves_to_none() {
        let dir = tempdir().unwrap();
        let resolver = AssetResolver::new(dir.path().to_path_buf(), "");
        assert_eq!(resolver.resolve(Some(&image("missing.jpg"))).await, None);

        fs::create_dir_all(dir.path().join("images")).unwrap();
        assert_eq!(resolver.resolve(Some(&image("images"))).await, None);
    }

    #[tokio::test]
    async fn existing_file_gets_a_prefixed_url() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images/2024-01-15")).unwrap();
        fs::write(dir.path().join("images/2024-01-15/test.jpg"), b"jpg").unwrap();

        let plain = AssetResolver::new(dir.path().to_path_buf(), "");
        let usable = plain
            .resolve(Some(&image("/images/2024-01-15/test.jpg")))
            .await
            .unwrap();
        assert_eq!(usable.url, "/images/2024-01-15/test.jpg");
        assert_eq!((usable.width, usable.height), (600, 400));

        let prefixed = AssetResolver::new(dir.path().to_path_buf(), "/byte-report/");
        let usable = prefixed
            .resolve(Some(&image("images/2024-01-15/test.jpg")))
            .await
            .unwrap();
        assert_eq!(usable.url, "/byte-report/images/2024-01-15/test.jpg");
    }

    #[tokio::test]
    async fn url_segments_are_percent_encoded() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images/top stories")).unwrap();
        fs::write(dir.path().join("images/a#1.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("images/top stories/b?.jpg"), b"jpg").unwrap();
        let resolver = AssetResolver::new(dir.path().to_path_buf(), "/byte-report");

        let hashed = resolver.resolve(Some(&image("images/a#1.jpg"))).await.unwrap();
        assert_eq!(hashed.url, "/byte-report/images/a%231.jpg");

        let spaced = resolver
            .resolve(Some(&image("/images/top stories/b?.jpg")))
            .await
            .unwrap();
        assert_eq!(spaced.url, "/byte-report/images/top%20stories/b%3F.jpg");
    }

    #[tokio::test]
    async fn snapshot_resolution_keeps_order_and_drops_broken_images() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), b"jpg").unwrap();
        let resolver = AssetResolver::new(dir.path().to_path_buf(), "");

        let payload = SnapshotPayload {
            main_headline: item("main", Some("a.jpg")),
            top_stories: vec![item("one", Some("gone.jpg")), item("two", None)],
            left_column: vec![item("left", Some("../a.jpg"))],
            center_column: vec![],
            right_column: vec![item("r1", Some("a.jpg")), item("r2", None)],
            last_updated: "2024-01-15T12:00:00Z".to_string(),
        };

        let resolved = resolver.resolve_snapshot(&payload).await;
        assert_eq!(resolved.main_headline.image.unwrap().url, "/a.jpg");
        let tops: Vec<_> = resolved.top_stories.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(tops, ["one", "two"]);
        assert!(resolved.top_stories.iter().all(|i| i.image.is_none()));
        assert!(resolved.left_column[0].image.is_none());
        assert!(resolved.center_column.is_empty());
        assert!(resolved.right_column[0].image.is_some());
        assert_eq!(resolved.last_updated, payload.last_updated);
    }
}
