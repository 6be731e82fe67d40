use std::convert::Infallible;
use std::path::Path as StdPath;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tokio::fs;

use crate::error::{Error, Result};

pub const MEDIA_PREFIX: &str = "/media";

pub const UPLOAD_FOLDERS: [&str; 5] = ["banners", "links_icons", "news", "leadership", "uploads"];

const ALLOWED_EXTS: [&str; 6] = ["jpg", "jpeg", "png", "webp", "gif", "svg"];

/// Origin of the current request, used to turn stored media paths into
/// absolute URLs. Absent when the request carries no `Host` header.
#[derive(Debug, Clone, Default)]
pub struct MediaBase(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for MediaBase
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        let host = parts
            .headers
            .get("x-forwarded-host")
            .or_else(|| parts.headers.get(header::HOST))
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        let scheme = parts
            .headers
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .filter(|value| *value == "https" || *value == "http")
            .unwrap_or("http");

        Ok(MediaBase(host.map(|host| format!("{}://{}", scheme, host))))
    }
}

impl MediaBase {
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        match &self.0 {
            Some(origin) => format!("{}{}/{}", origin, MEDIA_PREFIX, path),
            None => format!("{}/{}", MEDIA_PREFIX, path),
        }
    }

    pub fn opt_url(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| self.url(p))
    }
}

fn check_image(ext: &str, data: &[u8]) -> Result<()> {
    if !ALLOWED_EXTS.contains(&ext) {
        return Err(Error::BadRequest(format!("File type .{} is not allowed", ext)));
    }
    let magic_ok = match ext {
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8]),
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "gif" => data.starts_with(b"GIF8"),
        "webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",
        "svg" => {
            let head = String::from_utf8_lossy(&data[..data.len().min(512)]).to_lowercase();
            head.contains("<svg")
        }
        _ => false,
    };
    if !magic_ok {
        return Err(Error::BadRequest(format!("Invalid .{} file content", ext)));
    }
    Ok(())
}

/// Stores an uploaded image under `media_root/folder/` and returns its path
/// relative to `media_root`.
pub async fn save_upload(media_root: &str, folder: &str, filename: &str, data: &[u8]) -> Result<String> {
    if !UPLOAD_FOLDERS.contains(&folder) {
        return Err(Error::BadRequest(format!("Unknown upload folder '{}'", folder)));
    }

    let ext = StdPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    check_image(&ext, data)?;

    let dir = StdPath::new(media_root).join(folder);
    fs::create_dir_all(&dir).await?;

    let relative = format!("{}/{}.{}", folder, uuid::Uuid::new_v4(), ext);
    fs::write(StdPath::new(media_root).join(&relative), data)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write upload {}: {}", relative, e);
            Error::Internal(format!("Failed to save file: {}", e))
        })?;

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_absolute_urls_when_origin_known() {
        let base = MediaBase(Some("https://suv.uz".into()));
        assert_eq!(base.url("news/a.jpg"), "https://suv.uz/media/news/a.jpg");
        assert_eq!(MediaBase(None).url("/news/a.jpg"), "/media/news/a.jpg");
        assert_eq!(base.url("https://cdn.example/x.png"), "https://cdn.example/x.png");
        assert_eq!(base.opt_url(Some("")), None);
    }

    #[test]
    fn rejects_mismatched_magic_bytes() {
        assert!(check_image("png", &[0x89, 0x50, 0x4E, 0x47, 0x0D]).is_ok());
        assert!(check_image("png", b"GIF89a").is_err());
        assert!(check_image("exe", b"MZ").is_err());
    }

    #[tokio::test]
    async fn saves_into_folder_under_media_root() {
        let root = std::env::temp_dir().join(format!("suv-media-{}", uuid::Uuid::new_v4()));
        let root = root.to_string_lossy().to_string();
        let path = save_upload(&root, "banners", "Hero.PNG", &[0x89, 0x50, 0x4E, 0x47, 0x00])
            .await
            .unwrap();
        assert!(path.starts_with("banners/") && path.ends_with(".png"));
        assert!(StdPath::new(&root).join(&path).exists());

        let err = save_upload(&root, "../etc", "a.png", &[0x89, 0x50, 0x4E, 0x47]).await;
        assert!(err.is_err());
        let _ = std::fs::remove_dir_all(&root);
    }
}
