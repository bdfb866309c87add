use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::UploadConfig;
use crate::domain::UserId;
use crate::services::upload_service::{
    ALLOWED_EXTENSIONS, UploadError, UploadResult, UploadService,
};
use crate::storage::ObjectStore;

const MIB: u64 = 1024 * 1024;

/// Lower-cased extension of `filename` if it is an allowed image type.
/// Everything after the last dot of the final path component counts, so a
/// bare `.png` is accepted.
#[must_use]
pub fn image_extension(filename: &str) -> Option<String> {
    let name = Path::new(filename).file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// `<YYYYMMDD>-<8 hex>.<ext>`, dated in UTC.
#[must_use]
pub fn generate_filename(ext: &str) -> String {
    format!(
        "{}-{:08x}.{}",
        chrono::Utc::now().format("%Y%m%d"),
        rand::random::<u32>(),
        ext
    )
}

#[must_use]
pub fn user_prefix(user_id: &UserId) -> String {
    format!("uploads/{user_id}/")
}

#[must_use]
pub fn object_key(user_id: &UserId, filename: &str) -> String {
    format!("{}{}", user_prefix(user_id), filename)
}

#[must_use]
pub fn content_type_for(ext: &str) -> String {
    mime_guess::from_ext(ext).first_or_octet_stream().to_string()
}

fn owns_key(user_id: &UserId, key: &str) -> bool {
    key.strip_prefix(&user_prefix(user_id))
        .is_some_and(|rest| !rest.is_empty() && !rest.split('/').any(|seg| seg.is_empty() || seg == ".."))
}

pub struct DefaultUploadService {
    store: Arc<dyn ObjectStore>,
    config: UploadConfig,
}

impl DefaultUploadService {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, config: UploadConfig) -> Self {
        Self { store, config }
    }

    fn too_large(&self) -> UploadError {
        UploadError::TooLarge {
            max_mb: self.config.max_bytes.div_ceil(MIB),
        }
    }
}

#[async_trait]
impl UploadService for DefaultUploadService {
    fn max_bytes(&self) -> u64 {
        self.config.max_bytes
    }

    fn check_filename(&self, filename: &str) -> Result<String, UploadError> {
        image_extension(filename).ok_or(UploadError::UnsupportedType)
    }

    async fn upload_image(
        &self,
        user_id: &UserId,
        filename: &str,
        body: Vec<u8>,
    ) -> Result<UploadResult, UploadError> {
        let ext = self.check_filename(filename)?;

        let size = body.len() as u64;
        if size > self.config.max_bytes {
            return Err(self.too_large());
        }

        let key = object_key(user_id, &generate_filename(&ext));
        self.store.put(&key, body, &content_type_for(&ext)).await?;

        info!(key = %key, size, "Stored upload");
        metrics::counter!("uploads_total").increment(1);
        metrics::counter!("upload_bytes_total").increment(size);

        Ok(UploadResult {
            url: self.store.public_url(&key),
            key,
            filename: filename.to_string(),
            size,
        })
    }

    async fn delete_image(&self, user_id: &UserId, key: &str) -> Result<(), UploadError> {
        let key = key.trim();
        if !owns_key(user_id, key) {
            return Err(UploadError::NotFound);
        }

        self.store.delete(key).await?;
        info!(key = %key, "Deleted upload");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryObjectStore;

    fn service(max_bytes: u64) -> (DefaultUploadService, Arc<MemoryObjectStore>) {
        let store = Arc::new(MemoryObjectStore::default());
        let svc = DefaultUploadService::new(store.clone(), UploadConfig { max_bytes });
        (svc, store)
    }

    #[test]
    fn extensions_are_checked_case_insensitively() {
        for name in ["a.png", "a.PNG", "b.jpg", "b.JpG", "c.jpeg", "d.WEBP"] {
            assert!(image_extension(name).is_some(), "{name}");
        }
        for name in ["a.gif", "a.bmp", "a.pdf", "png", "a.png.exe", ""] {
            assert!(image_extension(name).is_none(), "{name}");
        }
        assert_eq!(image_extension("Photo.JPEG").as_deref(), Some("jpeg"));
    }

    #[test]
    fn dotfile_name_is_its_own_extension() {
        assert_eq!(image_extension(".png").as_deref(), Some("png"));
        assert_eq!(image_extension(".PNG").as_deref(), Some("png"));
        assert_eq!(image_extension("shots/.webp").as_deref(), Some("webp"));
        assert!(image_extension(".gif").is_none());
    }

    #[test]
    fn filename_has_date_and_random_suffix() {
        let name = generate_filename("png");
        let (date, rest) = name.split_once('-').unwrap();
        assert_eq!(date.len(), 8);
        assert!(date.chars().all(|c| c.is_ascii_digit()));
        let (hex, ext) = rest.split_once('.').unwrap();
        assert_eq!(hex.len(), 8);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(ext, "png");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("png"), "image/png");
        assert_eq!(content_type_for("jpg"), "image/jpeg");
        assert_eq!(content_type_for("jpeg"), "image/jpeg");
        assert_eq!(content_type_for("webp"), "image/webp");
        assert_eq!(content_type_for("zzz-unknown"), "application/octet-stream");
    }

    #[tokio::test]
    async fn same_filename_twice_yields_distinct_keys() {
        let (svc, store) = service(MIB);
        let user = UserId::generate();

        let a = svc.upload_image(&user, "shot.png", vec![1]).await.unwrap();
        let b = svc.upload_image(&user, "shot.png", vec![2]).await.unwrap();

        assert_ne!(a.key, b.key);
        assert!(a.key.starts_with(&format!("uploads/{user}/")));
        assert_eq!(a.filename, "shot.png");
        assert_eq!(store.len().await, 2);
        assert_eq!(
            store.get(&a.key).await.unwrap().content_type,
            "image/png"
        );
    }

    #[tokio::test]
    async fn empty_file_with_valid_extension_is_stored() {
        let (svc, store) = service(MIB);
        let result = svc
            .upload_image(&UserId::generate(), "blank.webp", Vec::new())
            .await
            .unwrap();
        assert_eq!(result.size, 0);
        assert!(store.get(&result.key).await.unwrap().body.is_empty());
    }

    #[tokio::test]
    async fn rejects_bad_type_and_oversized_body() {
        let (svc, store) = service(4);
        let user = UserId::generate();

        assert!(matches!(
            svc.upload_image(&user, "doc.pdf", vec![0]).await,
            Err(UploadError::UnsupportedType)
        ));
        assert!(matches!(
            svc.upload_image(&user, "big.png", vec![0; 5]).await,
            Err(UploadError::TooLarge { .. })
        ));
        assert!(svc.upload_image(&user, "ok.png", vec![0; 4]).await.is_ok());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn delete_is_limited_to_own_prefix() {
        let (svc, store) = service(MIB);
        let owner = UserId::generate();
        let other = UserId::generate();
        let uploaded = svc.upload_image(&owner, "a.png", vec![1]).await.unwrap();

        assert!(matches!(
            svc.delete_image(&other, &uploaded.key).await,
            Err(UploadError::NotFound)
        ));
        let escape = format!("uploads/{owner}/../{other}/x.png");
        assert!(matches!(
            svc.delete_image(&owner, &escape).await,
            Err(UploadError::NotFound)
        ));
        assert_eq!(store.len().await, 1);

        svc.delete_image(&owner, &uploaded.key).await.unwrap();
        assert!(store.is_empty().await);
    }
}
