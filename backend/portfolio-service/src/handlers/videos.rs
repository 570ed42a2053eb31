/// Video endpoints
///
/// Public reads live under `/videos`; writes under `/admin/videos` take a
/// multipart form with `category`, `title`, `content` and the file `video`.
use super::parse_id;
use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use crate::middleware::AdminAccount;
use crate::models::VideoMetadata;
use crate::services::{MediaService, Upload};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use bytes::BytesMut;
use futures::StreamExt;

const FILE_FIELD: &str = "video";

/// Parsed multipart body
#[derive(Debug, Default)]
struct VideoForm {
    category: Option<String>,
    title: Option<String>,
    content: Option<String>,
    upload: Option<Upload>,
}

impl VideoForm {
    /// Metadata with absent fields taken from `fallback`
    fn metadata(&self, fallback: Option<&VideoMetadata>) -> VideoMetadata {
        let pick = |value: &Option<String>, old: Option<&String>| {
            value
                .clone()
                .or_else(|| old.cloned())
                .unwrap_or_default()
        };

        VideoMetadata {
            category: pick(&self.category, fallback.map(|m| &m.category)),
            title: pick(&self.title, fallback.map(|m| &m.title)),
            content: pick(&self.content, fallback.map(|m| &m.content)),
        }
    }
}

/// Read the whole form, enforcing the upload size limit across all parts
async fn read_form(mut payload: Multipart, max_bytes: usize) -> Result<VideoForm> {
    let mut form = VideoForm::default();
    let mut total_bytes: usize = 0;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?;

        let name = field.name().unwrap_or_default().to_string();
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|f| f.to_string());
        let content_type = field.content_type().map(|m| m.to_string());

        let mut data = BytesMut::new();
        while let Some(chunk) = field.next().await {
            let chunk =
                chunk.map_err(|e| AppError::BadRequest(format!("Error reading upload: {e}")))?;
            total_bytes += chunk.len();
            if total_bytes > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "Upload exceeds the {max_bytes} byte limit"
                )));
            }
            data.extend_from_slice(&chunk);
        }

        match name.as_str() {
            FILE_FIELD => {
                form.upload = Some(Upload {
                    filename,
                    content_type,
                    bytes: data.freeze(),
                });
            }
            "category" | "title" | "content" => {
                let text = String::from_utf8(data.to_vec())
                    .map_err(|_| AppError::BadRequest(format!("Field {name} must be UTF-8")))?;
                let text = text.trim().to_string();
                match name.as_str() {
                    "category" => form.category = Some(text),
                    "title" => form.title = Some(text),
                    _ => form.content = Some(text),
                }
            }
            other => {
                tracing::debug!(field = %other, "ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// GET /videos
pub async fn list_videos(media: web::Data<MediaService>) -> Result<HttpResponse> {
    let videos = media.list().await?;
    Ok(HttpResponse::Ok().json(videos))
}

/// GET /videos/{id}
pub async fn get_video(
    media: web::Data<MediaService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "video")?;
    let video = media.get(id).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// GET /admin/videos/{id}
pub async fn admin_get_video(
    media: web::Data<MediaService>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    get_video(media, path).await
}

/// POST /admin/videos
pub async fn create_video(
    media: web::Data<MediaService>,
    config: web::Data<MediaConfig>,
    admin: AdminAccount,
    payload: Multipart,
) -> Result<HttpResponse> {
    let form = read_form(payload, config.max_upload_bytes).await?;
    let metadata = form.metadata(None);
    let upload = form
        .upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing file field '{FILE_FIELD}'")))?;

    let video = media.create(metadata, upload).await?;
    tracing::info!(admin_id = %admin.0.account.id, video_id = %video.id, "video uploaded");
    Ok(HttpResponse::Created().json(video))
}

/// PUT /admin/videos/{id}
pub async fn update_video(
    media: web::Data<MediaService>,
    config: web::Data<MediaConfig>,
    _admin: AdminAccount,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "video")?;
    let existing = media.get(id).await?;
    let current = VideoMetadata {
        category: existing.category,
        title: existing.title,
        content: existing.content,
    };

    let form = read_form(payload, config.max_upload_bytes).await?;
    let metadata = form.metadata(Some(&current));

    let video = media.update(id, metadata, form.upload).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// DELETE /admin/videos/{id}
pub async fn delete_video(
    media: web::Data<MediaService>,
    _admin: AdminAccount,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, "video")?;
    media.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
