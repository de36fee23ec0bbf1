// Multipart form parsing for post create/update
use axum::extract::Multipart;
use uuid::Uuid;

use crate::database::models::PostStatus;
use crate::error::ApiError;
use crate::storage::ImageStore;

#[derive(Debug)]
pub struct UploadedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Parsed post form. All fields optional so the same parser serves create
/// (which then enforces required fields) and update (full patch semantics).
/// `category_uuid: Some(None)` means "clear the category" (empty string on
/// the wire); `tag_uuids: Some(vec![])` means "remove all tags".
#[derive(Debug, Default)]
pub struct PostForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub category_uuid: Option<Option<Uuid>>,
    pub tag_uuids: Option<Vec<Uuid>>,
    pub remove_image: bool,
    pub image: Option<UploadedImage>,
}

pub async fn parse_post_form(mut multipart: Multipart) -> Result<PostForm, ApiError> {
    let mut form = PostForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "title" => form.title = Some(field.text().await?),
            "content" => form.content = Some(field.text().await?),
            "status" => form.status = Some(parse_status(&field.text().await?)?),
            "categoryUuid" => form.category_uuid = Some(parse_optional_uuid(&field.text().await?)?),
            "tagUuids" => form.tag_uuids = Some(parse_tag_uuids(&field.text().await?)?),
            "removeImage" => {
                let text = field.text().await?;
                form.remove_image = text == "true" || text == "1";
            }
            "image" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !ImageStore::is_allowed_type(&content_type) {
                    return Err(ApiError::bad_request(format!(
                        "Unsupported image type: {}",
                        content_type
                    )));
                }
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    form.image = Some(UploadedImage { content_type, bytes: bytes.to_vec() });
                }
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    Ok(form)
}

fn parse_status(text: &str) -> Result<PostStatus, ApiError> {
    match text {
        "DRAFT" => Ok(PostStatus::Draft),
        "PUBLISHED" => Ok(PostStatus::Published),
        other => Err(ApiError::bad_request(format!("Invalid post status: {}", other))),
    }
}

/// Empty string clears the category (the client sends "" to unset it).
fn parse_optional_uuid(text: &str) -> Result<Option<Uuid>, ApiError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    Uuid::parse_str(text.trim())
        .map(Some)
        .map_err(|_| ApiError::bad_request(format!("Invalid UUID: {}", text)))
}

/// Accepts a JSON array (`["a","b"]`) or a comma-separated list (`a, b`).
fn parse_tag_uuids(text: &str) -> Result<Vec<Uuid>, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return Ok(vec![]);
    }

    let raw: Vec<String> = match serde_json::from_str(trimmed) {
        Ok(values) => values,
        Err(_) => trimmed.split(',').map(|s| s.trim().to_string()).collect(),
    };

    raw.iter()
        .map(|s| Uuid::parse_str(s).map_err(|_| ApiError::bad_request(format!("Invalid tag UUID: {}", s))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_strict() {
        assert_eq!(parse_status("DRAFT").unwrap(), PostStatus::Draft);
        assert_eq!(parse_status("PUBLISHED").unwrap(), PostStatus::Published);
        assert!(parse_status("published").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn empty_category_clears() {
        assert_eq!(parse_optional_uuid("").unwrap(), None);
        assert_eq!(parse_optional_uuid("  ").unwrap(), None);
        let uuid = Uuid::new_v4();
        assert_eq!(parse_optional_uuid(&uuid.to_string()).unwrap(), Some(uuid));
        assert!(parse_optional_uuid("nope").is_err());
    }

    #[test]
    fn tag_uuids_accept_json_and_csv() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let json = format!("[\"{}\", \"{}\"]", a, b);
        assert_eq!(parse_tag_uuids(&json).unwrap(), vec![a, b]);

        let csv = format!("{}, {}", a, b);
        assert_eq!(parse_tag_uuids(&csv).unwrap(), vec![a, b]);

        assert_eq!(parse_tag_uuids("").unwrap(), Vec::<Uuid>::new());
        assert_eq!(parse_tag_uuids("[]").unwrap(), Vec::<Uuid>::new());
        assert!(parse_tag_uuids("not-a-uuid").is_err());
    }
}
