use axum::extract::Multipart;

use crate::api::format::PostResponse;
use crate::api::validate::{validate_post_content, validate_post_title};
use crate::database::manager::DatabaseManager;
use crate::database::models::PostStatus;
use crate::database::repositories::{CategoryRepository, PostRepository, TagRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::storage::ImageStore;

use super::form::parse_post_form;
use super::utils::{ensure_tags_exist, load_post_response};

/// POST /api/posts - create a post (multipart form, optional image)
pub async fn create(user: AuthUser, multipart: Multipart) -> ApiResult<PostResponse> {
    let form = parse_post_form(multipart).await?;

    let title = form.title.ok_or_else(|| ApiError::bad_request("title is required"))?;
    let content = form.content.ok_or_else(|| ApiError::bad_request("content is required"))?;
    validate_post_title(&title)?;
    validate_post_content(&content)?;

    let status = form.status.unwrap_or(PostStatus::Draft);
    let category_uuid = form.category_uuid.flatten();
    let tag_uuids = form.tag_uuids.unwrap_or_default();

    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool.clone());

    if let Some(category_uuid) = category_uuid {
        CategoryRepository::new(pool.clone())
            .find(category_uuid)
            .await?
            .ok_or_else(|| ApiError::not_found("Post Category not found"))?;
    }

    ensure_tags_exist(&TagRepository::new(pool), &tag_uuids).await?;

    // Store the image only after all validation has passed
    let image_url = match &form.image {
        Some(image) => Some(ImageStore::from_config().save(&image.content_type, &image.bytes).await?),
        None => None,
    };

    let post = posts
        .insert(title.trim(), &content, status, user.uuid, category_uuid, image_url.as_deref())
        .await?;

    if !tag_uuids.is_empty() {
        posts.set_tags(post.uuid, &tag_uuids).await?;
    }

    let response = load_post_response(&posts, post.uuid).await?;
    Ok(ApiResponse::created(response))
}
