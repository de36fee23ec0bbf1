use axum::extract::{Multipart, Path};
use uuid::Uuid;

use crate::api::format::PostResponse;
use crate::api::validate::{validate_post_content, validate_post_title};
use crate::database::manager::DatabaseManager;
use crate::database::repositories::{CategoryRepository, PostChanges, PostRepository, TagRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::storage::ImageStore;

use super::form::parse_post_form;
use super::utils::{ensure_tags_exist, load_post_response};

/// PATCH /api/posts/:uuid - partial update (multipart form).
/// `tagUuids`, when present, replaces the whole tag set; `removeImage=true`
/// drops the stored image; a new `image` replaces the old file.
pub async fn update(user: AuthUser, Path(uuid): Path<Uuid>, multipart: Multipart) -> ApiResult<PostResponse> {
    let form = parse_post_form(multipart).await?;

    let pool = DatabaseManager::pool().await?;
    let posts = PostRepository::new(pool.clone());

    let post = posts
        .find(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    user.require_owner_or_admin(post.author_uuid, "update")?;

    if let Some(title) = &form.title {
        validate_post_title(title)?;
    }
    if let Some(content) = &form.content {
        validate_post_content(content)?;
    }

    if let Some(Some(category_uuid)) = form.category_uuid {
        CategoryRepository::new(pool.clone())
            .find(category_uuid)
            .await?
            .ok_or_else(|| ApiError::not_found("Category not found"))?;
    }

    if let Some(tag_uuids) = &form.tag_uuids {
        ensure_tags_exist(&TagRepository::new(pool.clone()), tag_uuids).await?;
    }

    let store = ImageStore::from_config();
    let mut image_url: Option<Option<String>> = None;

    if form.remove_image {
        if let Some(old) = &post.image_url {
            store.delete(old).await;
        }
        image_url = Some(None);
    }

    if let Some(image) = &form.image {
        if let Some(old) = &post.image_url {
            store.delete(old).await;
        }
        image_url = Some(Some(store.save(&image.content_type, &image.bytes).await?));
    }

    let changes = PostChanges {
        title: form.title,
        content: form.content,
        status: form.status,
        category_uuid: form.category_uuid,
        image_url,
    };

    posts.update(uuid, &changes).await?;

    if let Some(tag_uuids) = &form.tag_uuids {
        posts.set_tags(uuid, tag_uuids).await?;
    }

    let response = load_post_response(&posts, uuid).await?;
    Ok(ApiResponse::success(response))
}
