use uuid::Uuid;

use crate::api::format::{post_response, post_responses, PostResponse};
use crate::api::pagination::{Page, Paginated, PaginationMeta};
use crate::database::repositories::{PostListQuery, PostRepository, PostVisibility, TagRepository};
use crate::error::ApiError;

/// Load a post with author, category and tags, or 404.
pub async fn load_post_response(posts: &PostRepository, uuid: Uuid) -> Result<PostResponse, ApiError> {
    let detail = posts
        .detail(uuid)
        .await?
        .ok_or_else(|| ApiError::not_found("Post not found"))?;

    let tags = posts.tags_for_posts(&[uuid]).await?;
    Ok(post_response(&detail, &tags))
}

/// Run a visibility-scoped listing and shape the paginated envelope.
pub async fn list_posts(
    posts: &PostRepository,
    visibility: PostVisibility,
    category_uuid: Option<Uuid>,
    search: Option<String>,
    page: Page,
) -> Result<Paginated<PostResponse>, ApiError> {
    let query = PostListQuery {
        visibility,
        category_uuid,
        search: search.filter(|s| !s.trim().is_empty()),
        limit: page.limit,
        offset: page.offset(),
    };

    let (details, total) = posts.list(&query).await?;

    let post_uuids: Vec<Uuid> = details.iter().map(|d| d.uuid).collect();
    let tag_rows = posts.tags_for_posts(&post_uuids).await?;

    Ok(Paginated {
        data: post_responses(&details, &tag_rows),
        meta: PaginationMeta::new(total, page.page, page.limit),
    })
}

/// The posts embedded in a category detail response (no pagination meta).
pub async fn list_category_posts(
    posts: &PostRepository,
    visibility: PostVisibility,
    category_uuid: Uuid,
    page: Page,
) -> Result<Vec<PostResponse>, ApiError> {
    let result = list_posts(posts, visibility, Some(category_uuid), None, page).await?;
    Ok(result.data)
}

/// Validate that every referenced tag exists; mirrors the create/update rule.
pub async fn ensure_tags_exist(tags: &TagRepository, tag_uuids: &[Uuid]) -> Result<(), ApiError> {
    if tag_uuids.is_empty() {
        return Ok(());
    }

    let found = tags.count_existing(tag_uuids).await?;
    if found as usize != tag_uuids.len() {
        return Err(ApiError::not_found("One or more tags not found"));
    }

    Ok(())
}
