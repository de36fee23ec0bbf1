use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Post, PostDetail, PostStatus, PostTagRow};

/// Which posts a listing may see, derived from the caller's identity.
#[derive(Debug, Clone)]
pub enum PostVisibility {
    /// Anonymous: published posts only. Any requested status filter is ignored.
    Public,
    /// Admin: everything, optionally narrowed by status.
    Admin { status: Option<PostStatus> },
    /// Regular user: own posts plus everyone's published posts.
    User { user: Uuid, status: Option<PostStatus> },
    /// Own posts only (the my-posts listing).
    Author { user: Uuid, status: Option<PostStatus> },
}

#[derive(Debug, Clone)]
pub struct PostListQuery {
    pub visibility: PostVisibility,
    pub category_uuid: Option<Uuid>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Field-wise patch for post updates. Outer `None` leaves the column alone;
/// the inner option (category, image) writes NULL.
#[derive(Debug, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub category_uuid: Option<Option<Uuid>>,
    pub image_url: Option<Option<String>>,
}

const DETAIL_SELECT: &str = "SELECT p.id, p.uuid, p.title, p.content, p.image_url, p.status, \
     p.author_uuid, p.category_uuid, p.created_at, p.updated_at, \
     u.name AS author_name, u.email AS author_email, \
     c.id AS category_id, c.name AS category_name, c.status AS category_status, \
     c.created_by AS category_created_by, c.created_at AS category_created_at, \
     c.updated_at AS category_updated_at \
     FROM posts p \
     JOIN users u ON u.uuid = p.author_uuid \
     LEFT JOIN post_categories c ON c.uuid = p.category_uuid";

pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        title: &str,
        content: &str,
        status: PostStatus,
        author_uuid: Uuid,
        category_uuid: Option<Uuid>,
        image_url: Option<&str>,
    ) -> Result<Post, DatabaseError> {
        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, content, status, author_uuid, category_uuid, image_url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(title)
        .bind(content)
        .bind(status)
        .bind(author_uuid)
        .bind(category_uuid)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn find(&self, uuid: Uuid) -> Result<Option<Post>, DatabaseError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE uuid = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    /// Single post with author/category joined in.
    pub async fn detail(&self, uuid: Uuid) -> Result<Option<PostDetail>, DatabaseError> {
        let mut sql = String::from(DETAIL_SELECT);
        sql.push_str(" WHERE p.uuid = $1");

        let post = sqlx::query_as::<_, PostDetail>(&sql)
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    /// Page of posts plus the total count for the same filter set.
    pub async fn list(&self, query: &PostListQuery) -> Result<(Vec<PostDetail>, i64), DatabaseError> {
        let mut qb = QueryBuilder::new(DETAIL_SELECT);
        Self::push_where(&mut qb, query);
        qb.push(" ORDER BY p.created_at DESC LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset);

        let rows = qb.build_query_as::<PostDetail>().fetch_all(&self.pool).await?;

        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p");
        Self::push_where(&mut count_qb, query);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok((rows, total))
    }

    fn push_where(qb: &mut QueryBuilder<'_, Postgres>, query: &PostListQuery) {
        qb.push(" WHERE TRUE");

        match &query.visibility {
            PostVisibility::Public => {
                qb.push(" AND p.status = ").push_bind(PostStatus::Published);
            }
            PostVisibility::Admin { status } => {
                if let Some(status) = status {
                    qb.push(" AND p.status = ").push_bind(*status);
                }
            }
            PostVisibility::User { user, status } => {
                if let Some(status) = status {
                    qb.push(" AND p.status = ").push_bind(*status);
                }
                qb.push(" AND (p.author_uuid = ")
                    .push_bind(*user)
                    .push(" OR p.status = ")
                    .push_bind(PostStatus::Published)
                    .push(")");
            }
            PostVisibility::Author { user, status } => {
                qb.push(" AND p.author_uuid = ").push_bind(*user);
                if let Some(status) = status {
                    qb.push(" AND p.status = ").push_bind(*status);
                }
            }
        }

        if let Some(category_uuid) = query.category_uuid {
            qb.push(" AND p.category_uuid = ").push_bind(category_uuid);
        }

        if let Some(search) = &query.search {
            // Substring match; LIKE wildcards in the needle are taken literally enough
            let pattern = format!("%{}%", search);
            qb.push(" AND (p.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR p.content ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }

    pub async fn update(&self, uuid: Uuid, changes: &PostChanges) -> Result<Post, DatabaseError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE posts SET updated_at = now()");

        if let Some(title) = &changes.title {
            qb.push(", title = ").push_bind(title.clone());
        }
        if let Some(content) = &changes.content {
            qb.push(", content = ").push_bind(content.clone());
        }
        if let Some(status) = changes.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(category_uuid) = changes.category_uuid {
            qb.push(", category_uuid = ").push_bind(category_uuid);
        }
        if let Some(image_url) = &changes.image_url {
            qb.push(", image_url = ").push_bind(image_url.clone());
        }

        qb.push(" WHERE uuid = ").push_bind(uuid).push(" RETURNING *");

        match qb.build_query_as::<Post>().fetch_one(&self.pool).await {
            Ok(post) => Ok(post),
            Err(sqlx::Error::RowNotFound) => Err(DatabaseError::NotFound("Post not found".to_string())),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn update_status(&self, uuid: Uuid, status: PostStatus) -> Result<Post, DatabaseError> {
        match sqlx::query_as::<_, Post>(
            "UPDATE posts SET status = $2, updated_at = now() WHERE uuid = $1 RETURNING *",
        )
        .bind(uuid)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        {
            Ok(post) => Ok(post),
            Err(sqlx::Error::RowNotFound) => Err(DatabaseError::NotFound("Post not found".to_string())),
            Err(other) => Err(other.into()),
        }
    }

    pub async fn delete(&self, uuid: Uuid) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM posts WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace the post's tag set. An empty slice clears all tags.
    pub async fn set_tags(&self, post_uuid: Uuid, tag_uuids: &[Uuid]) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM post_tags WHERE post_uuid = $1")
            .bind(post_uuid)
            .execute(&mut *tx)
            .await?;

        if !tag_uuids.is_empty() {
            sqlx::query(
                "INSERT INTO post_tags (post_uuid, tag_uuid) \
                 SELECT $1, tag_uuid FROM unnest($2::uuid[]) AS t(tag_uuid)",
            )
            .bind(post_uuid)
            .bind(tag_uuids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Tags for a batch of posts, one query regardless of page size.
    pub async fn tags_for_posts(&self, post_uuids: &[Uuid]) -> Result<Vec<PostTagRow>, DatabaseError> {
        if post_uuids.is_empty() {
            return Ok(vec![]);
        }

        let rows = sqlx::query_as::<_, PostTagRow>(
            "SELECT pt.post_uuid, t.id, t.uuid, t.name, t.status, t.created_at \
             FROM post_tags pt \
             JOIN tags t ON t.uuid = pt.tag_uuid \
             WHERE pt.post_uuid = ANY($1) \
             ORDER BY t.name ASC",
        )
        .bind(post_uuids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
