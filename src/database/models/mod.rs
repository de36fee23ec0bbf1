pub mod category;
pub mod post;
pub mod tag;
pub mod user;

pub use category::{PostCategory, PostCategoryDetail};
pub use post::{Post, PostDetail, PostStatus};
pub use tag::{PostTagRow, Tag, TagDetail};
pub use user::{User, UserRole};

use serde::{Deserialize, Serialize};

/// Moderation status for admin-managed vocabularies (categories, tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentStatus {
    Active,
    Inactive,
}
