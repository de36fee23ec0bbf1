pub mod categories;
pub mod posts;
pub mod tags;
pub mod users;

pub use categories::CategoryRepository;
pub use posts::{PostChanges, PostListQuery, PostRepository, PostVisibility};
pub use tags::TagRepository;
pub use users::UserRepository;
