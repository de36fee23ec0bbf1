mod create;
mod delete;
mod form;
mod list;
mod show;
mod status;
mod update;
mod utils;

pub use create::create;
pub use delete::delete;
pub use list::{list, list_mine, list_published};
pub use show::show;
pub use status::update_status;
pub use update::update;
pub use utils::list_category_posts;
