mod create;
mod delete;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::{list, show};
pub use update::{change_status, update};
