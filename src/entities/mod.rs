pub mod prelude;

pub mod projects;
pub mod templates;
pub mod users;
