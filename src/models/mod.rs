pub mod project;
pub mod template;
pub mod user;

pub use project::{Project, ProjectPatch};
pub use template::{NewTemplate, Template};
pub use user::User;
