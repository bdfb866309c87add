pub use super::projects::Entity as Projects;
pub use super::templates::Entity as Templates;
pub use super::users::Entity as Users;
