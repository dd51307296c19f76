pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{validate_incident, validate_new_page, validate_save, Slug};
pub use services::StatusPageService;
