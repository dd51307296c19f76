pub mod incident;
pub mod page;

pub use incident::{validate_incident, Incident, INCIDENT_STYLES};
pub use page::{
    validate_new_page, validate_save, GroupMonitor, NewStatusPage, PublicGroup, Slug,
    StatusPageSettings, THEMES,
};
