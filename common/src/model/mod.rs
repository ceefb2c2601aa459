pub mod campaign;
pub mod csv;
pub mod dashboard;
pub mod datasource;
pub mod place_holder;
pub mod section;
pub mod template;
pub mod user;
pub mod validation;
