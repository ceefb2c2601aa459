//! Domain core shared by the dashboard frontend.
//!
//! Everything in this crate is plain Rust with no browser dependency: the
//! template content model, the campaign wizard state machine, the CSV preview
//! parser, and the collaborator traits the UI is wired against.

pub mod config;
pub mod error;
pub mod model;
pub mod requests;
pub mod services;
pub mod submission;
pub mod wizard;
