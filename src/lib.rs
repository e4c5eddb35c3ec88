//! Registrar - guided onboarding for a new business account
//!
//! The library holds the wizard core: the registration model, per-step
//! validation schemas, step forms and the wizard controller. The `registrar`
//! binary mounts it in a terminal UI.

pub mod config;
pub mod form;
pub mod model;
pub mod schema;
pub mod wizard;
