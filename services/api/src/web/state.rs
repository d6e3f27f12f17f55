//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use institute_core::{
    catalog::Catalog,
    ports::{CourseAdvisorService, RecordStore},
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub advisor: Arc<dyn CourseAdvisorService>,
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}
