//! Application state management.
//!
//! Built once in `main` and shared by the route builders. Everything inside
//! is a cheap handle (`Arc` or pool), so cloning the state never copies data.

use std::sync::Arc;

use database::postgres::DatabaseConnection;
use domain_scim::ScimStore;
use domain_tasks::{build_schema, TaskSchema, TaskService};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub tasks: TaskService,
    pub schema: TaskSchema,
    pub scim: Arc<ScimStore>,
    /// Present only with the postgres task store
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        tasks: TaskService,
        db: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            config,
            schema: build_schema(tasks.clone()),
            tasks,
            scim: Arc::new(ScimStore::new()),
            db,
        }
    }
}
