use core_config::{app_info, env_flag, env_parse, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Where tasks are stored, chosen by `TASK_STORE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TaskStoreBackend {
    #[default]
    Memory,
    Postgres,
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: TaskStoreBackend,
    /// Only loaded for the postgres backend
    pub database: Option<PostgresConfig>,
    pub run_migrations: bool,
    pub mock_graphql: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let store = env_parse("TASK_STORE", TaskStoreBackend::default())?;

        let database = match store {
            TaskStoreBackend::Postgres => Some(PostgresConfig::from_env()?), // DATABASE_URL required
            TaskStoreBackend::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            store,
            database,
            run_migrations: env_flag("DB_RUN_MIGRATIONS", true)?,
            mock_graphql: env_flag("MOCK_GRAPHQL", false)?,
        })
    }

    /// The fixture endpoint is never served outside development.
    pub fn mock_graphql_enabled(&self) -> bool {
        self.mock_graphql && self.environment.is_development()
    }
}
