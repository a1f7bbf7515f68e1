mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
use repos::Repos;
pub use services::{IMailService, InMemoryMailService, Mail, SmtpMailService, UnconfiguredMailService};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::warn;

#[derive(Clone)]
pub struct NotifyContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mail: Arc<dyn IMailService>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl NotifyContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let mail = create_mail_service(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mail,
        }
    }
}

fn create_mail_service(config: &Config) -> Arc<dyn IMailService> {
    match &config.smtp {
        Some(smtp) => match SmtpMailService::new(smtp) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                warn!(
                    "Unable to create the SMTP transport: {:?}. Email delivery will be disabled.",
                    e
                );
                Arc::new(UnconfiguredMailService {})
            }
        },
        None => Arc::new(UnconfiguredMailService {}),
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NotifyContext {
    NotifyContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed by inmemory repositories and a recording mail
/// transport. Used by tests.
pub fn setup_inmemory_context() -> NotifyContext {
    NotifyContext {
        repos: Repos::create_inmemory(),
        config: Config::new(),
        sys: Arc::new(RealSys {}),
        mail: Arc::new(InMemoryMailService::new()),
    }
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
