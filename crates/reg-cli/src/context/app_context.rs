use anyhow::Context;
use reg_config::RegistrarConfig;
use reg_db::service::RegistrarService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RegistrarService,
    pub config: RegistrarConfig,
}

impl AppContext {
    /// Open the database named by `db_override` or `config.database.path`,
    /// creating its parent directory when needed.
    pub async fn init(mut config: RegistrarConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        if let Some(path) = db_override {
            config.database.path = path.to_string();
        }

        if let Some(parent) = config.database.parent_dir() {
            std::fs::create_dir_all(&parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = RegistrarService::new_local(&config.database.path, config.enrollment)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        tracing::debug!(path = %config.database.path, "registrar service ready");

        Ok(Self { service, config })
    }
}
