// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{InMemorySupplierRepository, PgSupplierRepository, SupplierRepository},
    services::{auth::AuthService, SupplierService},
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub page_size: u64,
    pub query_case_sensitive: bool,
    pub db_max_connections: u32,
    pub default_locale: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Recebe a função de leitura para não depender do ambiente do processo nos testes.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET deve ser definido"))?;

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("PAGE_SIZE deve ser um inteiro positivo, recebido '{}'", raw))?,
            None => 5,
        };

        let query_case_sensitive = match lookup("QUERY_CASE_SENSITIVE") {
            Some(raw) => raw
                .parse::<bool>()
                .with_context(|| format!("QUERY_CASE_SENSITIVE inválido: '{}'", raw))?,
            None => false,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{}'", raw))?,
            None => 5,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            jwt_secret,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            page_size,
            query_case_sensitive,
            db_max_connections,
            default_locale: lookup("DEFAULT_LOCALE").unwrap_or_else(|| "pt".to_string()),
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub supplier_service: SupplierService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    /// Conecta ao banco (rodando as migrações) ou, sem `DATABASE_URL`, usa o repositório em memória.
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn SupplierRepository> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;

                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgSupplierRepository::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL ausente: usando repositório em memória (dados não persistem)");
                Arc::new(InMemorySupplierRepository::new())
            }
        };

        Ok(Self::with_repository(config, repo))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_repository(config: AppConfig, repo: Arc<dyn SupplierRepository>) -> Self {
        let auth_service = AuthService::new(config.jwt_secret.clone());
        let supplier_service =
            SupplierService::new(repo, config.page_size, config.query_case_sensitive);
        let i18n_store = Arc::new(I18nStore::new(&config.default_locale));

        Self {
            config: Arc::new(config),
            auth_service,
            supplier_service,
            i18n_store,
        }
    }
}
