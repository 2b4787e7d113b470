//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use fornecedores_api::{
    config::{AppConfig, AppState},
    routes,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Carrega o .env antes do logger, para que RUST_LOG dele valha.
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let bind_addr = config.bind_addr.clone();

    // Se a configuração ou o banco falharem, a aplicação não deve iniciar.
    let app_state = AppState::new(config).await?;
    tracing::info!(
        page_size = app_state.config.page_size,
        query_case_sensitive = app_state.config.query_case_sensitive,
        default_locale = %app_state.config.default_locale,
        "Configuração da listagem de fornecedores carregada"
    );
    let app = routes::build_router(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
