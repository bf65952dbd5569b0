//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod data;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

#[cfg(test)]
mod test_support;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() {
    // Inicializa o logger (RUST_LOG controla o nível, padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("🔥 Configuração inválida: {:#}", e);
            std::process::exit(1);
        }
    };

    // Sem dataset não há painel: arquivo ausente ou malformado encerra aqui.
    let app_state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("🔥 Falha ao inicializar o estado da aplicação: {:#}", e);
            std::process::exit(1);
        }
    };

    let quality = app_state.dashboard_service.data_quality();
    tracing::info!(
        "📋 Qualidade dos dados: {} registros descartados no join, {} pedidos sem cliente",
        quality.dropped_total(),
        quality.orders_without_customer
    );

    let app = routes::app(app_state);

    // Inicia o servidor
    let addr = config.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("🔥 Falha ao iniciar o listener TCP em {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("🚀 Painel disponível em http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("🔥 Erro no servidor Axum: {}", e);
        std::process::exit(1);
    }
}
