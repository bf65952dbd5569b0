// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{common::i18n::I18nStore, data, models::dataset::Dataset, services::DashboardService};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Config {
    // Lê DASHBOARD_HOST / DASHBOARD_PORT / DASHBOARD_DATA_DIR (com .env opcional)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("DASHBOARD_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("DASHBOARD_PORT inválida: '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("DASHBOARD_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            data_dir: lookup("DASHBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    // Carrega o dataset inteiro; qualquer erro aqui impede o servidor de subir.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dataset = data::load_dataset(&config.data_dir)
            .with_context(|| format!("falha ao carregar o dataset de {}", config.data_dir.display()))?;

        tracing::info!(
            "✅ {} itens e {} pagamentos prontos para análise",
            dataset.sales.len(),
            dataset.payments.len()
        );

        Ok(Self::from_dataset(dataset))
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dashboard_service: DashboardService::new(Arc::new(dataset)),
            i18n_store: Arc::new(I18nStore::new()),
        }
    }
}
