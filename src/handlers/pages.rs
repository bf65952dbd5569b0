// src/handlers/pages.rs

use axum::response::Html;

// Página única do painel; os gráficos são montados no navegador a partir de /api/dashboard.
const DASHBOARD_PAGE: &str = include_str!("../../static/dashboard.html");

pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_PAGE)
}
