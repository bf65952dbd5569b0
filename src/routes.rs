// src/routes.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn app(app_state: AppState) -> Router {
    // Tabelas de resumo cruas, todas com os mesmos filtros
    let dashboard_routes = Router::new()
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .route("/api/dashboard/kpis", get(handlers::dashboard::get_kpis))
        .route("/api/dashboard/monthly-trend", get(handlers::dashboard::get_monthly_trend))
        .route("/api/dashboard/pareto", get(handlers::dashboard::get_pareto))
        .route("/api/dashboard/payments", get(handlers::dashboard::get_payment_series))
        .route("/api/dashboard/payment-mix", get(handlers::dashboard::get_payment_mix));

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/filters", get(handlers::dashboard::get_filter_options))
        .route("/api/data-quality", get(handlers::dashboard::get_data_quality))
        .merge(dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
