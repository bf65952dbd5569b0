// src/handlers/dashboard.rs

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::{
            CategoryContribution, CategoryPaymentMix, DashboardView, FilterOptions, KpiSummary,
            MonthlyTrend, PaymentTimeSeries,
        },
        dataset::DataQualityReport,
    },
    services::filter::DashboardFilter,
};

pub const DEFAULT_TOP: usize = 10;

// ---
// Validação Customizada
// ---
fn validate_years(years: &Vec<i32>) -> Result<(), ValidationError> {
    if years.iter().any(|year| !(1900..=2100).contains(year)) {
        return Err(ValidationError::new("year_range"));
    }
    Ok(())
}

fn validate_categories(categories: &Vec<String>) -> Result<(), ValidationError> {
    if categories.iter().any(|c| c.trim().is_empty()) {
        return Err(ValidationError::new("category_blank"));
    }
    Ok(())
}

// ---
// Query: ?year=2017&year=2018&category=health_beauty&top=10
// ---
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Ano(s) da compra. Vazio = todos.
    #[serde(default)]
    #[validate(custom(function = "validate_years"))]
    pub year: Vec<i32>,

    /// Categoria(s) em inglês. Vazio = todas.
    #[serde(default)]
    #[validate(custom(function = "validate_categories"))]
    pub category: Vec<String>,

    /// Quantas barras mostrar no Pareto (1..=100, padrão 10).
    #[validate(range(min = 1, max = 100, code = "top_range"))]
    pub top: Option<usize>,
}

// ---
// Extrator: query lida, validada e já convertida em filtro.
// Qualquer falha sai como ApiError (JSON traduzido), nunca como texto puro.
// ---
pub struct DashboardParams {
    pub filter: DashboardFilter,
    pub top: usize,
    pub locale: Locale,
}

impl FromRequestParts<AppState> for DashboardParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let locale = Locale::from_request_parts(parts, state).await.unwrap_or_default();

        let Query(query) = Query::<DashboardQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidQuery(rejection).to_api_error(&locale, &state.i18n_store))?;

        query
            .validate()
            .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &state.i18n_store))?;

        Ok(Self {
            top: query.top.unwrap_or(DEFAULT_TOP),
            filter: DashboardFilter::new(query.year, query.category),
            locale,
        })
    }
}

// GET /api/filters
#[utoipa::path(
    get,
    path = "/api/filters",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Anos e categorias disponíveis para os filtros", body = FilterOptions)
    )
)]
pub async fn get_filter_options(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.filter_options()))
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Painel completo (cards e gráficos) para a seleção", body = DashboardView),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    let view = app_state
        .dashboard_service
        .get_view(&params.filter, params.top, &app_state.i18n_store, &params.locale.0);

    (StatusCode::OK, Json(view))
}

// GET /api/dashboard/kpis
#[utoipa::path(
    get,
    path = "/api/dashboard/kpis",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Indicadores do topo", body = KpiSummary),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_kpis(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.get_kpis(&params.filter)))
}

// GET /api/dashboard/monthly-trend
#[utoipa::path(
    get,
    path = "/api/dashboard/monthly-trend",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Pedidos e receita por mês, em ordem cronológica", body = Vec<MonthlyTrend>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_monthly_trend(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.get_monthly_trend(&params.filter)))
}

// GET /api/dashboard/pareto
#[utoipa::path(
    get,
    path = "/api/dashboard/pareto",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Receita por categoria com participação acumulada (Curva ABC)", body = Vec<CategoryContribution>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_pareto(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    let mut pareto = app_state.dashboard_service.get_pareto(&params.filter);
    // Mesmo corte do painel (padrão 10); as participações continuam relativas ao total
    pareto.truncate(params.top);

    (StatusCode::OK, Json(pareto))
}

// GET /api/dashboard/payments
#[utoipa::path(
    get,
    path = "/api/dashboard/payments",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Formas de pagamento por mês", body = Vec<PaymentTimeSeries>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_payment_series(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.get_payment_series(&params.filter)))
}

// GET /api/dashboard/payment-mix
#[utoipa::path(
    get,
    path = "/api/dashboard/payment-mix",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Receita das categorias vitais por forma de pagamento", body = Vec<CategoryPaymentMix>),
        (status = 400, description = "Parâmetros inválidos")
    )
)]
pub async fn get_payment_mix(
    State(app_state): State<AppState>,
    params: DashboardParams,
) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.get_payment_mix(&params.filter)))
}

// GET /api/data-quality
#[utoipa::path(
    get,
    path = "/api/data-quality",
    tag = "Data Quality",
    responses(
        (status = 200, description = "Registros descartados no join por chave não resolvida", body = DataQualityReport)
    )
)]
pub async fn get_data_quality(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.dashboard_service.data_quality()))
}
