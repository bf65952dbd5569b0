// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_filter_options,
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_kpis,
        handlers::dashboard::get_monthly_trend,
        handlers::dashboard::get_pareto,
        handlers::dashboard::get_payment_series,
        handlers::dashboard::get_payment_mix,

        // --- Data Quality ---
        handlers::dashboard::get_data_quality,
    ),
    components(
        schemas(
            // --- Tabelas de resumo ---
            models::olist::PaymentType,
            models::dashboard::MonthlyTrend,
            models::dashboard::CategoryContribution,
            models::dashboard::PaymentTimeSeries,
            models::dashboard::CategoryPaymentMix,
            models::dashboard::KpiSummary,
            models::dashboard::DashboardSummary,
            models::dashboard::FilterOptions,

            // --- Widgets ---
            models::dashboard::KpiCard,
            models::dashboard::ChartSeries,
            models::dashboard::Widget,
            models::dashboard::DashboardView,

            // --- Data Quality ---
            models::dataset::DataQualityReport,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores e Gráficos do dataset Olist"),
        (name = "Data Quality", description = "Registros descartados na junção das tabelas")
    )
)]
pub struct ApiDoc;
