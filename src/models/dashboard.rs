// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::olist::PaymentType;

// --- Tabelas de resumo (saída do agregador) ---

// 1. Tendência mensal
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    #[schema(example = 2017)]
    pub year: i32,
    #[schema(example = 11)]
    pub month: u32,
    pub order_count: u64, // pedidos distintos
    pub item_count: u64,
    pub revenue: Decimal,
}

// 2. Curva de Pareto por categoria
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryContribution {
    pub rank: u32,
    #[schema(example = "health_beauty")]
    pub category: String,
    pub revenue: Decimal,
    pub share: Decimal,
    pub cumulative_share: Decimal,
    // Faz parte das categorias que levam a curva até o limiar (80%)
    pub vital: bool,
}

// 3. Formas de pagamento ao longo do tempo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTimeSeries {
    pub year: i32,
    pub month: u32,
    pub payment_type: PaymentType,
    pub payment_count: u64,
    pub value: Decimal,
    pub share: Decimal, // fração do mês
}

// 4. Treemap categoria x forma de pagamento
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPaymentMix {
    pub category: String,
    pub payment_type: PaymentType,
    pub revenue: Decimal,
    pub share: Decimal,
}

// 5. Cards do topo
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_orders: u64,
    pub total_revenue: Decimal,
    pub average_order_value: Option<Decimal>,
    pub average_review_score: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpis: KpiSummary,
    pub monthly_trend: Vec<MonthlyTrend>,
    pub pareto: Vec<CategoryContribution>,
    pub payment_series: Vec<PaymentTimeSeries>,
    pub payment_mix: Vec<CategoryPaymentMix>,
}

impl DashboardSummary {
    pub fn is_empty(&self) -> bool {
        self.kpis.total_orders == 0
            && self.monthly_trend.is_empty()
            && self.pareto.is_empty()
            && self.payment_series.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
}

// --- Widgets (saída do presenter) ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    #[schema(example = "totalRevenue")]
    pub id: String,
    #[schema(example = "Total Revenue")]
    pub label: String,
    #[schema(example = "$1,234,567")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Decimal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Widget {
    Line {
        id: String,
        title: String,
        #[serde(rename = "xTitle")]
        x_title: String,
        #[serde(rename = "yTitle")]
        y_title: String,
        series: Vec<ChartSeries>,
    },
    Pareto {
        id: String,
        title: String,
        categories: Vec<String>,
        revenue: Vec<Decimal>,
        #[serde(rename = "cumulativePercent")]
        cumulative_percent: Vec<Decimal>,
        #[serde(rename = "thresholdPercent")]
        threshold_percent: Decimal,
    },
    Treemap {
        id: String,
        title: String,
        ids: Vec<String>,
        labels: Vec<String>,
        parents: Vec<String>,
        values: Vec<Decimal>,
    },
    Heatmap {
        id: String,
        title: String,
        x: Vec<String>,
        y: Vec<String>,
        z: Vec<Vec<Decimal>>,
    },
    NoData {
        id: String,
        title: String,
        message: String,
    },
}

impl Widget {
    pub fn id(&self) -> &str {
        match self {
            Widget::Line { id, .. }
            | Widget::Pareto { id, .. }
            | Widget::Treemap { id, .. }
            | Widget::Heatmap { id, .. }
            | Widget::NoData { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub empty: bool,
    pub kpis: Vec<KpiCard>,
    pub widgets: Vec<Widget>,
}
