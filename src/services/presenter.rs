// src/services/presenter.rs
// Converte as tabelas de resumo em widgets (gráficos e cards). Sem regra de negócio aqui.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;

use crate::{
    common::i18n::I18nStore,
    models::{
        dashboard::{ChartSeries, DashboardSummary, DashboardView, KpiCard, MonthlyTrend, Widget},
        olist::PaymentType,
    },
    services::{aggregator::PARETO_THRESHOLD, filter::DashboardFilter},
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// ---
// Formatação
// ---
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 12345 -> "12,345"
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// 1234567.4 -> "$1,234,567"
pub fn format_money_whole(value: Decimal) -> String {
    let rounded = value.round_dp(0).abs().normalize();
    let sign = if value.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&rounded.to_string()))
}

/// 123.456 -> "$123.46"
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2).abs();
    let whole = rounded.trunc().normalize();
    let cents = ((rounded - rounded.trunc()) * HUNDRED).round_dp(0).normalize();
    format!("${}.{:0>2}", group_thousands(&whole.to_string()), cents.to_string())
}

/// 4.0867 -> "4.09/5.0"
pub fn format_rating(value: Decimal) -> String {
    format!("{:.2}/5.0", value.round_dp(2))
}

fn percent(share: Decimal) -> Decimal {
    (share * HUNDRED).round_dp(2)
}

// ---
// Widgets
// ---
struct Labels<'a> {
    store: &'a I18nStore,
    lang: &'a str,
}

impl Labels<'_> {
    fn get(&self, key: &str) -> String {
        self.store.translate(self.lang, key)
    }

    fn no_data(&self, id: &str, title_key: &str) -> Widget {
        Widget::NoData {
            id: id.to_string(),
            title: self.get(title_key),
            message: self.get("no_data"),
        }
    }
}

fn kpi_cards(summary: &DashboardSummary, labels: &Labels) -> Vec<KpiCard> {
    let kpis = &summary.kpis;
    let not_available = labels.get("not_available");
    vec![
        KpiCard {
            id: "totalOrders".into(),
            label: labels.get("kpi.total_orders"),
            value: format_count(kpis.total_orders),
        },
        KpiCard {
            id: "totalRevenue".into(),
            label: labels.get("kpi.total_revenue"),
            value: format_money_whole(kpis.total_revenue),
        },
        KpiCard {
            id: "averageOrderValue".into(),
            label: labels.get("kpi.avg_order_value"),
            value: kpis.average_order_value.map(format_money).unwrap_or_else(|| not_available.clone()),
        },
        KpiCard {
            id: "averageReviewScore".into(),
            label: labels.get("kpi.avg_rating"),
            value: kpis.average_review_score.map(format_rating).unwrap_or(not_available),
        },
    ]
}

// Um ano escolhido: série única. Senão, uma série por ano com o mês no eixo x.
fn monthly_series(
    trend: &[MonthlyTrend],
    filter: &DashboardFilter,
    single_name: String,
    metric: fn(&MonthlyTrend) -> Decimal,
) -> Vec<ChartSeries> {
    if filter.single_year().is_some() {
        return vec![ChartSeries {
            name: single_name,
            x: trend.iter().map(|t| t.month.to_string()).collect(),
            y: trend.iter().map(metric).collect(),
        }];
    }

    let mut by_year: BTreeMap<i32, ChartSeries> = BTreeMap::new();
    for row in trend {
        let series = by_year.entry(row.year).or_insert_with(|| ChartSeries {
            name: row.year.to_string(),
            x: Vec::new(),
            y: Vec::new(),
        });
        series.x.push(row.month.to_string());
        series.y.push(metric(row));
    }
    by_year.into_values().collect()
}

fn monthly_widget(
    id: &str,
    title_key: &str,
    y_key: &str,
    series_key: &str,
    metric: fn(&MonthlyTrend) -> Decimal,
    summary: &DashboardSummary,
    filter: &DashboardFilter,
    labels: &Labels,
) -> Widget {
    if summary.monthly_trend.is_empty() {
        return labels.no_data(id, title_key);
    }
    Widget::Line {
        id: id.to_string(),
        title: labels.get(title_key),
        x_title: labels.get("axis.month"),
        y_title: labels.get(y_key),
        series: monthly_series(&summary.monthly_trend, filter, labels.get(series_key), metric),
    }
}

fn pareto_widget(summary: &DashboardSummary, top: usize, labels: &Labels) -> Widget {
    const ID: &str = "pareto";
    if summary.pareto.is_empty() {
        return labels.no_data(ID, "chart.pareto");
    }
    let shown = &summary.pareto[..top.min(summary.pareto.len())];
    Widget::Pareto {
        id: ID.to_string(),
        title: labels.get("chart.pareto"),
        categories: shown.iter().map(|c| c.category.clone()).collect(),
        revenue: shown.iter().map(|c| c.revenue).collect(),
        cumulative_percent: shown.iter().map(|c| percent(c.cumulative_share)).collect(),
        threshold_percent: percent(PARETO_THRESHOLD),
    }
}

fn treemap_widget(summary: &DashboardSummary, labels: &Labels) -> Widget {
    const ID: &str = "paymentMix";
    if summary.payment_mix.is_empty() {
        return labels.no_data(ID, "chart.payment_mix");
    }

    let mut ids = Vec::new();
    let mut node_labels = Vec::new();
    let mut parents = Vec::new();
    let mut values = Vec::new();

    // Nós de categoria (na ordem do Pareto) seguidos das folhas de pagamento
    let mut category_totals: Vec<(&str, Decimal)> = Vec::new();
    for mix in &summary.payment_mix {
        match category_totals.iter_mut().find(|(name, _)| *name == mix.category) {
            Some((_, total)) => *total += mix.revenue,
            None => category_totals.push((mix.category.as_str(), mix.revenue)),
        }
    }
    for (category, total) in &category_totals {
        ids.push(category.to_string());
        node_labels.push(category.to_string());
        parents.push(String::new());
        values.push(*total);
    }
    for mix in &summary.payment_mix {
        ids.push(format!("{}/{}", mix.category, mix.payment_type));
        node_labels.push(mix.payment_type.to_string());
        parents.push(mix.category.clone());
        values.push(mix.revenue);
    }

    Widget::Treemap {
        id: ID.to_string(),
        title: labels.get("chart.payment_mix"),
        ids,
        labels: node_labels,
        parents,
        values,
    }
}

fn heatmap_widget(summary: &DashboardSummary, labels: &Labels) -> Widget {
    const ID: &str = "paymentTrend";
    if summary.payment_series.is_empty() {
        return labels.no_data(ID, "chart.payment_trend");
    }

    let present: BTreeSet<PaymentType> = summary.payment_series.iter().map(|p| p.payment_type).collect();
    let columns: Vec<PaymentType> = PaymentType::ALL.into_iter().filter(|t| present.contains(t)).collect();

    let mut rows: BTreeMap<(i32, u32), Vec<Decimal>> = BTreeMap::new();
    for point in &summary.payment_series {
        let row = rows
            .entry((point.year, point.month))
            .or_insert_with(|| vec![Decimal::ZERO; columns.len()]);
        if let Some(column) = columns.iter().position(|t| *t == point.payment_type) {
            row[column] = percent(point.share);
        }
    }

    Widget::Heatmap {
        id: ID.to_string(),
        title: labels.get("chart.payment_trend"),
        x: columns.iter().map(|t| t.to_string()).collect(),
        y: rows.keys().map(|(year, month)| format!("{year:04}-{month:02}")).collect(),
        z: rows.into_values().collect(),
    }
}

/// Monta a visão completa do painel para um idioma.
pub fn present(
    summary: &DashboardSummary,
    filter: &DashboardFilter,
    top: usize,
    store: &I18nStore,
    lang: &str,
) -> DashboardView {
    let labels = Labels { store, lang };
    let empty = summary.is_empty();

    let widgets = vec![
        monthly_widget(
            "monthlyOrders",
            "chart.monthly_orders",
            "axis.orders",
            "series.orders",
            |t| Decimal::from(t.order_count),
            summary,
            filter,
            &labels,
        ),
        monthly_widget(
            "monthlyRevenue",
            "chart.monthly_revenue",
            "axis.revenue",
            "series.revenue",
            |t| t.revenue,
            summary,
            filter,
            &labels,
        ),
        pareto_widget(summary, top, &labels),
        treemap_widget(summary, &labels),
        heatmap_widget(summary, &labels),
    ];

    DashboardView {
        empty,
        kpis: kpi_cards(summary, &labels),
        widgets,
    }
}
