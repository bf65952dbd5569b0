// src/services/aggregator.rs
// Passes de agregação: funções puras sobre o recorte (já filtrado) do dataset.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;

use crate::models::{
    dashboard::{CategoryContribution, CategoryPaymentMix, KpiSummary, MonthlyTrend, PaymentTimeSeries},
    dataset::{PaymentRecord, SaleRecord},
    olist::PaymentType,
};

/// Regra 80/20
pub const PARETO_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

// 1. Tendência mensal (ordem cronológica, uma linha por ano/mês)
pub fn monthly_trend(sales: &[&SaleRecord]) -> Vec<MonthlyTrend> {
    let mut groups: BTreeMap<(i32, u32), (HashSet<&str>, u64, Decimal)> = BTreeMap::new();
    for sale in sales {
        let (orders, items, revenue) = groups
            .entry((sale.year, sale.month))
            .or_insert_with(|| (HashSet::new(), 0, Decimal::ZERO));
        orders.insert(sale.order_id.as_str());
        *items += 1;
        *revenue += sale.revenue;
    }

    groups
        .into_iter()
        .map(|((year, month), (orders, item_count, revenue))| MonthlyTrend {
            year,
            month,
            order_count: orders.len() as u64,
            item_count,
            revenue,
        })
        .collect()
}

// 2. Pareto: receita por categoria, decrescente, empate resolvido pelo nome
pub fn category_contribution(sales: &[&SaleRecord]) -> Vec<CategoryContribution> {
    let mut by_category: HashMap<&str, Decimal> = HashMap::new();
    for sale in sales {
        *by_category.entry(sale.category.as_str()).or_insert(Decimal::ZERO) += sale.revenue;
    }

    let mut ranked: Vec<(&str, Decimal)> = by_category.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total: Decimal = ranked.iter().map(|(_, revenue)| *revenue).sum();
    let count = Decimal::from(ranked.len() as u64);

    let mut running = Decimal::ZERO;
    let mut previous_cumulative = Decimal::ZERO;
    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (category, revenue))| {
            running += revenue;
            // Sem receita nenhuma, todas as categorias pesam igual
            let (share, cumulative_share) = if total.is_zero() {
                (Decimal::ONE / count, Decimal::from(index as u64 + 1) / count)
            } else {
                (revenue / total, running / total)
            };
            let vital = previous_cumulative < PARETO_THRESHOLD;
            previous_cumulative = cumulative_share;

            CategoryContribution {
                rank: index as u32 + 1,
                category: category.to_string(),
                revenue,
                share,
                cumulative_share,
                vital,
            }
        })
        .collect()
}

// 3. Formas de pagamento por mês. Share = valor do tipo / valor do mês.
pub fn payment_time_series(payments: &[&PaymentRecord]) -> Vec<PaymentTimeSeries> {
    let mut months: BTreeMap<(i32, u32), BTreeMap<PaymentType, (u64, Decimal)>> = BTreeMap::new();
    for payment in payments {
        let (count, value) = months
            .entry((payment.year, payment.month))
            .or_default()
            .entry(payment.payment_type)
            .or_insert((0, Decimal::ZERO));
        *count += 1;
        *value += payment.value;
    }

    let mut series = Vec::new();
    for ((year, month), by_type) in months {
        let month_value: Decimal = by_type.values().map(|(_, value)| *value).sum();
        let month_count: u64 = by_type.values().map(|(count, _)| *count).sum();
        let last_index = by_type.len() - 1;

        let mut assigned = Decimal::ZERO;
        for (index, (payment_type, (payment_count, value))) in by_type.into_iter().enumerate() {
            let share = if index == last_index {
                Decimal::ONE - assigned
            } else if month_value.is_zero() {
                Decimal::from(payment_count) / Decimal::from(month_count)
            } else {
                value / month_value
            };
            assigned += share;

            series.push(PaymentTimeSeries {
                year,
                month,
                payment_type,
                payment_count,
                value,
                share,
            });
        }
    }
    series
}

// 4. Treemap: receita das categorias vitais distribuída pelas formas de pagamento do pedido
pub fn category_payment_mix(
    sales: &[&SaleRecord],
    pareto: &[CategoryContribution],
) -> Vec<CategoryPaymentMix> {
    let ranks: HashMap<&str, u32> = pareto
        .iter()
        .filter(|c| c.vital)
        .map(|c| (c.category.as_str(), c.rank))
        .collect();

    let mut groups: BTreeMap<(u32, PaymentType), (&str, Decimal)> = BTreeMap::new();
    for sale in sales {
        let Some(rank) = ranks.get(sale.category.as_str()) else {
            continue;
        };
        if sale.payment_mix.is_empty() {
            let entry = groups
                .entry((*rank, PaymentType::Other))
                .or_insert((sale.category.as_str(), Decimal::ZERO));
            entry.1 += sale.revenue;
            continue;
        }
        for weight in &sale.payment_mix {
            let entry = groups
                .entry((*rank, weight.payment_type))
                .or_insert((sale.category.as_str(), Decimal::ZERO));
            entry.1 += sale.revenue * weight.weight;
        }
    }

    let total: Decimal = groups.values().map(|(_, revenue)| *revenue).sum();
    groups
        .into_iter()
        .map(|((_, payment_type), (category, revenue))| CategoryPaymentMix {
            category: category.to_string(),
            payment_type,
            revenue,
            share: if total.is_zero() { Decimal::ZERO } else { revenue / total },
        })
        .collect()
}

// 5. KPIs
pub fn kpis(sales: &[&SaleRecord]) -> KpiSummary {
    let mut scores: HashMap<&str, Option<Decimal>> = HashMap::new();
    let mut total_revenue = Decimal::ZERO;
    for sale in sales {
        total_revenue += sale.revenue;
        scores.insert(sale.order_id.as_str(), sale.review_score);
    }

    let total_orders = scores.len() as u64;
    let average_order_value =
        (total_orders > 0).then(|| (total_revenue / Decimal::from(total_orders)).round_dp(2));

    let rated: Vec<Decimal> = scores.values().flatten().copied().collect();
    let average_review_score = (!rated.is_empty()).then(|| {
        let sum: Decimal = rated.iter().sum();
        (sum / Decimal::from(rated.len() as u64)).round_dp(2)
    });

    KpiSummary {
        total_orders,
        total_revenue,
        average_order_value,
        average_review_score,
    }
}
