// src/services/dashboard_service.rs

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    common::i18n::I18nStore,
    models::{
        dashboard::{
            CategoryContribution, CategoryPaymentMix, DashboardSummary, DashboardView, FilterOptions,
            KpiSummary, MonthlyTrend, PaymentTimeSeries, Widget,
        },
        dataset::{DataQualityReport, Dataset},
    },
    services::{
        aggregator,
        filter::{DashboardFilter, FilteredView},
        presenter,
    },
};

/// Roda todos os passes de agregação sobre um recorte.
pub fn summarize(view: &FilteredView) -> DashboardSummary {
    let pareto = aggregator::category_contribution(&view.sales);
    DashboardSummary {
        kpis: aggregator::kpis(&view.sales),
        monthly_trend: aggregator::monthly_trend(&view.sales),
        payment_series: aggregator::payment_time_series(&view.payments),
        payment_mix: aggregator::category_payment_mix(&view.sales, &pareto),
        pareto,
    }
}

// O dataset é carregado uma vez e só lido daqui em diante; o clone só copia o Arc.
#[derive(Clone)]
pub struct DashboardService {
    dataset: Arc<Dataset>,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    fn select(&self, filter: &DashboardFilter) -> FilteredView<'_> {
        let view = filter.apply(&self.dataset);
        if filter.is_pass_through() {
            tracing::debug!("sem filtro: {} itens, {} pagamentos", view.sales.len(), view.payments.len());
        } else if view.is_empty() {
            tracing::debug!("filtro {:?}/{:?} não encontrou registros", filter.years, filter.categories);
        } else {
            tracing::debug!(
                "filtro {:?}/{:?}: {} itens, {} pagamentos",
                filter.years,
                filter.categories,
                view.sales.len(),
                view.payments.len()
            );
        }
        view
    }

    pub fn filter_options(&self) -> FilterOptions {
        let years: BTreeSet<i32> = self.dataset.sales.iter().map(|s| s.year).collect();
        let categories: BTreeSet<&str> = self.dataset.sales.iter().map(|s| s.category.as_str()).collect();
        FilterOptions {
            years: years.into_iter().collect(),
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn data_quality(&self) -> DataQualityReport {
        self.dataset.quality.clone()
    }

    pub fn get_summary(&self, filter: &DashboardFilter) -> DashboardSummary {
        summarize(&self.select(filter))
    }

    pub fn get_kpis(&self, filter: &DashboardFilter) -> KpiSummary {
        aggregator::kpis(&self.select(filter).sales)
    }

    pub fn get_monthly_trend(&self, filter: &DashboardFilter) -> Vec<MonthlyTrend> {
        aggregator::monthly_trend(&self.select(filter).sales)
    }

    pub fn get_pareto(&self, filter: &DashboardFilter) -> Vec<CategoryContribution> {
        aggregator::category_contribution(&self.select(filter).sales)
    }

    pub fn get_payment_series(&self, filter: &DashboardFilter) -> Vec<PaymentTimeSeries> {
        aggregator::payment_time_series(&self.select(filter).payments)
    }

    pub fn get_payment_mix(&self, filter: &DashboardFilter) -> Vec<CategoryPaymentMix> {
        let view = self.select(filter);
        let pareto = aggregator::category_contribution(&view.sales);
        aggregator::category_payment_mix(&view.sales, &pareto)
    }

    pub fn get_view(
        &self,
        filter: &DashboardFilter,
        top: usize,
        store: &I18nStore,
        lang: &str,
    ) -> DashboardView {
        let summary = self.get_summary(filter);
        let view = presenter::present(&summary, filter, top, store, lang);

        let without_data: Vec<&str> = view
            .widgets
            .iter()
            .filter(|w| matches!(w, Widget::NoData { .. }))
            .map(Widget::id)
            .collect();
        if !view.empty && !without_data.is_empty() {
            tracing::debug!("widgets sem dados para a seleção: {:?}", without_data);
        }
        view
    }
}
