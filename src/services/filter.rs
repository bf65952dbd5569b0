// src/services/filter.rs

use std::collections::BTreeSet;

use crate::models::dataset::{Dataset, PaymentRecord, SaleRecord};

/// Seleção do usuário. Conjunto vazio = sem filtro naquela dimensão.
/// Valores da mesma dimensão combinam com OU; dimensões diferentes com E.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub years: BTreeSet<i32>,
    pub categories: BTreeSet<String>,
}

/// Recorte do dataset (só referências, nada é copiado).
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub sales: Vec<&'a SaleRecord>,
    pub payments: Vec<&'a PaymentRecord>,
}

impl FilteredView<'_> {
    pub fn is_empty(&self) -> bool {
        self.sales.is_empty() && self.payments.is_empty()
    }
}

impl DashboardFilter {
    pub fn new<Y, C>(years: Y, categories: C) -> Self
    where
        Y: IntoIterator<Item = i32>,
        C: IntoIterator<Item = String>,
    {
        Self {
            years: years.into_iter().collect(),
            categories: categories
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        self.years.is_empty() && self.categories.is_empty()
    }

    /// Quando exatamente um ano foi escolhido.
    pub fn single_year(&self) -> Option<i32> {
        match self.years.len() {
            1 => self.years.iter().next().copied(),
            _ => None,
        }
    }

    fn matches_year(&self, year: i32) -> bool {
        self.years.is_empty() || self.years.contains(&year)
    }

    pub fn matches_sale(&self, sale: &SaleRecord) -> bool {
        self.matches_year(sale.year)
            && (self.categories.is_empty() || self.categories.contains(&sale.category))
    }

    // O pagamento entra se o pedido tem algum item de uma categoria escolhida.
    pub fn matches_payment(&self, payment: &PaymentRecord) -> bool {
        self.matches_year(payment.year)
            && (self.categories.is_empty()
                || payment.categories.iter().any(|c| self.categories.contains(c)))
    }

    pub fn apply<'a>(&self, dataset: &'a Dataset) -> FilteredView<'a> {
        FilteredView {
            sales: dataset.sales.iter().filter(|s| self.matches_sale(s)).collect(),
            payments: dataset.payments.iter().filter(|p| self.matches_payment(p)).collect(),
        }
    }
}
