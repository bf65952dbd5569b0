// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";

// (chave, inglês, português)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("error.validation", "One or more query parameters are invalid.", "Um ou mais parâmetros da consulta são inválidos."),
    ("error.year_range", "Year must be between 1900 and 2100.", "O ano deve estar entre 1900 e 2100."),
    ("error.top_range", "'top' must be between 1 and 100.", "'top' deve estar entre 1 e 100."),
    ("error.category_blank", "Category cannot be blank.", "A categoria não pode ser vazia."),
    ("kpi.total_orders", "Total Orders", "Total de Pedidos"),
    ("kpi.total_revenue", "Total Revenue", "Receita Total"),
    ("kpi.avg_order_value", "Avg Order Value", "Ticket Médio"),
    ("kpi.avg_rating", "Customer Satisfaction", "Satisfação do Cliente"),
    ("chart.monthly_orders", "Monthly Orders", "Pedidos por Mês"),
    ("chart.monthly_revenue", "Monthly Revenue", "Receita por Mês"),
    ("chart.pareto", "Top Categories Revenue Distribution", "Distribuição de Receita por Categoria"),
    ("chart.payment_mix", "Payment Methods by Category", "Formas de Pagamento por Categoria"),
    ("chart.payment_trend", "Payment Method Evolution Over Time (%)", "Evolução das Formas de Pagamento (%)"),
    ("axis.month", "Month", "Mês"),
    ("axis.orders", "Orders", "Pedidos"),
    ("axis.revenue", "Revenue ($)", "Receita ($)"),
    ("series.orders", "Orders", "Pedidos"),
    ("series.revenue", "Revenue", "Receita"),
    ("no_data", "No data for the current selection.", "Sem dados para a seleção atual."),
    ("not_available", "n/a", "n/d"),
];

/// Catálogo de mensagens por idioma. Montado uma vez e compartilhado no AppState.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, english, portuguese) in MESSAGES {
            en.insert(*key, *english);
            pt.insert(*key, *portuguese);
        }

        let mut catalogs = HashMap::new();
        catalogs.insert("en", en);
        catalogs.insert("pt", pt);
        Self { catalogs }
    }

    /// Idioma desconhecido cai no inglês; chave desconhecida volta a própria chave.
    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|catalog| catalog.get(key)))
            .map(|message| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
