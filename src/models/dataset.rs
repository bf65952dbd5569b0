// src/models/dataset.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::olist::PaymentType;

/// Categoria usada quando o produto não tem categoria ou tradução.
pub const UNKNOWN_CATEGORY: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentWeight {
    pub payment_type: PaymentType,
    pub weight: Decimal,
}

// 1. Uma linha por item de pedido (visão desnormalizada de vendas)
#[derive(Debug, Clone)]
pub struct SaleRecord {
    pub order_id: String,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub revenue: Decimal, // price + freight_value
    pub review_score: Option<Decimal>,
    // Participação de cada forma de pagamento no pedido; soma 1 quando há pagamentos.
    pub payment_mix: Vec<PaymentWeight>,
}

// 2. Uma linha por pagamento
#[derive(Debug, Clone)]
pub struct PaymentRecord {
    pub year: i32,
    pub month: u32,
    pub payment_type: PaymentType,
    pub value: Decimal,
    // Categorias (traduzidas) presentes no pedido, ordenadas e sem repetição.
    pub categories: Vec<String>,
}

/// Contadores do joiner, para que os totais continuem explicáveis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub orders_loaded: u64,
    pub items_joined: u64,
    pub payments_joined: u64,
    pub items_without_order: u64,
    pub items_without_product: u64,
    pub payments_without_order: u64,
    pub reviews_without_order: u64,
    pub orders_without_customer: u64,
    pub items_without_category: u64,
}

impl DataQualityReport {
    /// Registros descartados por chave estrangeira não resolvida.
    pub fn dropped_total(&self) -> u64 {
        self.items_without_order
            + self.items_without_product
            + self.payments_without_order
            + self.reviews_without_order
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub sales: Vec<SaleRecord>,
    pub payments: Vec<PaymentRecord>,
    pub quality: DataQualityReport,
}
