// src/models/olist.rs

use std::collections::{HashMap, HashSet};
use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    CreditCard,
    Boleto,  // Boleto bancário
    Voucher,
    DebitCard,
    Other,   // "not_defined" e qualquer valor desconhecido
}

impl PaymentType {
    pub const ALL: [PaymentType; 5] = [
        PaymentType::CreditCard,
        PaymentType::Boleto,
        PaymentType::Voucher,
        PaymentType::DebitCard,
        PaymentType::Other,
    ];

    /// Converte o valor cru do CSV. Nunca falha: o que não conhecemos vira `Other`.
    pub fn from_source(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "credit_card" => PaymentType::CreditCard,
            "boleto" => PaymentType::Boleto,
            "voucher" => PaymentType::Voucher,
            "debit_card" => PaymentType::DebitCard,
            _ => PaymentType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "credit_card",
            PaymentType::Boleto => "boleto",
            PaymentType::Voucher => "voucher",
            PaymentType::DebitCard => "debit_card",
            PaymentType::Other => "other",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Tabelas de origem (imutáveis depois de carregadas) ---

#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub purchased_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
    pub price: Decimal,
    pub freight_value: Decimal,
}

#[derive(Debug, Clone)]
pub struct Product {
    pub product_id: String,
    pub category_name: Option<String>,
    // Dimensões e peso são validados na carga, mas não entram nas análises.
    #[allow(dead_code)]
    pub weight_g: Option<Decimal>,
    #[allow(dead_code)]
    pub length_cm: Option<Decimal>,
    #[allow(dead_code)]
    pub height_cm: Option<Decimal>,
    #[allow(dead_code)]
    pub width_cm: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct Payment {
    pub order_id: String,
    pub payment_type: PaymentType,
    pub value: Decimal,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub order_id: String,
    pub score: u8,
}

/// Tudo o que o loader leu do diretório de dados.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    pub orders: HashMap<String, Order>,
    pub items: Vec<OrderItem>,
    pub payments: Vec<Payment>,
    pub products: HashMap<String, Product>,
    // product_category_name -> product_category_name_english
    pub translations: HashMap<String, String>,
    // Só interessa saber se o customer_id existe
    pub customers: HashSet<String>,
    pub reviews: Vec<Review>,
}
