// src/data/loader.rs

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use csv::StringRecord;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    common::error::LoadError,
    models::olist::{Order, OrderItem, Payment, PaymentType, Product, Review, SourceTables},
};

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ---
// Arquivos de origem (schema público da Olist)
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFile {
    Orders,
    OrderItems,
    Payments,
    Products,
    CategoryTranslation,
    Customers,
    Reviews,
}

impl SourceFile {
    pub fn file_name(&self) -> &'static str {
        match self {
            SourceFile::Orders => "olist_orders_dataset.csv",
            SourceFile::OrderItems => "olist_order_items_dataset.csv",
            SourceFile::Payments => "olist_order_payments_dataset.csv",
            SourceFile::Products => "olist_products_dataset.csv",
            SourceFile::CategoryTranslation => "product_category_name_translation.csv",
            SourceFile::Customers => "olist_customers_dataset.csv",
            SourceFile::Reviews => "olist_order_reviews_dataset.csv",
        }
    }

    // Schema mínimo do export; nem toda coluna exigida entra nas análises.
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SourceFile::Orders => &["order_id", "customer_id", "order_status", "order_purchase_timestamp"],
            SourceFile::OrderItems => &["order_id", "order_item_id", "product_id", "price", "freight_value"],
            SourceFile::Payments => &[
                "order_id",
                "payment_sequential",
                "payment_type",
                "payment_installments",
                "payment_value",
            ],
            SourceFile::Products => &["product_id", "product_category_name"],
            SourceFile::CategoryTranslation => &["product_category_name", "product_category_name_english"],
            SourceFile::Customers => &["customer_id", "customer_unique_id", "customer_city", "customer_state"],
            SourceFile::Reviews => &["review_id", "order_id", "review_score"],
        }
    }

    /// Só as avaliações são opcionais (alimentam apenas o KPI de satisfação).
    pub fn is_optional(&self) -> bool {
        matches!(self, SourceFile::Reviews)
    }
}

// ---
// Linhas cruas, endereçadas pelo nome da coluna
// ---
#[derive(Debug, Deserialize)]
struct OrderRow {
    order_id: String,
    customer_id: String,
    order_purchase_timestamp: String,
}

#[derive(Debug, Deserialize)]
struct OrderItemRow {
    order_id: String,
    product_id: String,
    price: String,
    freight_value: String,
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    order_id: String,
    payment_type: String,
    payment_value: String,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    product_id: String,
    product_category_name: String,
    #[serde(default)]
    product_weight_g: String,
    #[serde(default)]
    product_length_cm: String,
    #[serde(default)]
    product_height_cm: String,
    #[serde(default)]
    product_width_cm: String,
}

#[derive(Debug, Deserialize)]
struct TranslationRow {
    product_category_name: String,
    product_category_name_english: String,
}

#[derive(Debug, Deserialize)]
struct CustomerRow {
    customer_id: String,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    order_id: String,
    review_score: String,
}

struct Row<T> {
    line: u64,
    value: T,
}

// Contexto de uma célula, para mensagens de erro com arquivo/linha/coluna.
struct Cell<'a> {
    file: SourceFile,
    line: u64,
    column: &'a str,
    value: &'a str,
}

impl Cell<'_> {
    fn malformed(&self) -> LoadError {
        LoadError::Malformed {
            file: self.file.file_name().to_string(),
            line: self.line,
            column: self.column.to_string(),
            value: self.value.to_string(),
        }
    }

    fn key(&self) -> Result<String, LoadError> {
        if self.value.is_empty() {
            return Err(self.malformed());
        }
        Ok(self.value.to_string())
    }

    fn amount(&self) -> Result<Decimal, LoadError> {
        let amount = Decimal::from_str(self.value).map_err(|_| self.malformed())?;
        if amount.is_sign_negative() {
            return Err(self.malformed());
        }
        Ok(amount)
    }

    fn optional_amount(&self) -> Result<Option<Decimal>, LoadError> {
        if self.value.is_empty() {
            return Ok(None);
        }
        self.amount().map(Some)
    }

    fn count(&self) -> Result<u32, LoadError> {
        // Alguns exports trazem inteiros como "1.0"
        let trimmed = self.value.strip_suffix(".0").unwrap_or(self.value);
        trimmed.parse::<u32>().map_err(|_| self.malformed())
    }

    fn timestamp(&self) -> Result<NaiveDateTime, LoadError> {
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(self.value, format).ok())
            .ok_or_else(|| self.malformed())
    }

    fn optional_text(&self) -> Option<String> {
        (!self.value.is_empty()).then(|| self.value.to_string())
    }
}

fn cell<'a>(file: SourceFile, line: u64, column: &'a str, value: &'a str) -> Cell<'a> {
    Cell { file, line, column, value }
}

// ---
// Leitura genérica de uma tabela
// ---
fn read_rows<T: DeserializeOwned>(dir: &Path, source: SourceFile) -> Result<Vec<Row<T>>, LoadError> {
    let path = dir.join(source.file_name());
    if !path.is_file() {
        return Err(LoadError::MissingFile(path));
    }

    let csv_error = |e: csv::Error| LoadError::Csv {
        file: source.file_name().to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(csv_error)?;

    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}'))
        .collect();

    for column in source.required_columns() {
        if !headers.iter().any(|h| h == *column) {
            return Err(LoadError::MissingColumn {
                file: source.file_name().to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let value: T = record.deserialize(Some(&headers)).map_err(csv_error)?;
        rows.push(Row { line, value });
    }

    tracing::debug!("{}: {} linhas lidas", source.file_name(), rows.len());
    Ok(rows)
}

fn load_orders(dir: &Path) -> Result<HashMap<String, Order>, LoadError> {
    let file = SourceFile::Orders;
    let mut orders = HashMap::new();
    for Row { line, value: row } in read_rows::<OrderRow>(dir, file)? {
        let order = Order {
            order_id: cell(file, line, "order_id", &row.order_id).key()?,
            customer_id: row.customer_id,
            purchased_at: cell(file, line, "order_purchase_timestamp", &row.order_purchase_timestamp)
                .timestamp()?,
        };
        orders.insert(order.order_id.clone(), order);
    }
    Ok(orders)
}

fn load_items(dir: &Path) -> Result<Vec<OrderItem>, LoadError> {
    let file = SourceFile::OrderItems;
    read_rows::<OrderItemRow>(dir, file)?
        .into_iter()
        .map(|Row { line, value: row }| {
            Ok(OrderItem {
                price: cell(file, line, "price", &row.price).amount()?,
                freight_value: cell(file, line, "freight_value", &row.freight_value).amount()?,
                order_id: row.order_id,
                product_id: row.product_id,
            })
        })
        .collect()
}

fn load_payments(dir: &Path) -> Result<Vec<Payment>, LoadError> {
    let file = SourceFile::Payments;
    read_rows::<PaymentRow>(dir, file)?
        .into_iter()
        .map(|Row { line, value: row }| {
            Ok(Payment {
                payment_type: PaymentType::from_source(&row.payment_type),
                value: cell(file, line, "payment_value", &row.payment_value).amount()?,
                order_id: row.order_id,
            })
        })
        .collect()
}

fn load_products(dir: &Path) -> Result<HashMap<String, Product>, LoadError> {
    let file = SourceFile::Products;
    let mut products = HashMap::new();
    for Row { line, value: row } in read_rows::<ProductRow>(dir, file)? {
        let product = Product {
            product_id: cell(file, line, "product_id", &row.product_id).key()?,
            category_name: cell(file, line, "product_category_name", &row.product_category_name).optional_text(),
            weight_g: cell(file, line, "product_weight_g", &row.product_weight_g).optional_amount()?,
            length_cm: cell(file, line, "product_length_cm", &row.product_length_cm).optional_amount()?,
            height_cm: cell(file, line, "product_height_cm", &row.product_height_cm).optional_amount()?,
            width_cm: cell(file, line, "product_width_cm", &row.product_width_cm).optional_amount()?,
        };
        products.insert(product.product_id.clone(), product);
    }
    Ok(products)
}

fn load_translations(dir: &Path) -> Result<HashMap<String, String>, LoadError> {
    let rows = read_rows::<TranslationRow>(dir, SourceFile::CategoryTranslation)?;
    Ok(rows
        .into_iter()
        .filter(|Row { value, .. }| {
            !value.product_category_name.is_empty() && !value.product_category_name_english.is_empty()
        })
        .map(|Row { value, .. }| (value.product_category_name, value.product_category_name_english))
        .collect())
}

fn load_customers(dir: &Path) -> Result<HashSet<String>, LoadError> {
    let file = SourceFile::Customers;
    read_rows::<CustomerRow>(dir, file)?
        .into_iter()
        .map(|Row { line, value: row }| cell(file, line, "customer_id", &row.customer_id).key())
        .collect()
}

fn load_reviews(dir: &Path) -> Result<Vec<Review>, LoadError> {
    let file = SourceFile::Reviews;
    let rows = match read_rows::<ReviewRow>(dir, file) {
        Ok(rows) => rows,
        Err(LoadError::MissingFile(path)) if file.is_optional() => {
            tracing::info!("{} não encontrado; KPI de satisfação ficará indisponível", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    rows.into_iter()
        .map(|Row { line, value: row }| {
            let score_cell = cell(file, line, "review_score", &row.review_score);
            let score = score_cell.count()?;
            if !(1..=5).contains(&score) {
                return Err(score_cell.malformed());
            }
            Ok(Review {
                order_id: row.order_id,
                score: score as u8,
            })
        })
        .collect()
}

/// Lê todos os arquivos do diretório de dados para tabelas em memória.
pub fn load_tables(dir: &Path) -> Result<SourceTables, LoadError> {
    let tables = SourceTables {
        orders: load_orders(dir)?,
        items: load_items(dir)?,
        payments: load_payments(dir)?,
        products: load_products(dir)?,
        translations: load_translations(dir)?,
        customers: load_customers(dir)?,
        reviews: load_reviews(dir)?,
    };

    tracing::info!(
        "✅ Dataset carregado de {}: {} pedidos, {} itens, {} pagamentos, {} produtos",
        dir.display(),
        tables.orders.len(),
        tables.items.len(),
        tables.payments.len(),
        tables.products.len()
    );

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{d, write_sample_dataset};
    use std::fs;

    #[test]
    fn loads_every_table_from_a_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());

        let tables = load_tables(dir.path()).unwrap();

        assert_eq!(tables.orders.len(), 3);
        assert_eq!(tables.items.len(), 4);
        assert_eq!(tables.payments.len(), 4);
        assert_eq!(tables.products.len(), 3);
        assert_eq!(tables.customers.len(), 3);
        assert_eq!(tables.reviews.len(), 2);
        assert_eq!(tables.translations["beleza_saude"], "health_beauty");

        let order = &tables.orders["o1"];
        assert_eq!(order.purchased_at.format("%Y-%m").to_string(), "2017-01");
        assert_eq!(tables.items[0].price, d("100.00"));

        let mystery = &tables.products["p3"];
        assert_eq!(mystery.category_name, None);
        assert_eq!(mystery.weight_g, None);

        assert!(tables.payments.iter().any(|p| p.payment_type == PaymentType::Other));
    }

    #[test]
    fn reviews_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::remove_file(dir.path().join(SourceFile::Reviews.file_name())).unwrap();

        let tables = load_tables(dir.path()).unwrap();
        assert!(tables.reviews.is_empty());
    }

    #[test]
    fn missing_required_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::remove_file(dir.path().join(SourceFile::Payments.file_name())).unwrap();

        match load_tables(dir.path()) {
            Err(LoadError::MissingFile(path)) => {
                assert!(path.ends_with("olist_order_payments_dataset.csv"))
            }
            other => panic!("esperava MissingFile, veio {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::OrderItems.file_name()),
            "order_id,order_item_id,product_id,price\no1,1,p1,10.0\n",
        )
        .unwrap();

        match load_tables(dir.path()) {
            Err(LoadError::MissingColumn { file, column }) => {
                assert_eq!(file, "olist_order_items_dataset.csv");
                assert_eq!(column, "freight_value");
            }
            other => panic!("esperava MissingColumn, veio {other:?}"),
        }
    }

    #[test]
    fn malformed_value_reports_line_and_column() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::OrderItems.file_name()),
            "order_id,order_item_id,product_id,price,freight_value\no1,1,p1,10.0,0\no2,1,p2,abc,0\n",
        )
        .unwrap();

        match load_tables(dir.path()) {
            Err(LoadError::Malformed { line, column, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "price");
                assert_eq!(value, "abc");
            }
            other => panic!("esperava Malformed, veio {other:?}"),
        }
    }

    #[test]
    fn bad_timestamp_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::Orders.file_name()),
            "order_id,customer_id,order_status,order_purchase_timestamp\no1,c1,delivered,ontem\n",
        )
        .unwrap();

        assert!(matches!(
            load_tables(dir.path()),
            Err(LoadError::Malformed { ref column, .. }) if column == "order_purchase_timestamp"
        ));
    }

    #[test]
    fn negative_amount_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::Payments.file_name()),
            "order_id,payment_sequential,payment_type,payment_installments,payment_value\no1,1,credit_card,1,-10.00\n",
        )
        .unwrap();

        match load_tables(dir.path()) {
            Err(LoadError::Malformed { file, line, column, value }) => {
                assert_eq!(file, "olist_order_payments_dataset.csv");
                assert_eq!(line, 2);
                assert_eq!(column, "payment_value");
                assert_eq!(value, "-10.00");
            }
            other => panic!("esperava Malformed, veio {other:?}"),
        }
    }

    #[test]
    fn review_score_outside_one_to_five_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::Reviews.file_name()),
            "review_id,order_id,review_score\nr1,o1,5\nr2,o2,7\n",
        )
        .unwrap();

        match load_tables(dir.path()) {
            Err(LoadError::Malformed { line, column, value, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "review_score");
                assert_eq!(value, "7");
            }
            other => panic!("esperava Malformed, veio {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_a_csv_error_naming_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::Orders.file_name()),
            "order_id,customer_id,order_status,order_purchase_timestamp\no1,c1\n",
        )
        .unwrap();

        match load_tables(dir.path()) {
            Err(err @ LoadError::Csv { .. }) => {
                assert!(err.to_string().starts_with("olist_orders_dataset.csv: falha ao ler CSV"));
            }
            other => panic!("esperava Csv, veio {other:?}"),
        }
    }

    #[test]
    fn translation_header_with_bom_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        write_sample_dataset(dir.path());
        fs::write(
            dir.path().join(SourceFile::CategoryTranslation.file_name()),
            "\u{feff}product_category_name,product_category_name_english\nbeleza_saude,health_beauty\n",
        )
        .unwrap();

        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(tables.translations.len(), 1);
    }
}
