// src/data/joiner.rs

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{
    dataset::{DataQualityReport, Dataset, PaymentRecord, PaymentWeight, SaleRecord, UNKNOWN_CATEGORY},
    olist::{PaymentType, SourceTables},
};

// Participação de cada forma de pagamento no valor pago do pedido.
// Se o pedido somar zero (ex.: só voucher zerado), divide pela quantidade de pagamentos.
fn payment_weights(totals: &BTreeMap<PaymentType, (u64, Decimal)>) -> Vec<PaymentWeight> {
    let total_value: Decimal = totals.values().map(|(_, value)| *value).sum();
    let total_count: u64 = totals.values().map(|(count, _)| *count).sum();
    if total_count == 0 {
        return Vec::new();
    }

    let mut weights: Vec<PaymentWeight> = totals
        .iter()
        .map(|(payment_type, (count, value))| {
            let weight = if total_value.is_zero() {
                Decimal::from(*count) / Decimal::from(total_count)
            } else {
                *value / total_value
            };
            PaymentWeight { payment_type: *payment_type, weight }
        })
        .collect();

    // O último peso fecha a conta em exatamente 1
    let head: Decimal = weights.iter().rev().skip(1).map(|w| w.weight).sum();
    if let Some(last) = weights.last_mut() {
        last.weight = Decimal::ONE - head;
    }
    weights
}

/// Junta as tabelas em registros de venda (um por item) e de pagamento (um por pagamento).
/// Chaves que não resolvem são descartadas e contadas no relatório de qualidade.
pub fn join(tables: &SourceTables) -> Dataset {
    let mut quality = DataQualityReport {
        orders_loaded: tables.orders.len() as u64,
        ..Default::default()
    };

    // 1. Pagamentos por pedido
    let mut totals_by_order: HashMap<&str, BTreeMap<PaymentType, (u64, Decimal)>> = HashMap::new();
    for payment in &tables.payments {
        if payment.order_id.is_empty() || !tables.orders.contains_key(&payment.order_id) {
            quality.payments_without_order += 1;
            continue;
        }
        let entry = totals_by_order
            .entry(payment.order_id.as_str())
            .or_default()
            .entry(payment.payment_type)
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += payment.value;
    }
    let mix_by_order: HashMap<&str, Vec<PaymentWeight>> = totals_by_order
        .iter()
        .map(|(order_id, totals)| (*order_id, payment_weights(totals)))
        .collect();

    // 2. Nota média por pedido
    let mut scores_by_order: HashMap<&str, (u32, u32)> = HashMap::new();
    for review in &tables.reviews {
        if review.order_id.is_empty() || !tables.orders.contains_key(&review.order_id) {
            quality.reviews_without_order += 1;
            continue;
        }
        let entry = scores_by_order.entry(review.order_id.as_str()).or_insert((0, 0));
        entry.0 += u32::from(review.score);
        entry.1 += 1;
    }

    // 3. Clientes (não descartamos o pedido, só contamos)
    quality.orders_without_customer = tables
        .orders
        .values()
        .filter(|order| !tables.customers.contains(&order.customer_id))
        .count() as u64;

    // 4. Itens -> pedido -> produto -> categoria traduzida
    let mut sales = Vec::with_capacity(tables.items.len());
    for item in &tables.items {
        let Some(order) = (!item.order_id.is_empty())
            .then(|| tables.orders.get(&item.order_id))
            .flatten()
        else {
            quality.items_without_order += 1;
            continue;
        };
        let Some(product) = (!item.product_id.is_empty())
            .then(|| tables.products.get(&item.product_id))
            .flatten()
        else {
            quality.items_without_product += 1;
            continue;
        };

        let category = match product
            .category_name
            .as_ref()
            .and_then(|name| tables.translations.get(name))
        {
            Some(english) => english.clone(),
            None => {
                quality.items_without_category += 1;
                UNKNOWN_CATEGORY.to_string()
            }
        };

        let review_score = scores_by_order
            .get(order.order_id.as_str())
            .map(|(sum, count)| Decimal::from(*sum) / Decimal::from(*count));

        sales.push(SaleRecord {
            order_id: order.order_id.clone(),
            year: order.purchased_at.year(),
            month: order.purchased_at.month(),
            category,
            revenue: item.price + item.freight_value,
            review_score,
            payment_mix: mix_by_order
                .get(order.order_id.as_str())
                .cloned()
                .unwrap_or_default(),
        });
    }
    quality.items_joined = sales.len() as u64;

    // 5. Pagamentos, com as categorias do pedido para o filtro
    let mut categories_by_order: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for sale in &sales {
        categories_by_order
            .entry(sale.order_id.as_str())
            .or_default()
            .insert(sale.category.as_str());
    }

    let payments: Vec<PaymentRecord> = tables
        .payments
        .iter()
        .filter_map(|payment| {
            let order = tables.orders.get(&payment.order_id)?;
            Some(PaymentRecord {
                year: order.purchased_at.year(),
                month: order.purchased_at.month(),
                payment_type: payment.payment_type,
                value: payment.value,
                categories: categories_by_order
                    .get(order.order_id.as_str())
                    .map(|set| set.iter().map(|c| c.to_string()).collect())
                    .unwrap_or_default(),
            })
        })
        .collect();
    quality.payments_joined = payments.len() as u64;

    if quality.dropped_total() > 0 {
        tracing::warn!(
            "⚠️ Registros descartados no join: {} itens sem pedido, {} itens sem produto, {} pagamentos sem pedido, {} avaliações sem pedido",
            quality.items_without_order,
            quality.items_without_product,
            quality.payments_without_order,
            quality.reviews_without_order
        );
    }
    if quality.items_without_category > 0 {
        tracing::warn!(
            "{} itens sem categoria traduzida foram agrupados em '{}'",
            quality.items_without_category,
            UNKNOWN_CATEGORY
        );
    }

    Dataset { sales, payments, quality }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::olist::{Order, OrderItem, Payment, Product, Review};
    use crate::test_support::{at, d};

    fn order(id: &str, customer: &str, date: &str) -> Order {
        Order {
            order_id: id.into(),
            customer_id: customer.into(),
            purchased_at: at(date),
        }
    }

    fn item(order_id: &str, product_id: &str, price: &str, freight: &str) -> OrderItem {
        OrderItem {
            order_id: order_id.into(),
            product_id: product_id.into(),
            price: d(price),
            freight_value: d(freight),
        }
    }

    fn product(id: &str, category: Option<&str>) -> Product {
        Product {
            product_id: id.into(),
            category_name: category.map(str::to_string),
            weight_g: None,
            length_cm: None,
            height_cm: None,
            width_cm: None,
        }
    }

    fn pay(order_id: &str, payment_type: PaymentType, value: &str) -> Payment {
        Payment {
            order_id: order_id.into(),
            payment_type,
            value: d(value),
        }
    }

    fn tables() -> SourceTables {
        let mut tables = SourceTables::default();
        for o in [order("o1", "c1", "2017-01-05"), order("o2", "ghost", "2017-02-01")] {
            tables.orders.insert(o.order_id.clone(), o);
        }
        for p in [
            product("p1", Some("beleza_saude")),
            product("p2", Some("sem_traducao")),
            product("p3", None),
        ] {
            tables.products.insert(p.product_id.clone(), p);
        }
        tables.translations.insert("beleza_saude".into(), "health_beauty".into());
        tables.customers.insert("c1".into());
        tables.items = vec![
            item("o1", "p1", "100", "10"),
            item("o1", "p2", "40", "0"),
            item("o2", "p3", "50", "0"),
            item("missing", "p1", "999", "0"),
            item("o2", "nope", "999", "0"),
            item("", "p1", "999", "0"),
        ];
        tables.payments = vec![
            pay("o1", PaymentType::CreditCard, "75"),
            pay("o1", PaymentType::Voucher, "75"),
            pay("o2", PaymentType::Boleto, "50"),
            pay("missing", PaymentType::Boleto, "10"),
        ];
        tables.reviews = vec![
            Review { order_id: "o1".into(), score: 4 },
            Review { order_id: "o1".into(), score: 5 },
            Review { order_id: "missing".into(), score: 1 },
        ];
        tables
    }

    #[test]
    fn unresolvable_keys_are_dropped_and_counted() {
        let dataset = join(&tables());
        let q = &dataset.quality;

        assert_eq!(q.orders_loaded, 2);
        assert_eq!(q.items_joined, 3);
        assert_eq!(q.items_without_order, 2);
        assert_eq!(q.items_without_product, 1);
        assert_eq!(q.payments_without_order, 1);
        assert_eq!(q.payments_joined, 3);
        assert_eq!(q.reviews_without_order, 1);
        assert_eq!(q.orders_without_customer, 1);
        assert_eq!(q.dropped_total(), 5);
    }

    #[test]
    fn missing_category_or_translation_lands_in_unknown() {
        let dataset = join(&tables());
        let categories: Vec<&str> = dataset.sales.iter().map(|s| s.category.as_str()).collect();

        assert_eq!(categories, vec!["health_beauty", UNKNOWN_CATEGORY, UNKNOWN_CATEGORY]);
        assert_eq!(dataset.quality.items_without_category, 2);
    }

    #[test]
    fn sale_records_carry_order_context() {
        let dataset = join(&tables());
        let first = &dataset.sales[0];

        assert_eq!(first.revenue, d("110"));
        assert_eq!((first.year, first.month), (2017, 1));
        assert_eq!(first.review_score, Some(d("4.5")));
        assert_eq!(
            first.payment_mix,
            vec![
                PaymentWeight { payment_type: PaymentType::CreditCard, weight: d("0.5") },
                PaymentWeight { payment_type: PaymentType::Voucher, weight: d("0.5") },
            ]
        );

        let orphan_customer = &dataset.sales[2];
        assert_eq!(orphan_customer.order_id, "o2");
        assert_eq!(orphan_customer.review_score, None);
    }

    #[test]
    fn payment_records_know_the_order_categories() {
        let dataset = join(&tables());
        // pagamentos mantêm a ordem do arquivo: dois de o1, um de o2
        let categories: Vec<&Vec<String>> = dataset.payments.iter().map(|p| &p.categories).collect();

        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0], &vec!["health_beauty".to_string(), UNKNOWN_CATEGORY.to_string()]);
        assert_eq!(categories[1], categories[0]);
        assert_eq!(categories[2], &vec![UNKNOWN_CATEGORY.to_string()]);
    }

    #[test]
    fn weights_always_close_at_one() {
        let mut totals = BTreeMap::new();
        totals.insert(PaymentType::CreditCard, (1, d("10")));
        totals.insert(PaymentType::Boleto, (1, d("10")));
        totals.insert(PaymentType::Voucher, (1, d("10")));

        let weights = payment_weights(&totals);
        let sum: Decimal = weights.iter().map(|w| w.weight).sum();
        assert_eq!(sum, Decimal::ONE);

        let mut zeroed = BTreeMap::new();
        zeroed.insert(PaymentType::Voucher, (2, Decimal::ZERO));
        zeroed.insert(PaymentType::CreditCard, (2, Decimal::ZERO));
        let weights = payment_weights(&zeroed);
        assert_eq!(weights[0].weight, d("0.5"));
        assert_eq!(weights[1].weight, d("0.5"));
    }

    #[test]
    fn joins_the_sample_directory_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        crate::test_support::write_sample_dataset(dir.path());
        let tables = crate::data::loader::load_tables(dir.path()).unwrap();

        let dataset = join(&tables);

        assert_eq!(dataset.sales.len(), 4);
        assert_eq!(dataset.payments.len(), 4);
        assert_eq!(dataset.quality.dropped_total(), 0);
        assert_eq!(dataset.quality.items_without_category, 1);
        let total: Decimal = dataset.sales.iter().map(|s| s.revenue).sum();
        assert_eq!(total, d("300"));
    }
}
