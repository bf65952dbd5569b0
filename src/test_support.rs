// src/test_support.rs
// Fixtures compartilhadas pelos testes dos módulos.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::dataset::{Dataset, PaymentRecord, PaymentWeight, SaleRecord};
use crate::models::olist::PaymentType;

pub fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn at(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn sale(order_id: &str, date: &str, category: &str, revenue: &str) -> SaleRecord {
    let purchased_at = at(date);
    SaleRecord {
        order_id: order_id.to_string(),
        year: purchased_at.year(),
        month: purchased_at.month(),
        category: category.to_string(),
        revenue: d(revenue),
        review_score: None,
        payment_mix: vec![PaymentWeight {
            payment_type: PaymentType::CreditCard,
            weight: Decimal::ONE,
        }],
    }
}

pub fn payment(date: &str, payment_type: PaymentType, value: &str) -> PaymentRecord {
    let purchased_at = at(date);
    PaymentRecord {
        year: purchased_at.year(),
        month: purchased_at.month(),
        payment_type,
        value: d(value),
        categories: Vec::new(),
    }
}

/// Dataset pequeno, com dois anos, três categorias e pagamento dividido.
pub fn sample_dataset() -> Dataset {
    let mut sales = vec![
        sale("a1", "2017-01-03", "health_beauty", "120"),
        sale("a1", "2017-01-03", "watches_gifts", "80"),
        sale("a2", "2017-01-15", "health_beauty", "100"),
        sale("a3", "2017-02-10", "bed_bath_table", "50"),
        sale("a4", "2018-05-20", "health_beauty", "300"),
        sale("a5", "2018-06-01", "watches_gifts", "150"),
    ];
    sales[0].review_score = Some(d("5"));
    sales[1].review_score = Some(d("5"));
    sales[2].review_score = Some(d("3"));
    // a1 foi pago metade no cartão, metade em voucher
    for record in sales.iter_mut() {
        record.payment_mix = match record.order_id.as_str() {
            "a1" => vec![
                PaymentWeight { payment_type: PaymentType::CreditCard, weight: d("0.5") },
                PaymentWeight { payment_type: PaymentType::Voucher, weight: d("0.5") },
            ],
            "a2" | "a5" => vec![PaymentWeight { payment_type: PaymentType::Boleto, weight: Decimal::ONE }],
            "a4" => vec![PaymentWeight { payment_type: PaymentType::DebitCard, weight: Decimal::ONE }],
            _ => std::mem::take(&mut record.payment_mix),
        };
    }

    let payments = [
        ("a1", "2017-01-03", PaymentType::CreditCard, "100"),
        ("a1", "2017-01-03", PaymentType::Voucher, "100"),
        ("a2", "2017-01-15", PaymentType::Boleto, "100"),
        ("a3", "2017-02-10", PaymentType::CreditCard, "50"),
        ("a4", "2018-05-20", PaymentType::DebitCard, "300"),
        ("a5", "2018-06-01", PaymentType::Boleto, "150"),
    ]
    .into_iter()
    .map(|(order_id, date, payment_type, value)| {
        let mut record = payment(date, payment_type, value);
        record.categories = sales
            .iter()
            .filter(|s| s.order_id == order_id)
            .map(|s| s.category.clone())
            .collect();
        record.categories.sort();
        record.categories.dedup();
        record
    })
    .collect();

    Dataset {
        sales,
        payments,
        quality: Default::default(),
    }
}

/// Escreve um diretório no formato Olist com 3 pedidos.
pub fn write_sample_dataset(dir: &Path) {
    let files = [
        (
            "olist_orders_dataset.csv",
            "order_id,customer_id,order_status,order_purchase_timestamp,order_approved_at\n\
             o1,c1,delivered,2017-01-05 10:00:00,2017-01-05 11:00:00\n\
             o2,c2,delivered,2017-01-20 09:30:00,\n\
             o3,c3,shipped,2018-03-02 18:45:10,\n",
        ),
        (
            "olist_order_items_dataset.csv",
            "order_id,order_item_id,product_id,seller_id,shipping_limit_date,price,freight_value\n\
             o1,1,p1,s1,2017-01-10 00:00:00,100.00,0.00\n\
             o1,2,p2,s1,2017-01-10 00:00:00,50.00,10.00\n\
             o2,1,p1,s2,2017-01-25 00:00:00,80.00,20.00\n\
             o3,1,p3,s2,2018-03-08 00:00:00,40.00,0.00\n",
        ),
        (
            "olist_order_payments_dataset.csv",
            "order_id,payment_sequential,payment_type,payment_installments,payment_value\n\
             o1,1,credit_card,3,100.00\n\
             o1,2,voucher,1,60.00\n\
             o2,1,boleto,1,100.00\n\
             o3,1,not_defined,0,40.00\n",
        ),
        (
            "olist_products_dataset.csv",
            "product_id,product_category_name,product_name_lenght,product_weight_g,product_length_cm,product_height_cm,product_width_cm\n\
             p1,beleza_saude,40,225,16,10,14\n\
             p2,relogios_presentes,52,1000,30,18,20\n\
             p3,,,,,,\n",
        ),
        (
            "product_category_name_translation.csv",
            "product_category_name,product_category_name_english\n\
             beleza_saude,health_beauty\n\
             relogios_presentes,watches_gifts\n",
        ),
        (
            "olist_customers_dataset.csv",
            "customer_id,customer_unique_id,customer_zip_code_prefix,customer_city,customer_state\n\
             c1,u1,14409,franca,SP\n\
             c2,u2,9790,sao bernardo do campo,SP\n\
             c3,u3,1151,sao paulo,SP\n",
        ),
        (
            "olist_order_reviews_dataset.csv",
            "review_id,order_id,review_score,review_comment_title,review_comment_message\n\
             r1,o1,5,,\"Chegou antes do prazo, recomendo\"\n\
             r2,o2,4,,\n",
        ),
    ];

    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
}
