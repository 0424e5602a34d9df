use modalinlib::{
    analyze,
    config::{NumberLocale, ReportConfig},
    formats::json::{amount, Json},
    model::Adjustment,
    report::SectionKind,
    traits::ReadProfile,
};
use rust_decimal::Decimal;
use serde_json::json;
use std::io::Cursor;

fn read(input: &str) -> modalinlib::error::Result<modalinlib::model::BusinessProfile> {
    Json::read(Cursor::new(input), &NumberLocale::default())
}

const ASSISTANT_REPLY: &str = r#"{
  "businessName": "Kopi Senja",
  "businessType": "Kedai kopi",
  "description": "Kopi susu gula aren",
  "capitalRange": "Rp 5 juta - 10 juta",
  "capitalItems": [
    {"item": "Mesin espresso", "qty": 1, "unit": "unit", "price": "Rp 8.000.000"},
    {"item": "Gerobak", "quantity": "1", "unit": "unit", "unitPrice": 4000000, "total": 1},
    {"item": "Sewa", "subtotal": "1,5 juta"},
    "bukan objek"
  ],
  "financials": {
    "monthlyRevenue": "Rp 3.000.000",
    "monthlyCost": 2000000,
    "avgSellingPrice": "25rb",
    "grossMargin": null
  },
  "targetMarket": "  Mahasiswa  ",
  "location": ""
}"#;

#[test]
fn reads_assistant_reply_with_aliases() {
    let p = read(ASSISTANT_REPLY).expect("read profile");
    assert_eq!(p.name, "Kopi Senja");
    assert_eq!(p.business_type, "Kedai kopi");
    assert_eq!(p.capital_range_text, "Rp 5 juta - 10 juta");
    assert_eq!(p.target_market.as_deref(), Some("Mahasiswa"));
    assert_eq!(p.location, None);

    assert_eq!(p.capital_line_items.len(), 3);
    assert_eq!(p.capital_line_items[0].label, "Mesin espresso");
    assert_eq!(p.capital_line_items[0].unit_price, Some(Decimal::from(8_000_000)));
    assert_eq!(p.capital_line_items[1].quantity, Some(Decimal::from(1)));
    assert_eq!(p.capital_line_items[1].line_total, Some(Decimal::from(1)));
    assert_eq!(p.capital_line_items[2].line_total, Some(Decimal::from(1_500_000)));

    let f = p.financial_inputs.expect("financials");
    assert_eq!(f.monthly_revenue_estimate, Some(Decimal::from(3_000_000)));
    assert_eq!(f.monthly_cost_estimate, Some(Decimal::from(2_000_000)));
    assert_eq!(f.avg_selling_price, Some(Decimal::from(25_000)));
    assert_eq!(f.gross_margin_hint, None);
}

#[test]
fn end_to_end_from_json() {
    let p = read(ASSISTANT_REPLY).expect("read profile");
    let a = analyze(&p, &ReportConfig::default());
    // 8.000.000 + 4.000.000 + 1.500.000, прижато к 5-10 juta
    assert_eq!(a.validated.raw_total, Decimal::from(13_500_000));
    assert_eq!(a.validated.adjusted_total, Decimal::from(10_000_000));
    assert_eq!(a.validated.adjustment, Adjustment::ClampedToMax);
    assert!(a.report.section(SectionKind::FinancialMetrics).is_some());
}

#[test]
fn snake_case_keys_are_accepted() {
    let p = read(
        r#"{"name":"Warung","business_type":"Kuliner","capital_range_text":"1-2 juta",
            "capital_line_items":[{"label":"Kompor","quantity":2,"unit_price":"750.000"}],
            "financial_inputs":{"monthly_revenue_estimate":"5 juta","monthly_cost_estimate":"3 juta"}}"#,
    )
    .expect("read profile");
    assert_eq!(p.business_type, "Kuliner");
    assert_eq!(p.capital_line_items[0].unit_price, Some(Decimal::from(750_000)));
    let f = p.financial_inputs.expect("financials");
    assert_eq!(f.monthly_revenue_estimate, Some(Decimal::from(5_000_000)));
}

#[test]
fn malformed_parts_degrade_to_none() {
    let p = read(
        r#"{"name":"X","capitalItems":"tidak ada","financialInputs":"belum tahu",
            "advantages":42,"challenges":{"a":1}}"#,
    )
    .expect("read profile");
    assert!(p.capital_line_items.is_empty());
    assert_eq!(p.financial_inputs, None);
    assert_eq!(p.advantages.as_deref(), Some("42"));
    assert_eq!(p.challenges, None);

    let a = analyze(&p, &ReportConfig::default());
    assert_eq!(a.validated.adjusted_total, Decimal::ZERO);
    assert!(a.report.section(SectionKind::Summary).is_some());
}

#[test]
fn empty_object_is_a_valid_profile() {
    let p = read("{}").expect("read profile");
    assert_eq!(p.name, "");
    assert!(p.capital_line_items.is_empty());
    assert_eq!(p.financial_inputs, None);
}

#[test]
fn non_json_is_an_error() {
    assert!(read("Nama usaha: Kopi Senja").is_err());
    assert!(read("").is_err());
}

#[test]
fn lenient_amounts() {
    let l = NumberLocale::default();
    assert_eq!(amount(&json!(1500000), &l), Some(Decimal::from(1_500_000)));
    assert_eq!(amount(&json!(2.5), &l), Some(Decimal::new(25, 1)));
    assert_eq!(amount(&json!("Rp 2.500.000"), &l), Some(Decimal::from(2_500_000)));
    assert_eq!(amount(&json!("tidak tahu"), &l), None);
    assert_eq!(amount(&json!(null), &l), None);
    assert_eq!(amount(&json!([1, 2]), &l), None);
}

#[test]
fn synonymous_keys_do_not_break_the_profile() {
    let p = read(
        r#"{"businessName":"Kopi Senja","name":"kopi-senja","businessType":"Kedai kopi",
            "category":"Kuliner","capitalRange":"5-10 juta","capital_range":"lain"}"#,
    )
    .expect("read profile");
    assert_eq!(p.name, "Kopi Senja");
    assert_eq!(p.business_type, "Kedai kopi");
    assert_eq!(p.capital_range_text, "5-10 juta");
}

#[test]
fn line_item_with_item_and_name_is_kept() {
    let p = read(
        r#"{"capitalItems":[
              {"item":"Oven","name":"Oven listrik","qty":1,"price":3000000,"total":3000000,"subtotal":"3 juta"}
            ],
            "financials":{"monthlyRevenue":"2 juta","monthly_revenue_estimate":null,"monthlyCost":"1 juta"}}"#,
    )
    .expect("read profile");
    assert_eq!(p.capital_line_items.len(), 1);
    assert_eq!(p.capital_line_items[0].label, "Oven");
    assert_eq!(p.capital_line_items[0].line_total, Some(Decimal::from(3_000_000)));

    let f = p.financial_inputs.as_ref().expect("financials");
    assert_eq!(f.monthly_revenue_estimate, Some(Decimal::from(2_000_000)));

    let a = analyze(&p, &ReportConfig::default());
    assert_eq!(a.validated.raw_total, Decimal::from(3_000_000));
}
