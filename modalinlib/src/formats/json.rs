//! JSON: чтение профиля бизнеса от AI-ассистента и запись отчёта.
//!
//! Профиль читается «мягко»: числа могут прийти числом, строкой вида
//! "Rp 5.000.000" / "2,5 juta", null или мусором. Всё нераспознанное
//! становится None, а не ошибкой.

use crate::{
    config::NumberLocale,
    error::Result,
    model::{BusinessProfile, CapitalLineItem, FinancialInputs},
    range::parse_amount,
    report::Report,
    traits::{ReadProfile, WriteReport},
};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde_json::{Map, Value};
use std::io::{BufRead, Write};
use tracing::debug;

type Object = Map<String, Value>;

static NULL: Value = Value::Null;

// Синонимы ключей в порядке приоритета: ассистент шлёт то camelCase, то
// snake_case, иногда сразу несколько вариантов одного поля.
const NAME: &[&str] = &["businessName", "business_name", "name"];
const BUSINESS_TYPE: &[&str] = &["businessType", "business_type", "type", "category"];
const DESCRIPTION: &[&str] = &["description"];
const CAPITAL_RANGE: &[&str] = &[
    "capitalRangeText",
    "capital_range_text",
    "capitalRange",
    "capital_range",
    "capitalEstimate",
];
const LINE_ITEMS: &[&str] = &[
    "capitalLineItems",
    "capital_line_items",
    "capitalItems",
    "capital_items",
    "capitalBreakdown",
];
const FINANCIALS: &[&str] = &["financialInputs", "financial_inputs", "financials"];
const ADVANTAGES: &[&str] = &["advantages"];
const CHALLENGES: &[&str] = &["challenges"];
const TARGET_MARKET: &[&str] = &["targetMarket", "target_market"];
const LOCATION: &[&str] = &["location"];

const LABEL: &[&str] = &["label", "item", "name"];
const QUANTITY: &[&str] = &["quantity", "qty"];
const UNIT: &[&str] = &["unit"];
const UNIT_PRICE: &[&str] = &["unitPrice", "unit_price", "price"];
const LINE_TOTAL: &[&str] = &["lineTotal", "line_total", "total", "subtotal"];

const REVENUE: &[&str] = &["monthlyRevenueEstimate", "monthly_revenue_estimate", "monthlyRevenue"];
const COST: &[&str] = &["monthlyCostEstimate", "monthly_cost_estimate", "monthlyCost"];
const SELLING_PRICE: &[&str] = &["avgSellingPrice", "avg_selling_price"];
const COST_PER_UNIT: &[&str] = &["avgCostPerUnit", "avg_cost_per_unit"];
const BEP_UNITS: &[&str] = &["bepUnitsHint", "bep_units_hint", "bepUnits"];
const BEP_REVENUE: &[&str] = &["bepRevenueHint", "bep_revenue_hint", "bepRevenue"];
const ROI_PERCENTAGE: &[&str] = &["roiPercentageHint", "roi_percentage_hint", "roiPercentage"];
const ROI_MONTHS: &[&str] = &["roiMonthsHint", "roi_months_hint", "roiMonths"];
const GROSS_MARGIN: &[&str] = &["grossMarginHint", "gross_margin_hint", "grossMargin"];

/// Первое непустое (не `null`) значение по списку синонимов.
fn field<'a>(obj: &'a Object, keys: &[&str]) -> &'a Value {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
        .unwrap_or(&NULL)
}

/// Текстовое поле; число берётся как записано, остальное — пустая строка.
fn text(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn optional_text(v: &Value) -> Option<String> {
    Some(text(v)).filter(|s| !s.is_empty())
}

/// Мягкое чтение суммы: число JSON, числовая строка или ничего.
pub fn amount(v: &Value, locale: &NumberLocale) -> Option<Decimal> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .map(Decimal::from)
            .or_else(|| n.as_u64().map(Decimal::from))
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => parse_amount(s, locale),
        _ => None,
    }
}

fn financials(obj: &Object, locale: &NumberLocale) -> Option<FinancialInputs> {
    let Value::Object(f) = field(obj, FINANCIALS) else {
        return None;
    };
    let get = |keys: &[&str]| amount(field(f, keys), locale);
    Some(FinancialInputs {
        monthly_revenue_estimate: get(REVENUE),
        monthly_cost_estimate: get(COST),
        avg_selling_price: get(SELLING_PRICE),
        avg_cost_per_unit: get(COST_PER_UNIT),
        bep_units_hint: get(BEP_UNITS),
        bep_revenue_hint: get(BEP_REVENUE),
        roi_percentage_hint: get(ROI_PERCENTAGE),
        roi_months_hint: get(ROI_MONTHS),
        gross_margin_hint: get(GROSS_MARGIN),
    })
}

fn line_item(raw: &Value, locale: &NumberLocale) -> Option<CapitalLineItem> {
    let Value::Object(item) = raw else {
        debug!("capital line item is not an object, skipped");
        return None;
    };
    Some(CapitalLineItem {
        label: text(field(item, LABEL)),
        quantity: amount(field(item, QUANTITY), locale),
        unit: text(field(item, UNIT)),
        unit_price: amount(field(item, UNIT_PRICE), locale),
        line_total: amount(field(item, LINE_TOTAL), locale),
    })
}

fn line_items(obj: &Object, locale: &NumberLocale) -> Vec<CapitalLineItem> {
    match field(obj, LINE_ITEMS) {
        Value::Array(items) => items.iter().filter_map(|i| line_item(i, locale)).collect(),
        Value::Null => Vec::new(),
        _ => {
            debug!("capital line items are not a list, ignored");
            Vec::new()
        }
    }
}

pub struct Json;

impl ReadProfile for Json {
    fn read<R: BufRead>(r: R, locale: &NumberLocale) -> Result<BusinessProfile> {
        let raw: Object = serde_json::from_reader(r)?;

        Ok(BusinessProfile {
            name: text(field(&raw, NAME)),
            business_type: text(field(&raw, BUSINESS_TYPE)),
            description: text(field(&raw, DESCRIPTION)),
            capital_range_text: text(field(&raw, CAPITAL_RANGE)),
            capital_line_items: line_items(&raw, locale),
            financial_inputs: financials(&raw, locale),
            advantages: optional_text(field(&raw, ADVANTAGES)),
            challenges: optional_text(field(&raw, CHALLENGES)),
            target_market: optional_text(field(&raw, TARGET_MARKET)),
            location: optional_text(field(&raw, LOCATION)),
        })
    }
}

impl WriteReport for Json {
    fn write<W: Write>(mut w: W, report: &Report) -> Result<()> {
        serde_json::to_writer_pretty(&mut w, report)?;
        w.write_all(b"\n")?;
        Ok(())
    }
}
