//! Форматирование ячеек отчёта: деньги, проценты, месяцы, штуки.
//!
//! Недоступные значения всегда выводятся заглушкой из конфигурации.

use crate::{
    config::{NumberLocale, ReportConfig},
    model::{round_currency, Metric},
};
use rust_decimal::{Decimal, RoundingStrategy};

/// Группирует разряды целой части `v` и ставит десятичный знак локали.
pub fn number(v: Decimal, decimals: u32, locale: &NumberLocale) -> String {
    let v = v.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let negative = v.is_sign_negative() && !v.is_zero();
    let plain = v.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (plain, String::new()),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(locale.thousands_separator);
        }
        grouped.push(ch);
    }

    if decimals > 0 {
        let mut frac = frac_part;
        while frac.len() < decimals as usize {
            frac.push('0');
        }
        grouped.push(locale.decimal_separator);
        grouped.push_str(&frac);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `Rp 10.000.000`, `-Rp 9.320.000`.
pub fn currency(v: Decimal, cfg: &ReportConfig) -> String {
    let v = round_currency(v);
    let digits = number(v.abs(), 0, &cfg.locale);
    if v.is_sign_negative() && !v.is_zero() {
        format!("-{}{}", cfg.currency_prefix, digits)
    } else {
        format!("{}{}", cfg.currency_prefix, digits)
    }
}

pub fn percent(v: Decimal, cfg: &ReportConfig) -> String {
    format!("{}%", number(v, 2, &cfg.locale))
}

pub fn months(v: Decimal, cfg: &ReportConfig) -> String {
    format!("{} bulan", number(v, 0, &cfg.locale))
}

pub fn units(v: Decimal, cfg: &ReportConfig) -> String {
    format!("{} unit", number(v, 0, &cfg.locale))
}

pub fn optional_currency(v: Option<Decimal>, cfg: &ReportConfig) -> String {
    v.map(|x| currency(x, cfg))
        .unwrap_or_else(|| cfg.unavailable.clone())
}

/// Текстовая ячейка; пустой текст заменяется заглушкой.
pub fn text(v: &str, cfg: &ReportConfig) -> String {
    optional_text(Some(v), cfg)
}

pub fn optional_text(v: Option<&str>, cfg: &ReportConfig) -> String {
    match v.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => cfg.unavailable.clone(),
    }
}

/// Показатель через `fmt` либо заглушка, если он недоступен.
pub fn metric(m: &Metric, cfg: &ReportConfig, fmt: fn(Decimal, &ReportConfig) -> String) -> String {
    m.value()
        .map(|v| fmt(v, cfg))
        .unwrap_or_else(|| cfg.unavailable.clone())
}
