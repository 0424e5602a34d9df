//! Разбор свободного текста с диапазоном капитала: «Rp 5 juta - 10 juta».
//!
//! Берутся первые два числа из текста. Слова-множители (ribu/juta/miliar и
//! английские аналоги) масштабируют только «сокращённые» значения, меньше
//! 100 000, чтобы не умножить повторно «5.000.000 - 10.000.000».

use crate::{
    config::NumberLocale,
    model::{round_currency, CapitalRange},
};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;
use tracing::debug;

/// Значения от этого порога считаются записанными полностью и не масштабируются.
const SCALE_GUARD: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Magnitude {
    Thousand,
    Million,
    Billion,
}

impl Magnitude {
    pub fn multiplier(self) -> Decimal {
        match self {
            Magnitude::Thousand => Decimal::from(1_000u32),
            Magnitude::Million => Decimal::from(1_000_000u32),
            Magnitude::Billion => Decimal::from(1_000_000_000u32),
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "ribu" | "rb" | "rebu" | "k" | "thousand" | "thousands" => Some(Magnitude::Thousand),
            "juta" | "jt" | "million" | "millions" | "mio" => Some(Magnitude::Million),
            "miliar" | "milyar" | "billion" | "billions" | "bn" => Some(Magnitude::Billion),
            _ => None,
        }
    }

    /// Самый крупный множитель, встреченный в `text`, без учёта регистра.
    pub fn detect(text: &str) -> Option<Self> {
        text.split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
            .filter_map(Magnitude::from_word)
            .max()
    }
}

#[derive(Debug, Clone, Copy)]
struct Token {
    value: Decimal,
    /// Множитель сразу после числа ("500rb", "2 juta").
    suffix: Option<Magnitude>,
    negative: bool,
}

impl Token {
    fn scaled(&self, global: Option<Magnitude>) -> Option<Decimal> {
        match self.suffix.or(global) {
            Some(m) if self.value < Decimal::from(SCALE_GUARD) => {
                self.value.checked_mul(m.multiplier())
            }
            _ => Some(self.value),
        }
    }
}

/// Разбирает диапазон капитала. Не падает: меньше двух чисел даёт
/// [`CapitalRange::UNPARSEABLE`]. Перевёрнутые границы остаются как записаны.
pub fn parse(text: &str, locale: &NumberLocale) -> CapitalRange {
    let global = Magnitude::detect(text);
    let mut tokens = scan(text, locale).into_iter();

    let (Some(a), Some(b)) = (tokens.next(), tokens.next()) else {
        debug!(text, "fewer than two numbers in capital range");
        return CapitalRange::UNPARSEABLE;
    };

    match (a.scaled(global), b.scaled(global)) {
        (Some(min), Some(max)) => {
            let range = CapitalRange::new(round_currency(min), round_currency(max));
            debug!(text, min = %range.min, max = %range.max, magnitude = ?global, "capital range parsed");
            range
        }
        _ => {
            debug!(text, "capital range overflows");
            CapitalRange::UNPARSEABLE
        }
    }
}

/// Читает одну вольно записанную сумму ("Rp 3.500.000", "2,5 juta", "-150rb").
/// Без округления, чтобы проценты сохраняли дробную часть.
pub fn parse_amount(text: &str, locale: &NumberLocale) -> Option<Decimal> {
    let global = Magnitude::detect(text);
    let token = scan(text, locale).into_iter().next()?;
    let value = token.scaled(global)?;
    Some(if token.negative { -value } else { value })
}

/// Приводит одну числовую запись к Decimal.
///
/// Если встречаются и `.`, и `,`, правый из них десятичный, а другой
/// разделяет разряды. При одном виде разделителя группы ровно по три цифры
/// означают разряды; исключение: единственный разделитель, совпадающий с
/// десятичным знаком локали, остаётся дробью ("1,500" в `id` это 1,5).
pub fn parse_number(literal: &str, locale: &NumberLocale) -> Option<Decimal> {
    let is_sep = |c: char| {
        c == '.' || c == ',' || c == locale.thousands_separator || c == locale.decimal_separator
    };
    let seps: Vec<(usize, char)> = literal.char_indices().filter(|(_, c)| is_sep(*c)).collect();

    let Some(&(last_pos, last_sep)) = seps.last() else {
        return literal.parse().ok();
    };

    let mixed = seps.iter().any(|(_, c)| *c != last_sep);
    let normalized = if mixed {
        let group = seps[0].1;
        if seps[..seps.len() - 1].iter().any(|(_, c)| *c != group) {
            return None;
        }
        let (int_part, frac) = literal.split_at(last_pos);
        format!("{}.{}", int_part.replace(group, ""), &frac[last_sep.len_utf8()..])
    } else {
        let groups: Vec<&str> = literal.split(last_sep).collect();
        let three_digit_groups = groups[1..].iter().all(|g| g.len() == 3);
        let grouping = if groups.len() > 2 {
            three_digit_groups
        } else {
            three_digit_groups && last_sep != locale.decimal_separator
        };
        if grouping {
            literal.replace(last_sep, "")
        } else if groups.len() == 2 {
            literal.replace(last_sep, ".")
        } else {
            return None;
        }
    };
    normalized.parse().ok()
}

/// Шаблон числа с разделителями `.` и `,`; годится для любой локали,
/// чьи разделители из этих двух. Собирается один раз.
static NUMBER_RE: LazyLock<Option<Regex>> = LazyLock::new(|| number_regex(""));

fn number_regex(extra_separators: &str) -> Option<Regex> {
    let pattern = format!(r"(\d+(?:[.,{extra_separators}]\d+)*)(?:\s*(\p{{L}}+))?");
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            debug!(error = %e, "number pattern rejected");
            None
        }
    }
}

fn scan(text: &str, locale: &NumberLocale) -> Vec<Token> {
    let extra: String = [locale.thousands_separator, locale.decimal_separator]
        .into_iter()
        .filter(|c| *c != '.' && *c != ',')
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    let own;
    let re = if extra.is_empty() {
        NUMBER_RE.as_ref()
    } else {
        own = number_regex(&extra);
        own.as_ref()
    };
    let Some(re) = re else {
        return Vec::new();
    };

    re.captures_iter(text)
        .filter_map(|caps| {
            let literal = caps.get(1)?;
            let value = parse_number(literal.as_str(), locale)?;
            let suffix = caps
                .get(2)
                .and_then(|m| Magnitude::from_word(m.as_str()));
            let negative = text[..literal.start()].ends_with('-');
            Some(Token {
                value,
                suffix,
                negative,
            })
        })
        .collect()
}
