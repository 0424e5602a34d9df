//! Доменные модели: входной профиль бизнеса и производные величины.
//!
//! Все производные сущности пересчитываются заново на каждый запрос отчёта
//! и нигде не кэшируются.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Профиль предлагаемого бизнеса (из шага рекомендаций или ручного ввода).
/// Числа уже нормализованы; всё нераспознанное — `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BusinessProfile {
    pub name: String,
    pub business_type: String,
    pub description: String,
    pub capital_range_text: String,
    pub capital_line_items: Vec<CapitalLineItem>,
    pub financial_inputs: Option<FinancialInputs>,
    pub advantages: Option<String>,
    pub challenges: Option<String>,
    pub target_market: Option<String>,
    pub location: Option<String>,
}

/// Одна статья затрат в том виде, как пришла. `line_total` не доверяем.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CapitalLineItem {
    pub label: String,
    pub quantity: Option<Decimal>,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub line_total: Option<Decimal>,
}

/// Статья, прошедшая отбор, с фактическим итогом.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricedLineItem {
    pub label: String,
    pub quantity: Option<Decimal>,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialInputs {
    pub monthly_revenue_estimate: Option<Decimal>,
    pub monthly_cost_estimate: Option<Decimal>,
    pub avg_selling_price: Option<Decimal>,
    pub avg_cost_per_unit: Option<Decimal>,
    pub bep_units_hint: Option<Decimal>,
    pub bep_revenue_hint: Option<Decimal>,
    pub roi_percentage_hint: Option<Decimal>,
    pub roi_months_hint: Option<Decimal>,
    pub gross_margin_hint: Option<Decimal>,
}

/// Разобранный диапазон капитала. `{0, 0}` — текст не распознан.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapitalRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl CapitalRange {
    pub const UNPARSEABLE: CapitalRange = CapitalRange {
        min: Decimal::ZERO,
        max: Decimal::ZERO,
    };

    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn is_unparseable(&self) -> bool {
        self.min.is_zero() && self.max.is_zero()
    }

    /// Границы перепутаны. Парсер сохраняет порядок чисел, решают вызывающие.
    pub fn is_degenerate(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RangeStatus {
    Parsed,
    Unparseable,
    Degenerate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    None,
    ClampedToMax,
    RaisedToMin,
}

impl Adjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Adjustment::None => "none",
            Adjustment::ClampedToMax => "clamped_to_max",
            Adjustment::RaisedToMin => "raised_to_min",
        }
    }
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatedTotal {
    pub range: CapitalRange,
    pub range_status: RangeStatus,
    pub raw_total: Decimal,
    pub adjusted_total: Decimal,
    pub adjustment: Adjustment,
}

impl ValidatedTotal {
    /// Итог, на который можно опираться в расчётах. При перевёрнутом
    /// диапазоне сверить сумму не с чем, поэтому `None`.
    pub fn usable_total(&self) -> Option<Decimal> {
        match self.range_status {
            RangeStatus::Degenerate => None,
            RangeStatus::Parsed | RangeStatus::Unparseable => Some(self.adjusted_total),
        }
    }
}

/// Почему показатель не посчитан.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Unavailable {
    MissingInput,
    ZeroInvestment,
    NonPositiveProfit,
    NonPositiveRevenue,
    NonPositiveUnitMargin,
    DegenerateRange,
}

/// Производный показатель: либо значение, либо явное «неизвестно».
/// Неизвестное никогда не выводится нулём.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Metric {
    Value(Decimal),
    Unavailable(Unavailable),
}

impl Metric {
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialMetrics {
    pub monthly_revenue: Decimal,
    pub monthly_cost: Decimal,
    pub monthly_profit: Decimal,
    pub yearly_profit: Decimal,
    pub avg_selling_price: Option<Decimal>,
    pub avg_cost_per_unit: Option<Decimal>,
    pub roi_percentage: Metric,
    pub payback_months: Metric,
    pub roi_months: Metric,
    pub gross_margin_percentage: Metric,
    pub bep_units: Metric,
    pub bep_revenue: Metric,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectionRow {
    pub month: u32,
    pub growth_factor: Decimal,
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    pub cumulative_balance: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CashFlowProjection {
    pub initial_investment: Decimal,
    pub rows: Vec<ProjectionRow>,
}

impl CashFlowProjection {
    /// Первый месяц с неотрицательным накопленным сальдо. Без вложений
    /// окупать нечего, тогда `None`.
    pub fn break_even_month(&self) -> Option<u32> {
        if self.initial_investment <= Decimal::ZERO {
            return None;
        }
        self.rows
            .iter()
            .find(|r| r.cumulative_balance >= Decimal::ZERO)
            .map(|r| r.month)
    }

    pub fn total_revenue(&self) -> Option<Decimal> {
        self.total(|r| r.revenue)
    }

    pub fn total_cost(&self) -> Option<Decimal> {
        self.total(|r| r.cost)
    }

    pub fn total_profit(&self) -> Option<Decimal> {
        self.total(|r| r.profit)
    }

    /// `None` при переполнении.
    fn total(&self, field: fn(&ProjectionRow) -> Decimal) -> Option<Decimal> {
        self.rows
            .iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(field(r)))
    }

    pub fn ending_balance(&self) -> Decimal {
        self.rows
            .last()
            .map(|r| r.cumulative_balance)
            .unwrap_or(-self.initial_investment)
    }
}

/// Округление до целых единиц валюты, половины — от нуля.
pub fn round_currency(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
