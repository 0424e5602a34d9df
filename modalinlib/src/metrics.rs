//! Производные показатели: прибыль, ROI, срок окупаемости, маржа, точка безубыточности.

use crate::model::{
    round_currency, FinancialInputs, FinancialMetrics, Metric, Unavailable, ValidatedTotal,
};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

const MONTHS_PER_YEAR: u32 = 12;

fn positive(v: Option<Decimal>) -> Option<Decimal> {
    v.filter(|x| *x > Decimal::ZERO)
}

fn percent(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Считает показатели по месячным оценкам и проверенной сумме вложений.
///
/// `None`, если выручки или расходов нет либо они не положительны: тогда
/// вызывающий выводит сводку, а не выдуманные числа. Отдельные показатели,
/// которые посчитать нельзя, приходят как [`Metric::Unavailable`].
pub fn derive(adjusted_total: Decimal, inputs: Option<&FinancialInputs>) -> Option<FinancialMetrics> {
    derive_with(Ok(adjusted_total), inputs)
}

/// То же, что [`derive`], но от результата сверки: при перевёрнутом
/// диапазоне всё, что зависит от суммы вложений, недоступно.
pub fn derive_validated(
    validated: &ValidatedTotal,
    inputs: Option<&FinancialInputs>,
) -> Option<FinancialMetrics> {
    let total = validated
        .usable_total()
        .ok_or(Unavailable::DegenerateRange);
    derive_with(total, inputs)
}

fn derive_with(
    total: Result<Decimal, Unavailable>,
    inputs: Option<&FinancialInputs>,
) -> Option<FinancialMetrics> {
    let Some(inputs) = inputs else {
        warn!("no financial inputs, metrics unavailable");
        return None;
    };
    let (Some(revenue), Some(cost)) = (
        positive(inputs.monthly_revenue_estimate),
        positive(inputs.monthly_cost_estimate),
    ) else {
        warn!(
            revenue = ?inputs.monthly_revenue_estimate,
            cost = ?inputs.monthly_cost_estimate,
            "monthly revenue or cost missing, metrics unavailable"
        );
        return None;
    };

    let monthly_profit = revenue.checked_sub(cost)?;
    let Some(yearly_profit) = monthly_profit.checked_mul(Decimal::from(MONTHS_PER_YEAR)) else {
        warn!(%monthly_profit, "yearly profit out of range");
        return None;
    };

    let with_total = |f: &dyn Fn(Decimal) -> Metric| match total {
        Ok(t) => f(t),
        Err(reason) => Metric::Unavailable(reason),
    };

    let roi_percentage = match inputs.roi_percentage_hint {
        Some(hint) => Metric::Value(percent(hint)),
        None => with_total(&|t| roi(yearly_profit, t)),
    };

    let payback_months = with_total(&|t| payback(t, monthly_profit));

    let roi_months = match positive(inputs.roi_months_hint) {
        Some(hint) => Metric::Value(hint.ceil()),
        None => payback_months,
    };

    let gross_margin_percentage = match inputs.gross_margin_hint {
        Some(hint) => Metric::Value(percent(hint)),
        None => gross_margin(revenue, cost),
    };

    let price = positive(inputs.avg_selling_price);
    let unit_cost = inputs.avg_cost_per_unit.filter(|c| *c >= Decimal::ZERO);

    let bep_units = match positive(inputs.bep_units_hint) {
        Some(hint) => Metric::Value(hint.ceil()),
        None => with_total(&|t| bep_units(t, price, unit_cost)),
    };

    let bep_revenue = match positive(inputs.bep_revenue_hint) {
        Some(hint) => Metric::Value(round_currency(hint)),
        None => match (bep_units, price) {
            (Metric::Value(units), Some(p)) => units
                .checked_mul(p)
                .map(|r| Metric::Value(round_currency(r)))
                .unwrap_or(Metric::Unavailable(Unavailable::MissingInput)),
            (Metric::Unavailable(reason), _) => Metric::Unavailable(reason),
            (_, None) => Metric::Unavailable(Unavailable::MissingInput),
        },
    };

    debug!(
        total = ?total,
        %monthly_profit,
        roi = ?roi_percentage,
        payback = ?payback_months,
        "metrics derived"
    );

    Some(FinancialMetrics {
        monthly_revenue: revenue,
        monthly_cost: cost,
        monthly_profit,
        yearly_profit,
        avg_selling_price: price,
        avg_cost_per_unit: unit_cost,
        roi_percentage,
        payback_months,
        roi_months,
        gross_margin_percentage,
        bep_units,
        bep_revenue,
    })
}

/// Годовая прибыль к вложенному капиталу. Без капитала не определён (не ноль).
pub fn roi(yearly_profit: Decimal, adjusted_total: Decimal) -> Metric {
    if adjusted_total <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::ZeroInvestment);
    }
    yearly_profit
        .checked_div(adjusted_total)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .map(|r| Metric::Value(percent(r)))
        .unwrap_or(Metric::Unavailable(Unavailable::ZeroInvestment))
}

/// Целые месяцы до возврата вложений из месячной прибыли.
pub fn payback(adjusted_total: Decimal, monthly_profit: Decimal) -> Metric {
    if adjusted_total <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::ZeroInvestment);
    }
    if monthly_profit <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::NonPositiveProfit);
    }
    adjusted_total
        .checked_div(monthly_profit)
        .map(|m| Metric::Value(m.ceil()))
        .unwrap_or(Metric::Unavailable(Unavailable::NonPositiveProfit))
}

pub fn gross_margin(revenue: Decimal, cost: Decimal) -> Metric {
    if revenue <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::NonPositiveRevenue);
    }
    revenue
        .checked_sub(cost)
        .and_then(|m| m.checked_div(revenue))
        .and_then(|m| m.checked_mul(Decimal::ONE_HUNDRED))
        .map(|m| Metric::Value(percent(m)))
        .unwrap_or(Metric::Unavailable(Unavailable::NonPositiveRevenue))
}

/// Сколько единиц продать, чтобы маржа с единицы покрыла вложения.
pub fn bep_units(
    adjusted_total: Decimal,
    price: Option<Decimal>,
    unit_cost: Option<Decimal>,
) -> Metric {
    if adjusted_total <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::ZeroInvestment);
    }
    let (Some(price), Some(unit_cost)) = (price, unit_cost) else {
        return Metric::Unavailable(Unavailable::MissingInput);
    };
    let unit_margin = price - unit_cost;
    if unit_margin <= Decimal::ZERO {
        return Metric::Unavailable(Unavailable::NonPositiveUnitMargin);
    }
    adjusted_total
        .checked_div(unit_margin)
        .map(|u| Metric::Value(u.ceil()))
        .unwrap_or(Metric::Unavailable(Unavailable::NonPositiveUnitMargin))
}
