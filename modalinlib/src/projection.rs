//! Проекция денежного потока на 12 месяцев с фиксированной кривой выхода на мощность.

use crate::model::{round_currency, CashFlowProjection, ProjectionRow};
use rust_decimal::Decimal;
use tracing::{debug, warn};

pub const PROJECTION_MONTHS: u32 = 12;

/// `min(0.6 + 0.08 × month, 1.0)`, месяцы считаются с единицы.
pub fn growth_factor(month: u32) -> Decimal {
    let ramp = Decimal::new(6, 1) + Decimal::new(8, 2) * Decimal::from(month);
    ramp.min(Decimal::ONE)
}

fn month_row(
    month: u32,
    monthly_revenue: Decimal,
    monthly_cost: Decimal,
    balance: Decimal,
) -> Option<ProjectionRow> {
    let factor = growth_factor(month);
    let revenue = round_currency(monthly_revenue.checked_mul(factor)?);
    let cost = round_currency(monthly_cost.checked_mul(factor)?);
    let profit = revenue.checked_sub(cost)?;
    Some(ProjectionRow {
        month,
        growth_factor: factor,
        revenue,
        cost,
        profit,
        cumulative_balance: balance.checked_add(profit)?,
    })
}

/// Строит таблицу на 12 месяцев; сальдо стартует с `-adjusted_total`.
/// `None`, если суммы не помещаются в `Decimal`.
pub fn project(
    adjusted_total: Decimal,
    monthly_revenue: Decimal,
    monthly_cost: Decimal,
) -> Option<CashFlowProjection> {
    let mut rows = Vec::with_capacity(PROJECTION_MONTHS as usize);
    let mut balance = -adjusted_total;
    for month in 1..=PROJECTION_MONTHS {
        let Some(row) = month_row(month, monthly_revenue, monthly_cost, balance) else {
            warn!(month, %adjusted_total, "cash flow projection overflows");
            return None;
        };
        balance = row.cumulative_balance;
        rows.push(row);
    }

    let projection = CashFlowProjection {
        initial_investment: adjusted_total,
        rows,
    };
    debug!(
        %adjusted_total,
        ending_balance = %projection.ending_balance(),
        break_even_month = ?projection.break_even_month(),
        "cash flow projected"
    );
    Some(projection)
}
