//! Суммирование статей капитала и сверка суммы с диапазоном.

use crate::model::{
    Adjustment, CapitalLineItem, CapitalRange, PricedLineItem, RangeStatus, ValidatedTotal,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Оставляет статьи с положительным итогом.
///
/// Итог статьи — `quantity × unit_price`, если произведение положительно
/// (заявленному `line_total` не доверяем); иначе берётся заявленный итог.
pub fn valid_line_items(items: &[CapitalLineItem]) -> Vec<PricedLineItem> {
    items
        .iter()
        .filter_map(|item| {
            let recomputed = match (item.quantity, item.unit_price) {
                (Some(q), Some(p)) => q.checked_mul(p).filter(|t| *t > Decimal::ZERO),
                _ => None,
            };
            let total = match (recomputed, item.line_total) {
                (Some(r), Some(stated)) if r != stated => {
                    debug!(label = %item.label, %stated, recomputed = %r, "line total differs from quantity x price");
                    r
                }
                (Some(r), _) => r,
                (None, Some(stated)) => stated,
                (None, None) => return None,
            };
            if total <= Decimal::ZERO {
                debug!(label = %item.label, %total, "line item dropped");
                return None;
            }
            Some(PricedLineItem {
                label: item.label.clone(),
                quantity: item.quantity,
                unit: item.unit.clone(),
                unit_price: item.unit_price,
                line_total: total,
            })
        })
        .collect()
}

/// Сырой итог вложений. `0` — пригодных данных о затратах нет.
pub fn aggregate(items: &[CapitalLineItem]) -> Decimal {
    sum_priced(&valid_line_items(items))
}

/// Сумма по статьям; при переполнении итог непригоден и равен `0`.
pub fn sum_priced(items: &[PricedLineItem]) -> Decimal {
    let total = items
        .iter()
        .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.line_total));
    match total {
        Some(t) => t,
        None => {
            warn!(items = items.len(), "capital total overflows, treated as no usable cost data");
            Decimal::ZERO
        }
    }
}

pub fn range_status(range: &CapitalRange) -> RangeStatus {
    if range.is_unparseable() {
        RangeStatus::Unparseable
    } else if range.is_degenerate() {
        RangeStatus::Degenerate
    } else {
        RangeStatus::Parsed
    }
}

/// Сверяет сырой итог с разобранным диапазоном.
///
/// Нераспознанный или перевёрнутый диапазон итог не меняет; для
/// перевёрнутого итог затем считается непроверенным
/// (см. [`ValidatedTotal::usable_total`]).
pub fn validate(raw_total: Decimal, range: CapitalRange) -> ValidatedTotal {
    let status = range_status(&range);
    let (adjusted_total, adjustment) = match status {
        RangeStatus::Unparseable | RangeStatus::Degenerate => (raw_total, Adjustment::None),
        RangeStatus::Parsed if raw_total > range.max => (range.max, Adjustment::ClampedToMax),
        RangeStatus::Parsed if raw_total < range.min => {
            (raw_total.max(range.min), Adjustment::RaisedToMin)
        }
        RangeStatus::Parsed => (raw_total, Adjustment::None),
    };

    match status {
        RangeStatus::Parsed => info!(
            %raw_total,
            %adjusted_total,
            min = %range.min,
            max = %range.max,
            adjustment = %adjustment,
            "capital total validated"
        ),
        RangeStatus::Unparseable => warn!(%raw_total, "capital range unparseable, total kept as is"),
        RangeStatus::Degenerate => warn!(
            %raw_total,
            min = %range.min,
            max = %range.max,
            "capital range reversed, total kept as is"
        ),
    }

    ValidatedTotal {
        range,
        range_status: status,
        raw_total,
        adjusted_total,
        adjustment,
    }
}
