//! Общая цепочка расчёта: все вызывающие стороны идут через `analyze`,
//! а не пересчитывают итоги самостоятельно.

use crate::{
    capital, config::ReportConfig, metrics,
    model::{BusinessProfile, CapitalRange, CashFlowProjection, FinancialMetrics, ValidatedTotal},
    projection, range,
    report::{self, Report},
};
use serde::Serialize;
use tracing::info_span;

/// Всё, что выводится из одного профиля. Пересобирается на каждый вызов.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub range: CapitalRange,
    pub validated: ValidatedTotal,
    pub metrics: Option<FinancialMetrics>,
    pub projection: Option<CashFlowProjection>,
    pub report: Report,
}

pub fn analyze(profile: &BusinessProfile, cfg: &ReportConfig) -> Analysis {
    let span = info_span!("analyze", business = %profile.name);
    let _guard = span.enter();

    let range = range::parse(&profile.capital_range_text, &cfg.locale);
    let raw_total = capital::aggregate(&profile.capital_line_items);
    let validated = capital::validate(raw_total, range);

    let metrics = metrics::derive_validated(&validated, profile.financial_inputs.as_ref());
    let projection = match (&metrics, validated.usable_total()) {
        (Some(m), Some(total)) => projection::project(total, m.monthly_revenue, m.monthly_cost),
        _ => None,
    };

    let report = report::assemble(
        profile,
        &validated,
        metrics.as_ref(),
        projection.as_ref(),
        cfg,
    );

    Analysis {
        range,
        validated,
        metrics,
        projection,
        report,
    }
}

/// Для вызывающих, которым нужен только отчёт.
pub fn build_report(profile: &BusinessProfile, cfg: &ReportConfig) -> Report {
    analyze(profile, cfg).report
}
