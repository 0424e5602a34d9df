//! Сборка отчёта: именованные разделы из строк готовых к выводу ячеек.
//!
//! Всегда есть раздел «Rincian Modal». Дальше ровно один из двух:
//! «Metrik Keuangan» (метрики + проекция + дисклеймер), если метрики
//! посчитаны, иначе «Ringkasan».

use crate::{
    capital::valid_line_items,
    config::ReportConfig,
    display,
    model::{
        Adjustment, BusinessProfile, CashFlowProjection, FinancialMetrics, RangeStatus,
        ValidatedTotal,
    },
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CapitalBreakdown,
    FinancialMetrics,
    Summary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Row(pub Vec<String>);

impl Row {
    pub fn blank() -> Self {
        Row(Vec::new())
    }

    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|c| c.is_empty())
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }

    pub fn pair(label: &str, value: impl Into<String>) -> Self {
        Row(vec![label.to_string(), value.into()])
    }

    pub fn text(cells: &[&str]) -> Self {
        Row(cells.iter().map(|c| c.to_string()).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub business_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_on: Option<NaiveDate>,
    pub sections: Vec<Section>,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Проставляет дату создания; сама сборка часы не читает.
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }
}

pub fn assemble(
    profile: &BusinessProfile,
    validated: &ValidatedTotal,
    metrics: Option<&FinancialMetrics>,
    projection: Option<&CashFlowProjection>,
    cfg: &ReportConfig,
) -> Report {
    let mut sections = vec![capital_section(profile, validated, cfg)];
    sections.push(match metrics {
        Some(m) => metrics_section(m, projection, cfg),
        None => summary_section(profile, validated, cfg),
    });
    Report {
        business_name: profile.name.clone(),
        generated_on: None,
        sections,
    }
}

fn identity_rows(profile: &BusinessProfile, cfg: &ReportConfig) -> Vec<Row> {
    vec![
        Row::pair("Nama Usaha", display::text(&profile.name, cfg)),
        Row::pair("Jenis Usaha", display::text(&profile.business_type, cfg)),
        Row::pair("Deskripsi", display::text(&profile.description, cfg)),
    ]
}

fn range_cell(validated: &ValidatedTotal, cfg: &ReportConfig) -> String {
    match validated.range_status {
        RangeStatus::Parsed => format!(
            "{} - {}",
            display::currency(validated.range.min, cfg),
            display::currency(validated.range.max, cfg)
        ),
        RangeStatus::Unparseable => cfg.unavailable.clone(),
        RangeStatus::Degenerate => format!(
            "Rentang tidak valid ({} > {})",
            display::currency(validated.range.min, cfg),
            display::currency(validated.range.max, cfg)
        ),
    }
}

/// Итог без проверки по диапазону «проверенным» не выводим.
fn validated_cell(validated: &ValidatedTotal, cfg: &ReportConfig) -> String {
    display::optional_currency(validated.usable_total(), cfg)
}

fn adjustment_cell(adjustment: Adjustment) -> &'static str {
    match adjustment {
        Adjustment::None => "Tidak ada",
        Adjustment::ClampedToMax => "Diturunkan ke batas maksimum rentang",
        Adjustment::RaisedToMin => "Dinaikkan ke batas minimum rentang",
    }
}

fn capital_section(
    profile: &BusinessProfile,
    validated: &ValidatedTotal,
    cfg: &ReportConfig,
) -> Section {
    let mut rows = identity_rows(profile, cfg);
    rows.push(Row::pair("Estimasi Modal", display::text(&profile.capital_range_text, cfg)));
    rows.push(Row::pair("Rentang Modal", range_cell(validated, cfg)));
    rows.push(Row::pair("Total Rincian", display::currency(validated.raw_total, cfg)));
    rows.push(Row::pair("Total Modal Tervalidasi", validated_cell(validated, cfg)));
    rows.push(Row::pair("Penyesuaian", adjustment_cell(validated.adjustment)));
    rows.push(Row::blank());
    rows.push(Row::text(&["No", "Item", "Jumlah", "Satuan", "Harga Satuan", "Total"]));

    let items = valid_line_items(&profile.capital_line_items);
    if items.is_empty() {
        rows.push(Row::text(&[cfg.unavailable.as_str()]));
    }
    for (i, item) in items.iter().enumerate() {
        rows.push(Row(vec![
            (i + 1).to_string(),
            item.label.clone(),
            item.quantity
                .map(|q| display::number(q, 0, &cfg.locale))
                .unwrap_or_else(|| cfg.unavailable.clone()),
            display::text(&item.unit, cfg),
            display::optional_currency(item.unit_price, cfg),
            display::currency(item.line_total, cfg),
        ]));
    }

    Section {
        kind: SectionKind::CapitalBreakdown,
        title: cfg.section_titles.capital.clone(),
        rows,
    }
}

fn metrics_section(
    m: &FinancialMetrics,
    projection: Option<&CashFlowProjection>,
    cfg: &ReportConfig,
) -> Section {
    let mut rows = vec![
        Row::pair("Pendapatan per Bulan", display::currency(m.monthly_revenue, cfg)),
        Row::pair("Biaya per Bulan", display::currency(m.monthly_cost, cfg)),
        Row::pair("Laba per Bulan", display::currency(m.monthly_profit, cfg)),
        Row::pair("Laba per Tahun", display::currency(m.yearly_profit, cfg)),
        Row::pair("Harga Jual Rata-rata", display::optional_currency(m.avg_selling_price, cfg)),
        Row::pair("Biaya per Unit", display::optional_currency(m.avg_cost_per_unit, cfg)),
        Row::pair("BEP (Unit)", display::metric(&m.bep_units, cfg, display::units)),
        Row::pair("BEP (Rupiah)", display::metric(&m.bep_revenue, cfg, display::currency)),
        Row::pair("ROI", display::metric(&m.roi_percentage, cfg, display::percent)),
        Row::pair("Estimasi Balik Modal", display::metric(&m.roi_months, cfg, display::months)),
        Row::pair("Periode Pengembalian", display::metric(&m.payback_months, cfg, display::months)),
        Row::pair("Margin Kotor", display::metric(&m.gross_margin_percentage, cfg, display::percent)),
        Row::blank(),
    ];

    match projection {
        Some(p) => rows.extend(projection_rows(p, cfg)),
        None => rows.push(Row::pair("Proyeksi Arus Kas", cfg.unavailable.as_str())),
    }

    rows.push(Row::blank());
    rows.push(Row::pair("Catatan", cfg.disclaimer.as_str()));

    Section {
        kind: SectionKind::FinancialMetrics,
        title: cfg.section_titles.metrics.clone(),
        rows,
    }
}

fn projection_rows(p: &CashFlowProjection, cfg: &ReportConfig) -> Vec<Row> {
    let mut rows = vec![Row::text(&[
        "Bulan",
        "Kapasitas",
        "Pendapatan",
        "Biaya",
        "Laba",
        "Saldo Kumulatif",
    ])];
    rows.push(Row(vec![
        "0".into(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        display::currency(-p.initial_investment, cfg),
    ]));
    for r in &p.rows {
        rows.push(Row(vec![
            r.month.to_string(),
            display::percent(r.growth_factor * Decimal::ONE_HUNDRED, cfg),
            display::currency(r.revenue, cfg),
            display::currency(r.cost, cfg),
            display::currency(r.profit, cfg),
            display::currency(r.cumulative_balance, cfg),
        ]));
    }
    rows.push(Row(vec![
        "Total".into(),
        String::new(),
        display::optional_currency(p.total_revenue(), cfg),
        display::optional_currency(p.total_cost(), cfg),
        display::optional_currency(p.total_profit(), cfg),
        display::currency(p.ending_balance(), cfg),
    ]));
    let break_even = p
        .break_even_month()
        .map(|m| format!("Bulan {m}"))
        .unwrap_or_else(|| cfg.unavailable.clone());
    rows.push(Row::pair("Bulan Balik Modal", break_even));
    rows
}

fn summary_section(
    profile: &BusinessProfile,
    validated: &ValidatedTotal,
    cfg: &ReportConfig,
) -> Section {
    let mut rows = identity_rows(profile, cfg);
    rows.push(Row::pair("Target Pasar", display::optional_text(profile.target_market.as_deref(), cfg)));
    rows.push(Row::pair("Lokasi", display::optional_text(profile.location.as_deref(), cfg)));
    rows.push(Row::pair("Total Modal Tervalidasi", validated_cell(validated, cfg)));
    rows.push(Row::pair("Keunggulan", display::optional_text(profile.advantages.as_deref(), cfg)));
    rows.push(Row::pair("Tantangan", display::optional_text(profile.challenges.as_deref(), cfg)));
    rows.push(Row::pair("Metrik Keuangan", "Estimasi pendapatan dan biaya bulanan belum tersedia, sehingga BEP, ROI, \
         dan proyeksi arus kas tidak dihitung."));
    rows.push(Row::blank());
    rows.push(Row::pair("Catatan", cfg.disclaimer.as_str()));

    Section {
        kind: SectionKind::Summary,
        title: cfg.section_titles.summary.clone(),
        rows,
    }
}
