use modalinlib::{
    analyze,
    config::ReportConfig,
    display,
    model::{Adjustment, BusinessProfile, CapitalLineItem, FinancialInputs},
    report::{Row, Section, SectionKind},
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn rp(v: i64) -> Decimal {
    Decimal::from(v)
}

fn line(label: &str, qty: i64, price: i64) -> CapitalLineItem {
    CapitalLineItem {
        label: label.into(),
        quantity: Some(rp(qty)),
        unit: "unit".into(),
        unit_price: Some(rp(price)),
        line_total: None,
    }
}

fn profile(revenue: i64, cost: i64) -> BusinessProfile {
    BusinessProfile {
        name: "Kopi Senja".into(),
        business_type: "Kedai kopi".into(),
        description: "Kopi susu gula aren untuk mahasiswa".into(),
        capital_range_text: "Rp 5 juta - 10 juta".into(),
        capital_line_items: vec![
            line("Mesin espresso", 1, 8_000_000),
            line("Gerobak", 1, 4_000_000),
        ],
        financial_inputs: Some(FinancialInputs {
            monthly_revenue_estimate: Some(rp(revenue)),
            monthly_cost_estimate: Some(rp(cost)),
            ..Default::default()
        }),
        advantages: Some("Dekat kampus".into()),
        challenges: None,
        target_market: Some("Mahasiswa".into()),
        location: None,
    }
}

fn value<'a>(section: &'a Section, label: &str) -> Option<&'a str> {
    section
        .rows
        .iter()
        .find(|r| r.cells().first().map(String::as_str) == Some(label))
        .and_then(|r| r.cells().get(1))
        .map(String::as_str)
}

#[test]
fn metrics_report_has_breakdown_metrics_and_projection() {
    let cfg = ReportConfig::default();
    let a = analyze(&profile(3_000_000, 2_000_000), &cfg);

    assert_eq!(a.validated.raw_total, rp(12_000_000));
    assert_eq!(a.validated.adjusted_total, rp(10_000_000));
    assert_eq!(a.validated.adjustment, Adjustment::ClampedToMax);

    let kinds: Vec<SectionKind> = a.report.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::CapitalBreakdown, SectionKind::FinancialMetrics]);

    let capital = a.report.section(SectionKind::CapitalBreakdown).expect("capital");
    assert_eq!(capital.title, "Rincian Modal");
    assert_eq!(value(capital, "Nama Usaha"), Some("Kopi Senja"));
    assert_eq!(value(capital, "Estimasi Modal"), Some("Rp 5 juta - 10 juta"));
    assert_eq!(value(capital, "Rentang Modal"), Some("Rp 5.000.000 - Rp 10.000.000"));
    assert_eq!(value(capital, "Total Rincian"), Some("Rp 12.000.000"));
    assert_eq!(value(capital, "Total Modal Tervalidasi"), Some("Rp 10.000.000"));
    assert_eq!(
        capital.rows.last(),
        Some(&Row(vec![
            "2".into(),
            "Gerobak".into(),
            "1".into(),
            "unit".into(),
            "Rp 4.000.000".into(),
            "Rp 4.000.000".into(),
        ]))
    );

    let metrics = a.report.section(SectionKind::FinancialMetrics).expect("metrics");
    assert_eq!(value(metrics, "Laba per Bulan"), Some("Rp 1.000.000"));
    assert_eq!(value(metrics, "Laba per Tahun"), Some("Rp 12.000.000"));
    assert_eq!(value(metrics, "ROI"), Some("120,00%"));
    assert_eq!(value(metrics, "Periode Pengembalian"), Some("10 bulan"));
    assert_eq!(value(metrics, "Margin Kotor"), Some("33,33%"));
    assert_eq!(value(metrics, "BEP (Unit)"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Bulan Balik Modal"), Some("Bulan 11"));

    let month_one = metrics
        .rows
        .iter()
        .find(|r| r.cells().first().map(String::as_str) == Some("1"))
        .expect("month 1 row");
    assert_eq!(
        month_one,
        &Row(vec![
            "1".into(),
            "68,00%".into(),
            "Rp 2.040.000".into(),
            "Rp 1.360.000".into(),
            "Rp 680.000".into(),
            "-Rp 9.320.000".into(),
        ])
    );
    assert_eq!(value(metrics, "Catatan"), Some(cfg.disclaimer.as_str()));
}

#[test]
fn zero_revenue_falls_back_to_summary() {
    let cfg = ReportConfig::default();
    let a = analyze(&profile(0, 2_000_000), &cfg);

    assert!(a.metrics.is_none());
    assert!(a.projection.is_none());
    let kinds: Vec<SectionKind> = a.report.sections.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SectionKind::CapitalBreakdown, SectionKind::Summary]);

    let summary = a.report.section(SectionKind::Summary).expect("summary");
    assert_eq!(summary.title, "Ringkasan");
    assert_eq!(value(summary, "Total Modal Tervalidasi"), Some("Rp 10.000.000"));
    assert_eq!(value(summary, "Keunggulan"), Some("Dekat kampus"));
    assert_eq!(value(summary, "Tantangan"), Some("Data tidak tersedia"));
    assert_eq!(value(summary, "Catatan"), Some(cfg.disclaimer.as_str()));
}

#[test]
fn no_usable_items_gives_placeholder_row() {
    let cfg = ReportConfig::default();
    let mut p = profile(3_000_000, 2_000_000);
    p.capital_line_items = vec![CapitalLineItem {
        label: "Belum jelas".into(),
        ..Default::default()
    }];
    p.capital_range_text = "belum tahu".into();

    let a = analyze(&p, &cfg);
    assert_eq!(a.validated.adjusted_total, Decimal::ZERO);

    let capital = a.report.section(SectionKind::CapitalBreakdown).expect("capital");
    assert_eq!(capital.rows.last(), Some(&Row(vec!["Data tidak tersedia".into()])));
    assert_eq!(value(capital, "Rentang Modal"), Some("Data tidak tersedia"));

    // без вложений ROI — заглушка, а не 0%
    let metrics = a.report.section(SectionKind::FinancialMetrics).expect("metrics");
    assert_eq!(value(metrics, "ROI"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Periode Pengembalian"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Bulan Balik Modal"), Some("Data tidak tersedia"));
}

#[test]
fn reversed_range_is_flagged() {
    let cfg = ReportConfig::default();
    let mut p = profile(3_000_000, 2_000_000);
    p.capital_range_text = "Rp 20 juta - 10 juta".into();

    let a = analyze(&p, &cfg);
    assert_eq!(a.validated.adjusted_total, rp(12_000_000));
    assert_eq!(a.validated.adjustment, Adjustment::None);

    let capital = a.report.section(SectionKind::CapitalBreakdown).expect("capital");
    let cell = value(capital, "Rentang Modal").expect("range row");
    assert!(cell.starts_with("Rentang tidak valid"), "{cell}");
    assert_eq!(value(capital, "Total Rincian"), Some("Rp 12.000.000"));
    assert_eq!(value(capital, "Total Modal Tervalidasi"), Some("Data tidak tersedia"));

    // непроверенная сумма не участвует в расчётах
    assert!(a.projection.is_none());
    let metrics = a.report.section(SectionKind::FinancialMetrics).expect("metrics");
    assert_eq!(value(metrics, "ROI"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Periode Pengembalian"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Estimasi Balik Modal"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Proyeksi Arus Kas"), Some("Data tidak tersedia"));
    assert_eq!(value(metrics, "Bulan Balik Modal"), None);
    assert_eq!(value(metrics, "Laba per Bulan"), Some("Rp 1.000.000"));
    assert_eq!(value(metrics, "Margin Kotor"), Some("33,33%"));
}

#[test]
fn reversed_range_in_summary_hides_total() {
    let cfg = ReportConfig::default();
    let mut p = profile(0, 0);
    p.capital_range_text = "Rp 20 juta - 10 juta".into();
    p.capital_line_items = vec![line("Ruko", 1, 50_000_000)];

    let report = analyze(&p, &cfg).report;
    let summary = report.section(SectionKind::Summary).expect("summary");
    assert_eq!(value(summary, "Total Modal Tervalidasi"), Some("Data tidak tersedia"));
}

#[test]
fn sections_are_never_both_or_neither() {
    let cfg = ReportConfig::default();
    for (revenue, cost) in [(3_000_000, 2_000_000), (0, 0), (1, 5), (5, 0), (-1, 2)] {
        let report = analyze(&profile(revenue, cost), &cfg).report;
        let metrics = report.section(SectionKind::FinancialMetrics).is_some();
        let summary = report.section(SectionKind::Summary).is_some();
        assert!(metrics ^ summary, "revenue {revenue}, cost {cost}");
        assert_eq!(report.sections.len(), 2);
    }
}

#[test]
fn custom_config_changes_rendering() {
    let cfg = ReportConfig {
        unavailable: "n/a".into(),
        currency_prefix: "IDR ".into(),
        ..Default::default()
    };
    let report = analyze(&profile(0, 0), &cfg).report;
    let summary = report.section(SectionKind::Summary).expect("summary");
    assert_eq!(value(summary, "Tantangan"), Some("n/a"));
    assert_eq!(value(summary, "Total Modal Tervalidasi"), Some("IDR 10.000.000"));
}

#[test]
fn cell_formatting() {
    let cfg = ReportConfig::default();
    assert_eq!(display::currency(rp(-9_320_000), &cfg), "-Rp 9.320.000");
    assert_eq!(display::currency(Decimal::ZERO, &cfg), "Rp 0");
    assert_eq!(display::currency(rp(999), &cfg), "Rp 999");
    assert_eq!(display::percent(Decimal::new(3333, 2), &cfg), "33,33%");
    assert_eq!(display::percent(Decimal::new(125, 1), &cfg), "12,50%");
    assert_eq!(
        display::number(Decimal::new(1_234_567_891, 3), 2, &cfg.locale),
        "1.234.567,89"
    );
    assert_eq!(display::months(rp(10), &cfg), "10 bulan");
}
