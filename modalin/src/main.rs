use clap::{Parser, ValueEnum};
use modalinlib::{
    config::ReportConfig,
    engine::analyze,
    error::{ModalinError, Result},
    formats::{csv::Csv, json::Json, xml::SpreadsheetXml},
    traits::{ReadProfile, WriteReport},
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Xml,
    Json,
}

#[derive(Parser, Debug)]
#[command(name="modalin", version, about="Rincian modal, metrik keuangan dan proyeksi arus kas dari profil usaha")]
struct Cli {
    /// Профиль бизнеса в JSON (по умолчанию stdin)
    #[arg(short='i', long="input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short='o', long="output")]
    output: Option<String>,

    /// Формат отчёта
    #[arg(long="out-format", value_enum, default_value="csv")]
    out_format: Fmt,

    /// Настройки отчёта в JSON (локаль, заглушка, дисклеймер)
    #[arg(short='c', long="config")]
    config: Option<String>,

    /// Не ставить дату создания в отчёт
    #[arg(long="no-date")]
    no_date: bool,
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => ReportConfig::from_reader(BufReader::new(File::open(path)?))?,
        None => ReportConfig::default(),
    };

    // reader
    let reader: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let profile = Json::read(BufReader::new(reader), &cfg.locale)?;

    let analysis = analyze(&profile, &cfg);
    tracing::info!(
        business = %profile.name,
        adjusted_total = %analysis.validated.adjusted_total,
        adjustment = %analysis.validated.adjustment,
        metrics = analysis.metrics.is_some(),
        "report assembled"
    );
    let report = if cli.no_date {
        analysis.report
    } else {
        analysis
            .report
            .with_generated_on(chrono::Local::now().date_naive())
    };

    // writer
    let mut writer: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.out_format {
        Fmt::Csv => Csv::write(&mut writer, &report),
        Fmt::Xml => SpreadsheetXml::write(&mut writer, &report),
        Fmt::Json => Json::write(&mut writer, &report),
    }?;

    writer.flush().map_err(ModalinError::from)
}
