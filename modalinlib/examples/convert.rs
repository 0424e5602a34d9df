use modalinlib::{
    build_report,
    config::ReportConfig,
    formats::{csv::Csv, json::Json},
    traits::{ReadProfile, WriteReport},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: профиль JSON (stdin) -> отчёт CSV (stdout)
    let cfg = ReportConfig::default();
    let profile = Json::read(std::io::BufReader::new(std::io::stdin()), &cfg.locale)?;
    Csv::write(std::io::stdout(), &build_report(&profile, &cfg))?;
    Ok(())
}
