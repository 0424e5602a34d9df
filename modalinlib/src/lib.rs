//! modalinlib — сверка стартового капитала и финансовая модель малого бизнеса:
//! разбор диапазона из текста, итог по статьям, ROI/BEP/маржа, проекция на
//! 12 месяцев и отчёт для записи в CSV, SpreadsheetML или JSON.

pub mod capital;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod projection;
pub mod range;
pub mod report;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod xml;
}

pub use engine::{analyze, build_report, Analysis};
