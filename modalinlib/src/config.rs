//! Настройки отчёта: локаль чисел, подписи разделов, заглушка и дисклеймер.
//!
//! Передаются в расчёт явно; глобального состояния нет.

use crate::error::{ModalinError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Разделитель разрядов и десятичный знак: и для разбора текста, и для
/// вывода ячеек. По умолчанию индонезийские (`5.000.000,50`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NumberLocale {
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self {
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SectionTitles {
    pub capital: String,
    pub metrics: String,
    pub summary: String,
}

impl Default for SectionTitles {
    fn default() -> Self {
        Self {
            capital: "Rincian Modal".into(),
            metrics: "Metrik Keuangan".into(),
            summary: "Ringkasan".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    pub locale: NumberLocale,
    pub currency_prefix: String,
    /// Текст ячейки для любого непосчитанного значения.
    pub unavailable: String,
    pub disclaimer: String,
    pub section_titles: SectionTitles,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            locale: NumberLocale::default(),
            currency_prefix: "Rp ".into(),
            unavailable: "Data tidak tersedia".into(),
            disclaimer: "Seluruh angka merupakan estimasi berdasarkan asumsi awal dan bukan \
                         jaminan hasil usaha. Lakukan riset pasar sebelum mengambil keputusan \
                         investasi."
                .into(),
            section_titles: SectionTitles::default(),
        }
    }
}

impl ReportConfig {
    /// Читает конфиг из JSON; отсутствующие ключи берутся по умолчанию.
    pub fn from_reader<R: Read>(r: R) -> Result<Self> {
        let cfg: ReportConfig = serde_json::from_reader(r)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let l = &self.locale;
        if l.thousands_separator == l.decimal_separator {
            return Err(ModalinError::Config(format!(
                "thousands and decimal separators are both '{}'",
                l.thousands_separator
            )));
        }
        if l.thousands_separator.is_ascii_digit() || l.decimal_separator.is_ascii_digit() {
            return Err(ModalinError::Config("separators must not be digits".into()));
        }
        if self.unavailable.trim().is_empty() {
            return Err(ModalinError::Config(
                "unavailable placeholder must not be blank".into(),
            ));
        }
        Ok(())
    }
}
