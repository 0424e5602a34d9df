//! Унифицированные трэйты чтения профиля и записи отчёта на основе std::io::{BufRead, Write}.

use crate::{config::NumberLocale, error::Result, model::BusinessProfile, report::Report};
use std::io::{BufRead, Write};

pub trait ReadProfile {
    fn read<R: BufRead>(r: R, locale: &NumberLocale) -> Result<BusinessProfile>;
}

pub trait WriteReport {
    fn write<W: Write>(w: W, report: &Report) -> Result<()>;
}
