//! CSV-приёмник отчёта: каждый раздел это блок, начинающийся строкой
//! `# <заголовок>`; блоки разделены пустой записью.

use crate::{error::Result, report::Report, traits::WriteReport};
use csv::WriterBuilder;
use std::io::Write;

pub struct Csv;

impl WriteReport for Csv {
    fn write<W: Write>(mut w: W, report: &Report) -> Result<()> {
        let mut wrt = WriterBuilder::new().flexible(true).from_writer(&mut w);

        if let Some(date) = report.generated_on {
            wrt.write_record([format!("# Dibuat {}", date.format("%Y-%m-%d"))])?;
        }

        for (i, section) in report.sections.iter().enumerate() {
            if i > 0 || report.generated_on.is_some() {
                wrt.write_record([""])?;
            }
            wrt.write_record([format!("# {}", section.title)])?;
            for row in &section.rows {
                if row.is_blank() {
                    wrt.write_record([""])?;
                } else {
                    wrt.write_record(row.cells())?;
                }
            }
        }
        wrt.flush()?;
        Ok(())
    }
}
