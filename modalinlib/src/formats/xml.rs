//! XML Spreadsheet 2003 (SpreadsheetML): один лист на раздел отчёта.
//! Открывается Excel/LibreOffice без отдельного xlsx-писателя.

use crate::{
    error::{ModalinError, Result},
    report::{Report, Section},
    traits::WriteReport,
};
use quick_xml::{
    events::{BytesDecl, BytesStart, BytesText, Event},
    Writer,
};
use std::io::Write;

const SS_NS: &str = "urn:schemas-microsoft-com:office:spreadsheet";
/// Более длинные имена листов Excel не принимает.
const MAX_SHEET_NAME: usize = 31;

pub struct SpreadsheetXml;

impl WriteReport for SpreadsheetXml {
    fn write<W: Write>(mut w: W, report: &Report) -> Result<()> {
        let mut wr = Writer::new_with_indent(&mut w, b' ', 1);

        wr.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml)?;

        let mut book = BytesStart::new("Workbook");
        book.push_attribute(("xmlns", SS_NS));
        book.push_attribute(("xmlns:ss", SS_NS));
        book.push_attribute(("xmlns:o", "urn:schemas-microsoft-com:office:office"));
        wr.write_event(Event::Start(book)).map_err(xml)?;

        // <DocumentProperties><Title/><Created/>
        wr.write_event(Event::Start(
            BytesStart::new("DocumentProperties")
                .with_attributes([("xmlns", "urn:schemas-microsoft-com:office:office")]),
        ))
        .map_err(xml)?;
        write_text(&mut wr, "Title", &report.business_name).map_err(xml)?;
        if let Some(date) = report.generated_on {
            let created = date.format("%Y-%m-%dT00:00:00Z").to_string();
            write_text(&mut wr, "Created", &created).map_err(xml)?;
        }
        wr.write_event(Event::End(BytesStart::new("DocumentProperties").to_end()))
            .map_err(xml)?;

        for section in &report.sections {
            write_sheet(&mut wr, section).map_err(xml)?;
        }

        wr.write_event(Event::End(BytesStart::new("Workbook").to_end()))
            .map_err(xml)?;
        w.flush()?;
        Ok(())
    }
}

fn sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned.to_string()
    }
}

fn write_sheet<W: Write>(
    wr: &mut Writer<W>,
    section: &Section,
) -> std::result::Result<(), quick_xml::Error> {
    let name = sheet_name(&section.title);
    wr.write_event(Event::Start(
        BytesStart::new("Worksheet").with_attributes([("ss:Name", name.as_str())]),
    ))?;
    wr.write_event(Event::Start(BytesStart::new("Table")))?;

    for row in &section.rows {
        if row.is_blank() {
            wr.write_event(Event::Empty(BytesStart::new("Row")))?;
            continue;
        }
        wr.write_event(Event::Start(BytesStart::new("Row")))?;
        for cell in row.cells() {
            wr.write_event(Event::Start(BytesStart::new("Cell")))?;
            wr.write_event(Event::Start(
                BytesStart::new("Data").with_attributes([("ss:Type", "String")]),
            ))?;
            wr.write_event(Event::Text(BytesText::new(cell)))?;
            wr.write_event(Event::End(BytesStart::new("Data").to_end()))?;
            wr.write_event(Event::End(BytesStart::new("Cell").to_end()))?;
        }
        wr.write_event(Event::End(BytesStart::new("Row").to_end()))?;
    }

    wr.write_event(Event::End(BytesStart::new("Table").to_end()))?;
    wr.write_event(Event::End(BytesStart::new("Worksheet").to_end()))?;
    Ok(())
}

fn write_text<W: Write>(
    wr: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> std::result::Result<(), quick_xml::Error> {
    wr.write_event(Event::Start(BytesStart::new(tag)))?;
    wr.write_event(Event::Text(BytesText::new(text)))?;
    wr.write_event(Event::End(BytesStart::new(tag).to_end()))?;
    Ok(())
}

fn xml<E: std::fmt::Display>(e: E) -> ModalinError {
    ModalinError::Xml(e.to_string())
}
