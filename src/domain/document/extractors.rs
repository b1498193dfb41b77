use super::error::DocumentError;
use calamine::{Data, Reader, Xlsx};
use quick_xml::{events::Event, Reader as XmlReader};
use std::io::{Cursor, Read};
use std::panic;
use zip::ZipArchive;

const DOCX_BODY: &str = "word/document.xml";
const PPTX_SLIDE_PREFIX: &str = "ppt/slides/slide";

pub fn pdf_text(content: &[u8]) -> Result<String, DocumentError> {
    // pdf-extract panics on some malformed inputs instead of returning an error
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(content)) {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(DocumentError::Pdf(e.to_string())),
        Err(_) => Err(DocumentError::Pdf("parser aborted".to_string())),
    }
}

pub fn docx_text(content: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(content))?;
    let xml = read_entry(&mut archive, DOCX_BODY)?;
    Ok(paragraph_text(&xml)?.trim().to_string())
}

/// One `## Slide N` section per slide, in slide order
pub fn pptx_text(content: &[u8]) -> Result<String, DocumentError> {
    let mut archive = ZipArchive::new(Cursor::new(content))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix(PPTX_SLIDE_PREFIX)?
                .strip_suffix(".xml")?
                .parse()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut sections = Vec::with_capacity(slides.len());
    for (number, name) in slides {
        let xml = read_entry(&mut archive, &name)?;
        let text = paragraph_text(&xml)?;
        let text = text.trim();
        if !text.is_empty() {
            sections.push(format!("## Slide {}\n{}", number, text));
        }
    }

    Ok(sections.join("\n\n"))
}

/// One `## <sheet>` section per non-empty sheet, cells separated by ` | `
pub fn xlsx_text(content: &[u8]) -> Result<String, DocumentError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))?;

    let mut sections = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet)?;
        let rows: Vec<String> = range
            .rows()
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();

        if !rows.is_empty() {
            sections.push(format!("## {}\n{}", sheet, rows.join("\n")));
        }
    }

    Ok(sections.join("\n\n"))
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<String, DocumentError> {
    let mut xml = String::new();
    archive.by_name(name)?.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Text runs of an Office Open XML part; WordprocessingML and DrawingML both
/// use `<*:t>` for runs and `<*:p>` for paragraphs.
fn paragraph_text(xml: &str) -> Result<String, DocumentError> {
    let mut reader = XmlReader::from_str(xml);
    let mut text = String::new();
    let mut in_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_run = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_run = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"br" => text.push('\n'),
            Event::Text(t) if in_run => text.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
