#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("unreadable archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("unreadable spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),
    #[error("unreadable PDF: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
