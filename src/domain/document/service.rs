use super::error::DocumentError;
use super::extractors;
use html2text::from_read;
use std::path::Path;

/// Uploaded file as received from the multipart form
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    PlainText,
    Html,
    Pdf,
    Docx,
    Pptx,
    Xlsx,
}

impl DocumentKind {
    fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)?;

        match extension.as_str() {
            "txt" | "md" => Some(DocumentKind::PlainText),
            "html" | "htm" => Some(DocumentKind::Html),
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "pptx" => Some(DocumentKind::Pptx),
            "xlsx" => Some(DocumentKind::Xlsx),
            _ => None,
        }
    }

    fn extract(self, content: &[u8]) -> Result<String, DocumentError> {
        match self {
            DocumentKind::PlainText => Ok(decode_text(content)),
            DocumentKind::Html => Ok(from_read(content, usize::MAX)),
            DocumentKind::Pdf => extractors::pdf_text(content),
            DocumentKind::Docx => extractors::docx_text(content),
            DocumentKind::Pptx => extractors::pptx_text(content),
            DocumentKind::Xlsx => extractors::xlsx_text(content),
        }
    }
}

/// Extracts reference text from uploaded documents to enrich a podcast theme
#[derive(Debug, Default, Clone)]
pub struct DocumentService;

impl DocumentService {
    pub fn new() -> Self {
        Self
    }

    /// Text content of one file, empty when the format is unsupported or unreadable
    pub fn extract_text(&self, filename: &str, content: &[u8]) -> String {
        let Some(kind) = DocumentKind::from_filename(filename) else {
            tracing::warn!(filename = filename, "Unsupported document type");
            return String::new();
        };

        match kind.extract(content) {
            Ok(text) => {
                tracing::debug!(filename = filename, chars = text.len(), "Extracted document text");
                text
            }
            Err(e) => {
                tracing::error!(filename = filename, error = %e, "Failed to extract document text");
                String::new()
            }
        }
    }

    /// Concatenate the text of every document that yielded content
    pub fn combine_documents(&self, documents: &[UploadedDocument]) -> String {
        let mut combined = Vec::new();

        for document in documents {
            tracing::info!(filename = %document.filename, "Processing document");
            let text = self.extract_text(&document.filename, &document.content);

            if text.trim().is_empty() {
                tracing::warn!(filename = %document.filename, "No content extracted from document");
                continue;
            }

            combined.push(format!(
                "\n\n--- Conteúdo do documento: {} ---\n{}",
                document.filename, text
            ));
        }

        tracing::info!(
            extracted = combined.len(),
            total = documents.len(),
            "Documents processed"
        );

        combined.join("\n")
    }
}

/// Append extracted document text to the user's theme as reference material
pub fn enrich_theme(theme: &str, documents_content: &str) -> String {
    if documents_content.is_empty() {
        theme.to_string()
    } else {
        format!("{}\n\n## Material de Referência:{}", theme, documents_content)
    }
}

/// UTF-8, falling back to Latin-1 where every byte maps to one char
fn decode_text(content: &[u8]) -> String {
    match std::str::from_utf8(content) {
        Ok(text) => text.to_string(),
        Err(_) => content.iter().map(|&b| char::from(b)).collect(),
    }
}
