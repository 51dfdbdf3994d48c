//! Server-side résumé text extraction.

pub mod handlers;

use bytes::Bytes;

use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

const UNREADABLE_MESSAGE: &str =
    "Não foi possível ler o PDF. Tente outro arquivo ou cole o texto do CV.";

/// Extracts trimmed text from an uploaded PDF.
///
/// `content_type` is the part's declared type; when absent the bytes are
/// sniffed for the PDF signature instead.
pub async fn extract_pdf_text(
    bytes: Bytes,
    content_type: Option<&str>,
    max_bytes: usize,
) -> Result<String, AppError> {
    let is_pdf = match content_type {
        Some(ct) => ct
            .split(';')
            .next()
            .is_some_and(|m| m.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE)),
        None => bytes.starts_with(PDF_MAGIC),
    };
    if !is_pdf {
        return Err(AppError::UnsupportedMedia(
            "Envie um arquivo PDF.".to_string(),
        ));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "O arquivo excede o limite de {} MB.",
            max_bytes / (1024 * 1024)
        )));
    }

    let size = bytes.len();
    // pdf-extract is synchronous and may panic on malformed input
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            tracing::warn!(size, "PDF extraction task failed: {e}");
            AppError::Validation(UNREADABLE_MESSAGE.to_string())
        })?
        .map_err(|e| {
            tracing::warn!(size, "PDF extraction failed: {e}");
            AppError::Validation(UNREADABLE_MESSAGE.to_string())
        })?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Nenhum texto encontrado no PDF. Ele pode ser uma imagem escaneada.".to_string(),
        ));
    }

    tracing::info!(size, chars = text.chars().count(), "Extracted PDF text");
    Ok(text)
}
