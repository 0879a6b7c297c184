use axum::extract::Multipart;

/// An uploaded datasheet with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Parsed form fields from the multipart upload.
#[derive(Default)]
pub struct FormFields {
    pub query: String,
    pub datasheet: Option<UploadedFile>,
}

/// Parse a multipart form upload into structured form fields.
///
/// A file input left empty by the browser (no name, no bytes) is treated as
/// "no datasheet".
pub async fn parse_multipart(mut multipart: Multipart) -> Result<FormFields, String> {
    let mut fields = FormFields::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Failed to read form field: {}", e))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdf" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| format!("Failed to read file data: {}", e))?
                    .to_vec();

                if data.is_empty() && filename.is_empty() {
                    continue;
                }
                ensure_pdf(&filename, &data)?;

                fields.datasheet = Some(UploadedFile {
                    filename: if filename.is_empty() {
                        "upload.pdf".to_string()
                    } else {
                        filename
                    },
                    data,
                });
            }
            "query" => {
                fields.query = field
                    .text()
                    .await
                    .map_err(|e| format!("Failed to read query: {}", e))?;
            }
            _ => {
                // Ignore unknown fields
                let _ = field.bytes().await;
            }
        }
    }

    Ok(fields)
}

/// Reject uploads that are not PDFs, judged by magic bytes.
fn ensure_pdf(filename: &str, data: &[u8]) -> Result<(), String> {
    if data.starts_with(b"%PDF-") {
        return Ok(());
    }
    if filename.to_lowercase().ends_with(".pdf") {
        return Err("File has .pdf extension but doesn't appear to be a valid PDF".to_string());
    }
    Err("Unsupported file type. Please upload a PDF datasheet.".to_string())
}
