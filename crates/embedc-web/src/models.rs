use serde::Serialize;

/// JSON body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateJson {
    pub query: String,
    pub peripheral: String,
    pub code: String,
    pub extracted_chars: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorJson {
    pub error: String,
}
