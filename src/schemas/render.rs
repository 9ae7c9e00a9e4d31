use poem_openapi::{
    ApiResponse,
    payload::{Attachment, Json},
};
use serde_json::Value as JsonValue;

use super::common::ErrorBody;

/// A validated render request: a non-empty identifier and at least one row,
/// every row value already coerced to its display string.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub id: String,
    pub rows: Vec<TableRow>,
}

/// One metric record. The payload never types these values, so they are
/// stored as display strings.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub referring_domains: String,
    pub domain_rating: String,
    pub backlinks: String,
}

impl TableRow {
    fn from_json(value: &JsonValue) -> Result<Self, ValidationError> {
        let field = |name: &str| {
            value
                .get(name)
                .map(display_value)
                .ok_or(ValidationError::IncompleteRow)
        };
        Ok(Self {
            referring_domains: field("referring_domains")?,
            domain_rating: field("domain_rating")?,
            backlinks: field("backlinks")?,
        })
    }

    /// Display string for a column field name.
    pub fn value_for(&self, field: &str) -> &str {
        match field {
            "referring_domains" => &self.referring_domains,
            "domain_rating" => &self.domain_rating,
            "backlinks" => &self.backlinks,
            _ => "",
        }
    }
}

/// Request validation failures, surfaced as 400 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `id` or `body` missing, wrong type, or empty.
    MissingFields,
    /// A row lacks one of the required metric fields.
    IncompleteRow,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Missing required fields",
            ValidationError::IncompleteRow => {
                "Each row must include referring_domains, domain_rating, backlinks"
            }
        }
    }
}

/// Coerces a JSON value to its display string: strings render verbatim,
/// everything else as compact JSON. Presence is the only check performed,
/// so numbers, booleans, nulls and even objects all pass through.
fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validates the raw payload. Field values are checked for presence only;
/// a field set to `null` counts as present.
pub fn parse_render_request(payload: &JsonValue) -> Result<RenderRequest, ValidationError> {
    let id = payload
        .get("id")
        .and_then(JsonValue::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingFields)?;

    let rows = payload
        .get("body")
        .and_then(JsonValue::as_array)
        .filter(|rows| !rows.is_empty())
        .ok_or(ValidationError::MissingFields)?;

    let rows = rows
        .iter()
        .map(TableRow::from_json)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RenderRequest {
        id: id.to_string(),
        rows,
    })
}

#[derive(ApiResponse)]
pub enum GenerateImageResponse {
    /// Composited table image.
    #[oai(status = 200, content_type = "image/png")]
    Png(Attachment<Vec<u8>>),

    /// The payload failed validation.
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),

    /// Rendering failed, usually because an asset is unavailable.
    #[oai(status = 500)]
    InternalServerError(Json<ErrorBody>),
}
