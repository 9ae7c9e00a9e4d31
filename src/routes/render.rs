use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{
    OpenApi, Tags,
    payload::{Attachment, Json},
};
use serde_json::Value as JsonValue;

use crate::{
    AppState,
    schemas::{
        common::ErrorBody,
        render::{GenerateImageResponse, parse_render_request},
    },
};

#[derive(Tags)]
enum ApiRenderTags {
    Render,
}

pub struct ApiRender;

#[OpenApi()]
impl ApiRender {
    /// Generate Image
    ///
    /// Renders the submitted metric rows as a ruled table over the
    /// background template and returns the composited PNG. At most five
    /// rows are drawn; the rest are ignored.
    ///
    /// # Example Request
    /// ```json
    /// {
    ///   "id": "abc123",
    ///   "body": [
    ///     { "referring_domains": 10, "domain_rating": 55, "backlinks": 200 }
    ///   ]
    /// }
    /// ```
    #[oai(path = "/generate-image", method = "post", tag = "ApiRenderTags::Render")]
    async fn generate_image(
        &self,
        Json(payload): Json<JsonValue>,
        state: Data<&Arc<AppState>>,
    ) -> GenerateImageResponse {
        let request = match parse_render_request(&payload) {
            Ok(request) => request,
            Err(err) => {
                return GenerateImageResponse::BadRequest(Json(ErrorBody::new(err.message())));
            }
        };

        tracing::info!("rendering table: id={}, rows={}", request.id, request.rows.len());

        let filename = format!("{}.png", request.id);
        match state.engine.render(request).await {
            Ok(bytes) => {
                tracing::info!("render completed successfully, size: {} bytes", bytes.len());
                GenerateImageResponse::Png(Attachment::new(bytes).filename(filename))
            }
            Err(err) => {
                tracing::error!("render error: {err}");
                GenerateImageResponse::InternalServerError(Json(ErrorBody::new("Server Error")))
            }
        }
    }

    /// Health
    ///
    /// Reports asset availability alongside overall service status.
    #[oai(path = "/health", method = "get")]
    async fn health(&self, state: Data<&Arc<AppState>>) -> Json<serde_json::Value> {
        let status = state.engine.status();

        Json(serde_json::json!({
            "status": if status.background_loaded { "healthy" } else { "degraded" },
            "assets": {
                "background_template": status.background_loaded,
                "font_fallback_active": status.font_fallback,
            }
        }))
    }
}
