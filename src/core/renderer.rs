use std::path::Path;
use std::sync::Arc;

use tiny_skia::{Color, Pixmap};

use crate::core::assets::{self, FontSet};
use crate::core::error::RenderError;
use crate::core::layout::{Alignment, COLUMNS, MAX_ROWS, TableLayout};
use crate::core::text;
use crate::schemas::render::RenderRequest;
use crate::settings::Config;

/// Asset availability snapshot, reported by the health endpoint.
pub struct RendererStatus {
    pub background_loaded: bool,
    pub font_fallback: bool,
}

/// Draws validated metric rows as a ruled table over the background
/// template and encodes the result as PNG.
///
/// The engine is cheap to clone: the background pixmap and font binaries
/// sit behind `Arc` and are never mutated after startup.
#[derive(Clone)]
pub struct TableRenderer {
    background: Option<Arc<Pixmap>>,
    fonts: Option<FontSet>,
    layout: TableLayout,
}

impl TableRenderer {
    /// Loads render assets per `config`. The service comes up even when an
    /// asset is missing: a missing font degrades to a system face, while a
    /// missing background template leaves the engine in a state where every
    /// render request fails.
    pub fn new(config: &Config) -> Self {
        let background_path = config
            .background_path
            .as_deref()
            .unwrap_or(assets::DEFAULT_BACKGROUND_PATH);
        let background = match assets::load_background(Path::new(background_path)) {
            Ok(pixmap) => Some(Arc::new(pixmap)),
            Err(err) => {
                tracing::error!("{err:#}; every render request will fail until it is restored");
                None
            }
        };

        let font_path = config.font_path.as_deref().unwrap_or(assets::DEFAULT_FONT_PATH);
        let bold_font_path = config
            .bold_font_path
            .as_deref()
            .unwrap_or(assets::DEFAULT_BOLD_FONT_PATH);
        let fonts = match assets::load_fonts(Path::new(font_path), Path::new(bold_font_path)) {
            Ok(fonts) => Some(fonts),
            Err(err) => {
                tracing::error!("{err:#}; every render request will fail until a font is available");
                None
            }
        };

        Self {
            background,
            fonts,
            layout: TableLayout::default(),
        }
    }

    pub fn status(&self) -> RendererStatus {
        RendererStatus {
            background_loaded: self.background.is_some(),
            font_fallback: self.fonts.as_ref().map(|fonts| fonts.fallback).unwrap_or(true),
        }
    }

    /// Renders on the blocking pool; the raster work is synchronous.
    pub async fn render(&self, request: RenderRequest) -> Result<Vec<u8>, RenderError> {
        let renderer = self.clone();

        tokio::task::spawn_blocking(move || renderer.render_sync(&request))
            .await
            .map_err(|err| RenderError::Task(err.to_string()))?
    }

    pub fn render_sync(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        let background = self.background.as_deref().ok_or_else(|| {
            RenderError::AssetLoad("background template was not loaded at startup".into())
        })?;
        let fonts = self
            .fonts
            .as_ref()
            .ok_or_else(|| RenderError::FontLoad("no typeface was loaded at startup".into()))?;
        let bold = fonts
            .bold
            .as_face()
            .map_err(|err| RenderError::FontLoad(err.to_string()))?;
        let regular = fonts
            .regular
            .as_face()
            .map_err(|err| RenderError::FontLoad(err.to_string()))?;

        // Request-local surface with the template already composited.
        let mut surface = background.clone();

        let layout = &self.layout;
        let ink = Color::from_rgba8(0, 0, 0, 255);
        let rule = Color::from_rgba8(204, 204, 204, 255);

        text::draw_text(
            &mut surface,
            &bold,
            &request.id,
            layout.title_x,
            layout.title_y,
            layout.title_size,
            ink,
        );

        for (index, row) in request.rows.iter().take(MAX_ROWS).enumerate() {
            let y = layout.row_y(index);

            text::draw_hline(
                &mut surface,
                layout.margin_left - 20.0,
                layout.margin_left + layout.row_width,
                y + layout.row_height,
                1.0,
                rule,
            );

            for column in &COLUMNS {
                let value = row.value_for(column.field);
                let x = match column.align {
                    Alignment::Left => column.x,
                    Alignment::Center => {
                        column.x - text::measure_text(&regular, value, layout.body_size) / 2.0
                    }
                };
                text::draw_text(
                    &mut surface,
                    &regular,
                    value,
                    x,
                    y + layout.padding_top,
                    layout.body_size,
                    ink,
                );
            }
        }

        surface
            .encode_png()
            .map_err(|err| RenderError::Encoding(err.to_string()))
    }
}
