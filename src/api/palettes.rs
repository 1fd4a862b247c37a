use ascii_render::Palette;
use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// One entry of the fixed palette table
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteInfo {
    /// Stable index (the page lists palettes in this order)
    pub index: usize,
    pub name: String,
    /// Glyphs from darkest to lightest
    pub glyphs: String,
}

impl From<Palette> for PaletteInfo {
    fn from(palette: Palette) -> Self {
        Self {
            index: palette.index(),
            name: palette.name().to_string(),
            glyphs: palette.glyphs().iter().collect(),
        }
    }
}

/// List the available palettes
#[utoipa::path(
    get,
    path = "/api/palettes",
    responses(
        (status = 200, description = "Palettes in index order", body = Vec<PaletteInfo>),
    ),
    tag = "Render"
)]
pub async fn handle_palettes() -> Json<Vec<PaletteInfo>> {
    Json(Palette::ALL.into_iter().map(PaletteInfo::from).collect())
}
