pub mod headers;
pub mod image;
pub mod page;
pub mod palettes;
pub mod render;

pub use self::image::{__path_handle_clear_image, __path_handle_get_image, __path_handle_upload};
pub use self::image::{handle_clear_image, handle_get_image, handle_upload, ImageInfo};
pub use page::{handle_index, handle_static};
pub use palettes::{handle_palettes, PaletteInfo, __path_handle_palettes};
pub use render::{__path_handle_render, __path_handle_render_text};
pub use render::{handle_render, handle_render_text, RenderQuery, RenderResponse};
