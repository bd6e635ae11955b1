pub mod http_renderer;
pub mod renderer_trait;

pub use http_renderer::HttpDocumentRenderer;
pub use renderer_trait::{DocumentRenderer, RenderedDocument};
