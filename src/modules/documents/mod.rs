// Documents module: PDF rendering of stored bills

pub mod services;

pub use services::{DocumentRenderer, HttpDocumentRenderer, RenderedDocument};
