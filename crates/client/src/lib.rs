//! Client for the Forge rendering server.
//!
//! This crate builds render requests, posts them to the server, and turns
//! the outcome into output bytes or a typed [`Error`].
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use forge_client::{ForgeClient, OutputFormat};
//!
//! let client = ForgeClient::new("http://localhost:3000")?;
//! let png = client.render_html("<h1>Hello</h1>").format(OutputFormat::Png).width(800).send().await?;
//! # let _ = png;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod render;
mod response;
pub mod transport;

pub use client::{ForgeClient, ForgeClientBuilder, normalize_base_url};
pub use error::{BoxError, ConnectionError, Error};
pub use render::RenderRequest;
pub use transport::{HttpExecutor, HttpRequest, HttpResponse, ReqwestExecutor};

pub use forge_core::{
    AccessibilityLevel, BarcodeAnchor, BarcodeConfig, BarcodeType, ConfigError, DitherMethod, EmbedRelationship,
    EmbeddedFile, Flow, ForgeConfig, Orientation, OutputFormat, Palette, PdfMode, PdfStandard, RenderPayload,
    WatermarkLayer,
};
