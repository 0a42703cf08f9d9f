//! Core types and shared functionality for the forge rendering client.
//!
//! This crate provides:
//! - Option enums with their wire tokens
//! - The `POST /render` payload model
//! - Client configuration structures

pub mod config;
pub mod payload;
pub mod types;

pub use config::{ConfigError, ForgeConfig};
pub use payload::{
    BarcodeConfig, EmbeddedFile, EncryptionOptions, LayoutOptions, PaletteChoice, PdfOptions, QuantizeOptions,
    RenderPayload, RenderSource, SignatureOptions, WatermarkOptions, encode_base64,
};
pub use types::{
    AccessibilityLevel, BarcodeAnchor, BarcodeType, DitherMethod, EmbedRelationship, Flow, Orientation, OutputFormat,
    Palette, PdfMode, PdfStandard, WatermarkLayer,
};
