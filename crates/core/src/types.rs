//! Option enums accepted by the rendering server.
//!
//! Each variant serializes to the exact token the server expects on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Png,
    Jpeg,
    Bmp,
    Tga,
    Qoi,
    Svg,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tga => "tga",
            OutputFormat::Qoi => "qoi",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Document flow mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Auto,
    Paginate,
    Continuous,
}

impl Flow {
    pub fn as_str(self) -> &'static str {
        match self {
            Flow::Auto => "auto",
            Flow::Paginate => "paginate",
            Flow::Continuous => "continuous",
        }
    }
}

/// Dithering algorithm used during color quantization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMethod {
    None,
    FloydSteinberg,
    Atkinson,
    Ordered,
}

impl DitherMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            DitherMethod::None => "none",
            DitherMethod::FloydSteinberg => "floyd-steinberg",
            DitherMethod::Atkinson => "atkinson",
            DitherMethod::Ordered => "ordered",
        }
    }
}

/// Built-in quantization palette presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Auto,
    #[serde(rename = "bw")]
    BlackWhite,
    Grayscale,
    Eink,
}

impl Palette {
    pub fn as_str(self) -> &'static str {
        match self {
            Palette::Auto => "auto",
            Palette::BlackWhite => "bw",
            Palette::Grayscale => "grayscale",
            Palette::Eink => "eink",
        }
    }
}

/// Whether a watermark is drawn above or below page content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WatermarkLayer {
    Over,
    Under,
}

impl WatermarkLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            WatermarkLayer::Over => "over",
            WatermarkLayer::Under => "under",
        }
    }
}

/// PDF standard compliance level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PdfStandard {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "pdf/a-2b")]
    PdfA2b,
    #[serde(rename = "pdf/a-3b")]
    PdfA3b,
}

impl PdfStandard {
    pub fn as_str(self) -> &'static str {
        match self {
            PdfStandard::None => "none",
            PdfStandard::PdfA2b => "pdf/a-2b",
            PdfStandard::PdfA3b => "pdf/a-3b",
        }
    }
}

/// Relationship of an embedded file to the document (PDF/A-3 `AFRelationship`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmbedRelationship {
    Source,
    Data,
    Alternative,
    Supplement,
    Unspecified,
}

impl EmbedRelationship {
    pub fn as_str(self) -> &'static str {
        match self {
            EmbedRelationship::Source => "source",
            EmbedRelationship::Data => "data",
            EmbedRelationship::Alternative => "alternative",
            EmbedRelationship::Supplement => "supplement",
            EmbedRelationship::Unspecified => "unspecified",
        }
    }
}

/// Barcode symbology.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeType {
    Qr,
    Code128,
    Ean13,
    Upca,
    Code39,
}

impl BarcodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            BarcodeType::Qr => "qr",
            BarcodeType::Code128 => "code128",
            BarcodeType::Ean13 => "ean13",
            BarcodeType::Upca => "upca",
            BarcodeType::Code39 => "code39",
        }
    }
}

/// Page corner a barcode position is measured from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BarcodeAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl BarcodeAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            BarcodeAnchor::TopLeft => "top-left",
            BarcodeAnchor::TopRight => "top-right",
            BarcodeAnchor::BottomLeft => "bottom-left",
            BarcodeAnchor::BottomRight => "bottom-right",
        }
    }
}

/// PDF rendering mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PdfMode {
    Auto,
    Vector,
    Raster,
}

impl PdfMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PdfMode::Auto => "auto",
            PdfMode::Vector => "vector",
            PdfMode::Raster => "raster",
        }
    }
}

/// PDF accessibility compliance level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccessibilityLevel {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "pdf/ua-1")]
    PdfUa1,
}

impl AccessibilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibilityLevel::None => "none",
            AccessibilityLevel::Basic => "basic",
            AccessibilityLevel::PdfUa1 => "pdf/ua-1",
        }
    }
}

macro_rules! display_as_token {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_token!(
    OutputFormat,
    Orientation,
    Flow,
    DitherMethod,
    Palette,
    WatermarkLayer,
    PdfStandard,
    EmbedRelationship,
    BarcodeType,
    BarcodeAnchor,
    PdfMode,
    AccessibilityLevel,
);
