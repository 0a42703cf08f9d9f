//! Wire payload for `POST /render`.
//!
//! ### Shape
//!
//! - `html` or `url` (the source) and `format` at the top level
//! - Layout fields flattened beside them, only those explicitly set
//! - `quantize` and `pdf` as nested groups
//!
//! A group key is present iff at least one of its member fields was set. The
//! presence checks are the `is_empty` predicates below, evaluated when the
//! payload is serialized, so there is no separate "touched" flag to drift out
//! of sync with the leaves. Only `format` has a builder-side default (`pdf`);
//! every other default is left to the server.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::types::{
    AccessibilityLevel, BarcodeAnchor, BarcodeType, DitherMethod, EmbedRelationship, Flow, Orientation, OutputFormat,
    Palette, PdfMode, PdfStandard, WatermarkLayer,
};

/// Encode raw bytes as standard, padded base64.
pub fn encode_base64(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

/// What the server renders: inline HTML or a URL it fetches itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderSource {
    Html(String),
    Url(String),
}

/// Page and viewport layout, flattened into the top level of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayoutOptions {
    /// Viewport width in CSS pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    /// Viewport height in CSS pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,

    /// Paper size token (e.g. "a4", "letter") or a custom size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,

    /// Named preset or "T,R,B,L" in millimeters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,

    /// Output DPI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,

    /// CSS background color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Page load timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
}

/// Palette slot: a preset token or a literal list of hex colors.
///
/// Serializes as a string for presets and as an array for custom palettes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PaletteChoice {
    Preset(Palette),
    Custom(Vec<String>),
}

impl From<Palette> for PaletteChoice {
    fn from(preset: Palette) -> Self {
        PaletteChoice::Preset(preset)
    }
}

/// Color quantization group (`quantize`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuantizeOptions {
    /// Number of colors (2-256, checked by the server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<PaletteChoice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dither: Option<DitherMethod>,
}

impl QuantizeOptions {
    pub fn is_empty(&self) -> bool {
        self.colors.is_none() && self.palette.is_none() && self.dither.is_none()
    }
}

/// Watermark sub-group (`pdf.watermark`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatermarkOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Base64-encoded PNG or JPEG.
    #[serde(rename = "image_data", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// 0.0-1.0; the server uses 0.15 when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    /// Hex text color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// PDF points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,

    /// Image scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<WatermarkLayer>,

    /// Page ranges such as "1,3-5".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

impl WatermarkOptions {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.image.is_none()
            && self.opacity.is_none()
            && self.rotation.is_none()
            && self.color.is_none()
            && self.font_size.is_none()
            && self.scale.is_none()
            && self.layer.is_none()
            && self.pages.is_none()
    }
}

/// Digital signature sub-group (`pdf.signature`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignatureOptions {
    /// Base64-encoded PKCS#12 bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub signer_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// RFC 3161 timestamp authority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_url: Option<String>,
}

impl SignatureOptions {
    pub fn is_empty(&self) -> bool {
        self.certificate_data.is_none()
            && self.password.is_none()
            && self.signer_name.is_none()
            && self.reason.is_none()
            && self.location.is_none()
            && self.timestamp_url.is_none()
    }
}

/// Encryption sub-group (`pdf.encryption`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncryptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_password: Option<String>,

    /// Comma-separated permission tokens, e.g. "print,copy".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

impl EncryptionOptions {
    pub fn is_empty(&self) -> bool {
        self.user_password.is_none() && self.owner_password.is_none() && self.permissions.is_none()
    }
}

/// A file attached to the PDF.
///
/// `mime_type`, `description` and `relationship` are left off the wire when
/// unset or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedFile {
    pub path: String,

    /// Base64-encoded file contents.
    pub data: String,

    #[serde(skip_serializing_if = "is_blank")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "is_blank")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<EmbedRelationship>,
}

impl EmbeddedFile {
    /// Attachment from already base64-encoded data.
    pub fn new(path: impl Into<String>, data: impl Into<String>) -> Self {
        Self { path: path.into(), data: data.into(), mime_type: None, description: None, relationship: None }
    }

    /// Attachment from raw bytes, encoded here.
    pub fn from_bytes(path: impl Into<String>, bytes: impl AsRef<[u8]>) -> Self {
        Self::new(path, encode_base64(bytes))
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn relationship(mut self, relationship: EmbedRelationship) -> Self {
        self.relationship = Some(relationship);
        self
    }
}

/// A barcode stamped onto PDF pages.
///
/// Every optional field is sent only when set, leaving placement defaults to
/// the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeConfig {
    #[serde(rename = "type")]
    pub kind: BarcodeType,

    pub data: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<BarcodeAnchor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draw_background: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
}

impl BarcodeConfig {
    pub fn new(kind: BarcodeType, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            x: None,
            y: None,
            width: None,
            height: None,
            anchor: None,
            foreground: None,
            background: None,
            draw_background: None,
            pages: None,
        }
    }

    /// Offset from the anchor corner, in PDF points.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn anchor(mut self, anchor: BarcodeAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = Some(color.into());
        self
    }

    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn draw_background(mut self, enabled: bool) -> Self {
        self.draw_background = Some(enabled);
        self
    }

    pub fn pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }
}

/// PDF post-processing group (`pdf`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Comma-joined keyword list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Outline entries generated from headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmarks: Option<bool>,

    /// "Page X of Y" footers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_numbers: Option<bool>,

    #[serde(skip_serializing_if = "WatermarkOptions::is_empty")]
    pub watermark: WatermarkOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard: Option<PdfStandard>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embedded_files: Vec<EmbeddedFile>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub barcodes: Vec<BarcodeConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<PdfMode>,

    #[serde(skip_serializing_if = "SignatureOptions::is_empty")]
    pub signature: SignatureOptions,

    #[serde(skip_serializing_if = "EncryptionOptions::is_empty")]
    pub encryption: EncryptionOptions,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityLevel>,

    /// Fast web view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linearize: Option<bool>,
}

impl PdfOptions {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.keywords.is_none()
            && self.creator.is_none()
            && self.bookmarks.is_none()
            && self.page_numbers.is_none()
            && self.watermark.is_empty()
            && self.standard.is_none()
            && self.embedded_files.is_empty()
            && self.barcodes.is_empty()
            && self.mode.is_none()
            && self.signature.is_empty()
            && self.encryption.is_empty()
            && self.accessibility.is_none()
            && self.linearize.is_none()
    }
}

/// Finalized request body for `POST /render`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPayload {
    #[serde(flatten)]
    pub source: RenderSource,

    pub format: OutputFormat,

    #[serde(flatten)]
    pub layout: LayoutOptions,

    #[serde(skip_serializing_if = "QuantizeOptions::is_empty")]
    pub quantize: QuantizeOptions,

    #[serde(skip_serializing_if = "PdfOptions::is_empty")]
    pub pdf: PdfOptions,
}

impl RenderPayload {
    /// A payload with only a source and the default format.
    pub fn new(source: RenderSource) -> Self {
        Self {
            source,
            format: OutputFormat::default(),
            layout: LayoutOptions::default(),
            quantize: QuantizeOptions::default(),
            pdf: PdfOptions::default(),
        }
    }

    /// The `quantize` group as it will appear on the wire, if at all.
    pub fn quantize_group(&self) -> Option<&QuantizeOptions> {
        (!self.quantize.is_empty()).then_some(&self.quantize)
    }

    /// The `pdf` group as it will appear on the wire, if at all.
    pub fn pdf_group(&self) -> Option<&PdfOptions> {
        (!self.pdf.is_empty()).then_some(&self.pdf)
    }

    /// The payload as a JSON tree.
    pub fn to_value(&self) -> serde_json::Value {
        // Keys are all strings and non-finite floats encode as null, so
        // serialization cannot fail for this type.
        serde_json::to_value(self).expect("render payload is always representable as JSON")
    }

    /// The payload as request body bytes.
    pub fn to_json(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("render payload is always representable as JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn html_payload() -> RenderPayload {
        RenderPayload::new(RenderSource::Html("<h1>Hi</h1>".to_string()))
    }

    #[test]
    fn test_minimal_payload() {
        let payload = html_payload();
        assert_eq!(payload.to_value(), json!({"html": "<h1>Hi</h1>", "format": "pdf"}));
        assert!(payload.quantize_group().is_none());
        assert!(payload.pdf_group().is_none());
    }

    #[test]
    fn test_url_source_key() {
        let payload = RenderPayload::new(RenderSource::Url("https://example.com".to_string()));
        assert_eq!(payload.to_value(), json!({"url": "https://example.com", "format": "pdf"}));
    }

    #[test]
    fn test_layout_fields_flatten_to_top_level() {
        let mut payload = html_payload();
        payload.layout.width = Some(0);
        payload.layout.flow = Some(Flow::Continuous);

        let value = payload.to_value();
        assert_eq!(value["width"], json!(0));
        assert_eq!(value["flow"], json!("continuous"));
        assert!(value.get("height").is_none());
        assert!(value.get("layout").is_none());
    }

    #[test]
    fn test_quantize_predicate() {
        let mut quantize = QuantizeOptions::default();
        assert!(quantize.is_empty());

        quantize.dither = Some(DitherMethod::Ordered);
        assert!(!quantize.is_empty());
    }

    #[test]
    fn test_palette_choice_shapes() {
        let preset = PaletteChoice::from(Palette::Grayscale);
        assert_eq!(serde_json::to_value(&preset).unwrap(), json!("grayscale"));

        let custom = PaletteChoice::Custom(vec!["#000000".to_string(), "#ffffff".to_string()]);
        assert_eq!(serde_json::to_value(&custom).unwrap(), json!(["#000000", "#ffffff"]));
    }

    #[test]
    fn test_nested_group_only_triggers_pdf() {
        let mut payload = html_payload();
        payload.pdf.encryption.permissions = Some("print".to_string());

        assert_eq!(
            payload.to_value(),
            json!({
                "html": "<h1>Hi</h1>",
                "format": "pdf",
                "pdf": {"encryption": {"permissions": "print"}}
            })
        );
    }

    #[test]
    fn test_watermark_image_wire_key() {
        let watermark = WatermarkOptions { image: Some("aGk=".to_string()), ..Default::default() };
        assert_eq!(serde_json::to_value(&watermark).unwrap(), json!({"image_data": "aGk="}));
    }

    #[test]
    fn test_embedded_file_omits_blank_fields() {
        let file = EmbeddedFile::new("invoice.xml", "PHg+").mime_type("").description("Factur-X data");
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            json!({"path": "invoice.xml", "data": "PHg+", "description": "Factur-X data"})
        );
    }

    #[test]
    fn test_embedded_file_from_bytes() {
        let file = EmbeddedFile::from_bytes("hello.txt", b"hello").relationship(EmbedRelationship::Supplement);
        assert_eq!(file.data, "aGVsbG8=");
        assert_eq!(serde_json::to_value(&file).unwrap()["relationship"], json!("supplement"));
    }

    #[test]
    fn test_barcode_minimal_wire_form() {
        let barcode = BarcodeConfig::new(BarcodeType::Qr, "https://example.com/invoice/123");
        assert_eq!(
            serde_json::to_value(&barcode).unwrap(),
            json!({"type": "qr", "data": "https://example.com/invoice/123"})
        );
    }

    #[test]
    fn test_barcode_explicit_false_is_sent() {
        let barcode = BarcodeConfig::new(BarcodeType::Code39, "A1").draw_background(false);
        assert_eq!(serde_json::to_value(&barcode).unwrap()["draw_background"], json!(false));
    }

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64([0xffu8, 0x00]), "/wA=");
    }
}
