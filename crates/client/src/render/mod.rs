//! Render request builder.
//!
//! A [`RenderRequest`] starts from [`ForgeClient::render_html`] or
//! [`ForgeClient::render_url`], accumulates options through chained setters,
//! and is consumed by one of the `send` methods.
//!
//! Every setter records "explicitly set to this value", so `pdf_bookmarks(false)`
//! still reaches the server. Setters can be called in any order; repeated
//! calls to a scalar setter keep the last value, while `pdf_barcode*` and
//! `pdf_attach*` append in call order.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use forge_core::{
    AccessibilityLevel, BarcodeConfig, BarcodeType, DitherMethod, EmbeddedFile, Flow, LayoutOptions, Orientation,
    OutputFormat, Palette, PaletteChoice, PdfMode, PdfOptions, PdfStandard, QuantizeOptions, RenderPayload,
    RenderSource, WatermarkLayer, encode_base64,
};

use crate::client::{ForgeClient, until, within};
use crate::error::Error;

/// A render request under construction.
///
/// Sending consumes the request. Clone it first to send the same options twice.
#[derive(Debug, Clone)]
#[must_use = "a render request does nothing until sent"]
pub struct RenderRequest {
    client: ForgeClient,
    source: RenderSource,
    format: Option<OutputFormat>,
    layout: LayoutOptions,
    quantize: QuantizeOptions,
    pdf: PdfOptions,
}

impl RenderRequest {
    pub(crate) fn new(client: ForgeClient, source: RenderSource) -> Self {
        Self {
            client,
            source,
            format: None,
            layout: LayoutOptions::default(),
            quantize: QuantizeOptions::default(),
            pdf: PdfOptions::default(),
        }
    }

    /// Output format (default: pdf).
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Viewport width in CSS pixels.
    pub fn width(mut self, px: i64) -> Self {
        self.layout.width = Some(px);
        self
    }

    /// Viewport height in CSS pixels.
    pub fn height(mut self, px: i64) -> Self {
        self.layout.height = Some(px);
        self
    }

    /// Paper size, e.g. "a4" or "letter".
    pub fn paper(mut self, size: impl Into<String>) -> Self {
        self.layout.paper = Some(size.into());
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.layout.orientation = Some(orientation);
        self
    }

    /// Page margins: a named preset or "T,R,B,L" in millimeters.
    pub fn margins(mut self, margins: impl Into<String>) -> Self {
        self.layout.margins = Some(margins.into());
        self
    }

    pub fn flow(mut self, flow: Flow) -> Self {
        self.layout.flow = Some(flow);
        self
    }

    /// Output DPI.
    pub fn density(mut self, dpi: f64) -> Self {
        self.layout.density = Some(dpi);
        self
    }

    /// CSS background color.
    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.layout.background = Some(color.into());
        self
    }

    /// Page load timeout in seconds, enforced by the server.
    pub fn timeout(mut self, seconds: i64) -> Self {
        self.layout.timeout = Some(seconds);
        self
    }

    /// Number of colors for quantization (2-256).
    pub fn colors(mut self, n: i64) -> Self {
        self.quantize.colors = Some(n);
        self
    }

    /// Built-in palette preset. Replaces any custom palette.
    pub fn palette(mut self, preset: Palette) -> Self {
        self.quantize.palette = Some(PaletteChoice::Preset(preset));
        self
    }

    /// Custom palette of hex colors. Replaces any preset.
    pub fn custom_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quantize.palette = Some(PaletteChoice::Custom(colors.into_iter().map(Into::into).collect()));
        self
    }

    pub fn dither(mut self, method: DitherMethod) -> Self {
        self.quantize.dither = Some(method);
        self
    }

    pub fn pdf_title(mut self, title: impl Into<String>) -> Self {
        self.pdf.title = Some(title.into());
        self
    }

    pub fn pdf_author(mut self, author: impl Into<String>) -> Self {
        self.pdf.author = Some(author.into());
        self
    }

    pub fn pdf_subject(mut self, subject: impl Into<String>) -> Self {
        self.pdf.subject = Some(subject.into());
        self
    }

    /// Comma-separated keywords.
    pub fn pdf_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.pdf.keywords = Some(keywords.into());
        self
    }

    pub fn pdf_creator(mut self, creator: impl Into<String>) -> Self {
        self.pdf.creator = Some(creator.into());
        self
    }

    /// Generate bookmarks from headings.
    pub fn pdf_bookmarks(mut self, enabled: bool) -> Self {
        self.pdf.bookmarks = Some(enabled);
        self
    }

    /// "Page X of Y" footers on each page.
    pub fn pdf_page_numbers(mut self, enabled: bool) -> Self {
        self.pdf.page_numbers = Some(enabled);
        self
    }

    pub fn pdf_watermark_text(mut self, text: impl Into<String>) -> Self {
        self.pdf.watermark.text = Some(text.into());
        self
    }

    /// Watermark image as base64-encoded PNG or JPEG.
    pub fn pdf_watermark_image(mut self, base64_data: impl Into<String>) -> Self {
        self.pdf.watermark.image = Some(base64_data.into());
        self
    }

    /// Watermark image from raw PNG or JPEG bytes.
    pub fn pdf_watermark_image_bytes(self, image: impl AsRef<[u8]>) -> Self {
        self.pdf_watermark_image(encode_base64(image))
    }

    /// 0.0-1.0 (server default 0.15).
    pub fn pdf_watermark_opacity(mut self, opacity: f64) -> Self {
        self.pdf.watermark.opacity = Some(opacity);
        self
    }

    /// Rotation in degrees.
    pub fn pdf_watermark_rotation(mut self, degrees: f64) -> Self {
        self.pdf.watermark.rotation = Some(degrees);
        self
    }

    /// Hex text color, e.g. "#888888".
    pub fn pdf_watermark_color(mut self, hex: impl Into<String>) -> Self {
        self.pdf.watermark.color = Some(hex.into());
        self
    }

    /// Font size in PDF points.
    pub fn pdf_watermark_font_size(mut self, size: f64) -> Self {
        self.pdf.watermark.font_size = Some(size);
        self
    }

    /// Image scale (0.0-1.0).
    pub fn pdf_watermark_scale(mut self, scale: f64) -> Self {
        self.pdf.watermark.scale = Some(scale);
        self
    }

    pub fn pdf_watermark_layer(mut self, layer: WatermarkLayer) -> Self {
        self.pdf.watermark.layer = Some(layer);
        self
    }

    /// Pages the watermark applies to, e.g. "1,3-5".
    pub fn pdf_watermark_pages(mut self, pages: impl Into<String>) -> Self {
        self.pdf.watermark.pages = Some(pages.into());
        self
    }

    pub fn pdf_standard(mut self, standard: PdfStandard) -> Self {
        self.pdf.standard = Some(standard);
        self
    }

    /// Attach a file; `data` must already be base64-encoded.
    pub fn pdf_attach(self, path: impl Into<String>, data: impl Into<String>) -> Self {
        self.pdf_attach_with(EmbeddedFile::new(path, data))
    }

    /// Attach a fully described file.
    pub fn pdf_attach_with(mut self, file: EmbeddedFile) -> Self {
        self.pdf.embedded_files.push(file);
        self
    }

    /// Add a barcode with default placement.
    pub fn pdf_barcode(self, kind: BarcodeType, data: impl Into<String>) -> Self {
        self.pdf_barcode_with(BarcodeConfig::new(kind, data))
    }

    /// Add a fully configured barcode.
    pub fn pdf_barcode_with(mut self, config: BarcodeConfig) -> Self {
        self.pdf.barcodes.push(config);
        self
    }

    pub fn pdf_mode(mut self, mode: PdfMode) -> Self {
        self.pdf.mode = Some(mode);
        self
    }

    /// Signing certificate as a base64-encoded PKCS#12 bundle.
    pub fn pdf_sign_certificate(mut self, base64_data: impl Into<String>) -> Self {
        self.pdf.signature.certificate_data = Some(base64_data.into());
        self
    }

    /// Signing certificate from raw PKCS#12 bytes.
    pub fn pdf_sign_certificate_bytes(self, pkcs12: impl AsRef<[u8]>) -> Self {
        self.pdf_sign_certificate(encode_base64(pkcs12))
    }

    /// Password protecting the PKCS#12 bundle.
    pub fn pdf_sign_password(mut self, password: impl Into<String>) -> Self {
        self.pdf.signature.password = Some(password.into());
        self
    }

    pub fn pdf_sign_name(mut self, name: impl Into<String>) -> Self {
        self.pdf.signature.signer_name = Some(name.into());
        self
    }

    pub fn pdf_sign_reason(mut self, reason: impl Into<String>) -> Self {
        self.pdf.signature.reason = Some(reason.into());
        self
    }

    pub fn pdf_sign_location(mut self, location: impl Into<String>) -> Self {
        self.pdf.signature.location = Some(location.into());
        self
    }

    /// RFC 3161 timestamp server.
    pub fn pdf_sign_timestamp_url(mut self, url: impl Into<String>) -> Self {
        self.pdf.signature.timestamp_url = Some(url.into());
        self
    }

    /// Password required to open the document.
    pub fn pdf_user_password(mut self, password: impl Into<String>) -> Self {
        self.pdf.encryption.user_password = Some(password.into());
        self
    }

    /// Password required to change permissions.
    pub fn pdf_owner_password(mut self, password: impl Into<String>) -> Self {
        self.pdf.encryption.owner_password = Some(password.into());
        self
    }

    /// Comma-separated permission flags, e.g. "print,copy".
    pub fn pdf_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.pdf.encryption.permissions = Some(permissions.into());
        self
    }

    pub fn pdf_accessibility(mut self, level: AccessibilityLevel) -> Self {
        self.pdf.accessibility = Some(level);
        self
    }

    /// Linearize for fast web view.
    pub fn pdf_linearize(mut self, enabled: bool) -> Self {
        self.pdf.linearize = Some(enabled);
        self
    }

    /// The payload `send` would post, leaving the request usable.
    pub fn payload(&self) -> RenderPayload {
        self.clone().into_payload()
    }

    /// Finalize into the wire payload.
    pub fn into_payload(self) -> RenderPayload {
        RenderPayload {
            source: self.source,
            format: self.format.unwrap_or_default(),
            layout: self.layout,
            quantize: self.quantize,
            pdf: self.pdf,
        }
    }

    /// Render and return the raw output bytes.
    ///
    /// # Errors
    ///
    /// `Error::Connection` if the server could not be reached within the
    /// client timeout, `Error::Server` for any non-200 response.
    pub async fn send(self) -> Result<Bytes, Error> {
        let client = self.client.clone();
        let payload = self.into_payload();
        client.render(&payload).await
    }

    /// [`send`](Self::send), abandoned with a connection error when `cancel`
    /// completes first.
    pub async fn send_until<F>(self, cancel: F) -> Result<Bytes, Error>
    where
        F: Future<Output = ()>,
    {
        until(self.send(), cancel).await
    }

    /// [`send`](Self::send) with a deadline on top of the client timeout.
    pub async fn send_within(self, deadline: Duration) -> Result<Bytes, Error> {
        within(self.send(), deadline).await
    }
}
