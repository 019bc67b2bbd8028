//! SVG to PNG conversion
//!
//! Documents are rendered at a fixed DPI onto a white canvas, cropped to the
//! drawn content plus a small margin, and written as 8-bit RGBA PNG with a
//! `pHYs` chunk recording the resolution.

use super::svg::SvgDocument;
use crate::error::{ExamPrepError, Result};
use logger::debug;
use resvg::{tiny_skia, usvg};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// SVG user units per inch
const POINTS_PER_INCH: f64 = 72.0;

/// Margin kept around the cropped content
const PAD_INCHES: f64 = 0.05;

const METERS_PER_INCH: f64 = 0.0254;

/// Rendered RGBA image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl RasterImage {
    /// Width in pixels
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha RGBA bytes, row major
    #[must_use]
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Renders SVG documents to pixels at a fixed resolution
///
/// System fonts are loaded once when the rasterizer is created.
pub struct Rasterizer {
    options: usvg::Options<'static>,
    dpi: u32,
}

impl Rasterizer {
    /// Create a rasterizer for `dpi` dots per inch (at least 1)
    #[must_use]
    pub fn new(dpi: u32) -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!("Loaded {} font faces", options.fontdb.len());
        Self {
            options,
            dpi: dpi.max(1),
        }
    }

    /// Resolution in dots per inch
    #[must_use]
    pub const fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Render `doc` and crop it to its content
    ///
    /// # Errors
    /// Returns a message if the SVG does not parse or the canvas cannot be allocated.
    pub fn rasterize(&self, doc: &SvgDocument) -> std::result::Result<RasterImage, String> {
        let tree = usvg::Tree::from_str(&doc.build(), &self.options).map_err(|e| e.to_string())?;

        let scale = f64::from(self.dpi) / POINTS_PER_INCH;
        let size = tree.size();
        let width = pixels(f64::from(size.width()) * scale);
        let height = pixels(f64::from(size.height()) * scale);
        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| format!("cannot allocate a {width}x{height} canvas"))?;
        pixmap.fill(tiny_skia::Color::WHITE);

        #[allow(clippy::cast_possible_truncation)]
        let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let pad = pixels(PAD_INCHES * f64::from(self.dpi));
        Ok(crop_to_content(&pixmap, pad))
    }

    /// Render `doc` and write it to `path` as PNG
    ///
    /// # Errors
    /// [`ExamPrepError::Render`] if rendering or encoding fails, [`ExamPrepError::Io`]
    /// if the file cannot be created.
    pub fn render_png(&self, doc: &SvgDocument, path: &Path) -> Result<RasterImage> {
        let image = self
            .rasterize(doc)
            .map_err(|message| ExamPrepError::render(path, message))?;
        write_png(&image, self.dpi, path)?;
        debug!(
            "Wrote {}x{} image to '{}'",
            image.width,
            image.height,
            path.display()
        );
        Ok(image)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(value: f64) -> u32 {
    value.round().max(1.0) as u32
}

/// Copy the bounding box of non-white pixels, grown by `pad` on each side
///
/// A blank canvas is returned whole.
fn crop_to_content(pixmap: &tiny_skia::Pixmap, pad: u32) -> RasterImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let pixels = pixmap.pixels();

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        for x in 0..width {
            let p = pixels[(y * width + x) as usize];
            if p.red() == 255 && p.green() == 255 && p.blue() == 255 && p.alpha() == 255 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    let (x0, y0, x1, y1) = bounds.map_or((0, 0, width - 1, height - 1), |(x0, y0, x1, y1)| {
        (
            x0.saturating_sub(pad),
            y0.saturating_sub(pad),
            (x1 + pad).min(width - 1),
            (y1 + pad).min(height - 1),
        )
    });

    let crop_width = x1 - x0 + 1;
    let crop_height = y1 - y0 + 1;
    let mut rgba = Vec::with_capacity((crop_width * crop_height * 4) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let c = pixels[(y * width + x) as usize].demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
    }

    RasterImage {
        width: crop_width,
        height: crop_height,
        rgba,
    }
}

/// Encode `image` as PNG with a `pHYs` chunk for `dpi`
///
/// Missing parent directories are created and an existing file is replaced.
///
/// # Errors
/// [`ExamPrepError::Io`] if the file cannot be created, [`ExamPrepError::Render`]
/// if encoding fails.
pub fn write_png(image: &RasterImage, dpi: u32, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ExamPrepError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| ExamPrepError::io(path, e))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let per_meter = dots_per_meter(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: per_meter,
        yppu: per_meter,
        unit: png::Unit::Meter,
    }));

    let encode = |e: png::EncodingError| ExamPrepError::render(path, e.to_string());
    let mut writer = encoder.write_header().map_err(encode)?;
    writer.write_image_data(&image.rgba).map_err(encode)?;
    writer.finish().map_err(encode)
}

/// PNG stores resolution in pixels per meter
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn dots_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;
    use tempfile::TempDir;

    #[test]
    fn test_dots_per_meter() {
        assert_eq!(dots_per_meter(300), 11811);
        assert_eq!(dots_per_meter(72), 2835);
    }

    #[test]
    fn test_crop_to_content_with_padding() {
        // 1 inch square at 72 dpi with a 10pt square in the middle
        let mut doc = SvgDocument::new(72.0, 72.0);
        doc.rect(0.0, 0.0, 72.0, 72.0, "#ffffff")
            .rect(31.0, 31.0, 10.0, 10.0, "#000000");

        let image = Rasterizer::new(72).rasterize(&doc).unwrap();
        // 10px of content plus round(0.05 * 72) = 4px on each side,
        // allowing one pixel of antialiasing per edge
        assert!((18..=20).contains(&image.width()));
        assert!((18..=20).contains(&image.height()));
        assert_eq!(
            image.rgba().len(),
            (image.width() * image.height() * 4) as usize
        );
        assert_eq!(&image.rgba()[..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_blank_document_is_not_cropped() {
        let doc = SvgDocument::new(36.0, 18.0);
        let image = Rasterizer::new(144).rasterize(&doc).unwrap();
        assert_eq!((image.width(), image.height()), (72, 36));
    }

    #[test]
    fn test_png_carries_resolution() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("chart.png");
        let mut doc = SvgDocument::new(72.0, 72.0);
        doc.rect(10.0, 10.0, 20.0, 20.0, "#5e81ac");

        let image = Rasterizer::new(300).render_png(&doc, &path).unwrap();

        let decoder = png::Decoder::new(BufReader::new(File::open(&path).unwrap()));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (image.width(), image.height()));
        let dims = info.pixel_dims.unwrap();
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }
}
