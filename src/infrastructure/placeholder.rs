use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{Font, FontVec, GlyphId, OutlinedGlyph, PxScale, Rect, ScaleFont, point};
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use thiserror::Error;
use tracing::debug;

use crate::domain::photos::placeholder_caption;

pub const PLACEHOLDER_WIDTH: u32 = 400;
pub const PLACEHOLDER_HEIGHT: u32 = 300;
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

const BACKGROUND: Rgb<u8> = Rgb([52, 152, 219]);
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const JPEG_QUALITY: u8 = 85;

const FONT_NAME: &str = "arial.ttf";
const FONT_SIZE_PX: f32 = 20.0;
const FONT_DIRS: &[&str] = &[
    ".",
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

/// Cell size of the built-in font before scaling.
const BITMAP_CELL: i64 = 8;
const BITMAP_SCALE: i64 = 2;
/// Hollow box drawn for characters the bitmap font does not cover.
const MISSING_GLYPH: [u8; 8] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error("failed to encode placeholder image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Draws the "Rasm: ..." card shown when a photo cannot be fetched.
///
/// The font is resolved once at construction and shared by every render.
#[derive(Clone)]
pub struct PlaceholderRenderer {
    font: Option<Arc<FontVec>>,
}

impl fmt::Debug for PlaceholderRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderRenderer")
            .field("truetype", &self.font.is_some())
            .finish()
    }
}

impl PlaceholderRenderer {
    /// `font_path` is tried before the usual locations of `arial.ttf`.
    pub fn new(font_path: Option<PathBuf>) -> Self {
        Self {
            font: load_font(font_path).map(Arc::new),
        }
    }

    pub fn has_truetype_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn render(&self, caption_seed: &str) -> Result<Vec<u8>, PlaceholderError> {
        let caption = placeholder_caption(caption_seed);
        let mut canvas = RgbImage::from_pixel(PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT, BACKGROUND);

        match self.font.as_deref() {
            Some(font) => draw_outlined(&mut canvas, font, &caption),
            None => draw_bitmap(&mut canvas, &caption),
        }

        encode_jpeg(&canvas)
    }
}

fn load_font(font_path: Option<PathBuf>) -> Option<FontVec> {
    let candidates = font_path
        .into_iter()
        .chain(FONT_DIRS.iter().map(|dir| Path::new(dir).join(FONT_NAME)));

    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        match FontVec::try_from_vec(bytes) {
            Ok(font) => {
                debug!(path = %path.display(), "loaded placeholder font");
                return Some(font);
            }
            Err(err) => debug!(path = %path.display(), error = %err, "skipping unreadable font"),
        }
    }

    debug!("no TrueType font available, using built-in bitmap font");
    None
}

fn encode_jpeg(canvas: &RgbImage) -> Result<Vec<u8>, PlaceholderError> {
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(buf)
}

#[allow(clippy::cast_precision_loss)] // canvas dimensions are tiny
fn draw_outlined(canvas: &mut RgbImage, font: &FontVec, text: &str) {
    let scaled = font.as_scaled(PxScale::from(FONT_SIZE_PX));
    let mut caret = 0.0_f32;
    let mut previous: Option<GlyphId> = None;
    let mut outlines = Vec::new();

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scaled.scale(), point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        previous = Some(id);

        if let Some(outline) = font.outline_glyph(glyph) {
            outlines.push(outline);
        }
    }

    let Some(bounds) = outlines
        .iter()
        .map(OutlinedGlyph::px_bounds)
        .reduce(union)
    else {
        return;
    };

    let offset_x = (PLACEHOLDER_WIDTH as f32 - bounds.width()) / 2.0 - bounds.min.x;
    let offset_y = (PLACEHOLDER_HEIGHT as f32 - bounds.height()) / 2.0 - bounds.min.y;

    for outline in &outlines {
        let glyph_bounds = outline.px_bounds();
        let left = (glyph_bounds.min.x + offset_x).round() as i64;
        let top = (glyph_bounds.min.y + offset_y).round() as i64;
        outline.draw(|x, y, coverage| {
            blend(canvas, left + i64::from(x), top + i64::from(y), coverage);
        });
    }
}

fn union(a: Rect, b: Rect) -> Rect {
    Rect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    }
}

fn draw_bitmap(canvas: &mut RgbImage, text: &str) {
    // Ink cells in unscaled layout coordinates.
    let cells: Vec<(i64, i64)> = text
        .chars()
        .zip(0_i64..)
        .flat_map(|(ch, index)| {
            let glyph = BASIC_FONTS
                .get(ch)
                .or_else(|| LATIN_FONTS.get(ch))
                .unwrap_or(MISSING_GLYPH);
            glyph_cells(glyph, index * BITMAP_CELL)
        })
        .collect();

    let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
        cells.iter().map(|&(x, _)| x).min(),
        cells.iter().map(|&(x, _)| x).max(),
        cells.iter().map(|&(_, y)| y).min(),
        cells.iter().map(|&(_, y)| y).max(),
    ) else {
        return;
    };

    let text_width = (max_x - min_x + 1) * BITMAP_SCALE;
    let text_height = (max_y - min_y + 1) * BITMAP_SCALE;
    let origin_x = (i64::from(PLACEHOLDER_WIDTH) - text_width) / 2 - min_x * BITMAP_SCALE;
    let origin_y = (i64::from(PLACEHOLDER_HEIGHT) - text_height) / 2 - min_y * BITMAP_SCALE;

    for (x, y) in cells {
        for dy in 0..BITMAP_SCALE {
            for dx in 0..BITMAP_SCALE {
                blend(
                    canvas,
                    origin_x + x * BITMAP_SCALE + dx,
                    origin_y + y * BITMAP_SCALE + dy,
                    1.0,
                );
            }
        }
    }
}

/// Set pixels of an 8x8 glyph; bit 0 of each row byte is the leftmost column.
fn glyph_cells(glyph: [u8; 8], left: i64) -> impl Iterator<Item = (i64, i64)> {
    glyph.into_iter().zip(0_i64..).flat_map(move |(bits, row)| {
        (0..8_i64)
            .filter(move |col| bits & (1_u8 << *col) != 0)
            .map(move |col| (left + col, row))
    })
}

fn blend(canvas: &mut RgbImage, x: i64, y: i64, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }

    let alpha = coverage.clamp(0.0, 1.0);
    let pixel = canvas.get_pixel_mut(x, y);
    for (channel, target) in pixel.0.iter_mut().zip(TEXT_COLOR.0) {
        let mixed = f32::from(*channel) * (1.0 - alpha) + f32::from(target) * alpha;
        *channel = mixed.round().clamp(0.0, 255.0) as u8;
    }
}
