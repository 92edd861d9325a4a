use crate::glyph::CurrencyGlyph;
use anyhow::{ensure, Result};
use image::{Rgba, RgbaImage};

/// Smallest icon the design is defined for.
pub const MIN_ICON_SIZE: u32 = 16;

/// The currency glyph is only drawn from this size up.
pub const GLYPH_MIN_SIZE: u32 = 64;

/// Indigo at the top of the background.
pub const GRADIENT_START: [u8; 3] = [79, 70, 229];
/// Purple at the bottom of the background.
pub const GRADIENT_END: [u8; 3] = [128, 0, 200];

/// Relative heights of the waveform bars, left to right.
pub const BAR_HEIGHTS: [f64; 9] = [0.15, 0.25, 0.4, 0.55, 0.65, 0.55, 0.4, 0.25, 0.15];

const BAR_COLOR: Rgba<u8> = Rgba([255, 255, 255, 220]);
const GLYPH_COLOR: Rgba<u8> = Rgba([255, 255, 255, 240]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// One waveform bar in pixel coordinates, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub radius: u32,
}

/// Renders the app icon at any supported size.
pub struct IconGenerator {
    glyph: CurrencyGlyph,
}

impl IconGenerator {
    pub fn new(glyph: CurrencyGlyph) -> Self {
        Self { glyph }
    }

    /// Render a `size`×`size` icon.
    ///
    /// The background gradient is clipped to a rounded square with a corner
    /// radius of a fifth of the size, the waveform sits in the upper middle and
    /// the currency symbol is added below it on icons of at least
    /// [`GLYPH_MIN_SIZE`] pixels.
    pub fn generate(&self, size: u32) -> Result<RgbaImage> {
        ensure!(
            size >= MIN_ICON_SIZE,
            "Icon size must be at least {MIN_ICON_SIZE}px, got {size}"
        );

        let mut img = RgbaImage::from_pixel(size, size, TRANSPARENT);

        fill_gradient(&mut img);
        apply_rounded_mask(&mut img, size / 5);

        for bar in waveform_bars(size) {
            fill_rounded_rect(&mut img, &bar, BAR_COLOR);
        }

        if size >= GLYPH_MIN_SIZE {
            draw_currency_glyph(&mut img, &self.glyph);
        }

        Ok(img)
    }
}

/// Background color of scanline `y` on an icon of the given size.
pub fn gradient_color(y: u32, size: u32) -> Rgba<u8> {
    let ratio = y as f64 / size as f64;
    let mix = |start: u8, end: u8| (start as f64 * (1.0 - ratio) + end as f64 * ratio) as u8;

    Rgba([
        mix(GRADIENT_START[0], GRADIENT_END[0]),
        mix(GRADIENT_START[1], GRADIENT_END[1]),
        mix(GRADIENT_START[2], GRADIENT_END[2]),
        255,
    ])
}

fn fill_gradient(img: &mut RgbaImage) {
    let size = img.height();
    for (_, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = gradient_color(y, size);
    }
}

/// Whether the center of pixel (`px`, `py`) lies inside the rounded rectangle
/// spanning the pixel edges `left..right` and `top..bottom`.
pub fn in_rounded_rect(
    px: u32,
    py: u32,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    radius: f64,
) -> bool {
    let x = px as f64 + 0.5;
    let y = py as f64 + 0.5;

    if x < left || x > right || y < top || y > bottom {
        return false;
    }

    let radius = radius.min((right - left) / 2.0).min((bottom - top) / 2.0);
    let dx = (left + radius - x).max(x - (right - radius)).max(0.0);
    let dy = (top + radius - y).max(y - (bottom - radius)).max(0.0);

    dx * dx + dy * dy <= radius * radius
}

/// Clear everything outside the icon silhouette.
fn apply_rounded_mask(img: &mut RgbaImage, corner: u32) {
    let size = img.width() as f64;
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if !in_rounded_rect(x, y, 0.0, 0.0, size, size, corner as f64) {
            *pixel = TRANSPARENT;
        }
    }
}

/// Layout of the nine waveform bars for an icon of the given size.
///
/// The bars are centered on a band at 42% of the height, spread evenly across
/// the middle 60% of the width.
pub fn waveform_bars(size: u32) -> Vec<BarRect> {
    let size_f = size as f64;
    let center_y = size_f * 0.42;
    let wave_width = size_f * 0.6;
    let start_x = size_f * 0.2;
    let count = BAR_HEIGHTS.len() as f64;
    let bar_width = wave_width / (count * 2.0);
    let step = wave_width / (count - 1.0);

    BAR_HEIGHTS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let x = start_x + i as f64 * step - bar_width / 2.0;
            let bar_height = size_f * h * 0.45;

            BarRect {
                left: x as u32,
                top: (center_y - bar_height / 2.0) as u32,
                right: (x + bar_width) as u32,
                bottom: (center_y + bar_height / 2.0) as u32,
                radius: (bar_width / 2.0) as u32,
            }
        })
        .collect()
}

/// Replace the pixels covered by `bar` with `color`, no blending.
fn fill_rounded_rect(img: &mut RgbaImage, bar: &BarRect, color: Rgba<u8>) {
    let right = bar.right.min(img.width() - 1);
    let bottom = bar.bottom.min(img.height() - 1);

    for y in bar.top..=bottom {
        for x in bar.left..=right {
            if in_rounded_rect(
                x,
                y,
                bar.left as f64,
                bar.top as f64,
                (bar.right + 1) as f64,
                (bar.bottom + 1) as f64,
                bar.radius as f64,
            ) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Draw the currency symbol centered horizontally with the top of its text
/// line at 68% of the height.
fn draw_currency_glyph(img: &mut RgbaImage, glyph: &CurrencyGlyph) {
    let size = img.width();
    let font_px = (size as f64 * 0.22) as u32;
    let coverage = glyph.rasterize(font_px);

    let origin_x = (size as i64 - coverage.width as i64) / 2;
    let origin_y = (size as f64 * 0.68) as i64 + coverage.top_offset as i64;

    for gy in 0..coverage.height {
        for gx in 0..coverage.width {
            let value = coverage.get(gx, gy);
            if value <= 0.0 {
                continue;
            }

            let x = origin_x + gx as i64;
            let y = origin_y + gy as i64;
            if x < 0 || y < 0 || x >= size as i64 || y >= size as i64 {
                continue;
            }

            let pixel = img.get_pixel_mut(x as u32, y as u32);
            // Outside the silhouette stays clear.
            if pixel[3] == 0 {
                continue;
            }
            *pixel = lerp_pixel(*pixel, GLYPH_COLOR, value);
        }
    }
}

/// Move every channel of `base` toward `ink` by `amount`.
fn lerp_pixel(base: Rgba<u8>, ink: Rgba<u8>, amount: f32) -> Rgba<u8> {
    let mut out = base;
    for (channel, &target) in out.0.iter_mut().zip(ink.0.iter()) {
        let from = *channel as f32;
        *channel = (from + (target as f32 - from) * amount).round() as u8;
    }
    out
}
