//! Source of the "¥" glyph drawn on the larger icons.
//!
//! A real font is preferred. When neither the requested font nor any of the
//! platform candidates can supply the glyph, a small vector rendition is used,
//! so rasterizing never fails.

use rusttype::{point, Font, Rect, Scale};
use std::path::{Path, PathBuf};

/// The character rendered on the icon.
pub const CURRENCY_SYMBOL: char = '¥';

/// Fonts probed, in order, when no preferred font is given or it is unusable.
const PLATFORM_FONTS: &[&str] = &[
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

/// Where the glyph shape comes from.
pub enum CurrencyGlyph {
    Font(Font<'static>),
    Builtin,
}

/// Anti-aliased coverage of one rasterized glyph.
///
/// `top_offset` is the distance in pixels from the ascender line to the first
/// row of the bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCoverage {
    pub width: u32,
    pub height: u32,
    pub top_offset: i32,
    coverage: Vec<f32>,
}

impl GlyphCoverage {
    fn blank(width: u32, height: u32, top_offset: i32) -> Self {
        Self {
            width,
            height,
            top_offset,
            coverage: vec![0.0; (width * height) as usize],
        }
    }

    /// Coverage in `0.0..=1.0` at the given bitmap position.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.coverage[(y * self.width + x) as usize]
    }

    fn accumulate(&mut self, x: u32, y: u32, value: f32) {
        let cell = &mut self.coverage[(y * self.width + x) as usize];
        *cell = (*cell + value).min(1.0);
    }
}

impl CurrencyGlyph {
    /// Resolve the glyph source. Never fails; falls back to [`CurrencyGlyph::Builtin`].
    pub fn load(preferred: Option<&Path>) -> Self {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(PLATFORM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = load_font_file(&path) {
                tracing::debug!(font = %path.display(), "using font for currency glyph");
                return CurrencyGlyph::Font(font);
            }
        }

        tracing::debug!("no usable font found, using built-in currency glyph");
        CurrencyGlyph::Builtin
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, CurrencyGlyph::Builtin)
    }

    /// Rasterize the symbol at the given font pixel size.
    pub fn rasterize(&self, px_size: u32) -> GlyphCoverage {
        match self {
            CurrencyGlyph::Font(font) => rasterize_font(font, px_size)
                .unwrap_or_else(|| rasterize_builtin(px_size)),
            CurrencyGlyph::Builtin => rasterize_builtin(px_size),
        }
    }
}

/// Load a font file (face 0 for collections) and check it actually maps the symbol.
fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            tracing::debug!(font = %path.display(), %err, "font not readable");
            return None;
        }
    };

    let font = Font::try_from_vec_and_index(data, 0);
    let Some(font) = font else {
        tracing::debug!(font = %path.display(), "font could not be parsed");
        return None;
    };

    // Glyph id 0 is .notdef
    if font.glyph(CURRENCY_SYMBOL).id().0 == 0 {
        tracing::debug!(font = %path.display(), "font has no currency glyph");
        return None;
    }

    Some(font)
}

fn rasterize_font(font: &Font<'static>, px_size: u32) -> Option<GlyphCoverage> {
    let scale = Scale::uniform(px_size as f32);
    let ascent = font.v_metrics(scale).ascent;
    let text = CURRENCY_SYMBOL.to_string();

    // Laid out so that y = 0 is the ascender line.
    let glyphs: Vec<_> = font.layout(&text, scale, point(0.0, ascent)).collect();

    let bounds = glyphs
        .iter()
        .filter_map(|g| g.pixel_bounding_box())
        .reduce(|a, b| Rect {
            min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
            max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
        })?;

    let width = bounds.width() as u32;
    let height = bounds.height() as u32;
    let mut coverage = GlyphCoverage::blank(width, height, bounds.min.y);

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            let dx = (bb.min.x - bounds.min.x) as u32;
            let dy = (bb.min.y - bounds.min.y) as u32;
            glyph.draw(|x, y, v| coverage.accumulate(x + dx, y + dy, v));
        }
    }

    Some(coverage)
}

/// Strokes of the built-in symbol in a unit box (x right, y down).
const BUILTIN_STROKES: [((f32, f32), (f32, f32)); 5] = [
    ((0.05, 0.0), (0.5, 0.5)),
    ((0.95, 0.0), (0.5, 0.5)),
    ((0.5, 0.5), (0.5, 1.0)),
    ((0.18, 0.58), (0.82, 0.58)),
    ((0.18, 0.76), (0.82, 0.76)),
];

/// Vector "¥" with roughly Helvetica's proportions: cap height 0.72em,
/// advance 0.62em, cap line 0.06em below the ascender line.
fn rasterize_builtin(px_size: u32) -> GlyphCoverage {
    let em = px_size as f32;
    let half_stroke = (em * 0.045).max(0.6);
    let pad = half_stroke.ceil() as u32 + 1;

    let box_w = (em * 0.62).ceil();
    let box_h = (em * 0.72).ceil();
    let width = box_w as u32 + 2 * pad;
    let height = box_h as u32 + 2 * pad;
    let top_offset = (em * 0.06).round() as i32 - pad as i32;

    let mut coverage = GlyphCoverage::blank(width, height, top_offset);
    let to_px = |(u, v): (f32, f32)| (pad as f32 + u * box_w, pad as f32 + v * box_h);

    for y in 0..height {
        for x in 0..width {
            let p = (x as f32 + 0.5, y as f32 + 0.5);
            let distance = BUILTIN_STROKES
                .iter()
                .map(|&(a, b)| segment_distance(p, to_px(a), to_px(b)))
                .fold(f32::INFINITY, f32::min);

            let value = (half_stroke + 0.5 - distance).clamp(0.0, 1.0);
            if value > 0.0 {
                coverage.accumulate(x, y, value);
            }
        }
    }

    coverage
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * abx - p.0, a.1 + t * aby - p.1);
    (cx * cx + cy * cy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn total(coverage: &GlyphCoverage) -> f32 {
        (0..coverage.height)
            .flat_map(|y| (0..coverage.width).map(move |x| (x, y)))
            .map(|(x, y)| coverage.get(x, y))
            .sum()
    }

    #[test]
    fn test_builtin_glyph_has_ink() {
        let coverage = CurrencyGlyph::Builtin.rasterize(56);
        assert!(coverage.width > 30);
        assert!(coverage.height > 40);
        assert!(total(&coverage) > 100.0);
    }

    #[test]
    fn test_builtin_glyph_is_symmetric() {
        let coverage = CurrencyGlyph::Builtin.rasterize(225);
        let w = coverage.width;
        for y in 0..coverage.height {
            for x in 0..w / 2 {
                let left = coverage.get(x, y);
                let right = coverage.get(w - 1 - x, y);
                assert!((left - right).abs() < 0.05, "asymmetric at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_builtin_stem_is_solid() {
        let coverage = CurrencyGlyph::Builtin.rasterize(100);
        let center = coverage.width / 2;
        // Below the cross bars only the stem has ink.
        let y = coverage.height * 9 / 10;
        assert_eq!(coverage.get(center, y), 1.0);
        assert_eq!(coverage.get(1, y), 0.0);
    }

    #[test]
    fn test_coverage_is_clamped() {
        let coverage = CurrencyGlyph::Builtin.rasterize(140);
        for y in 0..coverage.height {
            for x in 0..coverage.width {
                let v = coverage.get(x, y);
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_missing_font_falls_back() {
        let glyph = CurrencyGlyph::load(Some(Path::new("/nonexistent/font.ttf")));
        // Whatever the platform provides, the glyph still rasterizes.
        let coverage = glyph.rasterize(64);
        assert!(total(&coverage) > 0.0);
    }

    #[test]
    fn test_garbage_font_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"definitely not a font")
            .expect("Failed to write temp file");

        assert!(load_font_file(file.path()).is_none());
    }

    #[test]
    fn test_segment_distance() {
        assert_eq!(segment_distance((0.0, 1.0), (0.0, 0.0), (2.0, 0.0)), 1.0);
        assert_eq!(segment_distance((3.0, 0.0), (0.0, 0.0), (2.0, 0.0)), 1.0);
        assert_eq!(segment_distance((1.0, 1.0), (1.0, 1.0), (1.0, 1.0)), 0.0);
    }
}
