use crate::icon_gen::IconGenerator;
use anyhow::{Context, Result};
use icns::{IconFamily, IconType};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// One file of the macOS app icon set.
#[derive(Debug, Clone, Copy)]
pub struct IconSetEntry {
    pub filename: &'static str,
    /// Size in points as listed in the asset catalog.
    pub points: u32,
    /// 1 for standard, 2 for retina.
    pub scale: u32,
    pub icns_type: IconType,
}

impl IconSetEntry {
    const fn new(filename: &'static str, points: u32, scale: u32, icns_type: IconType) -> Self {
        Self {
            filename,
            points,
            scale,
            icns_type,
        }
    }

    /// Rendered size in pixels.
    pub fn pixels(&self) -> u32 {
        self.points * self.scale
    }
}

/// Every icon the asset catalog expects, in write order.
pub const APP_ICON_SET: [IconSetEntry; 10] = [
    IconSetEntry::new("icon_16x16.png", 16, 1, IconType::RGB24_16x16),
    IconSetEntry::new("icon_16x16@2x.png", 16, 2, IconType::RGBA32_16x16_2x),
    IconSetEntry::new("icon_32x32.png", 32, 1, IconType::RGB24_32x32),
    IconSetEntry::new("icon_32x32@2x.png", 32, 2, IconType::RGBA32_32x32_2x),
    IconSetEntry::new("icon_128x128.png", 128, 1, IconType::RGBA32_128x128),
    IconSetEntry::new("icon_128x128@2x.png", 128, 2, IconType::RGBA32_128x128_2x),
    IconSetEntry::new("icon_256x256.png", 256, 1, IconType::RGBA32_256x256),
    IconSetEntry::new("icon_256x256@2x.png", 256, 2, IconType::RGBA32_256x256_2x),
    IconSetEntry::new("icon_512x512.png", 512, 1, IconType::RGBA32_512x512),
    IconSetEntry::new("icon_512x512@2x.png", 512, 2, IconType::RGBA32_512x512_2x),
];

/// Path segments below the project root where Xcode looks for the app icon.
const ICON_SET_SEGMENTS: [&str; 3] = [
    "autuo sound time v2",
    "Assets.xcassets",
    "AppIcon.appiconset",
];

/// The icon set directory inside the project this tool ships with.
pub fn default_output_dir() -> PathBuf {
    ICON_SET_SEGMENTS
        .iter()
        .fold(PathBuf::from(env!("CARGO_MANIFEST_DIR")), |dir, segment| {
            dir.join(segment)
        })
}

/// Render every entry of [`APP_ICON_SET`] and write it as PNG into `out_dir`.
///
/// Existing files are overwritten. Returns the written paths in table order.
pub fn write_icon_set(out_dir: &Path, generator: &IconGenerator) -> Result<Vec<PathBuf>> {
    create_dir_all(out_dir).context("Can't create output directory")?;

    let mut written = Vec::with_capacity(APP_ICON_SET.len());
    for entry in &APP_ICON_SET {
        let size = entry.pixels();
        let icon = generator
            .generate(size)
            .with_context(|| format!("Failed to render {}", entry.filename))?;

        let path = out_dir.join(entry.filename);
        save_png(&icon, &path)?;
        tracing::debug!(path = %path.display(), size, "wrote icon");
        println!("  ✓ {} ({size}x{size})", entry.filename);

        written.push(path);
    }

    Ok(written)
}

/// Bundle the whole icon set into a single `.icns` file.
pub fn write_icns(path: &Path, generator: &IconGenerator) -> Result<()> {
    let mut family = IconFamily::new();

    for entry in &APP_ICON_SET {
        let icon = generator.generate(entry.pixels())?;

        let mut buf = Vec::new();
        write_png(&icon, &mut buf)?;
        let image = icns::Image::read_png(&buf[..])?;

        family
            .add_icon_with_type(&image, entry.icns_type)
            .with_context(|| format!("Can't add {} to Icns Family", entry.filename))?;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).context("Can't create .icns directory")?;
    }

    let mut out_file = BufWriter::new(File::create(path).context("Failed to create .icns file")?);
    family.write(&mut out_file)?;
    out_file.flush()?;

    println!("  ✓ {}", path.display());
    Ok(())
}

/// Make sure PNG encoding works before rendering anything.
pub fn ensure_png_support() -> Result<()> {
    let probe = RgbaImage::new(1, 1);
    write_png(&probe, Vec::new()).context("PNG encoding support is unavailable")
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_png(image, &mut out).context("Failed to write PNG")?;
    out.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)?;
    Ok(())
}
