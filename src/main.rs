use anyhow::Result;
use appicon_gen::{
    contents_json::{self, ContentsFile},
    glyph::CurrencyGlyph,
    icon_gen::IconGenerator,
    icon_set::{self, APP_ICON_SET},
    logging,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "appicon-gen",
    about = "Render the gradient waveform app icon set for the macOS asset catalog"
)]
struct Args {
    /// Output directory. Defaults to the project's AppIcon.appiconset.
    #[clap(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Preferred font file for the currency symbol.
    #[clap(long, value_name = "FONT")]
    font: Option<PathBuf>,

    /// Also write the asset catalog Contents.json
    #[clap(long)]
    contents_json: bool,

    /// Also bundle the icon set into an .icns file at this path
    #[clap(long, value_name = "PATH")]
    icns: Option<PathBuf>,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.debug);

    icon_set::ensure_png_support()?;

    let output_dir = args.output.unwrap_or_else(icon_set::default_output_dir);
    let glyph = CurrencyGlyph::load(args.font.as_deref());
    tracing::debug!(builtin = glyph.is_builtin(), "currency glyph resolved");
    let generator = IconGenerator::new(glyph);

    println!("Generating app icons...");
    let written = icon_set::write_icon_set(&output_dir, &generator)?;

    if args.contents_json {
        let contents = ContentsFile::for_icon_set(&APP_ICON_SET);
        contents_json::write_contents_json(&output_dir, &contents)?;
    }

    if let Some(icns_path) = &args.icns {
        icon_set::write_icns(icns_path, &generator)?;
    }

    println!("\nIcons saved to: {}", output_dir.display());
    println!("Generated {} icon files", written.len());

    Ok(())
}
