//! Contents.json data model for Apple's Asset Catalog format
//!
//! Only the subset of the asset catalog schema that a macOS app icon set uses
//! is modelled here: one image entry per file plus the versioning info.

use crate::icon_set::IconSetEntry;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Author recorded in the generated catalog metadata.
pub const AUTHOR: &str = "appicon-gen";

/// Root structure of a Contents.json file
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    /// One entry per icon file, in the order they were written
    pub images: Vec<ImageEntry>,

    /// Versioning and authorship information
    pub info: Info,
}

/// Individual image entry within an app icon set
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// The filename of the PNG inside the icon set directory
    pub filename: String,

    /// The device type, always "mac" for this icon set
    pub idiom: String,

    /// The scale factor ("1x" or "2x")
    pub scale: String,

    /// The size of the image in points (e.g., "16x16")
    pub size: String,
}

/// Versioning and authorship information for the asset catalog
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    /// The format version of the asset catalog (always 1)
    pub version: u8,

    /// The tool that authored the asset catalog
    pub author: String,
}

impl ContentsFile {
    /// Creates an empty Contents.json structure with the specified author
    pub fn new(author: String) -> Self {
        Self {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    /// Describes every file of the given icon set.
    pub fn for_icon_set(entries: &[IconSetEntry]) -> Self {
        let mut contents = Self::new(AUTHOR.to_string());
        for entry in entries {
            contents.add_image(ImageEntry::from(entry));
        }
        contents
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }
}

impl From<&IconSetEntry> for ImageEntry {
    fn from(entry: &IconSetEntry) -> Self {
        Self {
            filename: entry.filename.to_string(),
            idiom: "mac".to_string(),
            scale: format!("{}x", entry.scale),
            size: format!("{0}x{0}", entry.points),
        }
    }
}

/// Write `Contents.json` into the given directory, replacing any existing one.
pub fn write_contents_json(dir: &Path, contents: &ContentsFile) -> Result<()> {
    let contents_path = dir.join("Contents.json");
    let json =
        serde_json::to_string_pretty(contents).context("Failed to serialize Contents.json")?;

    std::fs::write(&contents_path, json).context("Failed to write Contents.json file")?;

    println!("  ✓ Contents.json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_set::APP_ICON_SET;

    #[test]
    fn test_contents_file_creation() {
        let contents = ContentsFile::new("com.example.app".to_string());
        assert_eq!(contents.info.author, "com.example.app");
        assert_eq!(contents.info.version, 1);
        assert!(contents.images.is_empty());
    }

    #[test]
    fn test_image_entry_from_retina_entry() {
        let entry = ImageEntry::from(&APP_ICON_SET[1]);
        assert_eq!(
            entry,
            ImageEntry {
                filename: "icon_16x16@2x.png".to_string(),
                idiom: "mac".to_string(),
                scale: "2x".to_string(),
                size: "16x16".to_string(),
            }
        );
    }

    #[test]
    fn test_icon_set_contents() {
        let contents = ContentsFile::for_icon_set(&APP_ICON_SET);
        assert_eq!(contents.images.len(), 10);
        assert_eq!(contents.info.author, AUTHOR);

        let last = contents.images.last().unwrap();
        assert_eq!(last.filename, "icon_512x512@2x.png");
        assert_eq!(last.size, "512x512");
        assert_eq!(last.scale, "2x");
    }

    #[test]
    fn test_single_entry_json_serialization() {
        let mut contents = ContentsFile::new("com.test.app".to_string());
        contents.add_image(ImageEntry::from(&APP_ICON_SET[4]));

        let json = serde_json::to_string_pretty(&contents).unwrap();

        let expected_fields = [
            "\"images\":",
            "\"filename\": \"icon_128x128.png\"",
            "\"idiom\": \"mac\"",
            "\"size\": \"128x128\"",
            "\"scale\": \"1x\"",
            "\"info\":",
            "\"version\": 1",
            "\"author\": \"com.test.app\"",
        ];

        for field in expected_fields {
            assert!(
                json.contains(field),
                "JSON missing expected field: {}\nActual JSON:\n{}",
                field,
                json
            );
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("Generated JSON should be valid");
        assert_eq!(parsed["images"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["info"]["version"], 1);
    }

    #[test]
    fn test_write_contents_json() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");

        let contents = ContentsFile::for_icon_set(&APP_ICON_SET);
        write_contents_json(temp_dir.path(), &contents).unwrap();

        let contents_path = temp_dir.path().join("Contents.json");
        assert!(contents_path.exists());

        let file_content = std::fs::read_to_string(&contents_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&file_content).unwrap();
        let images = parsed["images"].as_array().unwrap();
        assert_eq!(images.len(), 10);
        for (image, entry) in images.iter().zip(APP_ICON_SET.iter()) {
            assert_eq!(image["filename"], entry.filename);
            assert_eq!(image["idiom"], "mac");
        }
        assert_eq!(parsed["info"]["author"], AUTHOR);
    }
}
