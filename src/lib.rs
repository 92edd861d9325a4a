pub mod contents_json;
pub mod glyph;
pub mod icon_gen;
pub mod icon_set;
pub mod logging;
