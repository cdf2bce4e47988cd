use crate::options::FontPaths;
use crate::text::{FontFace, TextMeasure};
use crate::types::{CardError, Result};
use std::path::Path;

/// TrueType data for one face.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub data: Vec<u8>,
    units_per_em: f32,
}

impl LoadedFont {
    pub fn from_bytes(data: Vec<u8>, origin: &str) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| CardError::Font(format!("{}: {}", origin, e)))?;
        let units_per_em = face.units_per_em().max(1) as f32;
        Ok(Self { data, units_per_em })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| CardError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data, &path.display().to_string())
    }

    fn width_pt(&self, text: &str, size_pt: f32) -> f32 {
        // Parsing only reads the table directory; the data was validated on load.
        let Ok(face) = ttf_parser::Face::parse(&self.data, 0) else {
            return 0.0;
        };
        let units: u32 = text
            .chars()
            .filter_map(|ch| face.glyph_index(ch))
            .filter_map(|glyph| face.glyph_hor_advance(glyph))
            .map(u32::from)
            .sum();
        units as f32 / self.units_per_em * size_pt
    }
}

/// The three faces used on the cards.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: LoadedFont,
    pub bold: LoadedFont,
    pub extra_bold: LoadedFont,
}

impl FontSet {
    pub fn load(paths: &FontPaths) -> Result<Self> {
        let set = Self {
            regular: LoadedFont::load(&paths.regular)?,
            bold: LoadedFont::load(&paths.bold)?,
            extra_bold: LoadedFont::load(&paths.extra_bold)?,
        };
        log::debug!("Loaded fonts from {}", paths.regular.display());
        Ok(set)
    }

    pub fn face(&self, face: FontFace) -> &LoadedFont {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::ExtraBold => &self.extra_bold,
        }
    }
}

impl TextMeasure for FontSet {
    fn text_width_pt(&self, text: &str, face: FontFace, size_pt: f32) -> f32 {
        self.face(face).width_pt(text, size_pt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_font_data() {
        match LoadedFont::from_bytes(b"definitely not a font".to_vec(), "junk.ttf") {
            Err(CardError::Font(msg)) => assert!(msg.starts_with("junk.ttf")),
            other => panic!("Expected Font error, got {other:?}"),
        }
    }

    #[test]
    fn missing_font_file_names_the_path() {
        let paths = FontPaths::in_dir("/nonexistent/fonts");
        match FontSet::load(&paths) {
            Err(CardError::Font(msg)) => assert!(msg.contains("OpenSans-Regular.ttf")),
            other => panic!("Expected Font error, got {other:?}"),
        }
    }
}
