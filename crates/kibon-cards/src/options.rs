use crate::types::{CardError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Portrait dimensions
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    #[default]
    Landscape,
}

/// Decorative treatment of the front face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StyleVariant {
    /// Background and inset panel only
    #[default]
    Plain,
    /// Translucent bands between background and panel
    Banded,
    /// Bands plus a drop shadow under the panel
    Embossed,
}

/// Which faces receive corner cutting guides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GuidePlacement {
    None,
    #[default]
    Front,
    Back,
    Both,
}

impl GuidePlacement {
    pub fn on_front(self) -> bool {
        matches!(self, GuidePlacement::Front | GuidePlacement::Both)
    }

    pub fn on_back(self) -> bool {
        matches!(self, GuidePlacement::Back | GuidePlacement::Both)
    }
}

/// Separator placed between the video URL and the timestamp parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryDelimiter {
    /// `?t=` for URLs without a query string
    #[default]
    Question,
    /// `&t=` for URLs that already carry one
    Ampersand,
}

impl QueryDelimiter {
    pub fn as_char(self) -> char {
        match self {
            QueryDelimiter::Question => '?',
            QueryDelimiter::Ampersand => '&',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FooterPosition {
    Top,
    #[default]
    Bottom,
}

/// Column placement of back faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackMirroring {
    /// Same slot as the front
    #[default]
    None,
    /// Columns reversed, for duplex printers flipping on the long edge
    LongEdge,
}

/// Layout decisions that are fixed for a whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    pub variant: StyleVariant,
    pub guides: GuidePlacement,
    pub query_delimiter: QueryDelimiter,
    pub footer: FooterPosition,
    pub back_mirroring: BackMirroring,
    pub card_number_prefix: String,
    pub attribution: Vec<String>,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            variant: StyleVariant::Plain,
            guides: GuidePlacement::Front,
            query_delimiter: QueryDelimiter::Question,
            footer: FooterPosition::Bottom,
            back_mirroring: BackMirroring::None,
            card_number_prefix: "Card n°".to_string(),
            attribution: vec!["Source: FFTDA.fr".to_string()],
        }
    }
}

impl LayoutPolicy {
    /// Deep link into `video_url` at `marker`.
    pub fn video_link(&self, video_url: &str, marker: &str) -> String {
        format!("{}{}t={}", video_url, self.query_delimiter.as_char(), marker)
    }
}

/// Document information dictionary entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: Option<String>,
    pub author: Option<String>,
    pub keywords: Vec<String>,
    pub creator: Option<String>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: "Kibon cards".to_string(),
            subject: None,
            author: None,
            keywords: Vec::new(),
            creator: Some(concat!("kibon-cards ", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

/// Font files for each face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPaths {
    pub regular: PathBuf,
    pub bold: PathBuf,
    pub extra_bold: PathBuf,
}

impl Default for FontPaths {
    fn default() -> Self {
        Self::in_dir("fonts/Open_Sans/static")
    }
}

impl FontPaths {
    /// Open Sans file names inside `dir`
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            regular: dir.join("OpenSans-Regular.ttf"),
            bold: dir.join("OpenSans-Bold.ttf"),
            extra_bold: dir.join("OpenSans-ExtraBold.ttf"),
        }
    }
}

/// Deck generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckOptions {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub columns: usize,
    pub rows: usize,
    pub policy: LayoutPolicy,
    pub metadata: Option<DocumentMetadata>,
    pub fonts: FontPaths,
    pub images_dir: PathBuf,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            orientation: Orientation::Landscape,
            columns: 4,
            rows: 2,
            policy: LayoutPolicy::default(),
            metadata: Some(DocumentMetadata::default()),
            fonts: FontPaths::default(),
            images_dir: PathBuf::from("images"),
        }
    }
}

impl DeckOptions {
    /// Page size with orientation applied
    pub fn page_size_mm(&self) -> (f32, f32) {
        let (w, h) = self.paper.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w.min(h), w.max(h)),
            Orientation::Landscape => (w.max(h), w.min(h)),
        }
    }

    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Card cell size: the page split evenly into the grid.
    pub fn card_size_mm(&self) -> (f32, f32) {
        let (w, h) = self.page_size_mm();
        (w / self.columns as f32, h / self.rows as f32)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(CardError::Config(format!(
                "Grid must have at least one row and column (got {}x{})",
                self.columns, self.rows
            )));
        }

        let (w, h) = self.paper.dimensions_mm();
        if !(w > 0.0 && h > 0.0) {
            return Err(CardError::Config(format!(
                "Page size must be positive (got {}x{} mm)",
                w, h
            )));
        }

        for (face, path) in [
            ("regular", &self.fonts.regular),
            ("bold", &self.fonts.bold),
            ("extra bold", &self.fonts.extra_bold),
        ] {
            if path.as_os_str().is_empty() {
                return Err(CardError::Config(format!("No {} font configured", face)));
            }
        }

        Ok(())
    }

    /// Load options from JSON file
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| CardError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
