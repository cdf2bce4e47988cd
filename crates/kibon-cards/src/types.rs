use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Invalid color format: {0:?} (expected 6 hex digits)")]
    InvalidColorFormat(String),
    #[error("Missing required field `{field}` in {record}")]
    MissingRequiredField { record: String, field: &'static str },
    #[error("Malformed source data: {0}")]
    Source(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("QR code error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, CardError>;

/// One numbered card of a subcategory.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub number: u32,
    pub moves: Vec<String>,
    /// Timestamp appended to the video link.
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subcategory {
    pub name: String,
    pub video_url: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// The whole source data set, in authoring order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    pub categories: Vec<Category>,
}

impl Deck {
    pub fn card_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| &c.subcategories)
            .map(|s| s.cards.len())
            .sum()
    }

    /// Walk every card in deck order together with its owners.
    pub fn entries(&self) -> impl Iterator<Item = (&Category, &Subcategory, &Card)> {
        self.categories.iter().flat_map(|category| {
            category.subcategories.iter().flat_map(move |sub| {
                sub.cards.iter().map(move |card| (category, sub, card))
            })
        })
    }
}
