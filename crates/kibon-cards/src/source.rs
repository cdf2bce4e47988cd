//! YAML source data and style table.
//!
//! The deck file maps category → subcategory → `{Vidéo, Cartes}`, each card
//! carrying `Numéro`, `Mouvements` and `Marqueur`. The style file maps
//! category → subcategory → `{color, image}`. Mapping order is authoring order
//! and is preserved.

use crate::types::{Card, CardError, Category, Deck, Result, Subcategory};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;
use std::path::Path;

/// Default card color when no style entry exists.
pub const DEFAULT_COLOR: &str = "#ffffff";

#[derive(Debug, Deserialize)]
struct RawSubcategory {
    #[serde(rename = "Vidéo")]
    video: Option<String>,
    #[serde(rename = "Cartes")]
    cards: Option<Vec<RawCard>>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    #[serde(rename = "Numéro")]
    number: Option<Value>,
    #[serde(rename = "Mouvements")]
    moves: Option<Vec<Value>>,
    #[serde(rename = "Marqueur")]
    marker: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStyle {
    color: Option<Value>,
    image: Option<String>,
}

pub async fn load_deck(path: impl AsRef<Path>) -> Result<Deck> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;
    parse_deck(&contents)
}

pub async fn load_styles(path: impl AsRef<Path>) -> Result<StyleTable> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;
    StyleTable::parse(&contents)
}

pub fn parse_deck(yaml: &str) -> Result<Deck> {
    let root: Value = serde_yaml::from_str(yaml)?;
    let mut deck = Deck::default();

    for (category_key, subcategories) in mapping(&root, "deck root")? {
        let category_name = scalar(category_key)
            .ok_or_else(|| CardError::Source("category names must be scalars".into()))?;
        let mut category = Category {
            name: category_name.clone(),
            subcategories: Vec::new(),
        };

        for (sub_key, body) in mapping(subcategories, &category_name)? {
            let sub_name = scalar(sub_key).ok_or_else(|| {
                CardError::Source(format!("subcategory names in {category_name} must be scalars"))
            })?;
            let record = format!("{category_name} / {sub_name}");
            category
                .subcategories
                .push(parse_subcategory(sub_name, body.clone(), &record)?);
        }

        deck.categories.push(category);
    }

    log::debug!(
        "Parsed {} categories, {} cards",
        deck.categories.len(),
        deck.card_count()
    );
    Ok(deck)
}

fn parse_subcategory(name: String, body: Value, record: &str) -> Result<Subcategory> {
    let raw: RawSubcategory = serde_yaml::from_value(body)
        .map_err(|e| CardError::Source(format!("{record}: {e}")))?;

    let video_url = raw
        .video
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| missing(record, "Vidéo"))?;
    let raw_cards = raw.cards.ok_or_else(|| missing(record, "Cartes"))?;

    let mut cards = Vec::with_capacity(raw_cards.len());
    for (index, raw_card) in raw_cards.into_iter().enumerate() {
        let card_record = format!("{record} card #{}", index + 1);

        let number = raw_card
            .number
            .as_ref()
            .and_then(card_number)
            .ok_or_else(|| missing(&card_record, "Numéro"))?;
        let moves = raw_card
            .moves
            .ok_or_else(|| missing(&card_record, "Mouvements"))?
            .iter()
            .map(|m| scalar(m).ok_or_else(|| missing(&card_record, "Mouvements")))
            .collect::<Result<Vec<_>>>()?;
        let marker = raw_card
            .marker
            .as_ref()
            .and_then(scalar)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| missing(&card_record, "Marqueur"))?;

        cards.push(Card {
            number,
            moves,
            marker,
        });
    }

    Ok(Subcategory {
        name,
        video_url,
        cards,
    })
}

fn missing(record: &str, field: &'static str) -> CardError {
    CardError::MissingRequiredField {
        record: record.to_string(),
        field,
    }
}

fn mapping<'a>(value: &'a Value, what: &str) -> Result<&'a Mapping> {
    match value {
        Value::Mapping(m) => Ok(m),
        Value::Null => Err(CardError::Source(format!("{what} is empty"))),
        _ => Err(CardError::Source(format!("{what} must be a mapping"))),
    }
}

/// Render a YAML scalar as text; numbers and booleans keep their YAML spelling.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn card_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Raw style for one (category, subcategory) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleEntry {
    /// Hex color, not yet validated.
    pub color: String,
    pub icon: Option<String>,
}

impl Default for StyleEntry {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            icon: None,
        }
    }
}

/// Style lookup keyed by (category, subcategory). Lookups never fail.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    entries: HashMap<(String, String), StyleEntry>,
}

impl StyleTable {
    pub fn parse(yaml: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(yaml)?;
        let mut table = StyleTable::default();

        // An empty style file is a valid, empty table.
        let Value::Mapping(categories) = &root else {
            return match root {
                Value::Null => Ok(table),
                _ => Err(CardError::Source("style root must be a mapping".into())),
            };
        };

        for (category_key, subcategories) in categories {
            let Some(category) = scalar(category_key) else {
                continue;
            };
            let Value::Mapping(subcategories) = subcategories else {
                continue;
            };
            for (sub_key, body) in subcategories {
                let Some(sub) = scalar(sub_key) else {
                    continue;
                };
                let raw: RawStyle = serde_yaml::from_value(body.clone())
                    .map_err(|e| CardError::Source(format!("style {category} / {sub}: {e}")))?;
                let entry = StyleEntry {
                    color: raw
                        .color
                        .as_ref()
                        .and_then(scalar)
                        .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                    icon: raw.image.filter(|name| !name.trim().is_empty()),
                };
                table.insert(category.clone(), sub, entry);
            }
        }

        Ok(table)
    }

    pub fn insert(
        &mut self,
        category: impl Into<String>,
        sub: impl Into<String>,
        entry: StyleEntry,
    ) {
        self.entries.insert((category.into(), sub.into()), entry);
    }

    pub fn lookup(&self, category: &str, sub: &str) -> StyleEntry {
        match self.entries.get(&(category.to_string(), sub.to_string())) {
            Some(entry) => entry.clone(),
            None => {
                log::debug!("No style for {category} / {sub}, using defaults");
                StyleEntry::default()
            }
        }
    }

    /// Every icon file name referenced by the table.
    pub fn icon_names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().filter_map(|e| e.icon.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
