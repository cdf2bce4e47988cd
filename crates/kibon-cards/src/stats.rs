use crate::options::DeckOptions;
use crate::types::Deck;

/// Counts for a deck, without rendering anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckStats {
    pub categories: usize,
    pub subcategories: usize,
    pub cards: usize,
    /// Sheets printed front and back
    pub page_pairs: usize,
    pub pages: usize,
    /// Cards on the last sheet
    pub last_batch: usize,
}

pub fn calculate_statistics(deck: &Deck, options: &DeckOptions) -> DeckStats {
    let per_page = options.cards_per_page().max(1);
    let cards = deck.card_count();
    let page_pairs = cards.div_ceil(per_page);
    let last_batch = match cards % per_page {
        0 if cards > 0 => per_page,
        rest => rest,
    };

    DeckStats {
        categories: deck.categories.len(),
        subcategories: deck.categories.iter().map(|c| c.subcategories.len()).sum(),
        cards,
        page_pairs,
        pages: page_pairs * 2,
        last_batch,
    }
}
