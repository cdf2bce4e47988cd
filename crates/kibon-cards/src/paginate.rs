//! Batching cards into front/back page pairs.

use crate::color::hex_to_rgb;
use crate::layout::{
    CardStyle, DrawOp, IconSource, Rect, draw_cutting_guides, layout_back_card, layout_front_card,
};
use crate::options::{BackMirroring, DeckOptions};
use crate::source::StyleTable;
use crate::text::TextMeasure;
use crate::types::{Card, Deck, Result};

/// A card's place on its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub column: usize,
    pub row: usize,
    /// Bottom-left corner of the cell, in mm
    pub x: f32,
    pub y: f32,
}

impl Slot {
    /// Slot of the `index`-th card of a batch. Row 0 is the top row.
    pub fn for_index(index: usize, options: &DeckOptions) -> Slot {
        let column = index % options.columns;
        let row = index / options.columns;
        Self::at(column, row, options)
    }

    /// Same slot on the reverse side of the sheet.
    pub fn for_back(index: usize, options: &DeckOptions) -> Slot {
        let front = Self::for_index(index, options);
        match options.policy.back_mirroring {
            BackMirroring::None => front,
            BackMirroring::LongEdge => {
                Self::at(options.columns - 1 - front.column, front.row, options)
            }
        }
    }

    fn at(column: usize, row: usize, options: &DeckOptions) -> Slot {
        let (card_w, card_h) = options.card_size_mm();
        let (_, page_h) = options.page_size_mm();
        Slot {
            column,
            row,
            x: column as f32 * card_w,
            y: page_h - (row + 1) as f32 * card_h,
        }
    }

    pub fn cell(&self, options: &DeckOptions) -> Rect {
        let (w, h) = options.card_size_mm();
        Rect::new(self.x, self.y, w, h)
    }
}

/// One card ready for layout.
#[derive(Debug, Clone)]
pub struct BatchItem<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub video_url: &'a str,
    pub card: &'a Card,
    pub style: CardStyle,
}

/// Groups a stream into batches of at most `capacity`, flushing the
/// trailing partial batch.
pub struct Batches<I> {
    source: I,
    capacity: usize,
}

impl<I: Iterator> Batches<I> {
    pub fn new(source: I, capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be positive");
        Self { source, capacity }
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<_> = self.source.by_ref().take(self.capacity).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

/// Draw list for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    /// 0-based batch number; the front and back of a sheet share it.
    pub batch: usize,
    pub side: Side,
    /// Number of cards on the page
    pub cards: usize,
    pub ops: Vec<DrawOp>,
}

/// Receives finished pages in document order.
pub trait PageSink {
    fn emit_page(&mut self, page: PagePlan) -> Result<()>;
}

impl PageSink for Vec<PagePlan> {
    fn emit_page(&mut self, page: PagePlan) -> Result<()> {
        self.push(page);
        Ok(())
    }
}

/// Resolve every card's style, failing on the first malformed color.
pub fn resolve_items<'a>(deck: &'a Deck, styles: &StyleTable) -> Result<Vec<BatchItem<'a>>> {
    deck.entries()
        .map(|(category, sub, card)| {
            let entry = styles.lookup(&category.name, &sub.name);
            Ok(BatchItem {
                category: &category.name,
                subcategory: &sub.name,
                video_url: &sub.video_url,
                card,
                style: CardStyle {
                    color: hex_to_rgb(&entry.color)?,
                    icon: entry.icon,
                },
            })
        })
        .collect()
}

/// Walk the deck and emit one front page then one back page per batch.
pub fn paginate(
    deck: &Deck,
    styles: &StyleTable,
    options: &DeckOptions,
    measure: &dyn TextMeasure,
    icons: &dyn IconSource,
    sink: &mut dyn PageSink,
) -> Result<usize> {
    options.validate()?;
    let items = resolve_items(deck, styles)?;
    let policy = &options.policy;
    let mut batches = 0;

    for (batch, chunk) in Batches::new(items.into_iter(), options.cards_per_page()).enumerate() {
        let mut front = Vec::new();
        for (i, item) in chunk.iter().enumerate() {
            let cell = Slot::for_index(i, options).cell(options);
            let link = policy.video_link(item.video_url, &item.card.marker);
            front.extend(layout_front_card(
                cell,
                item.category,
                item.subcategory,
                item.card,
                &link,
                &item.style,
                policy.variant,
                &policy.card_number_prefix,
                measure,
                icons,
            ));
            if policy.guides.on_front() {
                front.extend(draw_cutting_guides(cell));
            }
        }

        let mut back = Vec::new();
        for (i, item) in chunk.iter().enumerate() {
            let cell = Slot::for_back(i, options).cell(options);
            back.extend(layout_back_card(
                cell,
                item.category,
                item.subcategory,
                &item.style,
                policy.footer,
                &policy.attribution,
                measure,
                icons,
            ));
            if policy.guides.on_back() {
                back.extend(draw_cutting_guides(cell));
            }
        }

        log::debug!("Batch {}: {} cards", batch + 1, chunk.len());
        sink.emit_page(PagePlan {
            batch,
            side: Side::Front,
            cards: chunk.len(),
            ops: front,
        })?;
        sink.emit_page(PagePlan {
            batch,
            side: Side::Back,
            cards: chunk.len(),
            ops: back,
        })?;
        batches += 1;
    }

    Ok(batches)
}
