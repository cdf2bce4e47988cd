//! Print-ready Kibon training cards.
//!
//! Cards are read from YAML, laid out eight to an A4 landscape page (4×2),
//! and written to a PDF as alternating front and back pages for duplex
//! printing.

pub mod color;
pub mod fonts;
pub mod icons;
pub mod layout;
mod options;
pub mod paginate;
mod pdf;
pub mod qr;
pub mod source;
mod stats;
pub mod text;
mod types;

pub use color::{RgbColor, hex_to_rgb};
pub use fonts::FontSet;
pub use icons::IconLibrary;
pub use layout::{CardStyle, DrawOp, IconSource, NoIcons, Rect};
pub use options::*;
pub use paginate::{PagePlan, PageSink, Side, Slot, paginate};
pub use pdf::{RenderContext, generate_deck_bytes, generate_pdf};
pub use source::{StyleEntry, StyleTable, load_deck, load_styles, parse_deck};
pub use stats::{DeckStats, calculate_statistics};
pub use text::{FixedAdvance, FontFace, TextMeasure, wrap_text};
pub use types::*;
