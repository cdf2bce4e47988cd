use super::{CardStyle, DrawOp, IconSource, Rect, centered_text, fit_icon};
use crate::color::RgbColor;
use crate::options::StyleVariant;
use crate::text::{FontFace, TextMeasure, wrap_text};
use crate::types::Card;

/// Inset of the light panel from the cell edges.
const PANEL_MARGIN: f32 = 5.0;
const PANEL_COLOR: RgbColor = RgbColor::gray(0xf8);

const TITLE_SIZE: f32 = 12.0;
const TITLE_FROM_TOP: f32 = 12.0;

const SUBCATEGORY_SIZE: f32 = 9.0;
const SUBCATEGORY_INSET: f32 = 15.0;
const SUBCATEGORY_FROM_TOP: f32 = 18.0;
const SUBCATEGORY_PITCH: f32 = 5.0;
const SUBCATEGORY_MAX_LINES: usize = 2;
const SUBCATEGORY_COLOR: RgbColor = RgbColor::gray(0x80);

const ICON_SIZE: f32 = 10.0;
const ICON_INSET: f32 = 5.0;
/// Icon bottom edge, below the first subcategory baseline.
const ICON_DROP: f32 = 6.0;

const NUMBER_SIZE: f32 = 9.0;
const NUMBER_FROM_TOP: f32 = 33.0;
const NUMBER_COLOR: RgbColor = RgbColor::gray(0xa0);

const MOVE_SIZE: f32 = 9.0;
const MOVES_FROM_TOP: f32 = 38.0;
const MOVE_PITCH: f32 = 5.0;
const ELLIPSIS_PITCH: f32 = 4.0;
const STANCE_KEYWORD: &str = "SEUGUI";

const QR_SIZE: f32 = 30.0;
const QR_FROM_BOTTOM: f32 = 5.0;

/// `(offset from top, height, opacity)` of the translucent bands.
const BANDS: [(f32, f32, f32); 2] = [(16.0, 8.0, 0.30), (21.0, 2.5, 0.20)];
const SHADOW_OFFSET: f32 = 0.8;
const SHADOW_OPACITY: f32 = 0.18;

/// Moves naming a stance are set in bold.
pub fn is_stance_move(text: &str) -> bool {
    text.to_uppercase().contains(STANCE_KEYWORD)
}

fn ends_with_ellipsis(text: &str) -> bool {
    let text = text.trim_end();
    text.ends_with('…') || text.ends_with("...")
}

/// Lay out the front face of one card.
///
/// `cell` is the card's slot on the page and `link` the already built video
/// deep link.
#[allow(clippy::too_many_arguments)]
pub fn layout_front_card(
    cell: Rect,
    category: &str,
    subcategory: &str,
    card: &Card,
    link: &str,
    style: &CardStyle,
    variant: StyleVariant,
    card_number_prefix: &str,
    measure: &dyn TextMeasure,
    icons: &dyn IconSource,
) -> Vec<DrawOp> {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = cell;
    let top = y + h;
    let cx = x + w / 2.0;

    let mut ops = vec![DrawOp::fill(cell, style.color)];

    let panel = Rect::new(
        x + PANEL_MARGIN,
        y + PANEL_MARGIN,
        w - 2.0 * PANEL_MARGIN,
        h - 2.0 * PANEL_MARGIN,
    );

    if matches!(variant, StyleVariant::Banded | StyleVariant::Embossed) {
        for (from_top, height, opacity) in BANDS {
            ops.push(DrawOp::translucent(
                Rect::new(x, top - from_top, w, height),
                RgbColor::WHITE,
                opacity,
            ));
        }
    }
    if variant == StyleVariant::Embossed {
        let shadow = Rect {
            x: panel.x + SHADOW_OFFSET,
            y: panel.y - SHADOW_OFFSET,
            ..panel
        };
        ops.push(DrawOp::translucent(shadow, RgbColor::BLACK, SHADOW_OPACITY));
    }

    ops.push(DrawOp::fill(panel, PANEL_COLOR));

    ops.push(centered_text(
        measure,
        cx,
        top - TITLE_FROM_TOP,
        category,
        FontFace::ExtraBold,
        TITLE_SIZE,
        RgbColor::BLACK,
    ));

    let sub_x = x + SUBCATEGORY_INSET;
    let sub_y = top - SUBCATEGORY_FROM_TOP;
    let max_width = w - SUBCATEGORY_INSET - PANEL_MARGIN;
    let lines = wrap_text(subcategory, max_width, SUBCATEGORY_MAX_LINES, |s| {
        measure.text_width_mm(s, FontFace::Bold, SUBCATEGORY_SIZE)
    });

    let footprint = Rect::new(x + ICON_INSET, sub_y - ICON_DROP, ICON_SIZE, ICON_SIZE);
    ops.extend(fit_icon(icons, style.icon.as_deref(), footprint));

    for (i, line) in lines.into_iter().enumerate() {
        ops.push(DrawOp::Text {
            x: sub_x,
            y: sub_y - i as f32 * SUBCATEGORY_PITCH,
            text: line,
            face: FontFace::Bold,
            size_pt: SUBCATEGORY_SIZE,
            color: SUBCATEGORY_COLOR,
        });
    }

    ops.push(centered_text(
        measure,
        cx,
        top - NUMBER_FROM_TOP,
        &format!("{}{}", card_number_prefix, card.number),
        FontFace::Regular,
        NUMBER_SIZE,
        NUMBER_COLOR,
    ));

    let mut offset = MOVES_FROM_TOP;
    for mv in &card.moves {
        let face = if is_stance_move(mv) {
            FontFace::Bold
        } else {
            FontFace::Regular
        };
        ops.push(centered_text(
            measure,
            cx,
            top - offset,
            mv,
            face,
            MOVE_SIZE,
            RgbColor::BLACK,
        ));
        offset += if ends_with_ellipsis(mv) {
            ELLIPSIS_PITCH
        } else {
            MOVE_PITCH
        };
    }

    ops.push(DrawOp::QrCode {
        data: link.to_string(),
        rect: Rect::new(x + (w - QR_SIZE) / 2.0, y + QR_FROM_BOTTOM, QR_SIZE, QR_SIZE),
    });

    ops
}
