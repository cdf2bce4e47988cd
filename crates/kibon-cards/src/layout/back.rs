use super::{CardStyle, DrawOp, IconSource, Rect, centered_text, fit_icon};
use crate::color::RgbColor;
use crate::options::FooterPosition;
use crate::text::{FontFace, TextMeasure};

const MASK_RADIUS: f32 = 27.0;
const MASK_OPACITY: f32 = 0.35;
const ICON_SIZE: f32 = 38.0;

const BANNER_BOTTOM: f32 = 14.0;
const BANNER_HEIGHT: f32 = 20.0;
const BANNER_OPACITY: f32 = 0.45;

const CATEGORY_SIZE: f32 = 14.0;
const CATEGORY_BASELINE: f32 = 26.0;
const SHADOW_COLOR: RgbColor = RgbColor::gray(0x20);
/// Offsets of the dark copies under the white category text, deepest first.
const SHADOW_STEPS: [f32; 2] = [0.6, 0.3];

const SUBCATEGORY_SIZE: f32 = 8.0;
const SUBCATEGORY_BASELINE: f32 = 18.5;

const FOOTER_SIZE: f32 = 6.0;
const FOOTER_PITCH: f32 = 3.0;
const FOOTER_EDGE: f32 = 5.0;
const FOOTER_COLOR: RgbColor = RgbColor::gray(0x40);

/// Lay out the reverse face of one card.
///
/// Decorative only: background, translucent circular mask with the icon,
/// a banner with the category and subcategory names, and the attribution
/// footer.
#[allow(clippy::too_many_arguments)]
pub fn layout_back_card(
    cell: Rect,
    category: &str,
    subcategory: &str,
    style: &CardStyle,
    footer: FooterPosition,
    attribution: &[String],
    measure: &dyn TextMeasure,
    icons: &dyn IconSource,
) -> Vec<DrawOp> {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = cell;
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;

    let mut ops = vec![
        DrawOp::fill(cell, style.color),
        DrawOp::Circle {
            cx,
            cy,
            radius: MASK_RADIUS,
            color: RgbColor::WHITE,
            opacity: MASK_OPACITY,
        },
    ];

    let footprint = Rect::new(
        cx - ICON_SIZE / 2.0,
        cy - ICON_SIZE / 2.0,
        ICON_SIZE,
        ICON_SIZE,
    );
    ops.extend(fit_icon(icons, style.icon.as_deref(), footprint));

    ops.push(DrawOp::translucent(
        Rect::new(x, y + BANNER_BOTTOM, w, BANNER_HEIGHT),
        RgbColor::BLACK,
        BANNER_OPACITY,
    ));

    let baseline = y + CATEGORY_BASELINE;
    for step in SHADOW_STEPS {
        ops.push(centered_text(
            measure,
            cx + step,
            baseline - step,
            category,
            FontFace::ExtraBold,
            CATEGORY_SIZE,
            SHADOW_COLOR,
        ));
    }
    ops.push(centered_text(
        measure,
        cx,
        baseline,
        category,
        FontFace::ExtraBold,
        CATEGORY_SIZE,
        RgbColor::WHITE,
    ));

    ops.push(centered_text(
        measure,
        cx,
        y + SUBCATEGORY_BASELINE,
        subcategory,
        FontFace::Bold,
        SUBCATEGORY_SIZE,
        RgbColor::WHITE,
    ));

    for (i, line) in attribution.iter().enumerate() {
        let step = i as f32 * FOOTER_PITCH;
        let line_y = match footer {
            FooterPosition::Bottom => y + FOOTER_EDGE + step,
            FooterPosition::Top => y + h - FOOTER_EDGE - FOOTER_SIZE * 0.35 - step,
        };
        ops.push(centered_text(
            measure,
            cx,
            line_y,
            line,
            FontFace::Regular,
            FOOTER_SIZE,
            FOOTER_COLOR,
        ));
    }

    ops
}
