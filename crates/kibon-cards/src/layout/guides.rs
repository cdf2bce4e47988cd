use super::{DrawOp, Rect};
use crate::color::RgbColor;

const TICK_LENGTH: f32 = 4.0;
const TICK_THICKNESS: f32 = 0.3;
const TICK_COLOR: RgbColor = RgbColor::gray(0xb0);

/// Corner marks for trimming one card.
///
/// Each corner gets a horizontal and a vertical tick centered on the exact
/// corner point, so the cut line runs through the middle of both strokes.
pub fn draw_cutting_guides(cell: Rect) -> Vec<DrawOp> {
    let half_len = TICK_LENGTH / 2.0;
    let half_thick = TICK_THICKNESS / 2.0;

    let corners = [
        (cell.x, cell.y),
        (cell.x + cell.width, cell.y),
        (cell.x, cell.y + cell.height),
        (cell.x + cell.width, cell.y + cell.height),
    ];

    corners
        .into_iter()
        .flat_map(|(cx, cy)| {
            [
                Rect::new(cx - half_len, cy - half_thick, TICK_LENGTH, TICK_THICKNESS),
                Rect::new(cx - half_thick, cy - half_len, TICK_THICKNESS, TICK_LENGTH),
            ]
        })
        .map(|rect| DrawOp::fill(rect, TICK_COLOR))
        .collect()
}
