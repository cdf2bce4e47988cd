//! Card layout as a flat display list.
//!
//! All coordinates are millimetres with the origin at the bottom-left of the
//! page, matching PDF user space. Layout functions only compute geometry; the
//! `pdf` module turns the resulting [`DrawOp`]s into page content.

mod back;
mod front;
mod guides;

pub use back::layout_back_card;
pub use front::{is_stance_move, layout_front_card};
pub use guides::draw_cutting_guides;

use crate::color::RgbColor;
use crate::text::{FontFace, TextMeasure};

/// Axis-aligned rectangle, `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.x + other.width <= self.x + self.width + EPS
            && other.y + other.height <= self.y + self.height + EPS
    }
}

/// One drawing primitive, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        rect: Rect,
        color: RgbColor,
        /// 1.0 is opaque
        opacity: f32,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: RgbColor,
        opacity: f32,
    },
    /// Left-aligned text with its baseline at `y`.
    Text {
        x: f32,
        y: f32,
        text: String,
        face: FontFace,
        size_pt: f32,
        color: RgbColor,
    },
    /// SVG icon fitted into `rect`.
    Icon { name: String, rect: Rect },
    /// QR code encoding `data`, drawn into the square `rect`.
    QrCode { data: String, rect: Rect },
}

impl DrawOp {
    pub fn fill(rect: Rect, color: RgbColor) -> Self {
        DrawOp::Rect {
            rect,
            color,
            opacity: 1.0,
        }
    }

    pub fn translucent(rect: Rect, color: RgbColor, opacity: f32) -> Self {
        DrawOp::Rect {
            rect,
            color,
            opacity,
        }
    }

    pub fn text_str(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Resolved per-subcategory style.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub color: RgbColor,
    pub icon: Option<String>,
}

/// Icon lookup used while laying out.
pub trait IconSource {
    /// Intrinsic `(width, height)` of the icon, or `None` when it cannot be
    /// drawn.
    fn intrinsic_size(&self, name: &str) -> Option<(f32, f32)>;
}

/// An `IconSource` that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIcons;

impl IconSource for NoIcons {
    fn intrinsic_size(&self, _name: &str) -> Option<(f32, f32)> {
        None
    }
}

/// Scale an icon uniformly into the square `footprint` box, centered.
pub(crate) fn fit_icon(
    icons: &dyn IconSource,
    name: Option<&str>,
    footprint: Rect,
) -> Option<DrawOp> {
    let name = name?;
    let (w, h) = icons.intrinsic_size(name)?;
    if !(w > 0.0 && h > 0.0) {
        return None;
    }

    let scale = (footprint.width / w).min(footprint.height / h);
    let (width, height) = (w * scale, h * scale);
    let (cx, cy) = footprint.center();

    Some(DrawOp::Icon {
        name: name.to_string(),
        rect: Rect::new(cx - width / 2.0, cy - height / 2.0, width, height),
    })
}

/// Text op horizontally centered on `cx`.
pub(crate) fn centered_text(
    measure: &dyn TextMeasure,
    cx: f32,
    y: f32,
    text: &str,
    face: FontFace,
    size_pt: f32,
    color: RgbColor,
) -> DrawOp {
    let width = measure.text_width_mm(text, face, size_pt);
    DrawOp::Text {
        x: cx - width / 2.0,
        y,
        text: text.to_string(),
        face,
        size_pt,
        color,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::IconSource;
    use std::collections::HashMap;

    /// Icons with fixed intrinsic sizes.
    #[derive(Default)]
    pub struct FakeIcons(pub HashMap<String, (f32, f32)>);

    impl FakeIcons {
        pub fn with(name: &str, w: f32, h: f32) -> Self {
            let mut icons = HashMap::new();
            icons.insert(name.to_string(), (w, h));
            Self(icons)
        }
    }

    impl IconSource for FakeIcons {
        fn intrinsic_size(&self, name: &str) -> Option<(f32, f32)> {
            self.0.get(name).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FakeIcons;
    use super::*;

    #[test]
    fn fit_icon_preserves_aspect_ratio() {
        let icons = FakeIcons::with("wide.svg", 200.0, 100.0);
        let footprint = Rect::new(10.0, 20.0, 10.0, 10.0);

        let Some(DrawOp::Icon { rect, .. }) = fit_icon(&icons, Some("wide.svg"), footprint) else {
            panic!("icon should resolve");
        };
        assert!((rect.width - 10.0).abs() < 1e-4);
        assert!((rect.height - 5.0).abs() < 1e-4);
        let ((ax, ay), (bx, by)) = (rect.center(), footprint.center());
        assert!((ax - bx).abs() < 1e-4 && (ay - by).abs() < 1e-4);
        assert!(footprint.contains_rect(&rect));
    }

    #[test]
    fn unresolved_icons_are_omitted() {
        let footprint = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(fit_icon(&NoIcons, Some("missing.svg"), footprint).is_none());
        assert!(fit_icon(&FakeIcons::default(), None, footprint).is_none());
        let degenerate = FakeIcons::with("flat.svg", 10.0, 0.0);
        assert!(fit_icon(&degenerate, Some("flat.svg"), footprint).is_none());
    }
}
