use crate::color::RgbColor;
use crate::fonts::FontSet;
use crate::icons::{ICON_RASTER_PX, IconLibrary};
use crate::layout::{DrawOp, Rect};
use crate::options::{DeckOptions, DocumentMetadata};
use crate::paginate::{PagePlan, PageSink, paginate};
use crate::qr::{QUIET_ZONE, QrMatrix};
use crate::source::StyleTable;
use crate::text::FontFace;
use crate::types::{CardError, Deck, Result};
use printpdf::*;
use std::collections::HashMap;
use std::path::Path;

/// Segments used to approximate circles.
const CIRCLE_SEGMENTS: usize = 96;

struct PlacedImage {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

/// The drawing surface for one run: the PDF document, its registered fonts,
/// icon images and opacity states.
pub struct RenderContext {
    doc: PdfDocument,
    page_width_mm: f32,
    page_height_mm: f32,
    fonts: HashMap<FontFace, FontId>,
    images: HashMap<String, PlacedImage>,
    opacity_states: HashMap<u16, ExtendedGraphicsStateId>,
    pages: Vec<PdfPage>,
}

impl RenderContext {
    pub fn new(options: &DeckOptions, fonts: &FontSet, icons: &IconLibrary) -> Result<Self> {
        let title = options
            .metadata
            .as_ref()
            .map(|m| m.title.as_str())
            .unwrap_or("Kibon cards");
        let mut doc = PdfDocument::new(title);
        if let Some(metadata) = &options.metadata {
            apply_metadata(&mut doc, metadata);
        }

        let mut font_ids = HashMap::new();
        for face in FontFace::ALL {
            let mut warnings = Vec::new();
            let parsed = ParsedFont::from_bytes(&fonts.face(face).data, 0, &mut warnings)
                .ok_or_else(|| CardError::Pdf(format!("Failed to parse {:?} font", face)))?;
            font_ids.insert(face, doc.add_font(&parsed));
        }

        let mut images = HashMap::new();
        for name in icons.names() {
            let Some(raster) = icons.rasterize(name, ICON_RASTER_PX) else {
                log::warn!("Icon {} could not be rasterized", name);
                continue;
            };
            let image = RawImage {
                pixels: RawImageData::U8(raster.rgba),
                width: raster.width as usize,
                height: raster.height as usize,
                data_format: RawImageFormat::RGBA8,
                tag: Vec::new(),
            };
            let id = doc.add_image(&image);
            images.insert(
                name.to_string(),
                PlacedImage {
                    id,
                    width_px: raster.width,
                    height_px: raster.height,
                },
            );
        }

        let (page_width_mm, page_height_mm) = options.page_size_mm();
        Ok(Self {
            doc,
            page_width_mm,
            page_height_mm,
            fonts: font_ids,
            images,
            opacity_states: HashMap::new(),
            pages: Vec::new(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Serialize the finished document.
    pub fn finish(mut self) -> Vec<u8> {
        self.doc.with_pages(self.pages);
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF writer reported {} warnings", warnings.len());
        }
        bytes
    }

    fn opacity_state(&mut self, opacity: f32) -> ExtendedGraphicsStateId {
        let key = (opacity.clamp(0.0, 1.0) * 1000.0).round() as u16;
        let doc = &mut self.doc;
        self.opacity_states
            .entry(key)
            .or_insert_with(|| doc.add_graphics_state(alpha_state(key as f32 / 1000.0)))
            .clone()
    }

    fn font(&self, face: FontFace) -> Result<FontId> {
        self.fonts
            .get(&face)
            .cloned()
            .ok_or_else(|| CardError::Pdf(format!("{:?} font not registered", face)))
    }

    fn push_op(&mut self, op: &DrawOp, out: &mut Vec<Op>) -> Result<()> {
        match op {
            DrawOp::Rect {
                rect,
                color,
                opacity,
            } => {
                let polygon = rect_polygon(rect);
                self.with_opacity(*opacity, out, |ops| {
                    ops.push(Op::SetFillColor { col: pdf_color(*color) });
                    ops.push(Op::DrawPolygon { polygon });
                });
            }
            DrawOp::Circle {
                cx,
                cy,
                radius,
                color,
                opacity,
            } => {
                let polygon = circle_polygon(*cx, *cy, *radius);
                self.with_opacity(*opacity, out, |ops| {
                    ops.push(Op::SetFillColor { col: pdf_color(*color) });
                    ops.push(Op::DrawPolygon { polygon });
                });
            }
            DrawOp::Text {
                x,
                y,
                text,
                face,
                size_pt,
                color,
            } => {
                let font = self.font(*face)?;
                out.push(Op::StartTextSection);
                out.push(Op::SetFillColor { col: pdf_color(*color) });
                out.push(Op::SetFontSize {
                    font: font.clone(),
                    size: Pt(*size_pt),
                });
                out.push(Op::SetTextMatrix {
                    matrix: TextMatrix::Translate(Mm(*x).into_pt(), Mm(*y).into_pt()),
                });
                out.push(Op::WriteText {
                    items: vec![TextItem::Text(text.clone())],
                    font,
                });
                out.push(Op::EndTextSection);
            }
            DrawOp::Icon { name, rect } => {
                // Unresolvable icons were already dropped by layout; a raster
                // failure degrades the same way.
                if let Some(image) = self.images.get(name) {
                    let width_pt = Mm(rect.width).into_pt().0;
                    let height_pt = Mm(rect.height).into_pt().0;
                    out.push(Op::UseXobject {
                        id: image.id.clone(),
                        transform: XObjectTransform {
                            translate_x: Some(Mm(rect.x).into_pt()),
                            translate_y: Some(Mm(rect.y).into_pt()),
                            scale_x: Some(width_pt / image.width_px as f32),
                            scale_y: Some(height_pt / image.height_px as f32),
                            dpi: Some(72.0),
                            ..Default::default()
                        },
                    });
                }
            }
            DrawOp::QrCode { data, rect } => {
                let matrix = QrMatrix::encode(data)?;
                out.extend(qr_ops(&matrix, rect));
            }
        }
        Ok(())
    }

    fn with_opacity(&mut self, opacity: f32, out: &mut Vec<Op>, draw: impl FnOnce(&mut Vec<Op>)) {
        if opacity >= 1.0 {
            draw(out);
            return;
        }
        let gs = self.opacity_state(opacity);
        out.push(Op::SaveGraphicsState);
        out.push(Op::LoadGraphicsState { gs });
        draw(out);
        out.push(Op::RestoreGraphicsState);
    }
}

impl PageSink for RenderContext {
    fn emit_page(&mut self, page: PagePlan) -> Result<()> {
        let mut ops = Vec::with_capacity(page.ops.len() * 2);
        for op in &page.ops {
            self.push_op(op, &mut ops)?;
        }
        log::debug!(
            "Page {} ({:?}, batch {}): {} cards",
            self.pages.len() + 1,
            page.side,
            page.batch + 1,
            page.cards
        );
        self.pages.push(PdfPage::new(
            Mm(self.page_width_mm),
            Mm(self.page_height_mm),
            ops,
        ));
        Ok(())
    }
}

fn apply_metadata(doc: &mut PdfDocument, metadata: &DocumentMetadata) {
    let info = &mut doc.metadata.info;
    info.document_title = metadata.title.clone();
    if let Some(subject) = &metadata.subject {
        info.subject = subject.clone();
    }
    if let Some(author) = &metadata.author {
        info.author = author.clone();
    }
    if let Some(creator) = &metadata.creator {
        info.creator = creator.clone();
    }
    info.keywords = metadata.keywords.clone();
}

/// Constant alpha for both painting operations.
///
/// printpdf writes `current_fill_alpha` under `/CA` and
/// `current_stroke_alpha` under `/ca`, so both must be set for fills to
/// pick up the alpha.
fn alpha_state(alpha: f32) -> ExtendedGraphicsState {
    ExtendedGraphicsState::default()
        .with_current_fill_alpha(alpha)
        .with_current_stroke_alpha(alpha)
}

fn pdf_color(color: RgbColor) -> Color {
    Color::Rgb(Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
        icc_profile: None,
    })
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point {
            x: Mm(x).into_pt(),
            y: Mm(y).into_pt(),
        },
        bezier: false,
    }
}

fn filled(points: Vec<LinePoint>) -> Polygon {
    Polygon {
        rings: vec![PolygonRing { points }],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

fn rect_polygon(rect: &Rect) -> Polygon {
    let Rect {
        x,
        y,
        width,
        height,
    } = *rect;
    filled(vec![
        point(x, y),
        point(x + width, y),
        point(x + width, y + height),
        point(x, y + height),
    ])
}

fn circle_polygon(cx: f32, cy: f32, radius: f32) -> Polygon {
    let points = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            point(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect();
    filled(points)
}

/// White square with the quiet zone, then one rectangle per run of dark
/// modules.
fn qr_ops(matrix: &QrMatrix, rect: &Rect) -> Vec<Op> {
    let module = rect.width / matrix.width_with_quiet_zone() as f32;
    let top = rect.y + rect.height;

    let mut ops = vec![
        Op::SetFillColor {
            col: pdf_color(RgbColor::WHITE),
        },
        Op::DrawPolygon {
            polygon: rect_polygon(rect),
        },
        Op::SetFillColor {
            col: pdf_color(RgbColor::BLACK),
        },
    ];

    for (row, column, len) in matrix.dark_runs() {
        let run = Rect::new(
            rect.x + (QUIET_ZONE + column) as f32 * module,
            top - (QUIET_ZONE + row + 1) as f32 * module,
            len as f32 * module,
            module,
        );
        ops.push(Op::DrawPolygon {
            polygon: rect_polygon(&run),
        });
    }
    ops
}

/// Lay out and render the whole deck, returning the PDF bytes.
pub fn generate_deck_bytes(
    deck: &Deck,
    styles: &StyleTable,
    options: &DeckOptions,
) -> Result<Vec<u8>> {
    options.validate()?;
    let fonts = FontSet::load(&options.fonts)?;
    let icons = IconLibrary::load(&options.images_dir, styles.icon_names());
    if styles.is_empty() {
        log::warn!("No subcategory styles defined, every card uses the default style");
    } else if icons.is_empty() && styles.icon_names().next().is_some() {
        log::warn!("No icon could be loaded from {}", options.images_dir.display());
    }
    log::debug!("{} styles, {} icons loaded", styles.len(), icons.len());

    let mut ctx = RenderContext::new(options, &fonts, &icons)?;
    let batches = paginate(deck, styles, options, &fonts, &icons, &mut ctx)?;

    log::info!(
        "Rendered {} cards on {} pages ({} sheets)",
        deck.card_count(),
        ctx.page_count(),
        batches
    );
    Ok(ctx.finish())
}

pub async fn generate_pdf(
    deck: &Deck,
    styles: &StyleTable,
    options: &DeckOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let deck = deck.clone();
    let styles = styles.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    let bytes =
        tokio::task::spawn_blocking(move || generate_deck_bytes(&deck, &styles, &options)).await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}
