use crate::layout::IconSource;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Longest side of a rasterized icon, in pixels.
pub const ICON_RASTER_PX: u32 = 600;

/// Straight (non-premultiplied) RGBA pixels of a rendered icon.
#[derive(Debug, Clone)]
pub struct IconRaster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// SVG icons referenced by the style table, parsed once per run.
///
/// Files that are missing or fail to parse are logged and left out; layout
/// then simply omits the icon.
#[derive(Default)]
pub struct IconLibrary {
    trees: HashMap<String, Arc<usvg::Tree>>,
}

impl IconLibrary {
    pub fn load<'a>(dir: &Path, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut library = Self::default();
        for name in names {
            if library.trees.contains_key(name) {
                continue;
            }
            let path = dir.join(name);
            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Icon {} not found: {}", path.display(), e);
                    continue;
                }
            };
            match library.insert_svg(name, &bytes) {
                Ok(()) => log::debug!("Loaded icon {}", name),
                Err(e) => log::warn!("Icon {} could not be parsed: {}", path.display(), e),
            }
        }
        library
    }

    pub fn insert_svg(&mut self, name: &str, bytes: &[u8]) -> Result<(), usvg::Error> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(bytes, &opts)?;
        self.trees.insert(name.to_string(), Arc::new(tree));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Render an icon so that its longest side is `max_px` pixels.
    pub fn rasterize(&self, name: &str, max_px: u32) -> Option<IconRaster> {
        let tree = self.trees.get(name)?;
        let size = tree.size();
        let scale = max_px as f32 / size.width().max(size.height());
        let width = ((size.width() * scale).ceil() as u32).max(1);
        let height = ((size.height() * scale).ceil() as u32).max(1);

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)?;
        let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);
        resvg::render(tree, transform, &mut pixmap.as_mut());

        let mut rgba = pixmap.data().to_vec();
        demultiply_rgba8_in_place(&mut rgba);
        Some(IconRaster {
            width,
            height,
            rgba,
        })
    }
}

impl IconSource for IconLibrary {
    fn intrinsic_size(&self, name: &str) -> Option<(f32, f32)> {
        let size = self.trees.get(name)?.size();
        Some((size.width(), size.height()))
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"
  width="40" height="20" viewBox="0 0 40 20">
  <rect x="0" y="0" width="40" height="20" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn reports_intrinsic_size() {
        let mut library = IconLibrary::default();
        library.insert_svg("flag.svg", SQUARE.as_bytes()).unwrap();
        assert_eq!(library.intrinsic_size("flag.svg"), Some((40.0, 20.0)));
        assert_eq!(library.intrinsic_size("other.svg"), None);
    }

    #[test]
    fn rasterizes_to_requested_resolution() {
        let mut library = IconLibrary::default();
        library.insert_svg("flag.svg", SQUARE.as_bytes()).unwrap();

        let raster = library.rasterize("flag.svg", 100).unwrap();
        assert_eq!((raster.width, raster.height), (100, 50));
        assert_eq!(raster.rgba.len(), 100 * 50 * 4);
        assert_eq!(&raster.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_and_broken_icons_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.svg"), "<svg").unwrap();
        std::fs::write(dir.path().join("ok.svg"), SQUARE).unwrap();

        let library =
            IconLibrary::load(dir.path(), ["broken.svg", "ok.svg", "absent.svg", "ok.svg"]);
        assert_eq!(library.names().collect::<Vec<_>>(), ["ok.svg"]);
        assert_eq!(library.len(), 1);
        assert!(IconLibrary::default().is_empty());
    }

    #[test]
    fn demultiply_restores_straight_alpha() {
        let mut px = [64, 0, 32, 128];
        demultiply_rgba8_in_place(&mut px);
        assert_eq!(px, [128, 0, 64, 128]);
    }
}
