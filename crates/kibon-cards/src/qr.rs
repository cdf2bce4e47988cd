use crate::types::Result;
use qrcode::{Color, QrCode};

/// Light border around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// Module grid of an encoded QR symbol, without quiet zone.
#[derive(Debug, Clone, PartialEq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    pub fn encode(data: &str) -> Result<Self> {
        let code = QrCode::new(data.as_bytes())?;
        let width = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        Ok(Self { width, dark })
    }

    /// Modules per side
    pub fn width(&self) -> usize {
        self.width
    }

    /// Modules per side including the quiet zone on both edges
    pub fn width_with_quiet_zone(&self) -> usize {
        self.width + 2 * QUIET_ZONE
    }

    pub fn is_dark(&self, row: usize, column: usize) -> bool {
        self.dark[row * self.width + column]
    }

    /// Horizontal runs of dark modules as `(row, first column, length)`,
    /// row 0 at the top.
    pub fn dark_runs(&self) -> Vec<(usize, usize, usize)> {
        let mut runs = Vec::new();
        for row in 0..self.width {
            let mut column = 0;
            while column < self.width {
                if !self.is_dark(row, column) {
                    column += 1;
                    continue;
                }
                let start = column;
                while column < self.width && self.is_dark(row, column) {
                    column += 1;
                }
                runs.push((row, start, column - start));
            }
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_cover_exactly_the_dark_modules() {
        let matrix = QrMatrix::encode("https://example.com/v?t=12").unwrap();
        assert!(matrix.width() >= 21);

        let mut covered = vec![false; matrix.width() * matrix.width()];
        for (row, start, len) in matrix.dark_runs() {
            assert!(len > 0);
            for column in start..start + len {
                covered[row * matrix.width() + column] = true;
            }
        }
        for row in 0..matrix.width() {
            for column in 0..matrix.width() {
                assert_eq!(covered[row * matrix.width() + column], matrix.is_dark(row, column));
            }
        }
    }

    #[test]
    fn finder_pattern_is_dark_in_the_top_left() {
        let matrix = QrMatrix::encode("kibon").unwrap();
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(0, 6));
        assert!(!matrix.is_dark(1, 1));
        assert_eq!(matrix.width_with_quiet_zone(), matrix.width() + 8);
    }
}
