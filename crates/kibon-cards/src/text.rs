/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

/// Font faces used on the cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    ExtraBold,
}

impl FontFace {
    pub const ALL: [FontFace; 3] = [FontFace::Regular, FontFace::Bold, FontFace::ExtraBold];
}

/// Font metrics provider.
pub trait TextMeasure {
    /// Rendered width of `text` in points.
    fn text_width_pt(&self, text: &str, face: FontFace, size_pt: f32) -> f32;

    fn text_width_mm(&self, text: &str, face: FontFace, size_pt: f32) -> f32 {
        self.text_width_pt(text, face, size_pt) * PT_TO_MM
    }
}

/// Measures every character as the same fraction of the font size.
///
/// Useful for previews and tests where no font files are available.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    /// Advance per character, in ems.
    pub em: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width_pt(&self, text: &str, _face: FontFace, size_pt: f32) -> f32 {
        text.chars().count() as f32 * self.em * size_pt
    }
}

/// Greedy word wrap.
///
/// Words are appended to the current line while `measure` stays within
/// `max_width`. A word that is wider than `max_width` on its own still gets
/// its own line. Lines past `max_lines` are dropped.
pub fn wrap_text(
    text: &str,
    max_width: f32,
    max_lines: usize,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }

        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines.truncate(max_lines);
    lines
}
