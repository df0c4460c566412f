//! Terminal rendering for wedding-core types.
//!
//! Extension traits that add colored output with owo_colors.

use owo_colors::OwoColorize;
use wedding_core::WeddingEvent;
use wedding_core::celebration::Confetti;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for WeddingEvent {
    fn render(&self) -> String {
        let mut lines = vec![
            self.title.bold().to_string(),
            format!(
                "  {}, {} at {}",
                self.weekday(),
                self.display_date(),
                self.display_time()
            ),
        ];

        for line in &self.venue {
            lines.push(format!("  {}", line.dimmed()));
        }
        if let Some(dress_code) = &self.dress_code {
            lines.push(format!("  {} {}", "Dress Code:".dimmed(), dress_code));
        }
        if let Some(note) = &self.note {
            lines.push(format!("  {}", note.italic()));
        }

        lines.join("\n")
    }
}

/// One colored glyph per piece, capped at a terminal line
const CONFETTI_WIDTH: usize = 60;

impl Render for Confetti {
    fn render(&self) -> String {
        self.pieces()
            .iter()
            .take(CONFETTI_WIDTH)
            .enumerate()
            .map(|(i, piece)| {
                let glyph = if i % 2 == 0 { "*" } else { "·" };
                match hex_rgb(piece.color) {
                    Some((r, g, b)) => glyph.truecolor(r, g, b).to_string(),
                    None => glyph.to_string(),
                }
            })
            .collect()
    }
}

/// Parse "#rrggbb"
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb("#ec4899"), Some((0xec, 0x48, 0x99)));
        assert_eq!(hex_rgb("ec4899"), None);
        assert_eq!(hex_rgb("#fff"), None);
    }

    #[test]
    fn test_confetti_line_is_capped() {
        let line = Confetti::burst(200).render();
        assert_eq!(line.matches('*').count() + line.matches('·').count(), CONFETTI_WIDTH);
    }
}
