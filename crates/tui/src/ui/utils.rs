//! Layout helpers shared by the components.

use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

/// Creates a centered rectangle sized as a percentage of `r`.
///
/// Used for the command palette, which floats in the middle of the screen.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    let area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);
    area[1]
}

/// Display width of `text` in terminal cells, saturated to `u16`.
pub fn display_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Truncates `text` to at most `max` cells, appending an ellipsis when cut.
pub fn truncate_to_width(text: &str, max: u16) -> String {
    let max = usize::from(max);
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let centered = centered_rect(60, 50, parent);
        assert_eq!(centered.width, 60);
        assert_eq!(centered.x, 20);
        assert!(parent.contains(Position::new(centered.x, centered.y)));
    }

    #[test]
    fn truncation_respects_wide_glyphs() {
        assert_eq!(truncate_to_width("Collections", 20), "Collections");
        assert_eq!(truncate_to_width("Collections", 6), "Colle…");
        assert_eq!(truncate_to_width("ÉVOQUE", 0), "");
        assert_eq!(display_width("₿ Bitcoin"), 9);
    }
}
