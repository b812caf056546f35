use const_format::concatcp;
use ratatui::style::Style;
use ratatui::symbols::line::{TOP_LEFT, TOP_RIGHT};
use ratatui::text::{Line, Span};
use unicode_segmentation::UnicodeSegmentation;

pub const TOP_TITLE_LEFT: &str = concatcp!(TOP_RIGHT, " ");
pub const TOP_TITLE_RIGHT: &str = concatcp!(" ", TOP_LEFT);

pub fn top_title_line<S: Into<Style>>(title: &'_ str, title_style: S) -> Line<'_> {
    Line::from(vec![
        Span::raw(TOP_TITLE_LEFT),
        Span::styled(title, title_style),
        Span::raw(TOP_TITLE_RIGHT),
    ])
}

/// Truncate `text` to at most `max` grapheme clusters, appending `…` when
/// anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    let mut graphemes = text.graphemes(true);
    let head: String = graphemes.by_ref().take(max).collect();
    if graphemes.next().is_some() {
        let mut head: String = head.graphemes(true).take(max.saturating_sub(1)).collect();
        head.push('…');
        head
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 4), "hel…");
        assert_eq!(truncate("héllo", 4), "hél…");
        assert_eq!(truncate("", 4), "");
    }
}
