//! TextBlock Widget
//!
//! A borderless, scrollable text region made of styled paragraphs. It can
//! be anchored to the top (JSON output) or to the bottom (chat transcript,
//! where offset 0 means "showing the newest line").

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::StatefulWidget;
use textwrap::wrap;

/// Which edge scroll offsets are measured from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Offset counts lines scrolled down from the first line
    #[default]
    Top,
    /// Offset counts lines scrolled up from the last line
    Bottom,
}

/// State for a scrollable text block
#[derive(Default)]
pub struct TextBlockState {
    /// Scroll offset (lines from the anchor)
    pub scroll_offset: usize,
    /// Total content lines after wrapping
    pub total_lines: usize,
}

impl TextBlockState {
    /// State starting at `scroll_offset`
    pub fn at(scroll_offset: usize) -> Self {
        Self {
            scroll_offset,
            total_lines: 0,
        }
    }
}

/// A borderless, scrollable text block
pub struct TextBlock<'a> {
    paragraphs: Vec<(&'a str, Style)>,
    anchor: Anchor,
}

impl<'a> TextBlock<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            paragraphs: vec![(content, Style::default())],
            anchor: Anchor::Top,
        }
    }

    pub fn from_paragraphs(paragraphs: Vec<(&'a str, Style)>) -> Self {
        Self {
            paragraphs,
            anchor: Anchor::Top,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

impl<'a> StatefulWidget for TextBlock<'a> {
    type State = TextBlockState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Wrap text to width
        let wrapped: Vec<(String, Style)> = self
            .paragraphs
            .iter()
            .flat_map(|(content, style)| {
                content.lines().flat_map(move |line| {
                    if line.is_empty() {
                        vec![(String::new(), *style)]
                    } else {
                        wrap(line, area.width as usize)
                            .into_iter()
                            .map(|cow| (cow.to_string(), *style))
                            .collect()
                    }
                })
            })
            .collect();

        state.total_lines = wrapped.len();

        // Clamp scroll
        let max_scroll = state.total_lines.saturating_sub(area.height as usize);
        state.scroll_offset = state.scroll_offset.min(max_scroll);

        let first = match self.anchor {
            Anchor::Top => state.scroll_offset,
            Anchor::Bottom => max_scroll - state.scroll_offset,
        };

        // Render visible lines
        for (i, (line, style)) in wrapped
            .iter()
            .skip(first)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_stringn(area.x, y, line, area.width as usize, *style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_wraps_and_counts_lines() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::default();

        TextBlock::new("alpha beta gamma\n\nend").render(area, &mut buf, &mut state);

        assert_eq!(state.total_lines, 4);
        assert_eq!(row(&buf, 0), "alpha beta");
        assert_eq!(row(&buf, 1), "gamma");
        assert_eq!(row(&buf, 3), "end");
    }

    #[test]
    fn test_bottom_anchor_shows_newest() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::at(0);

        TextBlock::new("one\ntwo\nthree\nfour")
            .anchor(Anchor::Bottom)
            .render(area, &mut buf, &mut state);

        assert_eq!(row(&buf, 0), "three");
        assert_eq!(row(&buf, 1), "four");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        let mut state = TextBlockState::at(99);

        TextBlock::new("one\ntwo\nthree")
            .anchor(Anchor::Bottom)
            .render(area, &mut buf, &mut state);

        assert_eq!(state.scroll_offset, 1);
        assert_eq!(row(&buf, 0), "one");
    }
}
