use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Previous day",
    "l, RIGHT        Next day",
    "k, UP           Previous week",
    "j, DOWN         Next week",
    "p, <, PAGE UP   Previous month",
    "n, >, PAGE DOWN Next month",
    "t, HOME         Jump to today",
    "SPACE           Select/unselect day",
    "ENTER           Pick day and quit",
    "?               Show this help",
    "q, ESC          Quit without picking",
    "",
    "Press the Any Key to dismiss.",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area.intersection(area), buf);
        Block::new().style(self.0).render(outer_area.intersection(area), buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_overlays_center() {
        let area = Rect::new(0, 0, 44, 17);
        let mut buffer = Buffer::with_lines(vec!["x".repeat(44); 17]);
        Help(Style::new()).render(area, &mut buffer);
        let lines = buffer
            .content
            .chunks(44)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(lines[0], "x".repeat(44));
        assert_eq!(lines[16], "x".repeat(44));
        assert!(lines[1].contains(" ┌"), "{:?}", lines[1]);
        assert!(lines[1].contains(" Commands "), "{:?}", lines[1]);
        assert!(lines[2].contains("│h, LEFT         Previous day"), "{:?}", lines[2]);
        assert!(lines[15].contains("┘ "), "{:?}", lines[15]);
        assert!(lines[8].starts_with('x') && lines[8].ends_with('x'));
    }
}
