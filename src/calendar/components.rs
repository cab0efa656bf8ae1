//! The pieces the table is assembled from.  Each has a default
//! implementation, and any of them can be swapped out through [`Components`].
use super::context::DayPickerContext;
use super::util::{WeekdayExt, DAYS_IN_WEEK};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Span};
use std::fmt;
use time::Date;

/// Number of columns per day of week
pub(crate) const CELL_WIDTH: u16 = 5;

/// Number of columns taken up by the week number column, when shown
pub(crate) const WEEK_NUMBER_WIDTH: u16 = 5;

/// Number of lines taken up by the head and its rule
pub(crate) const HEAD_LINES: u16 = 2;

const ACS_HLINE: char = '─';

pub(crate) trait HeadComponent: fmt::Debug {
    fn render(&self, ctx: &DayPickerContext, area: Rect, buf: &mut Buffer);

    fn height(&self, _ctx: &DayPickerContext) -> u16 {
        HEAD_LINES
    }
}

/// What a row is told about the week it shows
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RowProps<'a> {
    pub(crate) display_month: Date,
    pub(crate) dates: &'a [Date],
    pub(crate) week_number: u8,
}

pub(crate) trait RowComponent: fmt::Debug {
    /// Draw a single week into `area`, which is one line high
    fn render(&self, ctx: &DayPickerContext, props: &RowProps<'_>, area: Rect, buf: &mut Buffer);
}

pub(crate) trait FooterComponent: fmt::Debug {
    fn render(&self, ctx: &DayPickerContext, display_month: Date, area: Rect, buf: &mut Buffer);

    fn height(&self, ctx: &DayPickerContext, display_month: Date) -> u16;
}

/// Overrides for the table's sub-components; `None` means "use the default"
#[derive(Debug, Default)]
pub(crate) struct Components {
    pub(crate) head: Option<Box<dyn HeadComponent>>,
    pub(crate) row: Option<Box<dyn RowComponent>>,
    pub(crate) footer: Option<Box<dyn FooterComponent>>,
}

impl Components {
    pub(crate) fn head(&self) -> &dyn HeadComponent {
        self.head.as_deref().unwrap_or(&Head)
    }

    pub(crate) fn row(&self) -> &dyn RowComponent {
        self.row.as_deref().unwrap_or(&Row)
    }

    pub(crate) fn footer(&self) -> &dyn FooterComponent {
        self.footer.as_deref().unwrap_or(&Footer)
    }
}

/// Column at which the first day cell starts
pub(crate) fn days_left(ctx: &DayPickerContext) -> u16 {
    if ctx.show_week_number {
        WEEK_NUMBER_WIDTH
    } else {
        0
    }
}

/// Width of a whole row, week number column included
pub(crate) fn row_width(ctx: &DayPickerContext) -> u16 {
    days_left(ctx) + CELL_WIDTH * 7
}

/// Weekday labels above the day columns
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Head;

impl HeadComponent for Head {
    fn render(&self, ctx: &DayPickerContext, area: Rect, buf: &mut Buffer) {
        let styles = &ctx.styles;
        buf.set_style(area, styles.head);
        let mut canvas = Canvas::new(area, buf);
        if ctx.show_week_number {
            canvas.print(0, 0, "  #", styles.week_number);
        }
        let x0 = days_left(ctx);
        for (col, wd) in std::iter::zip(0u16.., ctx.week_start().week_order()) {
            canvas.print(
                0,
                x0 + col * CELL_WIDTH + 1,
                ctx.locale.weekday_short(wd),
                styles.head_cell,
            );
        }
        canvas.hline(1, 0, row_width(ctx).saturating_sub(1));
    }
}

/// A single week of day cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Row;

impl Row {
    fn day_span(ctx: &DayPickerContext, date: Date, display_month: Date) -> Option<Span<'static>> {
        let styles = &ctx.styles;
        let outside = date.month() != display_month.month() || date.year() != display_month.year();
        if outside && !ctx.show_outside_days {
            return None;
        }
        let is_today = date == ctx.today;
        let mut style = if outside {
            styles.day_outside
        } else {
            styles.day
        };
        if is_today {
            style = style.patch(styles.day_today);
        }
        if ctx.selected == Some(date) {
            style = style.patch(styles.day_selected);
        }
        if ctx.focused == Some(date) {
            style = style.patch(styles.day_focused);
        }
        let s = if is_today {
            format!("[{:2}]", date.day())
        } else {
            format!(" {:2} ", date.day())
        };
        Some(Span::styled(s, style))
    }
}

impl RowComponent for Row {
    fn render(&self, ctx: &DayPickerContext, props: &RowProps<'_>, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, ctx.styles.row);
        let mut canvas = Canvas::new(area, buf);
        if ctx.show_week_number {
            canvas.print(
                0,
                0,
                format!("{:>3}", props.week_number),
                ctx.styles.week_number,
            );
        }
        let x0 = days_left(ctx);
        let week_start = ctx.week_start();
        for &date in props.dates.iter().take(DAYS_IN_WEEK) {
            let col = u16::from(date.weekday().index_from(week_start));
            if let Some(span) = Self::day_span(ctx, date, props.display_month) {
                canvas.print(0, x0 + col * CELL_WIDTH, span.content, span.style);
            }
        }
    }
}

/// Free-form text below the table
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Footer;

impl FooterComponent for Footer {
    fn render(&self, ctx: &DayPickerContext, _display_month: Date, area: Rect, buf: &mut Buffer) {
        if let Some(text) = ctx.footer.as_deref() {
            Canvas::new(area, buf).print(0, 0, text, ctx.styles.footer);
        }
    }

    fn height(&self, ctx: &DayPickerContext, _display_month: Date) -> u16 {
        u16::from(ctx.footer.is_some())
    }
}

/// Clipped drawing within an area of a buffer; coordinates are relative to
/// the area
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> Canvas<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    pub(crate) fn print<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    pub(crate) fn hline(&mut self, y: u16, x: u16, length: u16) {
        self.print(y, x, String::from(ACS_HLINE).repeat(length.into()), Style::new());
    }
}
