use super::components::{row_width, RowProps};
use super::context::DayPickerContext;
use super::motion::{Presence, RowFrame, RowKey};
use super::weeks::{month_weeks, MonthWeek};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};
use std::time::Instant;
use time::Date;

/// Number of lines taken up by the caption and the blank line below it
const CAPTION_LINES: u16 = 2;

/// Number of lines taken up by each week
const ROW_LINES: u16 = 1;

/// Rows fainter than this are not drawn at all
const HIDDEN_OPACITY: f64 = 1.0 / 3.0;

/// Rows fainter than this are drawn dimmed
const DIM_OPACITY: f64 = 2.0 / 3.0;

/// The grid of weeks and days for a single month
#[derive(Clone, Debug)]
pub(crate) struct Table<'a> {
    ctx: &'a DayPickerContext,
    display_month: Date,
    weeks: Vec<MonthWeek>,
    caption: bool,
}

impl<'a> Table<'a> {
    pub(crate) fn new(ctx: &'a DayPickerContext, display_month: Date) -> Table<'a> {
        let weeks = month_weeks(display_month, &ctx.week_options()).unwrap_or_else(|e| {
            log::warn!(
                "cannot lay out {} {}: {e}",
                display_month.month(),
                display_month.year()
            );
            Vec::new()
        });
        Table {
            ctx,
            display_month,
            weeks,
            caption: false,
        }
    }

    /// Label the table with the month and year above the head
    pub(crate) fn with_caption(mut self) -> Self {
        self.caption = true;
        self
    }

    /// The weeks shown, in display order
    pub(crate) fn weeks(&self) -> &[MonthWeek] {
        &self.weeks
    }

    /// Width and height needed to draw the whole table
    pub(crate) fn required_size(&self) -> (u16, u16) {
        let ctx = self.ctx;
        let mut height = 0u16;
        if self.caption {
            height += CAPTION_LINES;
        }
        if !ctx.hide_head {
            height += ctx.components.head().height(ctx);
        }
        let rows = u16::try_from(self.weeks().len()).unwrap_or(u16::MAX);
        height = height.saturating_add(rows.saturating_mul(ROW_LINES));
        height = height.saturating_add(ctx.components.footer().height(ctx, self.display_month));
        (row_width(ctx), height)
    }

    fn caption_text(&self) -> String {
        format!(
            "{} {}",
            self.ctx.locale.month_name(self.display_month.month()),
            self.display_month.year()
        )
    }
}

impl StatefulWidget for Table<'_> {
    type State = TableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut TableState) {
        let ctx = self.ctx;
        buf.set_style(area, ctx.styles.table);
        let width = row_width(ctx).min(area.width);
        let mut y = 0u16;
        if self.caption {
            // Style a span rather than the line so that the centering padding
            // is left unstyled
            Line::from(Span::styled(self.caption_text(), ctx.styles.caption))
                .centered()
                .render(band(area, y, width, 1), buf);
            y = y.saturating_add(CAPTION_LINES);
        }
        if !ctx.hide_head {
            let head = ctx.components.head();
            let height = head.height(ctx);
            head.render(ctx, band(area, y, width, height), buf);
            y = y.saturating_add(height);
        }
        state.presence.sync(
            self.weeks()
                .iter()
                .map(|w| RowKey::new(w.week_number, self.display_month)),
            state.now,
        );
        let row = ctx.components.row();
        for week in self.weeks() {
            let row_area = band(area, y, width, ROW_LINES);
            if row_area.is_empty() {
                break;
            }
            let frame = if ctx.animate {
                state.presence.frame(
                    &RowKey::new(week.week_number, self.display_month),
                    state.now,
                )
            } else {
                RowFrame::REST
            };
            let props = RowProps {
                display_month: self.display_month,
                dates: &week.dates,
                week_number: week.week_number,
            };
            let mut scratch = Buffer::empty(Rect::new(0, 0, row_width(ctx), ROW_LINES));
            row.render(ctx, &props, scratch.area, &mut scratch);
            blit(&scratch, row_area, buf, frame);
            y = y.saturating_add(ROW_LINES);
        }
        let footer = ctx.components.footer();
        let height = footer.height(ctx, self.display_month);
        if height > 0 {
            footer.render(
                ctx,
                self.display_month,
                band(area, y, width, height),
                buf,
            );
        }
    }
}

/// Animation bookkeeping carried between renders of a [`Table`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TableState {
    presence: Presence<RowKey>,
    now: Instant,
}

impl TableState {
    pub(crate) fn new(now: Instant) -> TableState {
        TableState {
            presence: Presence::new(),
            now,
        }
    }

    /// Set the moment the next render should depict
    pub(crate) fn tick(&mut self, now: Instant) {
        self.now = now;
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.presence.is_animating(self.now)
    }
}

/// The part of `area` that starts `y` lines down, clipped to the area
fn band(area: Rect, y: u16, width: u16, height: u16) -> Rect {
    if y >= area.height {
        return Rect::new(area.x, area.bottom(), 0, 0);
    }
    Rect {
        x: area.x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height - y),
    }
}

/// Copy a rendered row into `dest`, offset and faded according to `frame`
fn blit(src: &Buffer, dest: Rect, buf: &mut Buffer, frame: RowFrame) {
    if frame.opacity < HIDDEN_OPACITY {
        return;
    }
    let shift = frame.shift(src.area.width);
    for row in 0..src.area.height.min(dest.height) {
        for col in 0..src.area.width {
            let Some(x) = i32::from(col)
                .checked_add(shift)
                .and_then(|x| u16::try_from(x).ok())
                .filter(|&x| x < dest.width)
            else {
                continue;
            };
            let Some(mut cell) = src.cell((col, row)).cloned() else {
                continue;
            };
            if frame.opacity < DIM_OPACITY {
                cell.modifier.insert(Modifier::DIM);
            }
            if let Some(target) = buf.cell_mut((dest.x + x, dest.y + row)) {
                *target = cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::components::{FooterComponent, HeadComponent, RowComponent};
    use crate::calendar::motion::enter_frame;
    use crate::locale::{DE, EN_US};
    use crate::theme::Styles;
    use ratatui::style::{Color, Style};
    use std::time::Duration;
    use time::macros::date;

    fn plain(today: Date) -> DayPickerContext {
        DayPickerContext::new(today)
            .locale(EN_US)
            .styles(Styles::monochrome())
            .animate(false)
    }

    fn render(table: Table<'_>, state: &mut TableState) -> Buffer {
        let (width, height) = table.required_size();
        let mut buffer = Buffer::empty(Rect::new(0, 0, width, height));
        table.render(buffer.area, &mut buffer, state);
        buffer
    }

    const NOVEMBER_2023: [&str; 7] = [
        " Su   Mo   Tu   We   Th   Fr   Sa  ",
        "────────────────────────────────── ",
        "                 1    2    3    4  ",
        "  5    6    7    8    9   10   11  ",
        " 12   13   14   15   16   17   18  ",
        " 19   20   21   22   23   24   25  ",
        " 26   27   28   29   30            ",
    ];

    #[test]
    fn test_november_2023() {
        let ctx = plain(date!(2026 - 10 - 18));
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2023 - 11 - 16)), &mut state);
        assert_eq!(buffer, Buffer::with_lines(NOVEMBER_2023));
    }

    #[test]
    fn test_today_and_caption() {
        let ctx = plain(date!(2023 - 11 - 22));
        let mut state = TableState::new(Instant::now());
        let buffer = render(
            Table::new(&ctx, date!(2023 - 11 - 01)).with_caption(),
            &mut state,
        );
        let mut expected = Buffer::with_lines([
            "           November 2023           ",
            "                                   ",
            " Su   Mo   Tu   We   Th   Fr   Sa  ",
            "────────────────────────────────── ",
            "                 1    2    3    4  ",
            "  5    6    7    8    9   10   11  ",
            " 12   13   14   15   16   17   18  ",
            " 19   20   21  [22]  23   24   25  ",
            " 26   27   28   29   30            ",
        ]);
        expected.set_style(Rect::new(11, 0, 13, 1), Styles::monochrome().caption);
        expected.set_style(Rect::new(15, 7, 4, 1), Styles::monochrome().day_today);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_hide_head_fixed_weeks_and_footer() {
        let ctx = plain(date!(2026 - 10 - 18))
            .hide_head(true)
            .fixed_weeks(true)
            .footer("Pick a day");
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2026 - 02 - 01)), &mut state);
        assert_eq!(
            buffer,
            Buffer::with_lines([
                "  1    2    3    4    5    6    7  ",
                "  8    9   10   11   12   13   14  ",
                " 15   16   17   18   19   20   21  ",
                " 22   23   24   25   26   27   28  ",
                "                                   ",
                "                                   ",
                "Pick a day                         ",
            ])
        );
    }

    #[test]
    fn test_iso_week_numbers_and_outside_days() {
        let ctx = plain(date!(2026 - 10 - 18))
            .locale(DE)
            .iso_week(true)
            .show_week_number(true)
            .show_outside_days(true);
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2021 - 01 - 15)), &mut state);
        assert_eq!(
            buffer,
            Buffer::with_lines([
                "  #   Mo   Di   Mi   Do   Fr   Sa   So  ",
                "─────────────────────────────────────── ",
                " 53   28   29   30   31    1    2    3  ",
                "  1    4    5    6    7    8    9   10  ",
                "  2   11   12   13   14   15   16   17  ",
                "  3   18   19   20   21   22   23   24  ",
                "  4   25   26   27   28   29   30   31  ",
            ])
        );
    }

    #[test]
    fn test_default_styles() {
        let mut ctx = DayPickerContext::new(date!(2023 - 11 - 22))
            .show_outside_days(true)
            .animate(false);
        ctx.selected = Some(date!(2023 - 11 - 09));
        ctx.focused = Some(date!(2023 - 11 - 10));
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2023 - 11 - 01)), &mut state);
        let styles = Styles::default();
        let style_at = |x: u16, y: u16| buffer.cell((x, y)).map(ratatui::buffer::Cell::style);
        // October 29, outside the month
        assert_eq!(style_at(1, 2), Some(styles.row.patch(styles.day_outside)));
        // November 22, today
        assert_eq!(
            style_at(16, 5),
            Some(styles.row.patch(styles.day).patch(styles.day_today))
        );
        // November 9, selected
        assert_eq!(
            style_at(21, 3),
            Some(styles.row.patch(styles.day).patch(styles.day_selected))
        );
        // November 10, focused
        assert_eq!(
            style_at(26, 3),
            Some(styles.row.patch(styles.day).patch(styles.day_focused))
        );
        assert_eq!(style_at(1, 0), Some(styles.head.patch(styles.head_cell)));
    }

    #[test]
    fn test_style_overrides() {
        let styles = Styles {
            day: Style::new().fg(Color::Green),
            ..Styles::monochrome()
        };
        let ctx = plain(date!(2026 - 10 - 18)).styles(styles);
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2023 - 11 - 01)), &mut state);
        assert_eq!(buffer.cell((17, 2)).map(|c| c.fg), Some(Color::Green));
        assert_eq!(buffer.cell((0, 2)).map(|c| c.fg), Some(Color::Reset));
    }

    #[derive(Debug)]
    struct BangHead;

    impl HeadComponent for BangHead {
        fn render(&self, _ctx: &DayPickerContext, area: Rect, buf: &mut Buffer) {
            Line::raw("!!!").render(area, buf);
        }

        fn height(&self, _ctx: &DayPickerContext) -> u16 {
            1
        }
    }

    #[derive(Debug)]
    struct NumberRow;

    impl RowComponent for NumberRow {
        fn render(
            &self,
            _ctx: &DayPickerContext,
            props: &RowProps<'_>,
            area: Rect,
            buf: &mut Buffer,
        ) {
            let first = props.dates.first().map_or(0, |d| d.day());
            Line::raw(format!(
                "week {} from {first} of {}",
                props.week_number,
                props.display_month.month()
            ))
            .render(area, buf);
        }
    }

    #[derive(Debug)]
    struct MonthFooter;

    impl FooterComponent for MonthFooter {
        fn render(&self, _ctx: &DayPickerContext, display_month: Date, area: Rect, buf: &mut Buffer) {
            Line::raw(format!("end of {}", display_month.month())).render(area, buf);
        }

        fn height(&self, _ctx: &DayPickerContext, _display_month: Date) -> u16 {
            1
        }
    }

    #[test]
    fn test_component_overrides() {
        let ctx = plain(date!(2026 - 10 - 18))
            .head_component(BangHead)
            .row_component(NumberRow)
            .footer_component(MonthFooter);
        let mut state = TableState::new(Instant::now());
        let buffer = render(Table::new(&ctx, date!(2026 - 02 - 14)), &mut state);
        assert_eq!(
            buffer,
            Buffer::with_lines([
                "!!!                                ",
                "week 6 from 1 of February          ",
                "week 7 from 8 of February          ",
                "week 8 from 15 of February         ",
                "week 9 from 22 of February         ",
                "end of February                    ",
            ])
        );
    }

    #[test]
    fn test_rows_enter_on_month_change() {
        let ctx = plain(date!(2026 - 10 - 18)).hide_head(true).animate(true);
        let start = Instant::now();
        let mut state = TableState::new(start);
        // The first month shown appears without animation
        let buffer = render(Table::new(&ctx, date!(2023 - 11 - 01)), &mut state);
        assert_eq!(buffer, Buffer::with_lines(NOVEMBER_2023[2..].iter().copied()));
        assert!(!state.is_animating());

        // Redrawing the same month keeps the rows in place
        state.tick(start + Duration::from_millis(10));
        let buffer = render(Table::new(&ctx, date!(2023 - 11 - 01)), &mut state);
        assert_eq!(buffer, Buffer::with_lines(NOVEMBER_2023[2..].iter().copied()));

        // A new month's rows start out invisible
        let switched = start + Duration::from_millis(20);
        state.tick(switched);
        let buffer = render(Table::new(&ctx, date!(2023 - 12 - 01)), &mut state);
        assert!(state.is_animating());
        assert!(buffer.content.iter().all(|c| c.symbol() == " "));

        // ... then slide in dimmed ...
        let elapsed = Duration::from_millis(80);
        let frame = enter_frame(elapsed);
        let shift = usize::try_from(frame.shift(35)).unwrap();
        assert!(shift > 0);
        assert!(frame.opacity > HIDDEN_OPACITY && frame.opacity < DIM_OPACITY);
        state.tick(switched + elapsed);
        let buffer = render(Table::new(&ctx, date!(2023 - 12 - 01)), &mut state);
        let december = [
            "                           1    2  ",
            "  3    4    5    6    7    8    9  ",
            " 10   11   12   13   14   15   16  ",
            " 17   18   19   20   21   22   23  ",
            " 24   25   26   27   28   29   30  ",
            " 31                                ",
        ];
        let shifted = december
            .iter()
            .map(|line| format!("{}{}", " ".repeat(shift), &line[..35 - shift]))
            .collect::<Vec<_>>();
        let mut expected = Buffer::with_lines(shifted);
        expected.set_style(
            *expected.area(),
            Style::new().add_modifier(Modifier::DIM),
        );
        for x in 0..u16::try_from(shift).unwrap() {
            for y in 0..6 {
                if let Some(cell) = expected.cell_mut((x, y)) {
                    cell.modifier = Modifier::empty();
                }
            }
        }
        assert_eq!(buffer, expected);

        // ... and come to rest
        state.tick(switched + Duration::from_secs(3));
        assert!(!state.is_animating());
        let buffer = render(Table::new(&ctx, date!(2023 - 12 - 01)), &mut state);
        assert_eq!(buffer, Buffer::with_lines(december));
    }

    #[test]
    fn test_weeks_and_end_of_time() {
        let ctx = plain(date!(2026 - 10 - 18));
        let table = Table::new(&ctx, date!(2023 - 11 - 16));
        let numbers = table.weeks().iter().map(|w| w.week_number).collect::<Vec<_>>();
        assert_eq!(numbers, [44, 45, 46, 47, 48]);
        assert_eq!(table.required_size(), (35, 7));
        let table = Table::new(&ctx, Date::MAX);
        assert!(table.weeks().is_empty());
        assert_eq!(table.required_size(), (35, 2));
    }

    #[test]
    fn test_footer_clipped_to_grid_width() {
        let ctx = plain(date!(2026 - 10 - 18))
            .hide_head(true)
            .footer("Weeks start on Sunday; press ? for help");
        let mut state = TableState::new(Instant::now());
        let table = Table::new(&ctx, date!(2026 - 02 - 01));
        let (_, height) = table.required_size();
        let mut buffer = Buffer::empty(Rect::new(0, 0, 45, height));
        table.render(buffer.area, &mut buffer, &mut state);
        assert_eq!(
            buffer,
            Buffer::with_lines([
                "  1    2    3    4    5    6    7            ",
                "  8    9   10   11   12   13   14            ",
                " 15   16   17   18   19   20   21            ",
                " 22   23   24   25   26   27   28            ",
                "Weeks start on Sunday; press ? for           ",
            ])
        );
    }

    #[test]
    fn test_clipped_to_small_area() {
        let ctx = plain(date!(2026 - 10 - 18));
        let mut state = TableState::new(Instant::now());
        let mut buffer = Buffer::empty(Rect::new(0, 0, 12, 3));
        Table::new(&ctx, date!(2023 - 11 - 16)).render(buffer.area, &mut buffer, &mut state);
        assert_eq!(
            buffer,
            Buffer::with_lines([" Su   Mo   T", "────────────", "            "])
        );
    }
}
