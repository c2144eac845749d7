use ratatui::{prelude::*, widgets::Paragraph};

use crate::core::state::BackStackEntry;

const SEPARATOR: &str = " > ";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewContext<'a> {
    pub back_stack: &'a [BackStackEntry],
    pub message: Option<&'a str>,
}

/// Two lines at the bottom: the back stack as a breadcrumb and the status message.
pub struct StatusBarWidget<'a> {
    ctx: ViewContext<'a>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(ctx: ViewContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn breadcrumb(&self) -> String {
        self.ctx
            .back_stack
            .iter()
            .map(|entry| entry.route.path())
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Min(0),
                Constraint::Length(1), // Breadcrumb
                Constraint::Length(1), // Status message
            ],
        )
        .split(area);

        let breadcrumb = Span::styled(self.breadcrumb(), Style::default().fg(Color::Gray).italic());
        Paragraph::new(breadcrumb)
            .style(Style::default().bg(Color::Black))
            .render(layout[1], buf);

        Paragraph::new(self.ctx.message.unwrap_or_default()).render(layout[2], buf);
    }
}
