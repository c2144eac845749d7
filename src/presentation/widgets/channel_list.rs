use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::domain::channel::Channel;

#[derive(Clone)]
pub struct ChannelListWidget<'a> {
    channels: &'a [Channel],
    selected: usize,
}

impl<'a> ChannelListWidget<'a> {
    pub fn new(channels: &'a [Channel], selected: usize) -> Self {
        Self { channels, selected }
    }

    pub fn item(channel: &Channel) -> ListItem<'_> {
        let mut spans = vec![Span::styled(
            channel.display_name(),
            Style::default().bold(),
        )];
        if let Some(description) = &channel.extras.description {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                description.as_str(),
                Style::default().fg(Color::Gray),
            ));
        }
        if !channel.extras.tags.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("#{}", channel.extras.tags.join(" #")),
                Style::default().fg(Color::Magenta),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl<'a> Widget for ChannelListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let items: Vec<ListItem> = self.channels.iter().map(Self::item).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Live channels"))
            .highlight_style(Style::default().reversed())
            .highlight_symbol("> ");

        let mut state = ListState::default();
        if !self.channels.is_empty() {
            state.select(Some(self.selected));
        }
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
