use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{core::state::RewardsState, domain::reward::Reward};

/// Side panel listing the channel point rewards.
#[derive(Clone)]
pub struct RewardListWidget<'a> {
    rewards: &'a RewardsState,
    points_name: Option<&'a str>,
}

impl<'a> RewardListWidget<'a> {
    pub fn new(rewards: &'a RewardsState, points_name: Option<&'a str>) -> Self {
        Self {
            rewards,
            points_name,
        }
    }

    fn item(reward: &Reward) -> ListItem<'_> {
        let color = reward
            .rgb()
            .map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b));
        ListItem::new(Line::from(vec![
            Span::styled("  ", Style::default().bg(color)),
            Span::raw(" "),
            Span::raw(reward.name.as_str()),
            Span::raw(" "),
            Span::styled(reward.formatted_amount(), Style::default().bold()),
        ]))
    }
}

impl<'a> Widget for RewardListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let title = self.points_name.unwrap_or("Rewards");
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.rewards.is_loading {
            Paragraph::new("Loading rewards...")
                .block(block)
                .render(area, buf);
        } else if let Some(error) = &self.rewards.error {
            Paragraph::new(format!("Rewards unavailable: {error}"))
                .style(Style::default().fg(Color::Red))
                .block(block)
                .render(area, buf);
        } else {
            let items: Vec<ListItem> = self.rewards.rewards.iter().map(Self::item).collect();
            Widget::render(List::new(items).block(block), area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_renders_rewards_with_amounts() {
        let state = RewardsState {
            rewards: vec![Reward {
                name: "Hydrate".to_string(),
                color: "#F97B2A".to_string(),
                icon: "LocalDrink".to_string(),
                token_amount: 12000,
            }],
            ..Default::default()
        };
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);

        RewardListWidget::new(&state, Some("Webs")).render(area, &mut buf);

        let text = rendered(&buf);
        assert!(text.contains("Webs"));
        assert!(text.contains("Hydrate 12,000"));
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(0xF9, 0x7B, 0x2A));
    }

    #[test]
    fn test_renders_loading_state() {
        let state = RewardsState {
            is_loading: true,
            ..Default::default()
        };
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);

        RewardListWidget::new(&state, None).render(area, &mut buf);

        assert!(rendered(&buf).contains("Loading rewards..."));
    }
}
