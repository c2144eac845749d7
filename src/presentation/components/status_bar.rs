//! Status bar component
//!
//! Displays the back stack and the status message at the bottom of the screen.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::AppState,
    presentation::widgets::status_bar::{StatusBarWidget, ViewContext},
};

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let ctx = ViewContext {
            back_stack: state.nav.back_stack(),
            message: state.system.status_message.as_deref(),
        };
        frame.render_widget(StatusBarWidget::new(ctx), area);
    }
}
