//! Terminal rendition of slide animations
//!
//! A terminal cannot draw outside its frame, so the entering screen is drawn
//! into the part of the body it has already slid over.

use std::time::{Duration, Instant};

use ratatui::prelude::Rect;

use crate::{
    core::state::TransitionEvent,
    domain::transition::{Animation, AnimationSpec, SlideDirection},
};

/// Enter animation frame of the visible screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub animation: Animation,
    pub progress: f64,
}

impl Slide {
    pub fn area(&self, area: Rect) -> Rect {
        slide_in_area(area, self.animation, self.progress)
    }
}

/// A transition being played, started at a known instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveTransition {
    pub event: TransitionEvent,
    pub started: Instant,
}

impl ActiveTransition {
    pub fn new(event: TransitionEvent, started: Instant) -> Self {
        Self { event, started }
    }

    /// Enter animation of the destination, `None` when it has no policy.
    pub fn enter(&self) -> Option<AnimationSpec> {
        self.event
            .policy
            .map(|policy| policy.for_direction(self.event.direction).0)
    }

    /// Fraction of the enter animation played at `now`, `None` once it finished.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        let spec = self.enter()?;
        let elapsed = now.saturating_duration_since(self.started);
        progress(elapsed, spec.duration)
    }

    pub fn slide(&self, now: Instant) -> Option<Slide> {
        Some(Slide {
            animation: self.enter()?.animation,
            progress: self.progress(now)?,
        })
    }
}

fn progress(elapsed: Duration, duration: Duration) -> Option<f64> {
    if duration.is_zero() || elapsed >= duration {
        return None;
    }
    Some(elapsed.as_secs_f64() / duration.as_secs_f64())
}

/// Portion of `area` covered by a screen sliding in, `progress` in `[0, 1]`.
pub fn slide_in_area(area: Rect, animation: Animation, progress: f64) -> Rect {
    let Animation::SlideIn(direction) = animation else {
        return area;
    };
    let progress = progress.clamp(0.0, 1.0);
    let visible = (f64::from(area.width) * progress).round() as u16;
    match direction {
        // Enters from the right edge.
        SlideDirection::Left => Rect {
            x: area.x + area.width - visible,
            width: visible,
            ..area
        },
        // Enters from the left edge.
        SlideDirection::Right => Rect {
            width: visible,
            ..area
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::{
        screen::Screen,
        transition::{NavDirection, TransitionPolicy},
    };

    fn event(direction: NavDirection, policy: Option<TransitionPolicy>) -> TransitionEvent {
        TransitionEvent {
            from: None,
            to: Screen::Messages.create_route("a").unwrap(),
            direction,
            policy,
        }
    }

    #[rstest]
    #[case(SlideDirection::Left, 0.5, Rect::new(50, 2, 50, 10))]
    #[case(SlideDirection::Right, 0.5, Rect::new(0, 2, 50, 10))]
    #[case(SlideDirection::Left, 0.0, Rect::new(100, 2, 0, 10))]
    #[case(SlideDirection::Left, 1.0, Rect::new(0, 2, 100, 10))]
    #[case(SlideDirection::Right, 7.0, Rect::new(0, 2, 100, 10))]
    fn test_slide_in_area(
        #[case] direction: SlideDirection,
        #[case] progress: f64,
        #[case] expected: Rect,
    ) {
        let area = Rect::new(0, 2, 100, 10);
        assert_eq!(
            slide_in_area(area, Animation::SlideIn(direction), progress),
            expected
        );
    }

    #[test]
    fn test_slide_out_keeps_area() {
        let area = Rect::new(0, 0, 10, 10);
        assert_eq!(
            slide_in_area(area, Animation::SlideOut(SlideDirection::Left), 0.3),
            area
        );
    }

    #[test]
    fn test_push_plays_enter_and_pop_plays_pop_enter() {
        let policy = Some(TransitionPolicy::slide());
        let now = Instant::now();
        let push = ActiveTransition::new(event(NavDirection::Push, policy), now);
        let pop = ActiveTransition::new(event(NavDirection::Pop, policy), now);

        assert_eq!(
            push.enter().map(|spec| spec.animation),
            Some(Animation::SlideIn(SlideDirection::Left))
        );
        assert_eq!(
            pop.enter().map(|spec| spec.animation),
            Some(Animation::SlideIn(SlideDirection::Right))
        );
    }

    #[test]
    fn test_progress_runs_for_policy_duration() {
        let started = Instant::now();
        let transition =
            ActiveTransition::new(event(NavDirection::Push, Some(TransitionPolicy::slide())), started);

        assert_eq!(transition.progress(started), Some(0.0));
        assert_eq!(
            transition.progress(started + Duration::from_millis(250)),
            Some(0.5)
        );
        assert_eq!(transition.progress(started + Duration::from_millis(500)), None);
        assert_eq!(
            transition.slide(started + Duration::from_millis(100)),
            Some(Slide {
                animation: Animation::SlideIn(SlideDirection::Left),
                progress: 0.2,
            })
        );
    }

    #[test]
    fn test_no_policy_means_no_animation() {
        let transition = ActiveTransition::new(event(NavDirection::Push, None), Instant::now());
        assert_eq!(transition.progress(Instant::now()), None);
    }
}
