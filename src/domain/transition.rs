use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Duration shared by every slide animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Edge a screen slides towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    SlideIn(SlideDirection),
    SlideOut(SlideDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub animation: Animation,
    pub duration: Duration,
}

/// Whether a transition pushes a new entry or pops back to an older one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavDirection {
    Push,
    Pop,
}

/// Enter/exit animation contract for destinations that opt into sliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPolicy {
    pub enter: AnimationSpec,
    pub exit: AnimationSpec,
    pub pop_enter: AnimationSpec,
    pub pop_exit: AnimationSpec,
}

impl TransitionPolicy {
    /// New screens come in from the trailing edge; going back reverses it.
    pub const fn slide() -> Self {
        Self::slide_with_duration(DEFAULT_DURATION)
    }

    pub const fn slide_with_duration(duration: Duration) -> Self {
        const fn spec(animation: Animation, duration: Duration) -> AnimationSpec {
            AnimationSpec {
                animation,
                duration,
            }
        }

        Self {
            enter: spec(Animation::SlideIn(SlideDirection::Left), duration),
            exit: spec(Animation::SlideOut(SlideDirection::Left), duration),
            pop_enter: spec(Animation::SlideIn(SlideDirection::Right), duration),
            pop_exit: spec(Animation::SlideOut(SlideDirection::Right), duration),
        }
    }

    /// Returns the `(enter, exit)` pair to play for the given direction.
    pub fn for_direction(&self, direction: NavDirection) -> (AnimationSpec, AnimationSpec) {
        match direction {
            NavDirection::Push => (self.enter, self.exit),
            NavDirection::Pop => (self.pop_enter, self.pop_exit),
        }
    }

    pub fn duration(&self) -> Duration {
        self.enter.duration
    }
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self::slide()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_slide_policy() {
        let policy = TransitionPolicy::slide();
        assert_eq!(
            policy.enter.animation,
            Animation::SlideIn(SlideDirection::Left)
        );
        assert_eq!(
            policy.exit.animation,
            Animation::SlideOut(SlideDirection::Left)
        );
        assert_eq!(
            policy.pop_enter.animation,
            Animation::SlideIn(SlideDirection::Right)
        );
        assert_eq!(
            policy.pop_exit.animation,
            Animation::SlideOut(SlideDirection::Right)
        );
        for spec in [policy.enter, policy.exit, policy.pop_enter, policy.pop_exit] {
            assert_eq!(spec.duration, Duration::from_millis(500));
        }
    }

    #[test]
    fn test_for_direction() {
        let policy = TransitionPolicy::slide();
        assert_eq!(
            policy.for_direction(NavDirection::Push),
            (policy.enter, policy.exit)
        );
        assert_eq!(
            policy.for_direction(NavDirection::Pop),
            (policy.pop_enter, policy.pop_exit)
        );
    }
}
