use raylib::prelude::*;

use crate::constants::CARD_DURATION;

/// How a testimonial change should travel across the card area. Offsets are
/// normalized to the card width: +1.0 is one full width to the right.
pub struct TransitionSpec {
    pub enter_from: f32,
    pub exit_to: f32,
    pub duration: f32,
}

impl TransitionSpec {
    /// A zero-distance, zero-duration spec; the transition is suppressed.
    pub fn none() -> Self {
        Self { enter_from: 0.0, exit_to: 0.0, duration: 0.0 }
    }
}

/// Pure mapping from a navigation event to its visual travel. Moving forward
/// the new card enters from the right while the old one exits left; moving
/// backward is mirrored. Knows nothing about the carousel's arithmetic.
pub fn transition_spec(from: usize, to: usize, direction: i32) -> TransitionSpec {
    if direction == 0 || from == to {
        return TransitionSpec::none();
    }
    if direction > 0 {
        TransitionSpec { enter_from: 1.0, exit_to: -1.0, duration: CARD_DURATION }
    } else {
        TransitionSpec { enter_from: -1.0, exit_to: 1.0, duration: CARD_DURATION }
    }
}

/// Animation state for the testimonial card swap.
///
/// The outgoing card is remembered by testimonial id, not by position, so a
/// change in the underlying list cannot make the exit animation show the
/// wrong entry. Starting a new motion while one is in flight simply replaces
/// it; nothing feeds back into the carousel state.
pub struct CardMotion {
    outgoing_id: Option<String>,
    timer: f32,
    duration: f32,
    is_animating: bool,

    tween_in_x: ease::Tween,
    tween_in_alpha: ease::Tween,
    tween_out_x: ease::Tween,
    tween_out_alpha: ease::Tween,

    in_x: f32,
    in_alpha: f32,
    out_x: f32,
    out_alpha: f32,
}

impl CardMotion {
    pub fn idle() -> Self {
        Self {
            outgoing_id: None,
            timer: 0.0,
            duration: 0.0,
            is_animating: false,
            tween_in_x: ease::Tween::new(ease::linear_none, 0.0, 0.0, 1.0),
            tween_in_alpha: ease::Tween::new(ease::linear_none, 1.0, 1.0, 1.0),
            tween_out_x: ease::Tween::new(ease::linear_none, 0.0, 0.0, 1.0),
            tween_out_alpha: ease::Tween::new(ease::linear_none, 0.0, 0.0, 1.0),
            in_x: 0.0,
            in_alpha: 1.0,
            out_x: 0.0,
            out_alpha: 0.0,
        }
    }

    /// Start animating toward the newly selected card. `outgoing_id` is the
    /// id of the testimonial that was on screen when navigation happened.
    pub fn begin(&mut self, outgoing_id: String, spec: &TransitionSpec) {
        if spec.duration <= 0.0 {
            *self = Self::idle();
            return;
        }
        self.outgoing_id = Some(outgoing_id);
        self.timer = 0.0;
        self.duration = spec.duration;
        self.is_animating = true;

        self.tween_in_x = ease::Tween::new(ease::cubic_out, spec.enter_from, 0.0, spec.duration);
        self.tween_in_alpha = ease::Tween::new(ease::linear_none, 0.0, 1.0, spec.duration);
        self.tween_out_x = ease::Tween::new(ease::cubic_out, 0.0, spec.exit_to, spec.duration);
        self.tween_out_alpha = ease::Tween::new(ease::linear_none, 1.0, 0.0, spec.duration);

        self.in_x = spec.enter_from;
        self.in_alpha = 0.0;
        self.out_x = 0.0;
        self.out_alpha = 1.0;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }

        self.in_x = self.tween_in_x.apply(dt);
        self.in_alpha = self.tween_in_alpha.apply(dt);
        self.out_x = self.tween_out_x.apply(dt);
        self.out_alpha = self.tween_out_alpha.apply(dt);

        self.timer += dt;
        if self.timer >= self.duration {
            self.is_animating = false;
            self.outgoing_id = None;
            self.in_x = 0.0;
            self.in_alpha = 1.0;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// Normalized x offset and alpha for the card being shown.
    pub fn incoming(&self) -> (f32, f32) {
        (self.in_x, self.in_alpha)
    }

    /// The superseded card, if one is still sliding out.
    pub fn outgoing(&self) -> Option<(&str, f32, f32)> {
        self.outgoing_id.as_deref().map(|id| (id, self.out_x, self.out_alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_enters_from_the_right() {
        let spec = transition_spec(0, 1, 1);
        assert_eq!(spec.enter_from, 1.0);
        assert_eq!(spec.exit_to, -1.0);
        assert!(spec.duration > 0.0);
    }

    #[test]
    fn backward_enters_from_the_left() {
        let spec = transition_spec(2, 1, -1);
        assert_eq!(spec.enter_from, -1.0);
        assert_eq!(spec.exit_to, 1.0);
    }

    #[test]
    fn zero_direction_is_suppressed() {
        let spec = transition_spec(1, 1, 0);
        assert_eq!(spec.duration, 0.0);
        assert_eq!(spec.enter_from, 0.0);
        assert_eq!(spec.exit_to, 0.0);
    }

    #[test]
    fn suppressed_spec_leaves_motion_idle() {
        let mut motion = CardMotion::idle();
        motion.begin("t1".to_string(), &TransitionSpec::none());
        assert!(!motion.is_animating());
        assert_eq!(motion.incoming(), (0.0, 1.0));
        assert!(motion.outgoing().is_none());
    }

    #[test]
    fn motion_settles_after_duration() {
        let mut motion = CardMotion::idle();
        motion.begin("t1".to_string(), &transition_spec(0, 1, 1));
        assert!(motion.is_animating());
        assert!(motion.outgoing().is_some());

        // Run well past the duration in small steps.
        for _ in 0..120 {
            motion.update(1.0 / 60.0);
        }
        assert!(!motion.is_animating());
        assert!(motion.outgoing().is_none());
        assert_eq!(motion.incoming(), (0.0, 1.0));
    }

    #[test]
    fn new_motion_supersedes_in_flight_one() {
        let mut motion = CardMotion::idle();
        motion.begin("t1".to_string(), &transition_spec(0, 1, 1));
        motion.update(0.1);

        motion.begin("t2".to_string(), &transition_spec(1, 2, 1));
        let (id, _, _) = motion.outgoing().unwrap();
        assert_eq!(id, "t2");
        let (x, alpha) = motion.incoming();
        assert_eq!(x, 1.0);
        assert_eq!(alpha, 0.0);
    }
}
