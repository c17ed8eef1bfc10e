use raylib::prelude::*;

use crate::constants::{REVEAL_DURATION, REVEAL_RISE};

/// One-shot fade-in-up for a page section, fired the first time the section
/// scrolls into view and never again.
pub struct Reveal {
    fired: bool,
    timer: f32,
    tween_alpha: ease::Tween,
    tween_rise: ease::Tween,
    alpha: f32,
    rise: f32,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            fired: false,
            timer: 0.0,
            tween_alpha: ease::Tween::new(ease::cubic_out, 0.0, 1.0, REVEAL_DURATION),
            tween_rise: ease::Tween::new(ease::cubic_out, REVEAL_RISE, 0.0, REVEAL_DURATION),
            alpha: 0.0,
            rise: REVEAL_RISE,
        }
    }

    pub fn trigger(&mut self) {
        self.fired = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.fired || self.timer >= REVEAL_DURATION {
            return;
        }
        self.alpha = self.tween_alpha.apply(dt);
        self.rise = self.tween_rise.apply(dt);
        self.timer += dt;
        if self.timer >= REVEAL_DURATION {
            self.alpha = 1.0;
            self.rise = 0.0;
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Remaining downward offset in pixels; zero once fully revealed.
    pub fn rise(&self) -> f32 {
        self.rise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(reveal: &mut Reveal, seconds: f32) {
        let steps = (seconds * 60.0) as usize;
        for _ in 0..steps {
            reveal.update(1.0 / 60.0);
        }
    }

    #[test]
    fn hidden_until_triggered() {
        let mut reveal = Reveal::new();
        run(&mut reveal, 2.0);
        assert_eq!(reveal.alpha(), 0.0);
        assert_eq!(reveal.rise(), REVEAL_RISE);
    }

    #[test]
    fn settles_fully_visible() {
        let mut reveal = Reveal::new();
        reveal.trigger();
        run(&mut reveal, REVEAL_DURATION * 2.0);
        assert_eq!(reveal.alpha(), 1.0);
        assert_eq!(reveal.rise(), 0.0);
    }

    #[test]
    fn retrigger_does_not_restart() {
        let mut reveal = Reveal::new();
        reveal.trigger();
        run(&mut reveal, REVEAL_DURATION * 2.0);
        reveal.trigger();
        run(&mut reveal, 0.1);
        assert_eq!(reveal.alpha(), 1.0);
        assert_eq!(reveal.rise(), 0.0);
    }
}
