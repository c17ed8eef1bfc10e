use anyhow::{Result, bail};
use log::warn;

/// Cyclic single-focus selector over a fixed number of items.
///
/// Navigation accumulates into an unbounded `raw_index`; the index actually
/// shown is derived at read time with a Euclidean wrap, so repeated "next"
/// past the last item cycles back to the first without special-casing the
/// ends. `direction` is the sign of the last step and only feeds the card
/// transition; it carries no other meaning.
pub struct Carousel {
    raw_index: i64,
    direction: i32,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            bail!("carousel needs at least one item");
        }
        Ok(Self { raw_index: 0, direction: 0, len })
    }

    /// Step forward (positive) or backward (negative). Any non-zero step is
    /// accepted; no bounds check here, the wrap happens in `display_index`.
    pub fn paginate(&mut self, step: i64) {
        self.raw_index += step;
        self.direction = step.signum() as i32;
    }

    /// Select an item directly, collapsing any accumulated drift. The
    /// transition direction is taken from where the target sits relative to
    /// the item currently shown. Targets past the end are clamped to the
    /// last item (callers only offer valid indices, so this path is a
    /// caller bug and gets logged).
    pub fn jump_to(&mut self, target: usize) {
        let target = if target >= self.len {
            warn!("jump_to({target}) out of range for {} items, clamping", self.len);
            self.len - 1
        } else {
            target
        };

        let current = self.display_index();
        self.direction = if target > current {
            1
        } else if target < current {
            -1
        } else {
            0
        };
        self.raw_index = target as i64;
    }

    /// The always-valid index into the item sequence, in `[0, len)`.
    pub fn display_index(&self) -> usize {
        self.raw_index.rem_euclid(self.len as i64) as usize
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    fn raw_index(&self) -> i64 {
        self.raw_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_sequence() {
        assert!(Carousel::new(0).is_err());
    }

    #[test]
    fn display_index_stays_in_range() {
        for len in 1..6usize {
            let mut c = Carousel::new(len).unwrap();
            for step in [-7i64, -1, 1, 3, 11, -23] {
                c.paginate(step);
                assert!(c.display_index() < len, "len={len} raw={}", c.raw_index());
            }
        }
    }

    #[test]
    fn wrap_is_periodic() {
        let mut a = Carousel::new(4).unwrap();
        let mut b = Carousel::new(4).unwrap();
        a.paginate(5);
        b.paginate(5 + 4); // one full lap further
        assert_eq!(a.display_index(), b.display_index());

        a.paginate(-13);
        b.paginate(-13);
        assert_eq!(a.display_index(), b.display_index());
    }

    #[test]
    fn n_forward_steps_return_to_start() {
        let mut c = Carousel::new(3).unwrap();
        c.paginate(7); // arbitrary starting drift
        let start = c.display_index();
        for _ in 0..3 {
            c.paginate(1);
            assert_eq!(c.direction(), 1);
        }
        assert_eq!(c.display_index(), start);
    }

    #[test]
    fn n_backward_steps_return_to_start() {
        let mut c = Carousel::new(5).unwrap();
        c.paginate(-2);
        let start = c.display_index();
        for _ in 0..5 {
            c.paginate(-1);
            assert_eq!(c.direction(), -1);
        }
        assert_eq!(c.display_index(), start);
    }

    #[test]
    fn three_item_walkthrough() {
        let mut c = Carousel::new(3).unwrap();
        assert_eq!(c.display_index(), 0);
        assert_eq!(c.direction(), 0);

        c.paginate(1);
        assert_eq!((c.display_index(), c.direction()), (1, 1));
        c.paginate(1);
        assert_eq!((c.display_index(), c.direction()), (2, 1));
        c.paginate(1); // wraps forward
        assert_eq!((c.display_index(), c.direction()), (0, 1));
        c.paginate(-1); // wraps backward
        assert_eq!((c.display_index(), c.direction()), (2, -1));
    }

    #[test]
    fn backward_from_initial_wraps_to_last() {
        let mut c = Carousel::new(3).unwrap();
        c.paginate(-1);
        assert_eq!(c.display_index(), 2);
        assert_eq!(c.raw_index(), -1);
    }

    #[test]
    fn jump_lands_exactly_and_collapses_drift() {
        let mut c = Carousel::new(3).unwrap();
        c.paginate(10); // raw_index well past the sequence
        c.jump_to(2);
        assert_eq!(c.display_index(), 2);
        assert_eq!(c.raw_index(), 2);
    }

    #[test]
    fn jump_direction_follows_relative_position() {
        let mut c = Carousel::new(3).unwrap();
        c.jump_to(2); // forward from 0
        assert_eq!(c.direction(), 1);
        c.jump_to(0); // backward from 2
        assert_eq!(c.direction(), -1);
        c.jump_to(0); // already there
        assert_eq!(c.direction(), 0);
    }

    #[test]
    fn jump_from_initial_state() {
        let mut c = Carousel::new(3).unwrap();
        c.jump_to(2);
        assert_eq!((c.display_index(), c.direction(), c.raw_index()), (2, 1, 2));
    }

    #[test]
    fn out_of_range_jump_clamps_to_last() {
        let mut c = Carousel::new(3).unwrap();
        c.jump_to(9);
        assert_eq!(c.display_index(), 2);
        assert_eq!(c.raw_index(), 2);
    }

    #[test]
    fn single_item_carousel_is_stable() {
        let mut c = Carousel::new(1).unwrap();
        c.paginate(1);
        c.paginate(1);
        c.paginate(-5);
        assert_eq!(c.display_index(), 0);
        c.jump_to(0);
        assert_eq!(c.direction(), 0);
    }
}
