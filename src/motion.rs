use crate::line::{Line, Phase, Velocity, MAX_DEGREE};
use log::debug;
use rand::Rng;

/// advance a phase angle by `step` give or take up to `step_range`, wrapping at 180
pub fn next_degree(degree: u16, step: u16, step_range: u16, rng: &mut impl Rng) -> u16 {
    let range = step_range as i32;
    let d = degree as i32 + step as i32 + rng.gen_range(-range..=range);
    d.rem_euclid(MAX_DEGREE as i32) as u16
}

/// how far a coordinate moves this tick
pub fn displacement(velocity: i16, degree: u16) -> i32 {
    (velocity as f64 * (degree as f64).to_radians().sin()).round() as i32
}

/// Bounce `value` back inside `[0, bound)`, flipping `velocity` if it hit an
/// edge. Only one reflection happens per call; whatever overshoot is left
/// after it is clamped.
pub fn reflect(value: i32, velocity: &mut i16, bound: i32) -> i32 {
    let reflected = if value < 0 {
        *velocity = -*velocity;
        -value
    } else if value >= bound {
        *velocity = -*velocity;
        bound - (value - bound)
    } else {
        value
    };
    let clamped = reflected.clamp(0, bound - 1);
    if clamped != reflected {
        debug!(
            "coordinate {} still outside [0, {}) after reflection, clamped to {}",
            reflected, bound, clamped
        );
    }
    clamped
}

/// Moves the line. Each of the four coordinates oscillates independently:
/// its phase creeps forward a random amount every tick and the coordinate
/// is pushed along by `velocity * sin(phase)`, bouncing off the screen edges.
pub struct MotionEngine {
    line: Line,
    velocity: Velocity,
    phase: Phase,
    width: u16,
    height: u16,
    step: u16,
    step_range: u16,
}

impl MotionEngine {
    pub fn new(
        line: Line,
        velocity: Velocity,
        phase: Phase,
        (width, height): (u16, u16),
        step: u16,
        step_range: u16,
    ) -> Self {
        MotionEngine {
            line,
            velocity,
            phase,
            width,
            height,
            step,
            step_range,
        }
    }

    /// random line and phases, every coordinate moving forward at `step`
    pub fn random(
        (width, height): (u16, u16),
        step: u16,
        step_range: u16,
        color: u8,
        rng: &mut impl Rng,
    ) -> Self {
        let line = Line::random(width, height, color, rng);
        let phase = Phase::random(rng);
        MotionEngine::new(
            line,
            Velocity::uniform(step as i16),
            phase,
            (width, height),
            step,
            step_range,
        )
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// recolour the line and move it on by one tick
    pub fn advance(&mut self, color: u8, rng: &mut impl Rng) {
        self.line.color = color;

        let bounds = [self.width, self.height, self.width, self.height];
        let mut coords = self.line.coords();
        for i in 0..4 {
            let degree = next_degree(self.phase.0[i], self.step, self.step_range, rng);
            self.phase.0[i] = degree;
            let moved = coords[i] as i32 + displacement(self.velocity.0[i], degree);
            coords[i] = reflect(moved, &mut self.velocity.0[i], bounds[i] as i32) as u16;
        }
        self.line.set_coords(coords);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn test_next_degree_wraps() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(next_degree(170, 8, 0, &mut rng), 178);
        assert_eq!(next_degree(178, 8, 0, &mut rng), 6);
        assert_eq!(next_degree(0, 0, 0, &mut rng), 0);
    }

    #[test]
    fn test_next_degree_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut degree = 0;
        for _ in 0..10_000 {
            let next = next_degree(degree, 8, 6, &mut rng);
            assert!(next < MAX_DEGREE);
            let advanced = (next as i32 - degree as i32).rem_euclid(MAX_DEGREE as i32);
            assert!((2..=14).contains(&advanced));
            degree = next;
        }
    }

    #[test]
    fn test_next_degree_handles_backwards_jitter() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert!(next_degree(0, 1, 20, &mut rng) < MAX_DEGREE);
        }
    }

    #[rstest]
    #[case(8, 0, 0)]
    #[case(8, 90, 8)]
    #[case(-8, 90, -8)]
    #[case(8, 30, 4)]
    #[case(8, 179, 0)]
    fn test_displacement(#[case] velocity: i16, #[case] degree: u16, #[case] expected: i32) {
        assert_eq!(displacement(velocity, degree), expected);
    }

    #[test]
    fn test_reflect_off_zero() {
        let mut v = 8;
        assert_eq!(reflect(-3, &mut v, 320), 3);
        assert_eq!(v, -8);
    }

    #[test]
    fn test_reflect_off_far_edge() {
        let mut v = -8;
        assert_eq!(reflect(325, &mut v, 320), 315);
        assert_eq!(v, 8);
    }

    #[test]
    fn test_reflect_inside_untouched() {
        let mut v = 8;
        assert_eq!(reflect(0, &mut v, 320), 0);
        assert_eq!(reflect(319, &mut v, 320), 319);
        assert_eq!(v, 8);
    }

    #[test]
    fn test_reflect_on_bound_is_clamped() {
        let mut v = 8;
        assert_eq!(reflect(320, &mut v, 320), 319);
        assert_eq!(v, -8);
    }

    #[test]
    fn test_reflect_flips_once_on_big_overshoot() {
        let mut v = 40;
        assert_eq!(reflect(-30, &mut v, 5), 4);
        assert_eq!(v, -40);
        assert_eq!(reflect(30, &mut v, 5), 0);
        assert_eq!(v, 40);
    }

    #[test]
    fn test_advance_scenario_bounce_off_left() {
        let mut rng = StdRng::seed_from_u64(4);
        // phase 172 + 8 = 180 -> 0, so only x1 (phase 82 -> 90) moves
        let mut engine = MotionEngine::new(
            Line::new(2, 50, 100, 50, 0),
            Velocity([-5, 8, 8, 8]),
            Phase([82, 172, 172, 172]),
            (320, 200),
            8,
            0,
        );
        engine.advance(7, &mut rng);
        assert_eq!(engine.line(), &Line::new(3, 50, 100, 50, 7));
        assert_eq!(engine.velocity(), &Velocity([5, 8, 8, 8]));
        assert_eq!(engine.phase(), &Phase([90, 0, 0, 0]));
    }

    #[test]
    fn test_advance_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut engine = MotionEngine::random((320, 200), 8, 6, 0, &mut rng);
        for tick in 0..20_000 {
            let before = *engine.velocity();
            engine.advance((tick % 255 + 1) as u8, &mut rng);
            let l = engine.line();
            assert!(l.x1 < 320 && l.x2 < 320, "{:?}", l);
            assert!(l.y1 < 200 && l.y2 < 200, "{:?}", l);
            assert!(engine.phase().0.iter().all(|d| *d < MAX_DEGREE));
            // a velocity only ever changes sign, never magnitude
            for (a, b) in before.0.iter().zip(engine.velocity().0.iter()) {
                assert!(a == b || *a == -*b);
            }
        }
    }

    #[test]
    fn test_advance_stays_in_narrow_bounds() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut engine = MotionEngine::new(
            Line::new(1, 1, 2, 2, 0),
            Velocity::uniform(50),
            Phase([0, 45, 90, 135]),
            (4, 3),
            8,
            6,
        );
        for _ in 0..5_000 {
            engine.advance(1, &mut rng);
            let l = engine.line();
            assert!(l.x1 < 4 && l.x2 < 4 && l.y1 < 3 && l.y2 < 3, "{:?}", l);
        }
    }

    #[test]
    fn test_advance_sets_colour() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = MotionEngine::random((640, 480), 8, 6, 0, &mut rng);
        assert_eq!(engine.line().color, 0);
        engine.advance(12, &mut rng);
        assert_eq!(engine.line().color, 12);
    }

    #[test]
    fn test_random_start() {
        let mut rng = StdRng::seed_from_u64(8);
        let engine = MotionEngine::random((320, 200), 8, 6, 0, &mut rng);
        assert_eq!(engine.velocity(), &Velocity::uniform(8));
        assert!(engine.phase().0.iter().all(|d| *d < MAX_DEGREE));
    }
}
