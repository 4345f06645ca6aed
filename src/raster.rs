use crate::display::Display;
use crate::line::Line;

/// Every pixel on the path between the two endpoints of `line`, both
/// included, using integer-only Bresenham stepping.
///
/// Endpoints are visited in canonical order (smallest `(x, y)` first) so a
/// line and its reverse always cover the same pixels.
pub fn line_points(line: &Line) -> impl Iterator<Item = (i32, i32)> {
    let a = (line.x1 as i32, line.y1 as i32);
    let b = (line.x2 as i32, line.y2 as i32);
    let ((x1, y1), (x2, y2)) = if a <= b { (a, b) } else { (b, a) };

    let dx = (x2 - x1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let dy = -(y2 - y1).abs();
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut e1 = dx + dy;

    let (mut x, mut y) = (x1, y1);
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let point = (x, y);
        if x == x2 && y == y2 {
            done = true;
            return Some(point);
        }
        let e2 = 2 * e1;
        if e2 >= dy {
            e1 += dy;
            x += sx;
        }
        if e2 <= dx {
            e1 += dx;
            y += sy;
        }
        Some(point)
    })
}

/// plot `line` in its own colour; off-screen pixels are dropped
pub fn draw_line(line: &Line, display: &mut dyn Display) {
    let resolution = *display.resolution();
    for (x, y) in line_points(line) {
        if resolution.contains(x, y) {
            display.set_pixel(x, y, line.color);
        }
    }
}

/// fill the box spanned by two corners, excluding the far row and column
pub fn fill_box(x1: i32, y1: i32, x2: i32, y2: i32, color: u8, display: &mut dyn Display) {
    let (x1, x2) = (x1.min(x2), x1.max(x2));
    let (y1, y2) = (y1.min(y2), y1.max(y2));
    let resolution = *display.resolution();
    for y in y1.max(0)..y2.min(resolution.height() as i32) {
        for x in x1.max(0)..x2.min(resolution.width() as i32) {
            display.set_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayMode, DummyDisplay};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use std::collections::BTreeSet;

    fn pixel_set(line: &Line) -> BTreeSet<(i32, i32)> {
        line_points(line).collect()
    }

    #[test]
    fn test_shallow_line() {
        let px: Vec<_> = line_points(&Line::new(0, 0, 4, 2, 1)).collect();
        assert_eq!(px, vec![(0, 0), (1, 1), (2, 1), (3, 2), (4, 2)]);
        assert!(px.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_single_point() {
        let px: Vec<_> = line_points(&Line::new(7, 9, 7, 9, 1)).collect();
        assert_eq!(px, vec![(7, 9)]);
    }

    #[rstest]
    #[case::horizontal(Line::new(0, 5, 10, 5, 1), 11)]
    #[case::vertical(Line::new(3, 20, 3, 0, 1), 21)]
    #[case::diagonal(Line::new(10, 0, 0, 10, 1), 11)]
    #[case::steep(Line::new(0, 0, 2, 9, 1), 10)]
    #[case::shallow_reversed(Line::new(4, 2, 0, 0, 1), 5)]
    fn test_pixel_count_is_major_axis(#[case] line: Line, #[case] expected: usize) {
        assert_eq!(line_points(&line).count(), expected);
        assert_eq!(pixel_set(&line).len(), expected);
    }

    #[test]
    fn test_symmetric_for_swapped_endpoints() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2000 {
            let l = Line::new(
                rng.gen_range(0..64),
                rng.gen_range(0..64),
                rng.gen_range(0..64),
                rng.gen_range(0..64),
                1,
            );
            let reversed = Line::new(l.x2, l.y2, l.x1, l.y1, 1);
            assert_eq!(pixel_set(&l), pixel_set(&reversed), "{:?}", l);
        }
    }

    #[test]
    fn test_continuous_and_hits_endpoints() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..2000 {
            let l = Line::new(
                rng.gen_range(0..640),
                rng.gen_range(0..480),
                rng.gen_range(0..640),
                rng.gen_range(0..480),
                1,
            );
            let px: Vec<_> = line_points(&l).collect();
            for w in px.windows(2) {
                let (ddx, ddy) = ((w[1].0 - w[0].0).abs(), (w[1].1 - w[0].1).abs());
                assert!(ddx <= 1 && ddy <= 1 && ddx + ddy > 0, "gap in {:?}", l);
            }
            let ends: BTreeSet<_> = [px[0], px[px.len() - 1]].into_iter().collect();
            let expected: BTreeSet<_> = [(l.x1 as i32, l.y1 as i32), (l.x2 as i32, l.y2 as i32)]
                .into_iter()
                .collect();
            assert_eq!(ends, expected);
            let dx = (l.x2 as i32 - l.x1 as i32).abs();
            let dy = (l.y2 as i32 - l.y1 as i32).abs();
            assert_eq!(px.len() as i32, dx.max(dy) + 1);
        }
    }

    #[test]
    fn test_draw_line_writes_colour() {
        let mut d = DummyDisplay::new(DisplayMode::Lo);
        draw_line(&Line::new(0, 0, 4, 2, 9), &mut d);
        assert_eq!(d.pixel(0, 0), Some(9));
        assert_eq!(d.pixel(2, 1), Some(9));
        assert_eq!(d.pixel(4, 2), Some(9));
        assert_eq!(d.pixel(4, 0), Some(0));
        assert_eq!(d.lit_pixels(), 5);
    }

    #[test]
    fn test_draw_line_clips_offscreen() {
        let mut d = DummyDisplay::new(DisplayMode::Lo);
        draw_line(&Line::new(310, 100, 330, 100, 3), &mut d);
        assert_eq!(d.lit_pixels(), 10);
        assert_eq!(d.pixel(319, 100), Some(3));
    }

    #[test]
    fn test_erase_restores_background() {
        let mut d = DummyDisplay::new(DisplayMode::Lo);
        let l = Line::new(5, 190, 300, 3, 42);
        draw_line(&l, &mut d);
        assert!(d.lit_pixels() > 0);
        draw_line(&l.with_color(0), &mut d);
        assert_eq!(d.lit_pixels(), 0);
    }

    #[test]
    fn test_fill_box_normalises_and_clips() {
        let mut d = DummyDisplay::new(DisplayMode::Lo);
        fill_box(4, 4, 1, 2, 7, &mut d);
        assert_eq!(d.lit_pixels(), 6);
        assert_eq!(d.pixel(1, 2), Some(7));
        assert_eq!(d.pixel(4, 4), Some(0));

        fill_box(318, 198, 400, 400, 8, &mut d);
        assert_eq!(d.lit_pixels(), 10);
    }
}
