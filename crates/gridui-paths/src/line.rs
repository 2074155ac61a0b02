use gridui_core::{Point, Range};

/// Rasterize the segment from `a` to `b` with Bresenham's line algorithm.
///
/// The returned path includes both endpoints; `line(p, p)` is the
/// single-cell path `[p]`. Cells are ordered from `a` to `b`.
pub fn line(a: Point, b: Point) -> Vec<Point> {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    let sx = if a.x <= b.x { 1 } else { -1 };
    let sy = if a.y <= b.y { 1 } else { -1 };

    let mut pts = Vec::with_capacity((dx.max(dy) + 1) as usize);
    let mut x = a.x;
    let mut y = a.y;

    // Error terms are kept doubled so the midpoint test stays integral.
    if dx >= dy {
        let mut err = dx;
        while x != b.x {
            pts.push(Point::new(x, y));
            err -= 2 * dy;
            if err < 0 {
                y += sy;
                err += 2 * dx;
            }
            x += sx;
        }
        pts.push(Point::new(x, y));
    } else {
        let mut err = dy;
        while y != b.y {
            pts.push(Point::new(x, y));
            err -= 2 * dx;
            if err < 0 {
                x += sx;
                err += 2 * dy;
            }
            y += sy;
        }
        pts.push(Point::new(x, y));
    }
    pts
}

/// Walk from `from` one `dir` step at a time, collecting every cell inside
/// `bounds`. The starting cell itself is excluded; the walk stops at the
/// first cell outside `bounds`.
pub fn ray(from: Point, dir: Point, bounds: Range) -> Vec<Point> {
    let mut pts = Vec::new();
    let mut p = from + dir;
    while bounds.contains(p) {
        pts.push(p);
        p = p + dir;
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_single_cell() {
        assert_eq!(line(Point::new(5, 5), Point::new(5, 5)), vec![Point::new(5, 5)]);
    }

    #[test]
    fn line_horizontal() {
        let pts = line(Point::new(2, 1), Point::new(5, 1));
        assert_eq!(
            pts,
            vec![
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 1),
                Point::new(5, 1),
            ]
        );
    }

    #[test]
    fn line_diagonal() {
        let pts = line(Point::new(0, 0), Point::new(3, 3));
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 2),
                Point::new(3, 3),
            ]
        );
    }

    #[test]
    fn line_includes_endpoints_any_octant() {
        for &target in &[
            Point::new(9, 4),
            Point::new(-3, 7),
            Point::new(4, -9),
            Point::new(-5, -2),
        ] {
            let pts = line(Point::ZERO, target);
            assert_eq!(pts.first(), Some(&Point::ZERO));
            assert_eq!(pts.last(), Some(&target));
            // One cell per driving-axis step.
            let expect = target.x.abs().max(target.y.abs()) + 1;
            assert_eq!(pts.len() as i32, expect);
        }
    }

    #[test]
    fn line_steep_slope_steps_every_row() {
        let pts = line(Point::new(0, 0), Point::new(2, 6));
        assert_eq!(pts.len(), 7);
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(p.y, i as i32);
        }
    }

    #[test]
    fn ray_stops_at_bounds() {
        let bounds = Range::new(0, 0, 30, 30);
        let pts = ray(Point::new(15, 15), Point::new(1, 0), bounds);
        assert_eq!(pts.len(), 14); // x = 16..=29
        assert_eq!(pts[0], Point::new(16, 15));
        assert_eq!(*pts.last().unwrap(), Point::new(29, 15));

        let up = ray(Point::new(15, 15), Point::new(0, -1), bounds);
        assert_eq!(up.len(), 15); // y = 14..=0
        assert_eq!(*up.last().unwrap(), Point::new(15, 0));
    }

    #[test]
    fn ray_from_edge_is_empty() {
        let bounds = Range::new(0, 0, 30, 30);
        assert!(ray(Point::new(0, 0), Point::new(-1, 0), bounds).is_empty());
    }
}
