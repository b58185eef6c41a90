use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2};

use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};

use crate::{config::Shape, surface::Surface};

/// Flattening tolerance for curved outlines.
const CURVE_TOLERANCE: f64 = 0.1;

/// Draw one filled shape at `center` using the surface's current fill
/// color.
///
/// Every primitive leaves the transform stack exactly as it found it.
pub fn draw(surface: &mut Surface, shape: Shape, center: Point, size: f64) {
    match shape {
        Shape::Square => square(surface, center, size),
        Shape::Circle => circle(surface, center, size),
        Shape::Diamond => diamond(surface, center, size),
        Shape::Star => star(surface, center, size),
    }
}

/// Axis-aligned filled square of side `size`.
fn square(surface: &mut Surface, center: Point, size: f64) {
    let half = size / 2.0;
    surface.fill_rect(Rect::new(
        center.x - half,
        center.y - half,
        center.x + half,
        center.y + half,
    ));
}

/// Filled circle of diameter `size`.
fn circle(surface: &mut Surface, center: Point, size: f64) {
    surface.fill_path(&Circle::new(center, size / 2.0).to_path(CURVE_TOLERANCE));
}

/// Square of side `size/sqrt(2)` rotated 45 degrees about the center; the
/// net size along the diagonal equals `size`.
fn diamond(surface: &mut Surface, center: Point, size: f64) {
    let half = size / SQRT_2 / 2.0;
    surface.save();
    surface.translate(center.x, center.y);
    surface.rotate(FRAC_PI_4);
    surface.fill_rect(Rect::new(-half, -half, half, half));
    surface.restore();
}

/// Five-pointed star: ten vertices alternating between radius
/// `size/sqrt(2)` and half that, at successive 36-degree steps starting
/// straight up. The outline closes before filling.
fn star(surface: &mut Surface, center: Point, size: f64) {
    let outer = size / SQRT_2;
    let inner = outer / 2.0;

    let mut path = BezPath::new();
    path.move_to((0.0, -outer));
    for step in 1..10 {
        let radius = if step % 2 == 0 { outer } else { inner };
        let angle = -FRAC_PI_2 + f64::from(step) * PI / 5.0;
        path.line_to((radius * angle.cos(), radius * angle.sin()));
    }
    path.close_path();

    surface.save();
    surface.translate(center.x, center.y);
    surface.fill_path(&path);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba8;

    fn painted(surface: &mut Surface, x: u32, y: u32) -> bool {
        surface.snapshot().unwrap().pixel(x, y).a != 0
    }

    fn draw_one(shape: Shape) -> Surface {
        let mut surface = Surface::new(32, 32).unwrap();
        surface.set_fill(Rgba8::opaque(255, 255, 255));
        draw(&mut surface, shape, Point::new(16.0, 16.0), 24.0);
        surface
    }

    #[test]
    fn square_fills_its_extent() {
        let mut surface = draw_one(Shape::Square);
        assert!(painted(&mut surface, 16, 16));
        assert!(painted(&mut surface, 5, 5));
        assert!(!painted(&mut surface, 2, 2));
    }

    #[test]
    fn circle_misses_the_bounding_corners() {
        let mut surface = draw_one(Shape::Circle);
        assert!(painted(&mut surface, 16, 16));
        // (5,5) is inside the bounding square but outside the disc.
        assert!(!painted(&mut surface, 5, 5));
    }

    #[test]
    fn diamond_misses_the_square_corners() {
        let mut surface = draw_one(Shape::Diamond);
        assert!(painted(&mut surface, 16, 16));
        // Vertex radius is size/2 = 12, so |dx|+|dy| > 12 is outside.
        assert!(!painted(&mut surface, 25, 25));
        // On-axis points near a vertex are inside.
        assert!(painted(&mut surface, 23, 16));
    }

    #[test]
    fn star_fills_points_and_misses_gaps() {
        let mut surface = draw_one(Shape::Star);
        assert!(painted(&mut surface, 16, 16));
        // The top point reaches up to radius size/sqrt(2) ~ 17.
        assert!(painted(&mut surface, 16, 3));
        // Straight down lies between two lower points; at the outer radius
        // it is empty.
        assert!(!painted(&mut surface, 16, 31));
    }

    #[test]
    fn rotating_shapes_leave_no_transform_behind() {
        let mut surface = Surface::new(32, 32).unwrap();
        surface.set_fill(Rgba8::opaque(1, 2, 3));
        let before = surface.transform().as_coeffs();

        for shape in [Shape::Square, Shape::Circle, Shape::Diamond, Shape::Star] {
            draw(&mut surface, shape, Point::new(10.0, 10.0), 8.0);
            assert_eq!(surface.transform().as_coeffs(), before, "{shape:?}");
            assert_eq!(surface.stack_depth(), 0, "{shape:?}");
        }
    }
}

