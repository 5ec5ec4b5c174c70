//! Small shape builders on top of `epaint`.
//!
//! Angles follow the usual on-screen convention: degrees counter-clockwise
//! starting at three o'clock, even though screen y grows downwards.

use eframe::egui::Painter;
use eframe::epaint::{pos2, Color32, Pos2, Rect, Shape, Stroke};

const ARC_SEGMENTS: usize = 8;
const ELLIPSE_SEGMENTS: usize = 32;

fn point_on_circle(center: Pos2, radius: f32, degrees: f32) -> Pos2 {
    let rad = degrees.to_radians();
    pos2(center.x + radius * rad.cos(), center.y - radius * rad.sin())
}

/// Filled pie wedge of `extent` degrees starting at `start`
pub fn pie_wedge(center: Pos2, radius: f32, start: f32, extent: f32, fill: Color32) -> Shape {
    let mut points = Vec::with_capacity(ARC_SEGMENTS + 2);
    points.push(center);
    for i in 0..=ARC_SEGMENTS {
        let angle = start + extent * i as f32 / ARC_SEGMENTS as f32;
        points.push(point_on_circle(center, radius, angle));
    }
    Shape::convex_polygon(points, fill, Stroke::NONE)
}

/// Filled axis-aligned ellipse inscribed in `rect`
pub fn ellipse(rect: Rect, fill: Color32) -> Shape {
    let center = rect.center();
    let (rx, ry) = (rect.width() / 2.0, rect.height() / 2.0);
    let points = (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let rad = std::f32::consts::TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
            pos2(center.x + rx * rad.cos(), center.y + ry * rad.sin())
        })
        .collect();
    Shape::convex_polygon(points, fill, Stroke::NONE)
}

/// Rounded rectangle approximated by four corner wedges and two strips.
///
/// Always six shapes in the same fill, so overlapping regions are invisible.
pub fn rounded_rect_shapes(rect: Rect, radius: f32, fill: Color32) -> Vec<Shape> {
    let r = radius.max(0.0).min(rect.width() / 2.0).min(rect.height() / 2.0);
    let (x1, y1, x2, y2) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);

    vec![
        pie_wedge(pos2(x1 + r, y1 + r), r, 90.0, 90.0, fill),
        pie_wedge(pos2(x2 - r, y1 + r), r, 0.0, 90.0, fill),
        pie_wedge(pos2(x1 + r, y2 - r), r, 180.0, 90.0, fill),
        pie_wedge(pos2(x2 - r, y2 - r), r, 270.0, 90.0, fill),
        Shape::rect_filled(
            Rect::from_min_max(pos2(x1 + r, y1), pos2(x2 - r, y2)),
            0.0,
            fill,
        ),
        Shape::rect_filled(
            Rect::from_min_max(pos2(x1, y1 + r), pos2(x2, y2 - r)),
            0.0,
            fill,
        ),
    ]
}

pub fn draw_rounded_rect(painter: &Painter, rect: Rect, radius: f32, fill: Color32) {
    painter.extend(rounded_rect_shapes(rect, radius, fill));
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::epaint::{PathShape, RectShape};

    fn fill_of(shape: &Shape) -> Color32 {
        match shape {
            Shape::Path(PathShape { fill, .. }) => *fill,
            Shape::Rect(RectShape { fill, .. }) => *fill,
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn rounded_rect_is_four_wedges_and_two_strips() {
        let rect = Rect::from_min_max(pos2(10.0, 20.0), pos2(110.0, 70.0));
        let shapes = rounded_rect_shapes(rect, 8.0, Color32::RED);

        assert_eq!(shapes.len(), 6);
        assert!(shapes.iter().all(|s| fill_of(s) == Color32::RED));

        let wedges = shapes
            .iter()
            .filter(|s| matches!(s, Shape::Path(_)))
            .count();
        assert_eq!(wedges, 4);

        let strips: Vec<Rect> = shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Rect(RectShape { rect, .. }) => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            strips,
            vec![
                Rect::from_min_max(pos2(18.0, 20.0), pos2(102.0, 70.0)),
                Rect::from_min_max(pos2(10.0, 28.0), pos2(110.0, 62.0)),
            ]
        );
    }

    #[test]
    fn radius_is_clamped_to_half_the_short_side() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 10.0));
        let shapes = rounded_rect_shapes(rect, 50.0, Color32::WHITE);
        match &shapes[4] {
            Shape::Rect(RectShape { rect, .. }) => {
                assert_eq!(rect.min.x, 5.0);
                assert_eq!(rect.max.x, 95.0);
            }
            other => panic!("expected strip, got {other:?}"),
        }
    }

    #[test]
    fn top_left_wedge_spans_noon_to_nine() {
        let center = pos2(10.0, 10.0);
        let Shape::Path(path) = pie_wedge(center, 10.0, 90.0, 90.0, Color32::RED) else {
            panic!("wedge is a path");
        };
        let first = path.points[1];
        let last = *path.points.last().unwrap();
        assert!((first.x - 10.0).abs() < 1e-4 && (first.y - 0.0).abs() < 1e-4);
        assert!((last.x - 0.0).abs() < 1e-4 && (last.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn ellipse_stays_inside_its_rect() {
        let rect = Rect::from_min_max(pos2(4.0, 4.0), pos2(186.0, 50.0));
        let Shape::Path(path) = ellipse(rect, Color32::BLACK) else {
            panic!("ellipse is a path");
        };
        let grown = rect.expand(1e-3);
        assert!(path.points.iter().all(|p| grown.contains(*p)));
    }
}
