//! Path geometry for the template shapes.
//!
//! imageproc fills polygons with integer vertices, so every shape is built as
//! an `f32` outline, clipped to the canvas and only then rounded.

use std::f32::consts::{FRAC_PI_2, PI};

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;

use super::types::RectF;

const MIN_ARC_SEGMENTS: usize = 4;
const MAX_ARC_SEGMENTS: usize = 32;

/// Rounded rectangle traced the way a canvas `arcTo` path is: straight edges
/// joined by quarter circles. The radius is clamped to half the shorter side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub rect: RectF,
    pub radius: f32,
}

impl RoundedRect {
    pub fn new(rect: RectF, radius: f32) -> Self {
        let max_radius = (rect.width.abs().min(rect.height.abs()) * 0.5).max(0.0);
        Self {
            rect,
            radius: radius.clamp(0.0, max_radius),
        }
    }

    /// Closed outline, clockwise from where the top edge meets the top-right arc.
    pub fn outline(&self) -> Vec<(f32, f32)> {
        let RectF { x, y, width, height } = self.rect;
        let r = self.radius;
        if r <= 0.0 {
            return vec![(x, y), (x + width, y), (x + width, y + height), (x, y + height)];
        }

        let segments = ((r * 0.5) as usize).clamp(MIN_ARC_SEGMENTS, MAX_ARC_SEGMENTS);
        let corners = [
            ((x + width - r, y + r), -FRAC_PI_2),
            ((x + width - r, y + height - r), 0.0),
            ((x + r, y + height - r), FRAC_PI_2),
            ((x + r, y + r), PI),
        ];

        let mut points = Vec::with_capacity(corners.len() * (segments + 1));
        for ((cx, cy), start) in corners {
            for step in 0..=segments {
                let angle = start + FRAC_PI_2 * step as f32 / segments as f32;
                points.push((cx + r * angle.cos(), cy + r * angle.sin()));
            }
        }
        points
    }

    pub fn stroke(&self, canvas: &mut RgbaImage, color: Rgba<u8>, width: f32) {
        stroke_closed_path(canvas, &self.outline(), color, width);
    }

    pub fn fill(&self, canvas: &mut RgbaImage, color: Rgba<u8>) {
        fill_polygon(canvas, &self.outline(), color);
    }
}

/// Corners of a straight segment of the given width with butt caps.
pub fn segment_quad(start: (f32, f32), end: (f32, f32), width: f32) -> Option<[(f32, f32); 4]> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON || width <= 0.0 {
        return None;
    }
    let half = width * 0.5;
    let nx = -dy / length * half;
    let ny = dx / length * half;
    Some([
        (start.0 + nx, start.1 + ny),
        (end.0 + nx, end.1 + ny),
        (end.0 - nx, end.1 - ny),
        (start.0 - nx, start.1 - ny),
    ])
}

pub fn draw_thick_segment(
    canvas: &mut RgbaImage,
    start: (f32, f32),
    end: (f32, f32),
    width: f32,
    color: Rgba<u8>,
) {
    if width <= 1.0 {
        draw_line_segment_mut(canvas, start, end, color);
        return;
    }
    if let Some(quad) = segment_quad(start, end, width) {
        fill_polygon(canvas, &quad, color);
    }
}

pub fn stroke_closed_path(canvas: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>, width: f32) {
    if points.len() < 2 {
        return;
    }
    let joint_radius = (width * 0.5).round() as i32;
    for (index, start) in points.iter().enumerate() {
        let end = points[(index + 1) % points.len()];
        draw_thick_segment(canvas, *start, end, width, color);
        if width > 1.0 && joint_radius > 0 {
            draw_filled_circle_mut(
                canvas,
                (start.0.round() as i32, start.1.round() as i32),
                joint_radius,
                color,
            );
        }
    }
}

/// Fill a convex polygon, clipping it to the canvas first.
pub fn fill_polygon(canvas: &mut RgbaImage, points: &[(f32, f32)], color: Rgba<u8>) {
    let clipped = clip_to_rect(points, canvas.width() as f32 - 1.0, canvas.height() as f32 - 1.0);
    let mut vertices: Vec<Point<i32>> = Vec::with_capacity(clipped.len());
    for (x, y) in clipped {
        let vertex = Point::new(x.round() as i32, y.round() as i32);
        if vertices.last() != Some(&vertex) {
            vertices.push(vertex);
        }
    }
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return;
    }
    draw_polygon_mut(canvas, &vertices, color);
}

#[derive(Clone, Copy)]
enum ClipEdge {
    Left,
    Right(f32),
    Top,
    Bottom(f32),
}

impl ClipEdge {
    fn inside(self, (x, y): (f32, f32)) -> bool {
        match self {
            ClipEdge::Left => x >= 0.0,
            ClipEdge::Right(max_x) => x <= max_x,
            ClipEdge::Top => y >= 0.0,
            ClipEdge::Bottom(max_y) => y <= max_y,
        }
    }

    fn intersect(self, a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
        match self {
            ClipEdge::Left => intersect_x(a, b, 0.0),
            ClipEdge::Right(max_x) => intersect_x(a, b, max_x),
            ClipEdge::Top => intersect_y(a, b, 0.0),
            ClipEdge::Bottom(max_y) => intersect_y(a, b, max_y),
        }
    }
}

/// Sutherland–Hodgman clip against `[0, max_x] x [0, max_y]`.
pub fn clip_to_rect(points: &[(f32, f32)], max_x: f32, max_y: f32) -> Vec<(f32, f32)> {
    let edges = [
        ClipEdge::Left,
        ClipEdge::Right(max_x),
        ClipEdge::Top,
        ClipEdge::Bottom(max_y),
    ];

    let mut output = points.to_vec();
    for edge in edges {
        let input = std::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut previous = last;
        for &current in &input {
            let current_in = edge.inside(current);
            let previous_in = edge.inside(previous);
            if current_in {
                if !previous_in {
                    output.push(edge.intersect(previous, current));
                }
                output.push(current);
            } else if previous_in {
                output.push(edge.intersect(previous, current));
            }
            previous = current;
        }
    }
    output
}

fn intersect_x(a: (f32, f32), b: (f32, f32), x: f32) -> (f32, f32) {
    let t = (x - a.0) / (b.0 - a.0);
    (x, a.1 + t * (b.1 - a.1))
}

fn intersect_y(a: (f32, f32), b: (f32, f32), y: f32) -> (f32, f32) {
    let t = (y - a.1) / (b.1 - a.1);
    (a.0 + t * (b.0 - a.0), y)
}
