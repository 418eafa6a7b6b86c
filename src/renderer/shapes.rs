//! Shape generation for 2D primitives
//!
//! Everything is built in playfield pixels (origin top-left, y down); the
//! pipeline maps to clip space.

use glam::Vec2;

use super::vertex::{Vertex, colors};
use crate::sim::RenderSnapshot;

/// Height of the darker band at the mouth of each obstacle (pixels)
const LIP_HEIGHT: f32 = 30.0;
/// How far the lip sticks out on each side (pixels)
const LIP_OVERHANG: f32 = 6.0;
/// Grass strip on top of the ground (pixels)
const GROUND_EDGE_HEIGHT: f32 = 12.0;

/// Generate vertices for an axis-aligned rectangle (two triangles)
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Push a rectangle clipped to `[0, width]` horizontally; empty ones are skipped
fn push_clipped(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, width: f32, color: [f32; 4]) {
    let min = Vec2::new(min.x.max(0.0), min.y);
    let max = Vec2::new(max.x.min(width), max.y);
    if max.x <= min.x || max.y <= min.y {
        return;
    }
    out.extend_from_slice(&rect(min, max, color));
}

/// Build the whole frame: sky, obstacles, ground, avatar, then the tint
pub fn frame_vertices(snapshot: &RenderSnapshot) -> Vec<Vertex> {
    let w = snapshot.playfield_width;
    let h = snapshot.playfield_height;
    let ground_top = snapshot.ground_top;

    let mut vertices = Vec::with_capacity(6 * (6 + snapshot.obstacles.len() * 4));

    push_clipped(&mut vertices, Vec2::ZERO, Vec2::new(w, ground_top), w, colors::SKY);

    for o in &snapshot.obstacles {
        let left = o.x;
        let right = o.x + o.width;

        push_clipped(
            &mut vertices,
            Vec2::new(left, 0.0),
            Vec2::new(right, o.top_height),
            w,
            colors::OBSTACLE,
        );
        push_clipped(
            &mut vertices,
            Vec2::new(left - LIP_OVERHANG, (o.top_height - LIP_HEIGHT).max(0.0)),
            Vec2::new(right + LIP_OVERHANG, o.top_height),
            w,
            colors::OBSTACLE_LIP,
        );

        push_clipped(
            &mut vertices,
            Vec2::new(left, o.bottom_y),
            Vec2::new(right, ground_top),
            w,
            colors::OBSTACLE,
        );
        push_clipped(
            &mut vertices,
            Vec2::new(left - LIP_OVERHANG, o.bottom_y),
            Vec2::new(right + LIP_OVERHANG, (o.bottom_y + LIP_HEIGHT).min(ground_top)),
            w,
            colors::OBSTACLE_LIP,
        );
    }

    push_clipped(&mut vertices, Vec2::new(0.0, ground_top), Vec2::new(w, h), w, colors::GROUND);
    push_clipped(
        &mut vertices,
        Vec2::new(0.0, ground_top),
        Vec2::new(w, ground_top + GROUND_EDGE_HEIGHT),
        w,
        colors::GROUND_EDGE,
    );

    // Avatar may leave the playfield vertically; the clip volume handles that
    let a = &snapshot.avatar;
    let a_min = Vec2::new(a.x, a.y);
    let a_max = a_min + Vec2::new(a.width, a.height);
    vertices.extend_from_slice(&rect(a_min, a_max, colors::AVATAR));
    let eye = Vec2::new(a.width * 0.15, a.height * 0.15);
    let eye_min = Vec2::new(a_max.x - a.width * 0.35, a_min.y + a.height * 0.2);
    vertices.extend_from_slice(&rect(eye_min, eye_min + eye, colors::AVATAR_EYE));

    if snapshot.game_over {
        vertices.extend_from_slice(&rect(Vec2::ZERO, Vec2::new(w, h), colors::GAME_OVER_TINT));
    }

    vertices
}
