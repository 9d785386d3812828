//! Primitive solids

use glam::Vec3;
use std::f32::consts::PI;
use tracing::warn;

use super::types::MeshBuilder;

/// Generate a cylinder or truncated cone centered on the origin
///
/// The axis is +Y; the body spans `-height/2..height/2`. Caps are emitted as
/// separate rings so they keep flat normals through smoothing.
///
/// # Arguments
/// * `radius_bottom` - Bottom radius (>= 0.0)
/// * `radius_top` - Top radius (>= 0.0)
/// * `height` - Cylinder height (> 0.0)
/// * `segments` - Number of radial divisions (min 3, max 256)
pub fn generate_cylinder<M: MeshBuilder>(
    radius_bottom: f32,
    radius_top: f32,
    height: f32,
    segments: u32,
) -> M {
    let radius_bottom = if radius_bottom < 0.0 {
        warn!("generate_cylinder: radius_bottom must be >= 0.0, clamping to 0.0");
        0.0
    } else {
        radius_bottom
    };

    let radius_top = if radius_top < 0.0 {
        warn!("generate_cylinder: radius_top must be >= 0.0, clamping to 0.0");
        0.0
    } else {
        radius_top
    };

    let height = if height <= 0.0 {
        warn!("generate_cylinder: height must be > 0.0, clamping to 0.001");
        0.001
    } else {
        height
    };

    let segments = segments.clamp(3, 256);

    let mut mesh = M::default();
    let half_height = height * 0.5;
    let slope = (radius_bottom - radius_top) / height;
    let angle = |i: u32| (i as f32 / segments as f32) * 2.0 * PI;

    // Body: one bottom/top vertex pair per segment
    let mut body = Vec::with_capacity(segments as usize);
    for i in 0..segments {
        let (sin_t, cos_t) = angle(i).sin_cos();
        let normal = Vec3::new(cos_t, slope, sin_t).normalize();

        let bottom = mesh.add_vertex(
            Vec3::new(radius_bottom * cos_t, -half_height, radius_bottom * sin_t),
            normal,
        );
        let top = mesh.add_vertex(
            Vec3::new(radius_top * cos_t, half_height, radius_top * sin_t),
            normal,
        );
        body.push((bottom, top));
    }

    for i in 0..segments as usize {
        let (b0, t0) = body[i];
        let (b1, t1) = body[(i + 1) % segments as usize];
        // CCW when viewed from outside
        mesh.add_triangle(b0, t0, t1);
        mesh.add_triangle(b0, t1, b1);
    }

    // Caps (skipped for a radius that collapses to a point)
    for (radius, y, normal) in [
        (radius_bottom, -half_height, Vec3::NEG_Y),
        (radius_top, half_height, Vec3::Y),
    ] {
        if radius <= 0.0 {
            continue;
        }

        let center = mesh.add_vertex(Vec3::new(0.0, y, 0.0), normal);
        let ring: Vec<u16> = (0..segments)
            .map(|i| {
                let (sin_t, cos_t) = angle(i).sin_cos();
                mesh.add_vertex(Vec3::new(radius * cos_t, y, radius * sin_t), normal)
            })
            .collect();

        for i in 0..segments as usize {
            let a = ring[i];
            let b = ring[(i + 1) % segments as usize];
            if normal.y < 0.0 {
                mesh.add_triangle(center, a, b);
            } else {
                mesh.add_triangle(center, b, a);
            }
        }
    }

    mesh
}

/// Generate a UV sphere centered on the origin
///
/// Produces `(rings + 1) * segments` vertices; the pole rows are degenerate.
pub fn generate_sphere<M: MeshBuilder>(radius: f32, segments: u32, rings: u32) -> M {
    let radius = if radius <= 0.0 {
        warn!("generate_sphere: radius must be > 0.0, clamping to 0.001");
        0.001
    } else {
        radius
    };
    let segments = segments.clamp(3, 256);
    let rings = rings.clamp(2, 256);

    let mut mesh = M::default();
    for ring in 0..=rings {
        let (sin_phi, cos_phi) = ((ring as f32 / rings as f32) * PI).sin_cos();
        for seg in 0..segments {
            let (sin_t, cos_t) = ((seg as f32 / segments as f32) * 2.0 * PI).sin_cos();
            let normal = Vec3::new(sin_phi * cos_t, cos_phi, sin_phi * sin_t);
            mesh.add_vertex(normal * radius, normal);
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let next = (seg + 1) % segments;
            let upper = (ring * segments + seg) as u16;
            let upper_next = (ring * segments + next) as u16;
            let lower = ((ring + 1) * segments + seg) as u16;
            let lower_next = ((ring + 1) * segments + next) as u16;
            mesh.add_triangle(upper, upper_next, lower_next);
            mesh.add_triangle(upper, lower_next, lower);
        }
    }

    mesh
}

/// Generate a torus lying in the XZ plane
///
/// # Arguments
/// * `major_radius` - Distance from the center to the middle of the tube
/// * `minor_radius` - Tube radius
/// * `major_segments` - Divisions around the ring (min 3, max 256)
/// * `minor_segments` - Divisions around the tube (min 3, max 256)
pub fn generate_torus<M: MeshBuilder>(
    major_radius: f32,
    minor_radius: f32,
    major_segments: u32,
    minor_segments: u32,
) -> M {
    let major_radius = if major_radius <= 0.0 {
        warn!("generate_torus: major_radius must be > 0.0, clamping to 0.001");
        0.001
    } else {
        major_radius
    };
    let minor_radius = if minor_radius <= 0.0 {
        warn!("generate_torus: minor_radius must be > 0.0, clamping to 0.001");
        0.001
    } else {
        minor_radius
    };
    let major_segments = major_segments.clamp(3, 256);
    let minor_segments = minor_segments.clamp(3, 256);

    let mut mesh = M::default();
    for i in 0..major_segments {
        let (sin_t, cos_t) = ((i as f32 / major_segments as f32) * 2.0 * PI).sin_cos();
        let tube_center = Vec3::new(major_radius * cos_t, 0.0, major_radius * sin_t);
        for j in 0..minor_segments {
            let (sin_p, cos_p) = ((j as f32 / minor_segments as f32) * 2.0 * PI).sin_cos();
            let normal = Vec3::new(cos_p * cos_t, sin_p, cos_p * sin_t);
            mesh.add_vertex(tube_center + normal * minor_radius, normal);
        }
    }

    for i in 0..major_segments {
        let next_i = (i + 1) % major_segments;
        for j in 0..minor_segments {
            let next_j = (j + 1) % minor_segments;
            let a = (i * minor_segments + j) as u16;
            let b = (i * minor_segments + next_j) as u16;
            let c = (next_i * minor_segments + j) as u16;
            let d = (next_i * minor_segments + next_j) as u16;
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(a, d, c);
        }
    }

    mesh
}
