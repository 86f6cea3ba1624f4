//! Procedural robot body: the arm is rendered as spheres at the joints joined
//! by cylindrical links, synthesized from the parameter table so no mesh
//! files are needed.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use std::f32::consts::PI;

/// Accumulates triangles before converting them into a bevy mesh.
pub(crate) struct MeshBuffer {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        MeshBuffer {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Latitude/longitude sphere around the given center.
    pub fn push_sphere(&mut self, center: Vec3, radius: f32, resolution: u32) {
        let base = self.positions.len() as u32;
        for i in 0..=resolution {
            let theta = PI * i as f32 / resolution as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for j in 0..=resolution {
                let phi = 2.0 * PI * j as f32 / resolution as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();
                self.positions.push([
                    center.x + radius * sin_theta * cos_phi,
                    center.y + radius * sin_theta * sin_phi,
                    center.z + radius * cos_theta,
                ]);
            }
        }
        for i in 0..resolution {
            for j in 0..resolution {
                let current = base + i * (resolution + 1) + j;
                let next = current + resolution + 1;
                self.indices.extend([current, next, current + 1]);
                self.indices.extend([next, next + 1, current + 1]);
            }
        }
    }

    /// Closed cylinder between two points, aligned to their connecting axis.
    pub fn push_tube(&mut self, from: Vec3, to: Vec3, radius: f32, segments: u32) {
        let axis = to - from;
        if axis.length() < 1e-6 {
            return;
        }
        let direction = axis.normalize();
        // Any vector off the axis makes a usable radial basis.
        let helper = if direction.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let u = direction.cross(helper).normalize();
        let v = direction.cross(u);

        let base = self.positions.len() as u32;
        for i in 0..segments {
            let angle = 2.0 * PI * i as f32 / segments as f32;
            let radial = (u * angle.cos() + v * angle.sin()) * radius;
            let bottom = from + radial;
            let top = to + radial;
            self.positions.push([bottom.x, bottom.y, bottom.z]);
            self.positions.push([top.x, top.y, top.z]);
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            let bottom_current = base + i * 2;
            let bottom_next = base + next * 2;
            let top_current = bottom_current + 1;
            let top_next = bottom_next + 1;
            self.indices
                .extend([bottom_current, bottom_next, top_current]);
            self.indices.extend([top_current, bottom_next, top_next]);
        }

        // End caps.
        let bottom_center = self.positions.len() as u32;
        self.positions.push([from.x, from.y, from.z]);
        let top_center = self.positions.len() as u32;
        self.positions.push([to.x, to.y, to.z]);
        for i in 0..segments {
            let next = (i + 1) % segments;
            self.indices.extend([base + i * 2, bottom_center, base + next * 2]);
            self.indices
                .extend([top_center, base + i * 2 + 1, base + next * 2 + 1]);
        }
    }

    /// Converts the buffer into a bevy mesh with smooth vertex normals
    /// accumulated from the face normals.
    pub fn into_mesh(self) -> Mesh {
        let MeshBuffer { positions, indices } = self;
        let mut normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 0.0]; positions.len()];

        for triangle in indices.chunks_exact(3) {
            let i0 = triangle[0] as usize;
            let i1 = triangle[1] as usize;
            let i2 = triangle[2] as usize;

            let v0 = Vec3::from_array(positions[i0]);
            let v1 = Vec3::from_array(positions[i1]);
            let v2 = Vec3::from_array(positions[i2]);

            let normal = (v1 - v0).cross(v2 - v0);
            if normal.length() < 1e-12 {
                continue;
            }
            let normal = normal.normalize();
            for &i in &[i0, i1, i2] {
                normals[i][0] += normal.x;
                normals[i][1] += normal.y;
                normals[i][2] += normal.z;
            }
        }

        for normal in normals.iter_mut() {
            let length =
                (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
            if length > 0.0 {
                normal[0] /= length;
                normal[1] /= length;
                normal[2] /= length;
            }
        }

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
        mesh.insert_indices(Indices::U32(indices));
        mesh
    }
}

/// Mesh of one robot segment, attached to the joint frame: a ball at the
/// frame origin and a tube back towards the previous frame (`rear`, in the
/// local coordinates of this frame).
pub(crate) fn joint_mesh(rear: Vec3, joint_radius: f32, link_radius: f32) -> Mesh {
    let mut buffer = MeshBuffer::new();
    buffer.push_sphere(Vec3::ZERO, joint_radius, 12);
    buffer.push_tube(rear, Vec3::ZERO, link_radius, 16);
    buffer.into_mesh()
}

/// A flat pedestal under the first joint.
pub(crate) fn pedestal_mesh(radius: f32) -> Mesh {
    let mut buffer = MeshBuffer::new();
    buffer.push_tube(Vec3::new(0.0, 0.0, -0.02), Vec3::ZERO, radius, 24);
    buffer.into_mesh()
}
