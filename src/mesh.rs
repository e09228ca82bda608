//! Meshes: dense per-channel vertex attribute arrays plus a triangle list.

use glam::{Vec2, Vec3, Vec4};

use crate::error::RasterError;
use crate::shading::{AttribDim, Attribs, Attribute};

/// One attribute channel: a dimension tag and one dense entry per vertex.
#[derive(Clone, Debug)]
struct Channel {
    dim: AttribDim,
    data: Vec<f32>,
}

impl Channel {
    fn vertex_count(&self) -> usize {
        self.data.len() / self.dim.len()
    }
}

/// A drawable object: an ordered list of attribute channels (all sharing one
/// vertex count) and an ordered list of triangles as vertex index triples.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    channels: Vec<Channel>,
    triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Vertex count of channel 0; zero while no channel has been set.
    pub fn vertex_count(&self) -> usize {
        self.channels.first().map_or(0, Channel::vertex_count)
    }

    /// Stores `values` as channel `channel`'s dense array. A new channel may
    /// only be appended at `channel == channel_count()`; lower indices
    /// overwrite the existing channel (the dimension tag follows the incoming
    /// value type). Higher indices are rejected: channels are contiguous
    /// from 0.
    pub fn set_vertex_attribs<T: Attribute>(
        &mut self,
        channel: usize,
        values: &[T],
    ) -> Result<(), RasterError> {
        if channel > self.channels.len() {
            return Err(RasterError::OutOfRange {
                what: "attribute channel",
                index: channel,
                len: self.channels.len(),
            });
        }

        let dim = T::DIM;
        let mut data = Vec::with_capacity(values.len() * dim.len());
        for &value in values {
            let mut slot = [0.0f32; 4];
            value.write(&mut slot);
            data.extend_from_slice(&slot[..dim.len()]);
        }

        let incoming = Channel { dim, data };
        if channel == self.channels.len() {
            self.channels.push(incoming);
        } else {
            self.channels[channel] = incoming;
        }
        Ok(())
    }

    /// Appends triangles to the mesh; cumulative across calls.
    pub fn set_triangle_indices(&mut self, triangles: &[[u32; 3]]) {
        self.triangles.extend_from_slice(triangles);
    }

    /// Checks the whole mesh before a draw touches any pixel: every channel
    /// carries the shared vertex count, and every triangle index is in range.
    pub(crate) fn validate(&self) -> Result<(), RasterError> {
        let vertex_count = self.vertex_count();
        for (index, channel) in self.channels.iter().enumerate() {
            if channel.vertex_count() != vertex_count {
                return Err(RasterError::OutOfRange {
                    what: "attribute channel",
                    index,
                    len: vertex_count,
                });
            }
        }
        for triangle in &self.triangles {
            for &vertex in triangle {
                if vertex as usize >= vertex_count {
                    return Err(RasterError::OutOfRange {
                        what: "triangle index",
                        index: vertex as usize,
                        len: vertex_count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Assembles the input attribute bag for one vertex by reading every
    /// channel at that index.
    pub(crate) fn gather(&self, vertex: usize) -> Result<Attribs, RasterError> {
        let mut attribs = Attribs::new();
        for (index, channel) in self.channels.iter().enumerate() {
            let width = channel.dim.len();
            let base = vertex * width;
            let components =
                channel
                    .data
                    .get(base..base + width)
                    .ok_or(RasterError::OutOfRange {
                        what: "vertex",
                        index: vertex,
                        len: channel.vertex_count(),
                    })?;
            match channel.dim {
                AttribDim::Scalar => attribs.set(index, components[0]),
                AttribDim::Two => attribs.set(index, Vec2::new(components[0], components[1])),
                AttribDim::Three => attribs.set(
                    index,
                    Vec3::new(components[0], components[1], components[2]),
                ),
                AttribDim::Four => attribs.set(
                    index,
                    Vec4::new(components[0], components[1], components[2], components[3]),
                ),
            }
        }
        Ok(attribs)
    }
}
