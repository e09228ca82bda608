//! Per-vertex attribute storage with runtime dimension tags.
//!
//! One `Attribs` bag is the I/O structure of the shader stages: the vertex
//! stage reads one input bag and writes one output bag per vertex, and the
//! fragment stage receives a single interpolated bag per covered pixel.

use glam::{Vec2, Vec3, Vec4};

use crate::error::RasterError;

/// Dimension tag of one attribute slot or mesh channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttribDim {
    Scalar,
    Two,
    Three,
    Four,
}

impl AttribDim {
    /// Number of float components covered by this tag.
    #[inline]
    pub fn len(self) -> usize {
        match self {
            AttribDim::Scalar => 1,
            AttribDim::Two => 2,
            AttribDim::Three => 3,
            AttribDim::Four => 4,
        }
    }

    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(AttribDim::Scalar),
            2 => Some(AttribDim::Two),
            3 => Some(AttribDim::Three),
            4 => Some(AttribDim::Four),
            _ => None,
        }
    }
}

/// A value that can occupy an attribute slot: `f32` or a glam vector up to
/// four components wide.
pub trait Attribute: Copy {
    const DIM: AttribDim;
    fn write(self, out: &mut [f32; 4]);
    fn read(src: &[f32; 4]) -> Self;
}

impl Attribute for f32 {
    const DIM: AttribDim = AttribDim::Scalar;

    fn write(self, out: &mut [f32; 4]) {
        out[0] = self;
    }

    fn read(src: &[f32; 4]) -> Self {
        src[0]
    }
}

impl Attribute for Vec2 {
    const DIM: AttribDim = AttribDim::Two;

    fn write(self, out: &mut [f32; 4]) {
        out[0] = self.x;
        out[1] = self.y;
    }

    fn read(src: &[f32; 4]) -> Self {
        Vec2::new(src[0], src[1])
    }
}

impl Attribute for Vec3 {
    const DIM: AttribDim = AttribDim::Three;

    fn write(self, out: &mut [f32; 4]) {
        out[0] = self.x;
        out[1] = self.y;
        out[2] = self.z;
    }

    fn read(src: &[f32; 4]) -> Self {
        Vec3::new(src[0], src[1], src[2])
    }
}

impl Attribute for Vec4 {
    const DIM: AttribDim = AttribDim::Four;

    fn write(self, out: &mut [f32; 4]) {
        out[0] = self.x;
        out[1] = self.y;
        out[2] = self.z;
        out[3] = self.w;
    }

    fn read(src: &[f32; 4]) -> Self {
        Vec4::new(src[0], src[1], src[2], src[3])
    }
}

/// One slot: a fixed four-float payload plus the dimension it was set at.
#[derive(Copy, Clone, Debug)]
struct Slot {
    dim: AttribDim,
    values: [f32; 4],
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            dim: AttribDim::Scalar,
            values: [0.0; 4],
        }
    }
}

/// Growable bag of tagged attribute slots, indexed by small contiguous
/// integers.
#[derive(Clone, Debug, Default)]
pub struct Attribs {
    slots: Vec<Slot>,
}

impl Attribs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, including any zero-filled slots created by growth.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Stores `value` at `index`, growing the bag as needed. Intermediate
    /// slots created by growth read as scalar zero until set.
    pub fn set<T: Attribute>(&mut self, index: usize, value: T) {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, Slot::default);
        }
        let slot = &mut self.slots[index];
        slot.dim = T::DIM;
        slot.values = [0.0; 4];
        value.write(&mut slot.values);
    }

    /// Reads the slot at `index` as `T`. The slot must exist and must have
    /// been stored at exactly `T`'s dimension.
    pub fn get<T: Attribute>(&self, index: usize) -> Result<T, RasterError> {
        let slot = self.slots.get(index).ok_or(RasterError::OutOfRange {
            what: "attribute slot",
            index,
            len: self.slots.len(),
        })?;
        if slot.dim != T::DIM {
            return Err(RasterError::DimensionMismatch {
                index,
                stored: slot.dim.len(),
                requested: T::DIM.len(),
            });
        }
        Ok(T::read(&slot.values))
    }

    /// Dimension tag of the slot at `index`, if present.
    pub fn dim(&self, index: usize) -> Option<AttribDim> {
        self.slots.get(index).map(|slot| slot.dim)
    }

    /// Raw tag + components, used by the interpolator.
    pub(crate) fn slot_raw(&self, index: usize) -> Option<(AttribDim, [f32; 4])> {
        self.slots.get(index).map(|slot| (slot.dim, slot.values))
    }

    /// Stores pre-blended raw components under an explicit tag.
    pub(crate) fn set_raw(&mut self, index: usize, dim: AttribDim, values: [f32; 4]) {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, Slot::default);
        }
        self.slots[index] = Slot { dim, values };
    }
}
