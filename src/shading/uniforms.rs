//! Named, type-tagged constants for one draw call.

use std::collections::HashMap;

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::error::RasterError;

/// Tagged uniform payload. The tag travels with the value, so a read at the
/// wrong type is reported instead of reinterpreting memory.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

/// A type that can be bound as a uniform.
pub trait Uniform: Copy {
    fn into_value(self) -> UniformValue;
    fn from_value(value: &UniformValue) -> Option<Self>;
}

macro_rules! impl_uniform {
    ($ty:ty, $variant:ident) => {
        impl Uniform for $ty {
            fn into_value(self) -> UniformValue {
                UniformValue::$variant(self)
            }

            fn from_value(value: &UniformValue) -> Option<Self> {
                match value {
                    UniformValue::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    };
}

impl_uniform!(i32, Int);
impl_uniform!(f32, Float);
impl_uniform!(Vec2, Vec2);
impl_uniform!(Vec3, Vec3);
impl_uniform!(Vec4, Vec4);
impl_uniform!(Mat2, Mat2);
impl_uniform!(Mat3, Mat3);
impl_uniform!(Mat4, Mat4);

/// Name -> value store owned by one shader program.
#[derive(Clone, Debug, Default)]
pub struct Uniforms {
    values: HashMap<String, UniformValue>,
}

impl Uniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under `name`, replacing any existing binding and its
    /// type tag.
    pub fn set<T: Uniform>(&mut self, name: &str, value: T) {
        self.values.insert(name.to_owned(), value.into_value());
    }

    /// Reads the binding for `name` as `T`; absent names and type mismatches
    /// both report `UnboundUniform`.
    pub fn get<T: Uniform>(&self, name: &str) -> Result<T, RasterError> {
        self.values
            .get(name)
            .and_then(T::from_value)
            .ok_or_else(|| RasterError::UnboundUniform(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
