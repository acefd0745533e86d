// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `Color` and `UnsignedColor` types and the conversions between them.

use crate::math::vector::Vec3;

/// Represents an RGB color using `f32` components.
///
/// This is the representation baked into every [`Vertex`](crate::Vertex), one
/// triple each for ambient, diffuse, and emissive material terms. Components are
/// not clamped and may exceed `1.0`.
///
/// `#[repr(C)]` ensures a consistent memory layout, which is important when passing
/// color data to graphics APIs.
#[derive(Debug, Default, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Color {
    /// The red component.
    pub r: f32,
    /// The green component.
    pub g: f32,
    /// The blue component.
    pub b: f32,
}

impl Color {
    /// Black (`[0.0, 0.0, 0.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// White (`[1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates a new `Color` with explicit RGB values.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a `Color` from a [`Vec3`], mapping `x, y, z` to `r, g, b`.
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            r: v.x,
            g: v.y,
            b: v.z,
        }
    }

    /// Converts this `Color` to a [`Vec3`].
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl From<[f32; 3]> for Color {
    #[inline]
    fn from(c: [f32; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

/// Represents an RGB color with 8 bits per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct UnsignedColor {
    /// The red channel.
    pub r: u8,
    /// The green channel.
    pub g: u8,
    /// The blue channel.
    pub b: u8,
}

/// Scales a normalized channel to `[0, 255]`, clamping out-of-range input.
#[inline]
fn channel_to_u8(c: f32) -> u8 {
    // `as` truncates toward zero; NaN maps to 0.
    (c * 255.0).clamp(0.0, 255.0) as u8
}

impl UnsignedColor {
    /// Creates a new `UnsignedColor` with explicit channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantizes a float [`Color`] to 8 bits per channel.
    #[inline]
    pub fn from_color(color: &Color) -> Self {
        Self::from_vec3(color.to_vec3())
    }

    /// Quantizes a [`Vec3`] holding normalized channels to 8 bits per channel.
    ///
    /// Each channel is multiplied by 255, clamped to `[0, 255]`, and truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshweld_core::math::{UnsignedColor, Vec3};
    /// let c = UnsignedColor::from_vec3(Vec3::new(1.5, -0.5, 0.5));
    /// assert_eq!(c, UnsignedColor::new(255, 0, 127));
    /// ```
    #[inline]
    pub fn from_vec3(v: Vec3) -> Self {
        Self {
            r: channel_to_u8(v.x),
            g: channel_to_u8(v.y),
            b: channel_to_u8(v.z),
        }
    }

    /// Expands the channels back to normalized floats in `[0.0, 1.0]`.
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl From<Color> for UnsignedColor {
    #[inline]
    fn from(color: Color) -> Self {
        Self::from_color(&color)
    }
}
