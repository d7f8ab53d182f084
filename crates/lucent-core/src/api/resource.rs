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

//! Descriptors, usage flags, and formats for intercepted GPU resources.

/// Flags describing the allowed usages of a resource.
///
/// These double as the resource *states* named in [`CommandRecorder::barrier`]
/// calls, mirroring how explicit APIs phrase transitions.
///
/// [`CommandRecorder::barrier`]: crate::traits::CommandRecorder::barrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceUsage {
    bits: u32,
}

impl ResourceUsage {
    /// No usage. As a barrier state this means "common / undefined".
    pub const NONE: Self = Self { bits: 0 };
    /// The resource can be the source of a copy operation.
    pub const COPY_SRC: Self = Self { bits: 1 << 0 };
    /// The resource can be the destination of a copy operation.
    pub const COPY_DST: Self = Self { bits: 1 << 1 };
    /// The resource can be sampled from shaders.
    pub const SHADER_RESOURCE: Self = Self { bits: 1 << 2 };
    /// The resource can be bound as a color render target.
    pub const RENDER_TARGET: Self = Self { bits: 1 << 3 };
    /// The resource can be bound as a depth-stencil target.
    pub const DEPTH_STENCIL: Self = Self { bits: 1 << 4 };

    /// Creates a new set of usage flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether all flags in `other` are present in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no flags are set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for ResourceUsage {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for ResourceUsage {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Flags naming which aspects a clear operation affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearFlags {
    bits: u32,
}

impl ClearFlags {
    /// The clear writes the depth aspect.
    pub const DEPTH: Self = Self { bits: 1 << 0 };
    /// The clear writes the stencil aspect.
    pub const STENCIL: Self = Self { bits: 1 << 1 };

    /// Creates clear flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Checks whether all flags in `other` are present in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }
}

impl std::ops::BitOr for ClearFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// The memory format of texels in a texture.
///
/// Only the formats the depth engine has to reason about are modeled;
/// anything else an application creates is carried as [`Other`] with the
/// native format code preserved, so backends can round-trip it untouched.
///
/// [`Other`]: TextureFormat::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// One 16-bit unsigned normalized depth component.
    Depth16Unorm,
    /// At least 24 bits of unsigned normalized depth.
    Depth24Plus,
    /// At least 24 bits of depth plus an 8-bit stencil component.
    Depth24PlusStencil8,
    /// One 32-bit float depth component.
    Depth32Float,
    /// A 32-bit float depth component plus an 8-bit stencil component.
    Depth32FloatStencil8,
    /// Four 8-bit unsigned normalized components (RGBA).
    Rgba8Unorm,
    /// A native format code lucent does not interpret.
    Other(u32),
}

impl TextureFormat {
    /// Returns `true` if this format carries a depth aspect.
    pub const fn has_depth_aspect(&self) -> bool {
        matches!(
            self,
            TextureFormat::Depth16Unorm
                | TextureFormat::Depth24Plus
                | TextureFormat::Depth24PlusStencil8
                | TextureFormat::Depth32Float
                | TextureFormat::Depth32FloatStencil8
        )
    }
}

/// The shape of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A linear buffer.
    Buffer,
    /// A two-dimensional texture.
    Texture2d,
    /// A three-dimensional (volumetric) texture.
    Texture3d,
    /// A swapchain or window-system surface.
    Surface,
}

/// A backend-agnostic description of an intercepted resource.
///
/// Returned by [`GraphicsDevice::resource_desc`] and passed to
/// [`GraphicsDevice::create_resource`]; mirrors whatever the native API
/// reports for the object.
///
/// [`GraphicsDevice::resource_desc`]: crate::traits::GraphicsDevice::resource_desc
/// [`GraphicsDevice::create_resource`]: crate::traits::GraphicsDevice::create_resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDesc {
    /// The shape of the resource.
    pub kind: ResourceKind,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Samples per texel; anything above 1 is multisampled.
    pub samples: u32,
    /// The texel format.
    pub format: TextureFormat,
    /// The allowed usages of the resource.
    pub usage: ResourceUsage,
}

/// Which pipeline binding point a resource view targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceViewKind {
    /// A view bindable for shader reads.
    ShaderResource,
    /// A view bindable as a depth-stencil attachment.
    DepthStencil,
}

/// A description of a view over a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceViewDesc {
    /// The format the view reinterprets the resource as.
    pub format: TextureFormat,
    /// The first mipmap level accessed by the view.
    pub first_level: u32,
    /// The number of mipmap levels included in the view.
    pub levels: u32,
    /// The first array layer accessed by the view.
    pub first_layer: u32,
    /// The number of array layers included in the view.
    pub layers: u32,
}

impl ResourceViewDesc {
    /// A view of the first level and layer, in the given format.
    pub const fn first_slice(format: TextureFormat) -> Self {
        Self {
            format,
            first_level: 0,
            levels: 1,
            first_layer: 0,
            layers: 1,
        }
    }
}
