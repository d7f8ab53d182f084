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

//! Backend-agnostic API data types.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`handle`]**: Opaque handles for externally-owned GPU objects.
//! - **[`resource`]**: Resource descriptors, usage flags, and formats.
//! - **[`viewport`]**: The viewport rectangle observed on draw calls.
//! - **[`backend`]**: Graphics API identification and per-API quirks.
//! - **[`settings`]**: User-facing depth-detection configuration.

pub mod backend;
pub mod handle;
pub mod resource;
pub mod settings;
pub mod viewport;

pub use backend::{BackendQuirks, GraphicsBackendType};
pub use handle::{ResourceId, ResourceViewId};
pub use resource::{
    ClearFlags, ResourceDesc, ResourceKind, ResourceUsage, ResourceViewDesc, ResourceViewKind,
    TextureFormat,
};
pub use settings::DepthDetectionSettings;
pub use viewport::Viewport;
