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

//! # Lucent Core
//!
//! Backend-agnostic contracts for the lucent post-processing injection
//! layer.
//!
//! This crate defines the "common language" spoken between the per-API
//! interception backends and the frame-analysis engine: opaque handles for
//! externally-owned GPU resources, descriptor and flag types, and the
//! capability traits ([`GraphicsDevice`], [`CommandRecorder`],
//! [`EffectRuntime`]) through which the engine observes and manipulates the
//! host application's rendering without knowing which graphics API it is
//! running on. The 'how' of each API lives in a concrete backend that
//! implements these traits; crates like `lucent-depth` are written once
//! against them.

#![warn(missing_docs)]

pub mod api;
pub mod error;
pub mod traits;

pub use api::*;
pub use error::ResourceError;
pub use traits::{CommandRecorder, EffectRuntime, GraphicsDevice};
