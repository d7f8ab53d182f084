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

//! # Lucent Depth
//!
//! Frame state tracking and depth-buffer selection.
//!
//! A host application creates dozens of depth-stencil surfaces per frame
//! (shadow maps, UI targets, pre-passes) and gives lucent no hint as to
//! which one holds the main scene. This crate reconstructs that intent
//! purely from observed low-level operations. Intercepted draws, clears,
//! target binds and command-list executions flow through the hook surface
//! in [`hooks`] and accumulate into per-context statistics
//! ([`tracker::CommandListState`]), folded up the command-list/queue
//! hierarchy. Once per present, [`DeviceDepthState`] scores the candidates
//! and republishes the winner's depth data to the effect runtime,
//! preserving its contents across the clears that would otherwise destroy
//! them before effects can read them.
//!
//! Nothing here owns application resources: handles are observed, filtered
//! against destruction notifications, and never dereferenced after the
//! application destroys them.

#![warn(missing_docs)]

pub mod heuristics;
pub mod hooks;
pub mod selection;
pub mod stats;
pub mod tracker;

pub use selection::DeviceDepthState;
pub use stats::{ClearEvent, DrawStats};
pub use tracker::{CommandListState, DepthStencilSnapshot};
