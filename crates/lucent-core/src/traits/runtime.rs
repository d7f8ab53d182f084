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

use crate::api::ResourceViewId;

/// The effect-rendering pipeline that consumes what the depth engine finds.
///
/// The engine republishes its selection here once per presented frame:
/// a shader-readable view of the chosen depth data (or `None` when no
/// plausible buffer exists this frame) plus a boolean uniform effects can
/// branch on.
pub trait EffectRuntime {
    /// The dimensions of the frame's final render output.
    fn output_dimensions(&self) -> (u32, u32);

    /// Rebinds the named effect texture to `view`, or unbinds it on `None`.
    fn update_texture_binding(&mut self, name: &str, view: Option<ResourceViewId>);

    /// Publishes a boolean uniform to all loaded effects.
    fn update_uniform(&mut self, name: &str, value: bool);
}
