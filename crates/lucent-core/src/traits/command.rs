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

use crate::api::{ResourceId, ResourceUsage};

/// Records GPU commands into the command list currently being built.
///
/// Implemented by the backend for both deferred command lists and the
/// queue's immediate list. The depth engine only ever records two things
/// through it: state transitions and whole-resource copies, always in a
/// barrier/copy/barrier sandwich around the host application's own work.
pub trait CommandRecorder {
    /// Transitions `resource` from the `before` state to the `after` state.
    ///
    /// On binding-model APIs without explicit barriers this is a no-op.
    fn barrier(&mut self, resource: ResourceId, before: ResourceUsage, after: ResourceUsage);

    /// Copies the full contents of `source` into `destination`.
    ///
    /// Both resources must have identical dimensions; `source` must be in
    /// the `COPY_SRC` state and `destination` in `COPY_DST`.
    fn copy_resource(&mut self, source: ResourceId, destination: ResourceId);
}
