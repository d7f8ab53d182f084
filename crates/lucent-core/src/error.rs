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

//! Error types for resource operations performed through the capability traits.

use std::fmt;

/// An error related to the creation or use of a GPU resource.
///
/// These originate in the backend implementing [`GraphicsDevice`] and are
/// surfaced to callers that requested the operation. The frame-analysis
/// engine treats them as recoverable: a failed backup-texture or view
/// allocation degrades to "no depth data this frame", never to a crash.
///
/// [`GraphicsDevice`]: crate::traits::GraphicsDevice
#[derive(Debug)]
pub enum ResourceError {
    /// The handle used to reference a resource does not name a live resource.
    InvalidHandle,
    /// The backend could not allocate the requested resource.
    AllocationFailed {
        /// A short description of what was being allocated.
        what: &'static str,
        /// Detailed error messages from the backend.
        details: String,
    },
    /// The requested format or usage combination is not supported by the device.
    Unsupported(String),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidHandle => write!(f, "Invalid resource handle."),
            ResourceError::AllocationFailed { what, details } => {
                write!(f, "Failed to allocate {what}: {details}")
            }
            ResourceError::Unsupported(msg) => {
                write!(f, "Unsupported format or usage: {msg}")
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}
