// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Binary-to-text conversion for snapshot persistence.
//!
//! Snapshots carry the filter's word array as text so they can travel
//! through JSON documents, environment variables, or any other
//! string-shaped channel. The filter core does not care which text encoding
//! is used; it talks to a [`SnapshotCodec`], and [`Base64`] is the default
//! implementation handed to [`to_snapshot`](crate::bloom::BloomFilter::to_snapshot)
//! and [`from_snapshot`](crate::bloom::BloomFilter::from_snapshot).
//!
//! Hosts with their own encoding requirements implement [`SnapshotCodec`]
//! and use the `_with` variants of the snapshot operations.

mod base64;

pub use self::base64::Base64;

use crate::error::Error;

/// A narrow binary-to-text seam used by snapshot (de)serialization.
pub trait SnapshotCodec {
    /// Encodes raw bytes into text.
    fn encode(&self, bytes: &[u8]) -> String;

    /// Decodes text produced by [`encode`](Self::encode) back into bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidSnapshot`](crate::error::ErrorKind::InvalidSnapshot)
    /// error when the text is not valid for this codec.
    fn decode(&self, text: &str) -> Result<Vec<u8>, Error>;
}
