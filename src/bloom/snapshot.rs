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

use byteorder::ByteOrder;
use byteorder::LE;
use serde::Deserialize;
use serde::Serialize;

use super::builder::round_up_to_word;
use super::builder::MAX_NUM_BITS;
use super::builder::MAX_NUM_HASHES;
use super::BloomFilter;
use crate::codec::Base64;
use crate::codec::SnapshotCodec;
use crate::error::Error;

/// A point-in-time image of a [`BloomFilter`], safe to persist or transmit.
///
/// The record carries the two dimensions and the store as text, the
/// little-endian byte image of the word array run through a
/// [`SnapshotCodec`]. On the wire the fields are named `bitCount`,
/// `hashCount`, and `data`.
///
/// # Examples
///
/// ```
/// # use bloomsketch::bloom::BloomFilter;
/// # use bloomsketch::bloom::BloomFilterBuilder;
/// let mut filter = BloomFilterBuilder::with_size(1024, 5).build()?;
/// filter.add("apple");
///
/// let snapshot = filter.to_snapshot();
/// let restored = BloomFilter::from_snapshot(&snapshot)?;
/// assert!(restored.might_contain("apple"));
/// # Ok::<(), bloomsketch::error::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Total number of bits of the source filter (m).
    pub bit_count: u32,
    /// Number of probe indices per key of the source filter (k).
    pub hash_count: u32,
    /// Text-encoded little-endian byte image of the word array.
    pub data: String,
}

impl BloomFilter {
    /// Captures a snapshot of this filter using the default [`Base64`]
    /// codec.
    pub fn to_snapshot(&self) -> Snapshot {
        self.to_snapshot_with(&Base64)
    }

    /// Captures a snapshot of this filter, encoding the store with the
    /// given codec.
    pub fn to_snapshot_with(&self, codec: &impl SnapshotCodec) -> Snapshot {
        let words = self.words();
        let mut bytes = vec![0u8; words.len() * 4];
        LE::write_u32_into(words, &mut bytes);

        Snapshot {
            bit_count: self.num_bits(),
            hash_count: self.num_hashes(),
            data: codec.encode(&bytes),
        }
    }

    /// Restores a filter from a snapshot taken with the default [`Base64`]
    /// codec.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`InvalidSnapshot`](crate::error::ErrorKind::InvalidSnapshot) error
    /// when the snapshot is malformed; see
    /// [`from_snapshot_with`](Self::from_snapshot_with).
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<BloomFilter, Error> {
        Self::from_snapshot_with(snapshot, &Base64)
    }

    /// Restores a filter from a snapshot, decoding the store with the given
    /// codec.
    ///
    /// The restored dimensions are taken as declared: no power-of-two
    /// rounding is applied, so explicit-size and accuracy-derived filters
    /// both round-trip exactly. The index mask is recomputed from the
    /// restored bit count. A decoded byte buffer shorter than the store is
    /// zero-padded (and one longer is truncated) to exactly
    /// `ceil(bitCount / 32)` words before word reinterpretation. The
    /// insert counter is not part of a snapshot and restarts at 0.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`InvalidSnapshot`](crate::error::ErrorKind::InvalidSnapshot) error
    /// when a dimension is 0 or out of range, or when the `data` field does
    /// not decode. Nothing is allocated on the error path.
    pub fn from_snapshot_with(
        snapshot: &Snapshot,
        codec: &impl SnapshotCodec,
    ) -> Result<BloomFilter, Error> {
        if snapshot.bit_count == 0 || snapshot.bit_count > MAX_NUM_BITS {
            return Err(Error::invalid_snapshot("bitCount out of range")
                .with_context("bitCount", snapshot.bit_count));
        }
        if snapshot.hash_count == 0 || snapshot.hash_count > MAX_NUM_HASHES {
            return Err(Error::invalid_snapshot("hashCount out of range")
                .with_context("hashCount", snapshot.hash_count));
        }

        // Dimensions as declared, re-aligned to whole words so the store
        // invariant holds for snapshots produced elsewhere.
        let num_bits = round_up_to_word(snapshot.bit_count);
        let num_words = (num_bits / 32) as usize;

        let mut bytes = codec.decode(&snapshot.data)?;
        bytes.resize(num_words * 4, 0);

        let mut words = vec![0u32; num_words];
        LE::read_u32_into(&bytes, &mut words);

        Ok(BloomFilter::from_words(num_bits, snapshot.hash_count, words))
    }
}
