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

//! Bloom filter for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to
//! test whether an element is a member of a set. False positive matches are
//! possible, but false negatives are not: a query returns either "possibly
//! in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, [`BloomFilter::might_contain`]
//!   will always return `true`
//! - **Possible false positives**: `might_contain` may return `true` for
//!   keys never inserted
//! - **Fixed size**: The filter does not resize; dimensions are immutable
//!   after construction
//! - **Keys are byte sequences**: Anything `AsRef<[u8]>` works; string
//!   keys hash their UTF-8 bytes, byte slices pass through without copying
//!
//! # Usage
//!
//! ```rust
//! use bloomsketch::bloom::BloomFilterBuilder;
//!
//! // Create a filter optimized for 1000 items at a 1% false-positive rate
//! let mut filter = BloomFilterBuilder::with_accuracy(1000, 0.01).build()?;
//!
//! // Insert keys
//! filter.add("apple");
//! filter.add("banana");
//! filter.add_all(["cherry", "damson"]);
//!
//! // Check membership
//! assert!(filter.might_contain("apple")); // true - definitely inserted
//! assert!(!filter.might_contain("grape")); // false - never inserted (probably)
//!
//! // Inspect the current state
//! println!("Bits: {}", filter.num_bits());
//! println!("Bits set: {}", filter.count_set_bits());
//! println!("Est. FPP: {:.4}%", filter.estimated_false_positive_rate() * 100.0);
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! # Creating Filters
//!
//! There are two ways to create a Bloom filter:
//!
//! ## By Accuracy (Recommended)
//!
//! Derives the bit count and hash-function count from the expected item
//! count and the target false-positive probability:
//!
//! ```rust
//! # use bloomsketch::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_accuracy(
//!     10_000, // Expected distinct items
//!     0.01,   // Target false-positive probability (1%)
//! )
//! .build()?;
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! ## By Size (Manual)
//!
//! Specify the requested bit count and hash functions. The bit count is
//! rounded up to a multiple of 32 and, by default, to the next power of two
//! so probes can use a mask instead of a division:
//!
//! ```rust
//! # use bloomsketch::bloom::BloomFilterBuilder;
//! let filter = BloomFilterBuilder::with_size(
//!     9_586, // Number of bits
//!     7,     // Number of hash functions
//! )
//! .build()?;
//! assert_eq!(filter.num_bits(), 16_384);
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! # Set Operations
//!
//! Filters with identical dimensions combine word-by-word into a new
//! filter, leaving the inputs untouched:
//!
//! ```rust
//! # use bloomsketch::bloom::BloomFilter;
//! # use bloomsketch::bloom::BloomFilterBuilder;
//! let mut breakfast = BloomFilterBuilder::with_size(1024, 5).build()?;
//! let mut dinner = BloomFilterBuilder::with_size(1024, 5).build()?;
//!
//! breakfast.add("eggs");
//! dinner.add("soup");
//!
//! // Union: recognizes keys from either filter
//! let either = BloomFilter::union(&breakfast, &dinner)?;
//! assert!(either.might_contain("eggs"));
//! assert!(either.might_contain("soup"));
//!
//! // Intersection: recognizes only keys present in both
//! let both = BloomFilter::intersection(&breakfast, &dinner)?;
//! # Ok::<(), bloomsketch::error::Error>(())
//! ```
//!
//! # Snapshots
//!
//! [`BloomFilter::to_snapshot`] captures the dimensions plus a text
//! encoding of the bit store into a [`Snapshot`] record, and
//! [`BloomFilter::from_snapshot`] restores it bit-for-bit. The record
//! serializes with serde under the wire names `bitCount` / `hashCount` /
//! `data`.
//!
//! # Implementation Details
//!
//! - Two MurmurHash3 (x86 32-bit) base hashes per key, expanded into k
//!   probe indices with enhanced double hashing (Dillinger-Manolios), which
//!   avoids the short probe cycles plain double hashing is prone to
//! - Bits packed into `u32` words; power-of-two sizes probe with a mask
//!   instead of a modulo
//! - All hashing is seeded with fixed constants, so the same key maps to
//!   the same bits on every platform and in every process
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with
//!   allowable errors"
//! - Dillinger and Manolios (2004). "Bloom Filters in Probabilistic
//!   Verification"

mod bits;
mod builder;
mod indices;
mod sketch;
mod snapshot;

pub use self::builder::BloomFilterBuilder;
pub use self::sketch::BloomFilter;
pub use self::snapshot::Snapshot;
