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

use super::bits::BitArray;
use super::indices::ProbeIndices;
use crate::error::Error;
use crate::hash::hash_pair;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted keys always return `true`)
/// - Tunable false-positive rate
/// - Constant space usage
///
/// Use [`super::BloomFilterBuilder`] to construct instances.
///
/// The dimensions (bit count and hash count) are fixed for the lifetime
/// of the filter; set operations and snapshot restores rely on that. The
/// filter is not internally synchronized: Rust's borrow rules already
/// require external coordination for concurrent mutation, which matches the
/// single-writer model this structure assumes.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Total number of bits (m), always a multiple of 32.
    num_bits: u32,
    /// Number of probe indices generated per key (k).
    num_hashes: u32,
    /// `num_bits - 1` when `num_bits` is a power of two, else 0.
    index_mask: u32,
    /// The packed bit store.
    bits: BitArray,
    /// Heuristic count of `add` invocations, not a deduplicated cardinality.
    insert_count: u64,
}

impl BloomFilter {
    /// Creates an empty filter. `num_bits` must already be word-aligned;
    /// construction paths guarantee it.
    pub(super) fn with_dimensions(num_bits: u32, num_hashes: u32) -> Self {
        BloomFilter {
            num_bits,
            num_hashes,
            index_mask: index_mask_for(num_bits),
            bits: BitArray::new(num_bits),
            insert_count: 0,
        }
    }

    /// Rebuilds a filter around an existing word array, as decoded from a
    /// snapshot. The index mask is recomputed from the restored bit count;
    /// the insert counter starts over at 0.
    pub(super) fn from_words(num_bits: u32, num_hashes: u32, words: Vec<u32>) -> Self {
        BloomFilter {
            num_bits,
            num_hashes,
            index_mask: index_mask_for(num_bits),
            bits: BitArray::from_words(words),
            insert_count: 0,
        }
    }

    /// Inserts a key into the filter.
    ///
    /// After insertion, [`might_contain`](Self::might_contain) for the same
    /// key always returns `true`. Bits only ever transition from 0 to 1.
    /// Returns `&mut Self` so insertions can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let mut filter = BloomFilterBuilder::with_accuracy(100, 0.01).build()?;
    /// filter.add("apple").add("banana");
    ///
    /// assert!(filter.might_contain("apple"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn add(&mut self, key: impl AsRef<[u8]>) -> &mut Self {
        for index in self.probes(key.as_ref()) {
            self.bits.set(index);
        }
        self.insert_count += 1;
        self
    }

    /// Inserts every key of a sequence, in order.
    ///
    /// Equivalent to repeated [`add`](Self::add); there is no atomicity
    /// across the batch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let mut filter = BloomFilterBuilder::with_accuracy(100, 0.01).build()?;
    /// filter.add_all(["alice", "bob", "carol"]);
    ///
    /// assert!(filter.might_contain("bob"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn add_all<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for key in keys {
            self.add(key);
        }
        self
    }

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** inserted (or is a false positive)
    /// - `false`: Key was **definitely not** inserted
    ///
    /// The query walks the same probe sequence an insertion would and
    /// answers `false` the moment any required bit is unset. It cannot fail
    /// for any key.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let mut filter = BloomFilterBuilder::with_accuracy(100, 0.01).build()?;
    /// filter.add("apple");
    ///
    /// assert!(filter.might_contain("apple"));
    /// assert!(!filter.might_contain("grape"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn might_contain(&self, key: impl AsRef<[u8]>) -> bool {
        self.probes(key.as_ref()).all(|index| self.bits.get(index))
    }

    /// Resets the filter to its initial empty state.
    ///
    /// Clears every bit and the insert counter while preserving the
    /// dimensions. This is the only bulk bit-clearing operation; individual
    /// keys cannot be deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let mut filter = BloomFilterBuilder::with_accuracy(100, 0.01).build()?;
    /// filter.add("apple");
    ///
    /// filter.clear();
    /// assert_eq!(filter.count_set_bits(), 0);
    /// assert!(!filter.might_contain("apple"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn clear(&mut self) {
        self.bits.clear_all();
        self.insert_count = 0;
    }

    /// Returns the total number of bits in the filter (m).
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Returns the number of probe indices generated per key (k).
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns how many times [`add`](Self::add) has run since construction
    /// or the last [`clear`](Self::clear).
    ///
    /// Duplicate keys count every time, so this is an upper bound on the
    /// distinct insert count, not a cardinality. Snapshots do not carry it.
    pub fn insert_count(&self) -> u64 {
        self.insert_count
    }

    /// Returns the packed word array backing the filter.
    ///
    /// This is a read-only view for inspection and persistence; whole-filter
    /// operations ([`union`](Self::union), [`intersection`](Self::intersection))
    /// are the only supported way to combine stores.
    pub fn words(&self) -> &[u32] {
        self.bits.words()
    }

    /// Counts the set bits across the whole store. O(words).
    pub fn count_set_bits(&self) -> u64 {
        self.bits.count_ones()
    }

    /// Returns the fraction of bits currently set, in [0, 1].
    ///
    /// Values near 0.5 indicate the filter is approaching its design load;
    /// beyond that the false-positive rate degrades quickly.
    pub fn fill_ratio(&self) -> f64 {
        self.count_set_bits() as f64 / f64::from(self.num_bits)
    }

    /// Estimates the number of distinct keys inserted so far.
    ///
    /// Uses the fill-based estimator `n ≈ -(m/k) * ln(1 - X/m)` where X is
    /// the number of set bits. An empty store estimates 0. A saturated
    /// store (every bit set) estimates `+∞`: the filter can no longer bound
    /// the cardinality, and unbounded growth at saturation is the defined
    /// boundary behavior of this estimator rather than an error.
    pub fn estimated_cardinality(&self) -> f64 {
        let set_bits = self.count_set_bits();
        if set_bits == 0 {
            return 0.0;
        }
        if set_bits >= u64::from(self.num_bits) {
            return f64::INFINITY;
        }

        let m = f64::from(self.num_bits);
        let k = f64::from(self.num_hashes);
        -(m / k) * (1.0 - set_bits as f64 / m).ln()
    }

    /// Estimates the current false-positive probability, `(X/m)^k`.
    ///
    /// This is the theoretical probability given the current fill, assuming
    /// uniform bit distribution, not a measured rate.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        self.fill_ratio().powf(f64::from(self.num_hashes))
    }

    /// Checks whether two filters have the same dimensions and can take
    /// part in set operations together.
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.num_bits == other.num_bits && self.num_hashes == other.num_hashes
    }

    /// Produces a new filter whose store is the word-wise OR of the inputs.
    ///
    /// The result answers `true` for every key either input answers `true`
    /// for: a true superset of the semantic union, with no false negatives
    /// introduced.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`IncompatibleFilters`](crate::error::ErrorKind::IncompatibleFilters)
    /// error when the inputs' dimensions differ, before any allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let mut left = BloomFilterBuilder::with_size(1024, 5).build()?;
    /// let mut right = BloomFilterBuilder::with_size(1024, 5).build()?;
    /// left.add("a");
    /// right.add("b");
    ///
    /// let merged = BloomFilter::union(&left, &right)?;
    /// assert!(merged.might_contain("a"));
    /// assert!(merged.might_contain("b"));
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn union(a: &BloomFilter, b: &BloomFilter) -> Result<BloomFilter, Error> {
        check_compatible(a, b, "union")?;

        let words = a
            .words()
            .iter()
            .zip(b.words())
            .map(|(left, right)| left | right)
            .collect();
        let mut merged = BloomFilter::from_words(a.num_bits, a.num_hashes, words);
        merged.insert_count = a.insert_count + b.insert_count;
        Ok(merged)
    }

    /// Produces a new filter whose store is the word-wise AND of the inputs.
    ///
    /// The result answers `true` for every key present in both inputs; its
    /// false-positive rate may exceed either input's, but keys inserted into
    /// both sources are never reported absent.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`IncompatibleFilters`](crate::error::ErrorKind::IncompatibleFilters)
    /// error when the inputs' dimensions differ, before any allocation.
    pub fn intersection(a: &BloomFilter, b: &BloomFilter) -> Result<BloomFilter, Error> {
        check_compatible(a, b, "intersection")?;

        let words = a
            .words()
            .iter()
            .zip(b.words())
            .map(|(left, right)| left & right)
            .collect();
        let mut merged = BloomFilter::from_words(a.num_bits, a.num_hashes, words);
        merged.insert_count = a.insert_count.min(b.insert_count);
        Ok(merged)
    }

    /// The probe sequence for a key's byte image. Insertion and query share
    /// this one path.
    fn probes(&self, key: &[u8]) -> ProbeIndices {
        let (h1, h2) = hash_pair(key);
        ProbeIndices::new(h1, h2, self.num_hashes, self.num_bits, self.index_mask)
    }
}

/// `num_bits - 1` when masked indexing applies, 0 to signal the modulo path.
fn index_mask_for(num_bits: u32) -> u32 {
    if num_bits.is_power_of_two() {
        num_bits - 1
    } else {
        0
    }
}

fn check_compatible(a: &BloomFilter, b: &BloomFilter, operation: &'static str) -> Result<(), Error> {
    if !a.is_compatible(b) {
        return Err(Error::incompatible_filters(format!(
            "{operation} requires identical dimensions"
        ))
        .with_context("left", format!("{}x{}", a.num_bits, a.num_hashes))
        .with_context("right", format!("{}x{}", b.num_bits, b.num_hashes)));
    }
    Ok(())
}
