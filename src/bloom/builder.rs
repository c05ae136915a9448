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

use super::BloomFilter;
use crate::error::Error;

pub const MIN_NUM_BITS: u32 = 1;
pub const MAX_NUM_BITS: u32 = 1 << 31;
pub const MIN_NUM_HASHES: u32 = 1;
pub const MAX_NUM_HASHES: u32 = i16::MAX as u32;

#[derive(Debug, Clone)]
enum Dimensions {
    Accuracy { capacity: u64, error_rate: f64 },
    Size { num_bits: u32, num_hashes: u32 },
}

/// Builder for creating [`BloomFilter`] instances.
///
/// Provides two construction modes:
/// - [`with_accuracy()`](Self::with_accuracy): Specify target capacity and
///   false-positive rate (recommended)
/// - [`with_size()`](Self::with_size): Specify requested bit count and hash
///   functions (manual)
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    dimensions: Dimensions,
    power_of_two_bits: bool,
}

impl BloomFilterBuilder {
    /// Creates a builder with optimal parameters for a target accuracy.
    ///
    /// The number of bits and hash functions are derived at
    /// [`build()`](Self::build) time to achieve the desired false-positive
    /// probability at the given number of distinct items; the bit count is
    /// then aligned up to a multiple of 32.
    ///
    /// # Arguments
    ///
    /// - `capacity`: Expected number of distinct inserted items
    /// - `error_rate`: Target false-positive probability, in the open
    ///   interval (0, 1)
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// // Optimal for 10,000 items at a 1% false-positive rate
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01).build()?;
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn with_accuracy(capacity: u64, error_rate: f64) -> Self {
        BloomFilterBuilder {
            dimensions: Dimensions::Accuracy {
                capacity,
                error_rate,
            },
            power_of_two_bits: true,
        }
    }

    /// Creates a builder with manual size specification.
    ///
    /// Use this when working with pre-calculated parameters. The requested
    /// bit count is rounded up to a multiple of 32 and then, unless
    /// disabled via [`use_power_of_two_bits()`](Self::use_power_of_two_bits),
    /// up to the next power of two. Power-of-two sizing trades some memory
    /// for masked indexing instead of a division on every probe; neither
    /// rounding ever decreases the bit count.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7).build()?;
    /// assert_eq!(filter.num_bits(), 16_384);
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn with_size(num_bits: u32, num_hashes: u32) -> Self {
        BloomFilterBuilder {
            dimensions: Dimensions::Size {
                num_bits,
                num_hashes,
            },
            power_of_two_bits: true,
        }
    }

    /// Controls power-of-two rounding of an explicitly requested bit count
    /// (default: enabled). Has no effect on the accuracy-derived mode,
    /// which only aligns up to a multiple of 32.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(10_000, 7)
    ///     .use_power_of_two_bits(false)
    ///     .build()?;
    /// assert_eq!(filter.num_bits(), 10_016);
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn use_power_of_two_bits(mut self, enabled: bool) -> Self {
        self.power_of_two_bits = enabled;
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`InvalidParameters`](crate::error::ErrorKind::InvalidParameters)
    /// error when the capacity is 0, the error rate is non-finite or outside
    /// the open interval (0, 1), or an explicit dimension is 0 or above its
    /// supported maximum. Nothing is allocated on the error path.
    pub fn build(self) -> Result<BloomFilter, Error> {
        match self.dimensions {
            Dimensions::Accuracy {
                capacity,
                error_rate,
            } => {
                let (num_bits, num_hashes) = Self::optimal_parameters(capacity, error_rate)?;
                Ok(BloomFilter::with_dimensions(num_bits, num_hashes))
            }
            Dimensions::Size {
                num_bits,
                num_hashes,
            } => {
                if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&num_bits) {
                    return Err(Error::invalid_parameters(format!(
                        "num_bits must be between {MIN_NUM_BITS} and {MAX_NUM_BITS}"
                    ))
                    .with_context("num_bits", num_bits));
                }
                if !(MIN_NUM_HASHES..=MAX_NUM_HASHES).contains(&num_hashes) {
                    return Err(Error::invalid_parameters(format!(
                        "num_hashes must be between {MIN_NUM_HASHES} and {MAX_NUM_HASHES}"
                    ))
                    .with_context("num_hashes", num_hashes));
                }

                let mut num_bits = round_up_to_word(num_bits);
                if self.power_of_two_bits {
                    num_bits = num_bits.next_power_of_two();
                }
                Ok(BloomFilter::with_dimensions(num_bits, num_hashes))
            }
        }
    }

    /// Derives the optimal `(num_bits, num_hashes)` pair for the given
    /// capacity and target false-positive rate. The bit count is already
    /// aligned up to a multiple of 32.
    ///
    /// # Errors
    ///
    /// Returns an
    /// [`InvalidParameters`](crate::error::ErrorKind::InvalidParameters)
    /// error when `capacity` is 0 or `error_rate` is non-finite or outside
    /// the open interval (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let (num_bits, num_hashes) = BloomFilterBuilder::optimal_parameters(1000, 0.01)?;
    /// assert_eq!(num_bits, 9600);
    /// assert_eq!(num_hashes, 7);
    /// # Ok::<(), bloomsketch::error::Error>(())
    /// ```
    pub fn optimal_parameters(capacity: u64, error_rate: f64) -> Result<(u32, u32), Error> {
        if capacity == 0 {
            return Err(Error::invalid_parameters("capacity must be greater than 0"));
        }
        if !error_rate.is_finite() || error_rate <= 0.0 || error_rate >= 1.0 {
            return Err(Error::invalid_parameters(
                "error_rate must be within the open interval (0, 1)",
            )
            .with_context("error_rate", error_rate));
        }

        let num_bits = Self::suggest_num_bits(capacity, error_rate);
        let num_hashes = Self::suggest_num_hashes(capacity, num_bits);
        Ok((round_up_to_word(num_bits), num_hashes))
    }

    /// Suggests the number of bits for a capacity and target false-positive
    /// rate, before word alignment.
    ///
    /// Formula: `m = ceil(-n * ln(p) / (ln 2)^2)`
    /// where n = capacity, p = error_rate
    pub fn suggest_num_bits(capacity: u64, error_rate: f64) -> u32 {
        let n = capacity as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * error_rate.ln() / ln2_squared).ceil();
        bits.clamp(f64::from(MIN_NUM_BITS), MAX_NUM_BITS as f64) as u32
    }

    /// Suggests the number of hash functions for a capacity and bit count.
    ///
    /// Formula: `k = max(1, round((m / n) * ln 2))`
    /// where m = num_bits, n = capacity
    pub fn suggest_num_hashes(capacity: u64, num_bits: u32) -> u32 {
        let m = f64::from(num_bits);
        let n = capacity as f64;

        let k = (m / n * std::f64::consts::LN_2).round();
        k.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u32
    }
}

/// Aligns a bit count up to the next multiple of 32, the word size of the
/// underlying store. Never decreases the count.
pub(super) fn round_up_to_word(num_bits: u32) -> u32 {
    num_bits.div_ceil(32) * 32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_accuracy_derivation() {
        // capacity=1000, p=0.01: m_raw = ceil(9585.06) = 9586, aligned to
        // 9600; k = round(9.586 * ln 2) = 7.
        let filter = BloomFilterBuilder::with_accuracy(1000, 0.01).build().unwrap();
        assert_eq!(filter.num_bits(), 9600);
        assert_eq!(filter.num_hashes(), 7);
        assert_eq!(filter.num_bits() % 32, 0);
    }

    #[test]
    fn test_accuracy_never_rounds_to_power_of_two() {
        let filter = BloomFilterBuilder::with_accuracy(1000, 0.01)
            .use_power_of_two_bits(true)
            .build()
            .unwrap();
        assert!(!filter.num_bits().is_power_of_two());
    }

    #[test]
    fn test_size_power_of_two_default() {
        let filter = BloomFilterBuilder::with_size(1000, 5).build().unwrap();
        assert_eq!(filter.num_bits(), 1024);
        assert_eq!(filter.num_hashes(), 5);
    }

    #[test]
    fn test_size_word_alignment_only() {
        let filter = BloomFilterBuilder::with_size(1048, 5)
            .use_power_of_two_bits(false)
            .build()
            .unwrap();
        assert_eq!(filter.num_bits(), 1056);

        let rounded = BloomFilterBuilder::with_size(1048, 5).build().unwrap();
        assert_eq!(rounded.num_bits(), 2048);
    }

    #[test]
    fn test_rounding_never_shrinks() {
        for requested in [1u32, 31, 32, 33, 1000, 4096, 100_000] {
            let filter = BloomFilterBuilder::with_size(requested, 3).build().unwrap();
            assert!(filter.num_bits() >= requested);
        }
    }

    #[test]
    fn test_invalid_capacity() {
        let err = BloomFilterBuilder::with_accuracy(0, 0.01).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn test_invalid_error_rate() {
        for error_rate in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let err = BloomFilterBuilder::with_accuracy(1000, error_rate)
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameters);
        }
    }

    #[test]
    fn test_invalid_explicit_dimensions() {
        let err = BloomFilterBuilder::with_size(0, 5).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);

        let err = BloomFilterBuilder::with_size(1024, 0).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameters);
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1000, 0.01), 9586);
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 9586), 7);
        // A sparse filter wants many hashes; a dense one very few.
        assert_eq!(BloomFilterBuilder::suggest_num_hashes(1000, 1000), 1);
    }
}
