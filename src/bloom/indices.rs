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

/// Mixed into the first hash so the probe start is decorrelated from the
/// raw hash value that double hashing also steps by.
const PROBE_START_MIX: u32 = 0x6740bca3;

/// The k probe indices for one key, via enhanced double hashing
/// (Dillinger-Manolios).
///
/// Plain double hashing reuses one hash with a fixed step, which repeats
/// indices whenever `gcd(step, m) != 1` and silently raises the effective
/// false-positive rate. Here the starting step is forced odd, which
/// guarantees a full period when `m` is a power of two, and the step then
/// grows by the loop counter on every probe, which keeps the sequence well
/// distributed for non-power-of-two `m` where oddness alone does not
/// guarantee coprimality:
///
/// ```text
/// h     = h1 ^ PROBE_START_MIX
/// delta = h2 | 1
/// for i in 0..k:
///     index[i] = mask != 0 ? h & mask : h % m
///     delta    = delta + i      (mod 2^32)
///     h        = h + delta      (mod 2^32)
/// ```
///
/// Insertion and query both obtain their indices from this one iterator, so
/// the recurrence cannot drift between the two paths.
#[derive(Debug, Clone)]
pub(super) struct ProbeIndices {
    h: u32,
    delta: u32,
    step: u32,
    remaining: u32,
    num_bits: u32,
    mask: u32,
}

impl ProbeIndices {
    /// Starts the probe sequence for a hashed key.
    ///
    /// `mask` must be `num_bits - 1` when `num_bits` is a power of two and
    /// 0 otherwise; a non-zero mask selects O(1) masked indexing over the
    /// modulo.
    pub(super) fn new(h1: u32, h2: u32, num_hashes: u32, num_bits: u32, mask: u32) -> Self {
        ProbeIndices {
            h: h1 ^ PROBE_START_MIX,
            delta: h2 | 1,
            step: 0,
            remaining: num_hashes,
            num_bits,
            mask,
        }
    }
}

impl Iterator for ProbeIndices {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = if self.mask != 0 {
            self.h & self.mask
        } else {
            self.h % self.num_bits
        };

        self.delta = self.delta.wrapping_add(self.step);
        self.h = self.h.wrapping_add(self.delta);
        self.step = self.step.wrapping_add(1);

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeIndices {}
