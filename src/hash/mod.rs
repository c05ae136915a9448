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

mod murmurhash;

pub(crate) use self::murmurhash::murmur3_x86_32;

/// Seed for the first of the two base hashes.
///
/// The two seeds are arbitrary fixed constants; this one has a long history
/// as a MurmurHash verification seed. What matters is not the particular
/// values but that they never change: the bit positions a key occupies are a
/// pure function of its bytes and these seeds, so membership queries against
/// a restored snapshot, and set operations across filter instances, are only
/// valid while every party hashes with the same pair. Once you have a
/// history of stored snapshots you are stuck with them.
pub(crate) const SEED_LO: u32 = 0x9747b28c;

/// Seed for the second of the two base hashes. See [`SEED_LO`].
pub(crate) const SEED_HI: u32 = 0x5bd1e995;

/// Computes the two independent 32-bit base hashes for a key's byte image.
///
/// Identical input bytes produce an identical pair on every run, platform,
/// and process.
pub(crate) fn hash_pair(bytes: &[u8]) -> (u32, u32) {
    let h1 = murmur3_x86_32(bytes, SEED_LO);
    let h2 = murmur3_x86_32(bytes, SEED_HI);
    (h1, h2)
}
