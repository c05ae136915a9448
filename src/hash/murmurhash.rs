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

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// The MurmurHash3 x86 32-bit variant: a fast, non-cryptographic hash with
/// excellent avalanche behavior at a cost low enough to run twice per key.
///
/// The input is consumed as little-endian 4-byte blocks through a
/// multiply-rotate-multiply core, the up-to-3 tail bytes are XOR-folded into
/// one last block, the raw byte length is mixed in, and the result is
/// finalized with [`fmix32`]. All arithmetic is wrapping unsigned 32-bit.
///
/// The length mixed in before finalization is the raw byte length, not a
/// block-adjusted value. Some MurmurHash3 ports differ here; this formula is
/// the one the stored bit patterns depend on, so it must not be "corrected"
/// against other implementations.
pub(crate) fn murmur3_x86_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h = seed;

    // Number of full 32-bit blocks of 4 bytes.
    // Possible exclusion of a remainder of up to 3 bytes.
    let blocks = bytes.len() >> 2;

    // Process the 32-bit blocks (the body) into the hash
    for i in 0..blocks {
        let k = LE::read_u32(&bytes[i << 2..]);
        h ^= mix_k(k);
        h = h.rotate_left(13);
        h = h.wrapping_mul(5).wrapping_add(0xe6546b64);
    }

    // tail
    let tail = &bytes[blocks << 2..];
    if !tail.is_empty() {
        let mut k = 0u32;
        if tail.len() >= 3 {
            k ^= u32::from(tail[2]) << 16;
        }
        if tail.len() >= 2 {
            k ^= u32::from(tail[1]) << 8;
        }
        k ^= u32::from(tail[0]);
        h ^= mix_k(k);
    }

    h ^= bytes.len() as u32;
    fmix32(h)
}

// k *= c1; k = MURMUR3_ROTL32(k, 15); k *= c2;
#[inline]
fn mix_k(mut k: u32) -> u32 {
    k = k.wrapping_mul(C1);
    k = k.rotate_left(15);
    k.wrapping_mul(C2)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^ (h >> 16)
}
