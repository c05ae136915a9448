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

use bloomsketch::bloom::BloomFilter;
use bloomsketch::bloom::BloomFilterBuilder;
use bloomsketch::bloom::Snapshot;
use bloomsketch::codec::SnapshotCodec;
use bloomsketch::error::Error;
use bloomsketch::error::ErrorKind;

#[test]
fn test_round_trip_explicit_dimensions() {
    let mut filter = BloomFilterBuilder::with_size(4096, 7).build().unwrap();
    filter.add_all((0..300).map(|i| format!("key-{i}")));

    let restored = BloomFilter::from_snapshot(&filter.to_snapshot()).unwrap();
    assert_eq!(restored.num_bits(), filter.num_bits());
    assert_eq!(restored.num_hashes(), filter.num_hashes());
    assert_eq!(restored.words(), filter.words());

    for i in 0..300 {
        assert!(restored.might_contain(format!("key-{i}")));
    }
}

#[test]
fn test_round_trip_derived_dimensions() {
    // Accuracy-derived filters have non-power-of-two sizes; restore must
    // keep them exact instead of rounding up.
    let mut filter = BloomFilterBuilder::with_accuracy(1000, 0.01).build().unwrap();
    filter.add_all(["alice", "bob", "carol"]);

    let snapshot = filter.to_snapshot();
    assert_eq!(snapshot.bit_count, 9600);

    let restored = BloomFilter::from_snapshot(&snapshot).unwrap();
    assert_eq!(restored.num_bits(), 9600);
    assert_eq!(restored.words(), filter.words());
    assert!(restored.might_contain("alice"));
    assert!(!restored.might_contain("mallory"));
}

#[test]
fn test_snapshot_survives_json() {
    let mut filter = BloomFilterBuilder::with_size(1024, 5).build().unwrap();
    filter.add_all(["eggs", "soup"]);

    let json = serde_json::to_string(&filter.to_snapshot()).unwrap();
    let snapshot: Snapshot = serde_json::from_str(&json).unwrap();
    let restored = BloomFilter::from_snapshot(&snapshot).unwrap();

    assert_eq!(restored.words(), filter.words());
    assert!(restored.might_contain("eggs"));
    assert!(restored.might_contain("soup"));
}

#[test]
fn test_snapshot_wire_format() {
    let json = serde_json::json!({
        "bitCount": 64,
        "hashCount": 3,
        "data": "",
    });
    let snapshot: Snapshot = serde_json::from_value(json).unwrap();
    let restored = BloomFilter::from_snapshot(&snapshot).unwrap();

    assert_eq!(restored.num_bits(), 64);
    assert_eq!(restored.num_hashes(), 3);
    assert_eq!(restored.count_set_bits(), 0);
}

#[test]
fn test_union_after_separate_round_trips() {
    let mut left = BloomFilterBuilder::with_size(2048, 5).build().unwrap();
    let mut right = BloomFilterBuilder::with_size(2048, 5).build().unwrap();
    left.add("foo");
    right.add("bar");

    // Hashing is deterministic across instances, so filters restored from
    // independently produced snapshots still combine correctly.
    let left = BloomFilter::from_snapshot(&left.to_snapshot()).unwrap();
    let right = BloomFilter::from_snapshot(&right.to_snapshot()).unwrap();

    let union = BloomFilter::union(&left, &right).unwrap();
    assert!(union.might_contain("foo"));
    assert!(union.might_contain("bar"));
}

#[test]
fn test_malformed_snapshots_are_rejected() {
    let cases = [
        Snapshot {
            bit_count: 0,
            hash_count: 3,
            data: String::new(),
        },
        Snapshot {
            bit_count: 256,
            hash_count: 0,
            data: String::new(),
        },
        Snapshot {
            bit_count: 256,
            hash_count: 3,
            data: "%%% not a valid encoding %%%".to_string(),
        },
    ];

    for snapshot in cases {
        let err = BloomFilter::from_snapshot(&snapshot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSnapshot);
    }
}

/// Lowercase hex, for hosts that cannot ship base64.
struct HexCodec;

impl SnapshotCodec for HexCodec {
    fn encode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>, Error> {
        if text.len() % 2 != 0 || !text.is_ascii() {
            return Err(Error::new(
                ErrorKind::InvalidSnapshot,
                "hex text must be ascii byte pairs",
            ));
        }
        (0..text.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&text[i..i + 2], 16).map_err(|err| {
                    Error::new(ErrorKind::InvalidSnapshot, "invalid hex byte")
                        .with_context("cause", err)
                })
            })
            .collect()
    }
}

#[test]
fn test_custom_codec_round_trip() {
    let mut filter = BloomFilterBuilder::with_size(512, 4).build().unwrap();
    filter.add_all(["alpha", "beta"]);

    let snapshot = filter.to_snapshot_with(&HexCodec);
    assert!(snapshot.data.chars().all(|c| c.is_ascii_hexdigit()));

    let restored = BloomFilter::from_snapshot_with(&snapshot, &HexCodec).unwrap();
    assert_eq!(restored.words(), filter.words());
    assert!(restored.might_contain("alpha"));
}
