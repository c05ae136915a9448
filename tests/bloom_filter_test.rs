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

use bloomsketch::bloom::BloomFilterBuilder;
use googletest::assert_that;
use googletest::prelude::near;

#[test]
fn test_membership_pre_check_scenario() {
    let mut filter = BloomFilterBuilder::with_accuracy(1000, 0.01).build().unwrap();
    assert!(filter.num_bits() > 0);
    assert!(filter.num_hashes() >= 1);

    filter.add("alice");
    filter.add("bob");
    filter.add("carol");

    assert!(filter.might_contain("alice"));
    assert!(filter.might_contain("bob"));
    assert!(filter.might_contain("carol"));
    assert!(!filter.might_contain("mallory"));
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilterBuilder::with_accuracy(2000, 0.01).build().unwrap();

    let keys: Vec<String> = (0..2000)
        .map(|i| format!("user-{i}-{}", rand::random_range(0..1_000_000u32)))
        .collect();
    filter.add_all(&keys);

    for key in &keys {
        assert!(filter.might_contain(key), "inserted key {key} reported absent");
    }
}

#[test]
fn test_false_positive_rate_near_target() {
    let mut filter = BloomFilterBuilder::with_accuracy(5000, 0.01).build().unwrap();
    filter.add_all((0..5000).map(|i| format!("member-{i}")));

    // Probe with keys that were never inserted and measure how often the
    // filter claims to have seen them.
    let probes = 10_000;
    let false_positives = (0..probes)
        .filter(|i| filter.might_contain(format!("stranger-{i}")))
        .count();
    let measured = false_positives as f64 / f64::from(probes);

    assert!(
        measured < 0.03,
        "measured false-positive rate {measured} is far above the 1% target"
    );
}

#[test]
fn test_clear_forgets_everything() {
    let mut filter = BloomFilterBuilder::with_size(4096, 5).build().unwrap();
    let keys: Vec<String> = (0..200).map(|i| format!("key-{i}")).collect();
    filter.add_all(&keys);

    filter.clear();
    assert_eq!(filter.count_set_bits(), 0);
    assert_eq!(filter.insert_count(), 0);
    for key in &keys {
        assert!(!filter.might_contain(key));
    }
}

#[test]
fn test_fill_ratio_and_fpp_stay_bounded() {
    let mut filter = BloomFilterBuilder::with_size(256, 4).build().unwrap();

    for i in 0..500 {
        filter.add(format!("key-{i}"));
        let fill = filter.fill_ratio();
        let fpp = filter.estimated_false_positive_rate();
        assert!((0.0..=1.0).contains(&fill));
        assert!((0.0..=1.0).contains(&fpp));
    }
}

#[test]
fn test_estimated_cardinality_grows_with_inserts() {
    let mut filter = BloomFilterBuilder::with_accuracy(10_000, 0.01).build().unwrap();
    assert_eq!(filter.estimated_cardinality(), 0.0);

    let mut previous = 0.0;
    for batch in 0..10 {
        filter.add_all((0..500).map(|i| format!("key-{batch}-{i}")));
        let estimate = filter.estimated_cardinality();
        assert!(
            estimate >= previous,
            "estimate shrank from {previous} to {estimate}"
        );
        previous = estimate;
    }

    // 5000 distinct keys inserted; the fill-based estimate should land close.
    assert_that!(previous, near(5000.0, 500.0));
}

#[test]
fn test_saturated_filter_estimates_unbounded_cardinality() {
    let mut filter = BloomFilterBuilder::with_size(32, 2).build().unwrap();
    filter.add_all((0..500).map(|i| format!("key-{i}")));

    assert_eq!(filter.fill_ratio(), 1.0);
    assert_eq!(filter.estimated_false_positive_rate(), 1.0);
    assert!(filter.estimated_cardinality().is_infinite());
}

#[test]
fn test_duplicate_adds_only_grow_insert_count() {
    let mut filter = BloomFilterBuilder::with_size(1024, 5).build().unwrap();
    for _ in 0..10 {
        filter.add("same-key");
    }

    assert_eq!(filter.insert_count(), 10);
    // A single key sets at most k bits no matter how often it is added.
    assert!(filter.count_set_bits() <= 5);
}
