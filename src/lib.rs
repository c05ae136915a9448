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

//! # Bloomsketch
//!
//! A fixed-size, probabilistic set-membership structure: insertions and
//! membership queries with no false negatives and a tunable false-positive
//! rate. The typical deployment is as a cheap pre-check in front of an
//! expensive lookup (database, cache, network call): a negative answer
//! proves absence, a positive answer only suggests presence.
//!
//! The crate is divided into modules that constitute distinct groups of
//! functionality:
//!
//! - [`bloom`]: the filter itself, covering construction, membership,
//!   estimators, set algebra, and snapshots
//! - [`codec`]: the binary-to-text conversion seam used by snapshots
//! - [`error`]: the error type returned by all fallible operations

#![deny(missing_docs)]

pub mod bloom;
pub mod codec;
pub mod error;

mod hash;
