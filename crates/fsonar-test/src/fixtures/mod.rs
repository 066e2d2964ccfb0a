// FSonar - F# analysis results for SonarQube
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Canonical test fixtures for analyzer result documents.
//!
//! - **documents**: issue lists and matching XML text
//! - **errors**: malformed documents and the error kind each must produce
//! - **builders**: fluent construction of issues and XML documents

pub mod builders;
mod documents;
pub mod errors;

pub use documents::*;

use crate::FixtureList;

/// Returns all issue-list fixtures for iteration.
pub fn all() -> FixtureList {
    vec![
        ("empty", empty),
        ("two_issues", two_issues),
        ("special_characters", special_characters),
        ("partial_positions", partial_positions),
        ("many_files", many_files),
        ("extreme_positions", extreme_positions),
    ]
}
