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

//! Shared test fixtures for F# analyzer documents.
//!
//! # Quick Start
//!
//! ```rust
//! use fsonar_test::fixtures;
//!
//! // Pre-built issue lists and their documents
//! let issues = fixtures::two_issues();
//! let xml = fixtures::TWO_ISSUES_XML;
//!
//! // Custom documents
//! use fsonar_test::fixtures::builders::{IssueBuilder, XmlDocumentBuilder};
//!
//! let issue = IssueBuilder::new("FS0001").at_line(4).build();
//! let xml = XmlDocumentBuilder::new().issue(&issue).build();
//! assert!(xml.contains("<StartLine>4</StartLine>"));
//!
//! // Malformed documents with the error kind they must produce
//! for (name, xml, kind) in fixtures::errors::invalid_documents() {
//!     let _ = (name, xml, kind);
//! }
//! ```

use fsonar_core::Issue;
use std::collections::BTreeMap;

pub mod fixtures;

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> Vec<Issue>)>;

/// Count issues per rule key.
pub fn count_by_rule(issues: &[Issue]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for issue in issues {
        *counts.entry(issue.rule_key().to_string()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_rule() {
        let counts = count_by_rule(&fixtures::many_files());
        assert_eq!(counts.values().sum::<usize>(), fixtures::many_files().len());
        assert!(counts.contains_key("FS0001"));
    }
}
