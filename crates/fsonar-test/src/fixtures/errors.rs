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

//! Malformed analyzer documents.
//!
//! Each sample is paired with the error kind the importer must report for it.

use fsonar_core::ImportErrorKind;

/// A valid issue body, used as the base for leaf-level corruptions.
const VALID_ISSUE_BODY: &str = "<RuleKey>R1</RuleKey><Message>M1</Message>\
<AbsoluteFilePath>/a.fs</AbsoluteFilePath><StartLine>3</StartLine>\
<StartColumn>1</StartColumn><EndLine>3</EndLine><EndColumn>10</EndColumn>";

/// Wrap an `Issue` body in a complete document.
pub fn with_issue_body(body: &str) -> String {
    format!(
        "<AnalysisOutput><Issues><Issue>{}</Issue></Issues></AnalysisOutput>",
        body
    )
}

fn corrupt(from: &str, to: &str) -> String {
    with_issue_body(&VALID_ISSUE_BODY.replacen(from, to, 1))
}

/// Invalid documents as (name, xml, expected error kind).
pub fn invalid_documents() -> Vec<(&'static str, String, ImportErrorKind)> {
    use ImportErrorKind::*;

    vec![
        // Stream ends early
        ("empty", String::new(), PrematureEnd),
        ("whitespace_only", "  \n\t ".to_string(), PrematureEnd),
        ("declaration_only", "<?xml version=\"1.0\"?>".to_string(), PrematureEnd),
        (
            "missing_root_end",
            "<AnalysisOutput><Issues></Issues>".to_string(),
            PrematureEnd,
        ),
        (
            "unclosed_issue",
            "<AnalysisOutput><Issues><Issue><RuleKey>R1</RuleKey>".to_string(),
            PrematureEnd,
        ),
        // Wrong structure
        ("wrong_root", "<Report></Report>".to_string(), SchemaViolation),
        (
            "unexpected_output_child",
            "<AnalysisOutput><Warnings/></AnalysisOutput>".to_string(),
            SchemaViolation,
        ),
        (
            "unexpected_issues_child",
            "<AnalysisOutput><Issues><Warning/></Issues></AnalysisOutput>".to_string(),
            SchemaViolation,
        ),
        (
            "second_root",
            "<AnalysisOutput></AnalysisOutput><AnalysisOutput></AnalysisOutput>".to_string(),
            SchemaViolation,
        ),
        (
            "missing_rule_key",
            corrupt("<RuleKey>R1</RuleKey>", ""),
            SchemaViolation,
        ),
        (
            "blank_rule_key",
            corrupt("<RuleKey>R1</RuleKey>", "<RuleKey>  </RuleKey>"),
            SchemaViolation,
        ),
        (
            "missing_message",
            with_issue_body("<RuleKey>R1</RuleKey>"),
            SchemaViolation,
        ),
        (
            "leaves_out_of_order",
            corrupt(
                "<StartLine>3</StartLine><StartColumn>1</StartColumn>",
                "<StartColumn>1</StartColumn><StartLine>3</StartLine>",
            ),
            SchemaViolation,
        ),
        (
            "child_in_leaf",
            corrupt("<Message>M1</Message>", "<Message><b>M1</b></Message>"),
            SchemaViolation,
        ),
        (
            "extra_leaf",
            corrupt("<EndColumn>10</EndColumn>", "<EndColumn>10</EndColumn><Severity>1</Severity>"),
            SchemaViolation,
        ),
        // Bad integers
        (
            "non_numeric_line",
            corrupt("<StartLine>3</StartLine>", "<StartLine>abc</StartLine>"),
            InvalidInteger,
        ),
        (
            "decimal_column",
            corrupt("<StartColumn>1</StartColumn>", "<StartColumn>1.5</StartColumn>"),
            InvalidInteger,
        ),
        (
            "overflowing_line",
            corrupt("<EndLine>3</EndLine>", "<EndLine>2147483648</EndLine>"),
            InvalidInteger,
        ),
        // Malformed markup
        (
            "mismatched_end_tag",
            "<AnalysisOutput><Issues></AnalysisOutput>".to_string(),
            StreamFailure,
        ),
        (
            "unterminated_tag",
            "<AnalysisOutput><Issu".to_string(),
            StreamFailure,
        ),
        (
            "truncated_root_end_tag",
            with_issue_body(
                "<RuleKey>R1</RuleKey><Message>M</Message><AbsoluteFilePath>/a.fs</AbsoluteFilePath>",
            )
            .trim_end()
            .trim_end_matches('>')
            .to_string(),
            StreamFailure,
        ),
        (
            "undefined_entity",
            corrupt("<Message>M1</Message>", "<Message>&nope;</Message>"),
            StreamFailure,
        ),
    ]
}
