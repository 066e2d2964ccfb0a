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

//! Reader events and the token source abstraction.
//!
//! The schema parser never touches bytes directly. It pulls [`ReaderEvent`]s
//! from a [`TokenSource`], one at a time, until the document is complete.
//! The production source lives in `fsonar-xml`; [`EventReplay`] replays a
//! prepared event list and is what the state machine tests drive.
//!
//! # Example Event Sequence
//!
//! For this document:
//!
//! ```text
//! <AnalysisOutput>
//!   <Issues>
//!     <Issue><RuleKey>R1</RuleKey>...</Issue>
//!   </Issues>
//! </AnalysisOutput>
//! ```
//!
//! a source yields:
//!
//! ```text
//! Start("AnalysisOutput") @1
//! Text("\n  ")            @2
//! Start("Issues")         @2
//! ...
//! Start("RuleKey")        @3
//! Text("R1")              @3
//! End("RuleKey")          @3
//! ...
//! End("AnalysisOutput")   @5
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::io;
use thiserror::Error;

/// The payload of a reader event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Start tag, carrying the element's local name.
    Start(String),
    /// End tag, carrying the element's local name.
    End(String),
    /// Character data with entities already resolved.
    Text(String),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Start(name) => write!(f, "<{}>", name),
            EventKind::End(name) => write!(f, "</{}>", name),
            EventKind::Text(text) => write!(f, "text \"{}\"", text.trim()),
        }
    }
}

/// A single event produced by a [`TokenSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderEvent {
    pub kind: EventKind,
    /// Line the reader was on after producing the event (1-based).
    pub line: usize,
}

impl ReaderEvent {
    pub fn start(name: impl Into<String>, line: usize) -> Self {
        Self {
            kind: EventKind::Start(name.into()),
            line,
        }
    }

    pub fn end(name: impl Into<String>, line: usize) -> Self {
        Self {
            kind: EventKind::End(name.into()),
            line,
        }
    }

    pub fn text(text: impl Into<String>, line: usize) -> Self {
        Self {
            kind: EventKind::Text(text.into()),
            line,
        }
    }
}

/// Failure reported by a token source while producing the next event.
///
/// This covers both I/O failures of the underlying byte stream and malformed
/// markup (unterminated tags, bad encoding).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ReadFault {
    /// Line the reader had reached when the failure occurred.
    pub line: usize,
    pub message: String,
}

impl ReadFault {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A pull-style tokenizer.
///
/// Implementations yield events in document order and return `Ok(None)` once
/// the input is exhausted. Sources are single pass: after `Ok(None)` or an
/// error, further calls may keep returning `Ok(None)`.
pub trait TokenSource {
    /// Pull the next event.
    fn next_event(&mut self) -> Result<Option<ReaderEvent>, ReadFault>;

    /// Current 1-based line of the reader.
    fn line(&self) -> usize;

    /// Release the reader and the byte stream underneath it.
    fn close(self) -> io::Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// A [`TokenSource`] replaying a prepared list of events.
///
/// Useful for driving the schema parser with crafted sequences, including
/// ones no real XML reader would produce.
///
/// # Examples
///
/// ```rust
/// use fsonar_core::{EventReplay, ReaderEvent, TokenSource};
///
/// let mut replay = EventReplay::new(vec![
///     ReaderEvent::start("AnalysisOutput", 1),
///     ReaderEvent::end("AnalysisOutput", 1),
/// ]);
/// assert!(replay.next_event().unwrap().is_some());
/// assert!(replay.next_event().unwrap().is_some());
/// assert!(replay.next_event().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventReplay {
    events: VecDeque<ReaderEvent>,
    line: usize,
    fault_at_end: Option<String>,
    close_failure: Option<String>,
}

impl EventReplay {
    pub fn new(events: impl IntoIterator<Item = ReaderEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            line: 1,
            fault_at_end: None,
            close_failure: None,
        }
    }

    /// Report a read failure instead of end-of-stream once the events run out.
    pub fn fail_at_end(mut self, message: impl Into<String>) -> Self {
        self.fault_at_end = Some(message.into());
        self
    }

    /// Make [`TokenSource::close`] fail with the given message.
    pub fn fail_on_close(mut self, message: impl Into<String>) -> Self {
        self.close_failure = Some(message.into());
        self
    }

    /// Number of events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl TokenSource for EventReplay {
    fn next_event(&mut self) -> Result<Option<ReaderEvent>, ReadFault> {
        match self.events.pop_front() {
            Some(event) => {
                self.line = event.line;
                Ok(Some(event))
            }
            None => match self.fault_at_end.take() {
                Some(message) => Err(ReadFault::new(self.line, message)),
                None => Ok(None),
            },
        }
    }

    fn line(&self) -> usize {
        self.line
    }

    fn close(self) -> io::Result<()> {
        match self.close_failure {
            Some(message) => Err(io::Error::new(io::ErrorKind::Other, message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Start("Issue".into()).to_string(), "<Issue>");
        assert_eq!(EventKind::End("Issues".into()).to_string(), "</Issues>");
        assert_eq!(EventKind::Text("  abc \n".into()).to_string(), "text \"abc\"");
    }

    #[test]
    fn test_replay_tracks_line() {
        let mut replay = EventReplay::new(vec![
            ReaderEvent::start("A", 1),
            ReaderEvent::text("x", 4),
        ]);
        assert_eq!(replay.line(), 1);
        replay.next_event().unwrap();
        replay.next_event().unwrap();
        assert_eq!(replay.line(), 4);
        assert_eq!(replay.remaining(), 0);
        assert_eq!(replay.next_event().unwrap(), None);
        assert_eq!(replay.line(), 4);
    }

    #[test]
    fn test_replay_fault_at_end() {
        let mut replay = EventReplay::new(vec![ReaderEvent::start("A", 2)]).fail_at_end("boom");
        assert!(replay.next_event().unwrap().is_some());
        let fault = replay.next_event().unwrap_err();
        assert_eq!(fault, ReadFault::new(2, "boom"));
        // The fault is reported once, then the source is exhausted.
        assert_eq!(replay.next_event().unwrap(), None);
    }

    #[test]
    fn test_replay_close() {
        assert!(EventReplay::new(Vec::new()).close().is_ok());
        let err = EventReplay::new(Vec::new())
            .fail_on_close("disk gone")
            .close()
            .unwrap_err();
        assert_eq!(err.to_string(), "disk gone");
    }
}
