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

//! quick-xml backed token source.
//!
//! [`XmlTokenReader`] pulls raw XML events from quick-xml and narrows them to
//! the three [`ReaderEvent`] kinds the schema parser understands. Markup the
//! schema does not care about (declaration, comments, processing
//! instructions, doctype) is skipped here so the parser never sees it.
//!
//! Line numbers come from [`LineCounter`], a thin [`BufRead`] adapter that
//! counts newlines as quick-xml consumes bytes.

use fsonar_core::{EventKind, ReadFault, ReaderEvent, TokenSource};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{self, BufRead, Read};
use tracing::debug;

/// [`BufRead`] adapter that tracks the current 1-based line.
///
/// A byte counts as read once it has been consumed, so after quick-xml
/// returns an event the line is the one the event ended on. The last
/// consumed byte is kept as well.
#[derive(Debug)]
pub struct LineCounter<R> {
    inner: R,
    line: usize,
    last_byte: Option<u8>,
}

impl<R: BufRead> LineCounter<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: 1,
            last_byte: None,
        }
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The most recently consumed byte, if any.
    #[inline]
    pub fn last_byte(&self) -> Option<u8> {
        self.last_byte
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Read for LineCounter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.line += memchr::memchr_iter(b'\n', &buf[..n]).count();
        if n > 0 {
            self.last_byte = Some(buf[n - 1]);
        }
        Ok(n)
    }
}

impl<R: BufRead> BufRead for LineCounter<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        if amt > 0 {
            // Already buffered by the fill_buf call that preceded this consume.
            if let Ok(buf) = self.inner.fill_buf() {
                let end = amt.min(buf.len());
                self.line += memchr::memchr_iter(b'\n', &buf[..end]).count();
                if end > 0 {
                    self.last_byte = Some(buf[end - 1]);
                }
            }
        }
        self.inner.consume(amt);
    }
}

/// Streaming tokenizer over an XML byte source.
///
/// Yields start, end and text events with namespace prefixes stripped from
/// element names, entities resolved and CDATA sections passed through as
/// text. Empty elements (`<StartLine/>`) are expanded into a start event
/// followed by an end event. Malformed markup and invalid UTF-8 are reported
/// as [`ReadFault`]s, after which the reader is exhausted.
///
/// # Examples
///
/// ```rust
/// use fsonar_core::{EventKind, TokenSource};
/// use fsonar_xml::XmlTokenReader;
///
/// let mut reader = XmlTokenReader::new("<?xml version=\"1.0\"?>\n<a:Issues xmlns:a=\"urn:x\"/>".as_bytes());
/// let event = reader.next_event().unwrap().unwrap();
/// assert_eq!(event.kind, EventKind::Text("\n".to_string()));
/// let event = reader.next_event().unwrap().unwrap();
/// assert_eq!(event.kind, EventKind::Start("Issues".to_string()));
/// assert_eq!(event.line, 2);
/// let event = reader.next_event().unwrap().unwrap();
/// assert_eq!(event.kind, EventKind::End("Issues".to_string()));
/// assert!(reader.next_event().unwrap().is_none());
/// ```
pub struct XmlTokenReader<R: BufRead> {
    reader: Reader<LineCounter<R>>,
    buf: Vec<u8>,
    /// End event owed for an expanded empty element.
    pending_end: Option<ReaderEvent>,
    exhausted: bool,
}

impl<R: BufRead> XmlTokenReader<R> {
    /// Wrap a buffered byte source.
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(LineCounter::new(inner));
        reader.trim_text(false);
        XmlTokenReader {
            reader,
            buf: Vec::with_capacity(1024),
            pending_end: None,
            exhausted: false,
        }
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> usize {
        self.reader.get_ref().line()
    }

    /// Byte offset reached in the source.
    pub fn position(&self) -> usize {
        self.reader.buffer_position()
    }

    /// Give back the underlying byte source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner().into_inner()
    }
}

impl<R: BufRead> TokenSource for XmlTokenReader<R> {
    fn next_event(&mut self) -> Result<Option<ReaderEvent>, ReadFault> {
        if let Some(end) = self.pending_end.take() {
            return Ok(Some(end));
        }
        if self.exhausted {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let event = self.reader.read_event_into(&mut self.buf);
            let line = self.reader.get_ref().line();
            // quick-xml hands back a tag cut off by the end of input as if it
            // were complete; a real tag always ends with the consumed '>'.
            let tag_closed = self.reader.get_ref().last_byte() == Some(b'>');

            let kind = match event {
                Ok(Event::Start(_) | Event::End(_) | Event::Empty(_)) if !tag_closed => {
                    Err(format!(
                        "XML parse error at position {}: unterminated tag at end of input",
                        self.reader.buffer_position()
                    ))
                }
                Ok(Event::Start(e)) => Ok(EventKind::Start(decode_name(e.local_name().as_ref()))),
                Ok(Event::End(e)) => Ok(EventKind::End(decode_name(e.local_name().as_ref()))),
                Ok(Event::Empty(e)) => {
                    let name = decode_name(e.local_name().as_ref());
                    self.pending_end = Some(ReaderEvent::end(name.clone(), line));
                    Ok(EventKind::Start(name))
                }
                Ok(Event::Text(e)) => e
                    .unescape()
                    .map(|text| EventKind::Text(text.into_owned()))
                    .map_err(|err| format!("Text unescape error: {}", err)),
                Ok(Event::CData(e)) => String::from_utf8(e.into_inner().into_owned())
                    .map(EventKind::Text)
                    .map_err(|err| format!("Invalid UTF-8 in CDATA section: {}", err)),
                Ok(Event::Eof) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_)) => {
                    continue
                }
                Err(err) => Err(format!(
                    "XML parse error at position {}: {}",
                    self.reader.buffer_position(),
                    err
                )),
            };

            return match kind {
                Ok(kind) => Ok(Some(ReaderEvent { kind, line })),
                Err(message) => {
                    self.exhausted = true;
                    Err(ReadFault::new(line, message))
                }
            };
        }
    }

    fn line(&self) -> usize {
        XmlTokenReader::line(self)
    }

    fn close(self) -> io::Result<()> {
        debug!("Closing XML reader at line {}", self.line());
        drop(self.into_inner());
        Ok(())
    }
}

impl<R: BufRead> Iterator for XmlTokenReader<R> {
    type Item = Result<ReaderEvent, ReadFault>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

/// Element names are ASCII in practice; anything else is decoded lossily and
/// will simply fail to match the schema.
fn decode_name(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(xml: &str) -> Vec<Result<ReaderEvent, ReadFault>> {
        XmlTokenReader::new(xml.as_bytes()).collect()
    }

    fn kinds(xml: &str) -> Vec<EventKind> {
        collect(xml)
            .into_iter()
            .map(|r| r.unwrap().kind)
            .collect()
    }

    #[test]
    fn test_line_counter_counts_consumed_newlines() {
        let mut counter = LineCounter::new("a\nb\n\nc".as_bytes());
        assert_eq!(counter.line(), 1);
        let len = counter.fill_buf().unwrap().len();
        counter.consume(2);
        assert_eq!(counter.line(), 2);
        counter.consume(len - 2);
        assert_eq!(counter.line(), 4);
    }

    #[test]
    fn test_line_counter_read() {
        let mut counter = LineCounter::new("x\ny\n".as_bytes());
        let mut out = String::new();
        counter.read_to_string(&mut out).unwrap();
        assert_eq!(out, "x\ny\n");
        assert_eq!(counter.line(), 3);
    }

    #[test]
    fn test_start_text_end() {
        assert_eq!(
            kinds("<RuleKey>R1</RuleKey>"),
            vec![
                EventKind::Start("RuleKey".into()),
                EventKind::Text("R1".into()),
                EventKind::End("RuleKey".into()),
            ]
        );
    }

    #[test]
    fn test_empty_element_is_expanded() {
        assert_eq!(
            kinds("<Issue><StartLine/></Issue>"),
            vec![
                EventKind::Start("Issue".into()),
                EventKind::Start("StartLine".into()),
                EventKind::End("StartLine".into()),
                EventKind::End("Issue".into()),
            ]
        );
    }

    #[test]
    fn test_prolog_comments_and_pi_are_skipped() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?><!-- generated --><?pi data?><A/>";
        assert_eq!(
            kinds(xml),
            vec![EventKind::Start("A".into()), EventKind::End("A".into())]
        );
    }

    #[test]
    fn test_entities_and_cdata() {
        assert_eq!(
            kinds("<M>a &lt;b&gt; &amp; <![CDATA[<raw>]]></M>"),
            vec![
                EventKind::Start("M".into()),
                EventKind::Text("a <b> & ".into()),
                EventKind::Text("<raw>".into()),
                EventKind::End("M".into()),
            ]
        );
    }

    #[test]
    fn test_namespace_prefix_is_stripped() {
        assert_eq!(
            kinds("<ns:Issues xmlns:ns=\"urn:a\"></ns:Issues>"),
            vec![
                EventKind::Start("Issues".into()),
                EventKind::End("Issues".into()),
            ]
        );
    }

    #[test]
    fn test_event_lines() {
        let events: Vec<ReaderEvent> = collect("<A>\n<B>\n</B>\n</A>")
            .into_iter()
            .map(Result::unwrap)
            .filter(|e| !matches!(e.kind, EventKind::Text(_)))
            .collect();
        let lines: Vec<usize> = events.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_malformed_markup_is_a_fault() {
        let mut reader = XmlTokenReader::new("<A>\n<B></C>".as_bytes());
        assert!(reader.next_event().unwrap().is_some());
        assert!(reader.next_event().unwrap().is_some());
        assert!(reader.next_event().unwrap().is_some());
        let fault = reader.next_event().unwrap_err();
        assert_eq!(fault.line, 2);
        assert!(fault.message.contains("XML parse error"));
        // Exhausted after a fault.
        assert!(reader.next_event().unwrap().is_none());
    }

    #[test]
    fn test_line_counter_tracks_last_consumed_byte() {
        let mut counter = LineCounter::new("<A>x".as_bytes());
        assert_eq!(counter.last_byte(), None);
        counter.fill_buf().unwrap();
        counter.consume(3);
        assert_eq!(counter.last_byte(), Some(b'>'));
        counter.consume(1);
        assert_eq!(counter.last_byte(), Some(b'x'));
    }

    #[test]
    fn test_tag_cut_off_by_end_of_input_is_a_fault() {
        for xml in ["<A><B", "<A></A", "<A><B/", "<A><B attr=\"1\""] {
            let results = collect(xml);
            let fault = results
                .last()
                .unwrap()
                .as_ref()
                .expect_err(xml);
            assert!(fault.message.contains("XML parse error"), "{}", xml);
            // Only the complete `<A>` was yielded before the fault.
            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1, "{}", xml);
        }
    }

    #[test]
    fn test_bad_entity_is_a_fault() {
        let results = collect("<M>&bogus;</M>");
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_close_releases_source() {
        let mut reader = XmlTokenReader::new("<A/>".as_bytes());
        while reader.next_event().unwrap().is_some() {}
        assert!(reader.close().is_ok());
    }
}
