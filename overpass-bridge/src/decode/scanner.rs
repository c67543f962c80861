//! Resumable scanner for the upstream response document.
//!
//! The upstream body is a single JSON object of the shape
//! `{..., "elements": [<record>, <record>, ...], ...}` where the
//! `elements` key may sit anywhere among the top-level keys. The scanner
//! walks that object one top-level value at a time without ever holding
//! the whole document: non-`elements` values are framed and handed back
//! whole (they are small metadata in practice), and once the array is
//! found each element is framed and yielded individually.
//!
//! The scanner is push/pull: callers [`feed`](JsonScanner::feed) it byte
//! chunks as they arrive and [`next`](JsonScanner::next) either produces
//! the next complete item or reports that more input is needed. All
//! progress is committed only when an item completes, so `next` can be
//! retried at any chunk boundary. Memory is bounded by the largest single
//! top-level value, i.e. one record once the array is reached.

use super::error::DecodeError;

/// One item produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanItem {
    /// A complete top-level value for a key other than `elements`,
    /// together with its raw bytes. The caller decides whether to
    /// interpret or drop it.
    Field { key: String, value: Vec<u8> },
    /// The raw bytes of one complete element from the `elements` array.
    Element(Vec<u8>),
    /// The array (or the enclosing object, if `elements` never appeared)
    /// has ended. Anything after the array is ignored.
    Finished,
}

/// Outcome of one [`JsonScanner::next`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    /// The buffered input does not yet contain a complete item.
    NeedMore,
    /// The next complete item.
    Item(ScanItem),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the opening `{` of the top-level object.
    ObjectStart,
    /// Expecting the next top-level key or the closing `}`.
    KeySeek,
    /// Between top-level members: expecting `,` or `}`.
    MemberSep,
    /// Inside the `elements` array: expecting a value or `]`.
    InArray,
    /// Between array elements: expecting `,` or `]`.
    ElementSep,
    /// The sequence has ended; only `Finished` is produced from here.
    Finished,
}

/// Incremental scanner over a growing byte buffer.
///
/// Single-consumption: once `Finished` is produced the scanner stays
/// finished, and there is no way to rewind.
#[derive(Debug)]
pub struct JsonScanner {
    buf: Vec<u8>,
    /// Scan position within `buf`; bytes before it are fully consumed.
    pos: usize,
    /// Bytes already dropped from the front of `buf`, for error offsets.
    discarded: u64,
    state: ScanState,
    eof: bool,
}

impl JsonScanner {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            discarded: 0,
            state: ScanState::ObjectStart,
            eof: false,
        }
    }

    /// Appends a chunk of body bytes to the scan buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Marks the end of the body. After this, an incomplete item is an
    /// [`DecodeError::UnexpectedEof`] instead of `NeedMore`.
    pub fn finish(&mut self) {
        self.eof = true;
    }

    /// Produces the next complete item, or `NeedMore` if the buffer does
    /// not yet hold one.
    pub fn next(&mut self) -> Result<ScanStatus, DecodeError> {
        loop {
            match self.state {
                ScanState::Finished => return Ok(ScanStatus::Item(ScanItem::Finished)),
                ScanState::ObjectStart => {
                    let i = skip_ws(&self.buf, self.pos);
                    if i >= self.buf.len() {
                        return self.need_more();
                    }
                    if self.buf[i] != b'{' {
                        return Err(self.unexpected("'{'", i));
                    }
                    self.pos = i + 1;
                    self.state = ScanState::KeySeek;
                }
                ScanState::KeySeek => {
                    let i = skip_ws(&self.buf, self.pos);
                    if i >= self.buf.len() {
                        return self.need_more();
                    }
                    match self.buf[i] {
                        b'}' => {
                            // Object ended without an elements key: the
                            // sequence is simply empty.
                            self.pos = i + 1;
                            self.state = ScanState::Finished;
                        }
                        b'"' => {
                            if let Some(status) = self.scan_member(i)? {
                                return Ok(status);
                            }
                        }
                        _ => return Err(self.unexpected("'\"' or '}'", i)),
                    }
                }
                ScanState::MemberSep => {
                    let i = skip_ws(&self.buf, self.pos);
                    if i >= self.buf.len() {
                        return self.need_more();
                    }
                    match self.buf[i] {
                        b',' => {
                            self.pos = i + 1;
                            self.state = ScanState::KeySeek;
                        }
                        b'}' => {
                            self.pos = i + 1;
                            self.state = ScanState::Finished;
                        }
                        _ => return Err(self.unexpected("',' or '}'", i)),
                    }
                }
                ScanState::InArray => {
                    let i = skip_ws(&self.buf, self.pos);
                    if i >= self.buf.len() {
                        return self.need_more();
                    }
                    if self.buf[i] == b']' {
                        self.pos = i + 1;
                        self.state = ScanState::Finished;
                        continue;
                    }
                    let Some(end) = self.measure_value(i)? else {
                        return self.need_more();
                    };
                    let element = self.buf[i..end].to_vec();
                    self.pos = end;
                    self.state = ScanState::ElementSep;
                    self.compact();
                    return Ok(ScanStatus::Item(ScanItem::Element(element)));
                }
                ScanState::ElementSep => {
                    let i = skip_ws(&self.buf, self.pos);
                    if i >= self.buf.len() {
                        return self.need_more();
                    }
                    match self.buf[i] {
                        b',' => {
                            self.pos = i + 1;
                            self.state = ScanState::InArray;
                        }
                        b']' => {
                            self.pos = i + 1;
                            self.state = ScanState::Finished;
                        }
                        _ => return Err(self.unexpected("',' or ']'", i)),
                    }
                }
            }
        }
    }

    /// Scans one `"key": value` member starting at the opening quote.
    ///
    /// Returns `Ok(None)` when the member transitioned state without
    /// producing an item (the `elements` key), `Ok(Some(..))` for a framed
    /// field or a `NeedMore`.
    fn scan_member(&mut self, key_start: usize) -> Result<Option<ScanStatus>, DecodeError> {
        let Some(key_end) = scan_string(&self.buf, key_start) else {
            return self.need_more().map(Some);
        };
        let is_elements = self.buf[key_start + 1..key_end - 1] == *b"elements";

        let colon = skip_ws(&self.buf, key_end);
        if colon >= self.buf.len() {
            return self.need_more().map(Some);
        }
        if self.buf[colon] != b':' {
            return Err(self.unexpected("':'", colon));
        }

        let value_start = skip_ws(&self.buf, colon + 1);
        if value_start >= self.buf.len() {
            return self.need_more().map(Some);
        }

        if is_elements {
            if self.buf[value_start] != b'[' {
                return Err(DecodeError::ElementsNotArray);
            }
            self.pos = value_start + 1;
            self.state = ScanState::InArray;
            self.compact();
            return Ok(None);
        }

        let Some(value_end) = self.measure_value(value_start)? else {
            return self.need_more().map(Some);
        };
        let key = String::from_utf8_lossy(&self.buf[key_start + 1..key_end - 1]).into_owned();
        let value = self.buf[value_start..value_end].to_vec();
        self.pos = value_end;
        self.state = ScanState::MemberSep;
        self.compact();
        Ok(Some(ScanStatus::Item(ScanItem::Field { key, value })))
    }

    /// Finds the end of one complete JSON value starting at `start`.
    ///
    /// Returns `Ok(None)` when the buffer does not yet hold the whole
    /// value. Framing is structural only (string/escape aware bracket
    /// matching); the value's validity is the caller's concern.
    fn measure_value(&self, start: usize) -> Result<Option<usize>, DecodeError> {
        match self.buf[start] {
            b'"' => Ok(scan_string(&self.buf, start)),
            b'{' | b'[' => Ok(scan_container(&self.buf, start)),
            b't' => self.measure_literal(start, b"true"),
            b'f' => self.measure_literal(start, b"false"),
            b'n' => self.measure_literal(start, b"null"),
            b'-' | b'0'..=b'9' => {
                let mut i = start + 1;
                while i < self.buf.len() && is_number_byte(self.buf[i]) {
                    i += 1;
                }
                // A number at the very end of the buffer may continue in
                // the next chunk.
                if i == self.buf.len() && !self.eof {
                    Ok(None)
                } else {
                    Ok(Some(i))
                }
            }
            _ => Err(self.unexpected("a JSON value", start)),
        }
    }

    fn measure_literal(
        &self,
        start: usize,
        literal: &'static [u8],
    ) -> Result<Option<usize>, DecodeError> {
        let end = start + literal.len();
        if end > self.buf.len() {
            return Ok(None);
        }
        if &self.buf[start..end] == literal {
            Ok(Some(end))
        } else {
            Err(self.unexpected("a JSON value", start))
        }
    }

    fn need_more(&self) -> Result<ScanStatus, DecodeError> {
        if self.eof {
            Err(DecodeError::UnexpectedEof)
        } else {
            Ok(ScanStatus::NeedMore)
        }
    }

    fn unexpected(&self, expected: &'static str, at: usize) -> DecodeError {
        DecodeError::Unexpected {
            expected,
            found: self.buf[at] as char,
            offset: self.discarded + at as u64,
        }
    }

    /// Drops fully-consumed bytes so memory stays bounded by one value.
    fn compact(&mut self) {
        if self.pos > 0 {
            self.discarded += self.pos as u64;
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
    }
}

impl Default for JsonScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_number_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

/// First non-whitespace index at or after `from` (may be `buf.len()`).
fn skip_ws(buf: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < buf.len() && is_ws(buf[i]) {
        i += 1;
    }
    i
}

/// Index just past the closing quote of the string opening at `start`,
/// or `None` if the string is not yet complete in the buffer.
fn scan_string(buf: &[u8], start: usize) -> Option<usize> {
    let mut escape = false;
    for (i, &b) in buf.iter().enumerate().skip(start + 1) {
        if escape {
            escape = false;
        } else if b == b'\\' {
            escape = true;
        } else if b == b'"' {
            return Some(i + 1);
        }
    }
    None
}

/// Index just past the matching closer of the container opening at
/// `start`, or `None` if it is not yet complete in the buffer.
fn scan_container(buf: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in buf.iter().enumerate().skip(start) {
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the scanner over the whole input in one feed.
    fn scan_all(input: &str) -> Result<Vec<ScanItem>, DecodeError> {
        let mut scanner = JsonScanner::new();
        scanner.feed(input.as_bytes());
        scanner.finish();
        collect(&mut scanner)
    }

    /// Drives the scanner feeding one byte at a time, exercising every
    /// possible resumption boundary.
    fn scan_by_byte(input: &str) -> Result<Vec<ScanItem>, DecodeError> {
        let mut scanner = JsonScanner::new();
        let mut items = Vec::new();
        for &b in input.as_bytes() {
            scanner.feed(&[b]);
            loop {
                match scanner.next()? {
                    ScanStatus::NeedMore => break,
                    ScanStatus::Item(ScanItem::Finished) => return Ok(items),
                    ScanStatus::Item(item) => items.push(item),
                }
            }
        }
        scanner.finish();
        loop {
            match scanner.next()? {
                ScanStatus::NeedMore => unreachable!("NeedMore after finish"),
                ScanStatus::Item(ScanItem::Finished) => return Ok(items),
                ScanStatus::Item(item) => items.push(item),
            }
        }
    }

    fn collect(scanner: &mut JsonScanner) -> Result<Vec<ScanItem>, DecodeError> {
        let mut items = Vec::new();
        loop {
            match scanner.next()? {
                ScanStatus::NeedMore => scanner.finish(),
                ScanStatus::Item(ScanItem::Finished) => return Ok(items),
                ScanStatus::Item(item) => items.push(item),
            }
        }
    }

    const RESPONSE: &str = concat!(
        r#"{"version":0.6,"generator":"Overpass API","#,
        r#""osm3s":{"copyright":"ODbL"},"#,
        r#""elements":[{"type":"node","id":1},{"type":"way","id":2}]}"#,
    );

    #[test]
    fn test_fields_then_elements() {
        let items = scan_all(RESPONSE).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(
            items[0],
            ScanItem::Field {
                key: "version".to_string(),
                value: b"0.6".to_vec()
            }
        );
        assert_eq!(
            items[1],
            ScanItem::Field {
                key: "generator".to_string(),
                value: b"\"Overpass API\"".to_vec()
            }
        );
        assert_eq!(
            items[3],
            ScanItem::Element(br#"{"type":"node","id":1}"#.to_vec())
        );
        assert_eq!(
            items[4],
            ScanItem::Element(br#"{"type":"way","id":2}"#.to_vec())
        );
    }

    #[test]
    fn test_byte_at_a_time_matches_single_feed() {
        assert_eq!(scan_by_byte(RESPONSE).unwrap(), scan_all(RESPONSE).unwrap());
    }

    #[test]
    fn test_elements_key_first() {
        let items =
            scan_all(r#"{"elements":[{"id":1}],"generator":"g"}"#).unwrap();
        // Scanning stops at the end of the array; trailing keys are ignored.
        assert_eq!(items, vec![ScanItem::Element(br#"{"id":1}"#.to_vec())]);
    }

    #[test]
    fn test_whitespace_everywhere() {
        let items = scan_by_byte(
            "{ \"a\" : 1 ,\n\t\"elements\" : [ { \"id\" : 1 } , 2 ] }",
        )
        .unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], ScanItem::Element(b"2".to_vec()));
    }

    #[test]
    fn test_no_elements_key_is_empty_sequence() {
        let items = scan_all(r#"{"generator":"g","remark":"timed out"}"#).unwrap();
        assert!(items.iter().all(|i| matches!(i, ScanItem::Field { .. })));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_empty_elements_array() {
        let items = scan_all(r#"{"elements":[]}"#).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_skipped_values_may_nest() {
        let input = r#"{"meta":{"a":[1,{"b":"]}"}],"c":null},"elements":[true]}"#;
        let items = scan_by_byte(input).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], ScanItem::Element(b"true".to_vec()));
    }

    #[test]
    fn test_string_escapes_in_elements() {
        let input = r#"{"elements":[{"tags":{"name":"a\"b\\"}}]}"#;
        let items = scan_by_byte(input).unwrap();
        assert_eq!(
            items,
            vec![ScanItem::Element(br#"{"tags":{"name":"a\"b\\"}}"#.to_vec())]
        );
    }

    #[test]
    fn test_elements_not_array() {
        let err = scan_all(r#"{"elements":{"id":1}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::ElementsNotArray));
    }

    #[test]
    fn test_top_level_not_object() {
        let err = scan_all(r#"[1,2,3]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Unexpected { .. }));
    }

    #[test]
    fn test_truncated_body() {
        let err = scan_all(r#"{"elements":[{"id":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedEof));
    }

    #[test]
    fn test_garbage_between_elements() {
        let mut scanner = JsonScanner::new();
        scanner.feed(br#"{"elements":[1 2]}"#);
        scanner.finish();
        // First element frames fine, then the separator is missing.
        assert_eq!(
            scanner.next().unwrap(),
            ScanStatus::Item(ScanItem::Element(b"1".to_vec()))
        );
        assert!(matches!(
            scanner.next().unwrap_err(),
            DecodeError::Unexpected { .. }
        ));
    }

    #[test]
    fn test_finished_is_sticky() {
        let mut scanner = JsonScanner::new();
        scanner.feed(br#"{"elements":[]}"#);
        scanner.finish();
        assert_eq!(
            scanner.next().unwrap(),
            ScanStatus::Item(ScanItem::Finished)
        );
        assert_eq!(
            scanner.next().unwrap(),
            ScanStatus::Item(ScanItem::Finished)
        );
    }
}
