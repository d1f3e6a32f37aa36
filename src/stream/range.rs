//! Single byte-range handling for the `Range` request header.
//!
//! Only one range per request is honored. Anything that doesn't parse as
//! exactly one `bytes=` range is treated as if no range was sent, which
//! means the full file is served.

/// A range as written by the client, before it is checked against the file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// `bytes=<start>-<end>`, both inclusive
    FromTo(u64, u64),
    /// `bytes=<start>-`
    From(u64),
    /// `bytes=-<len>`, the last `len` bytes
    Suffix(u64),
}

/// Inclusive byte range that lies within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

pub fn parse(header: &str) -> Option<RangeSpec> {
    let spec = header.trim().strip_prefix("bytes=")?.trim();
    if spec.contains(',') {
        return None;
    }
    let (start, end) = spec.split_once('-')?;
    match (start.trim(), end.trim()) {
        ("", "") => None,
        ("", len) => parse_u64(len).map(RangeSpec::Suffix),
        (start, "") => parse_u64(start).map(RangeSpec::From),
        (start, end) => {
            let (start, end) = (parse_u64(start)?, parse_u64(end)?);
            (start <= end).then_some(RangeSpec::FromTo(start, end))
        }
    }
}

// str::parse alone would also accept a leading '+'
fn parse_u64(s: &str) -> Option<u64> {
    if s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

impl RangeSpec {
    /// Clamps the range to a file of `size` bytes.
    /// Returns `None` if no byte of the file is covered.
    pub fn resolve(self, size: u64) -> Option<ByteRange> {
        match self {
            RangeSpec::FromTo(start, end) if start < size => Some(ByteRange {
                start,
                end: end.min(size - 1),
            }),
            RangeSpec::From(start) if start < size => Some(ByteRange {
                start,
                end: size - 1,
            }),
            RangeSpec::Suffix(len) if len > 0 && size > 0 => Some(ByteRange {
                start: size.saturating_sub(len),
                end: size - 1,
            }),
            _ => None,
        }
    }
}
