use log::debug;

/// Most conversions a template may fill: year through millisecond.
pub(crate) const MAX_VALUES: usize = 7;

/// Result of running a scanf-style template over some input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Scan {
    pub values: Vec<i64>,
    /// Bytes of input consumed up to the point where matching stopped.
    pub consumed: usize,
}

struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Read an optionally signed decimal integer of at most `width` bytes,
    /// sign included. The cursor does not move on failure.
    fn integer(&mut self, width: Option<usize>) -> Option<i64> {
        let start = self.pos;
        let limit = width.map_or(self.bytes.len(), |w| start.saturating_add(w));
        let mut pos = start;
        let negative = match self.bytes.get(pos) {
            Some(b'-') if pos < limit => {
                pos += 1;
                true
            }
            Some(b'+') if pos < limit => {
                pos += 1;
                false
            }
            _ => false,
        };
        let digits_start = pos;
        let mut value: i64 = 0;
        while pos < limit {
            match self.bytes.get(pos) {
                Some(b) if b.is_ascii_digit() => {
                    let digit = (b - b'0') as i64;
                    value = value.checked_mul(10)?;
                    value = if negative {
                        value.checked_sub(digit)?
                    } else {
                        value.checked_add(digit)?
                    };
                    pos += 1;
                }
                _ => break,
            }
        }
        if pos == digits_start {
            return None;
        }
        self.pos = pos;
        Some(value)
    }
}

/// Match `input` against a scanf-style `template`.
///
/// The template understands `%d` and `%<width>d` integer conversions, `%%` for a
/// literal percent sign, whitespace (matching any run of input whitespace,
/// including none) and literal bytes, which must match exactly. Conversions
/// skip leading whitespace. Matching stops at the first mismatch or after
/// [`MAX_VALUES`] conversions; whatever was converted until then is returned.
pub(crate) fn scan(input: &str, template: &str) -> Scan {
    let mut cursor = ByteCursor::new(input.as_bytes());
    let template = template.as_bytes();
    let mut values = Vec::with_capacity(MAX_VALUES);
    let mut t = 0;

    while t < template.len() && values.len() < MAX_VALUES {
        let c = template[t];
        if c.is_ascii_whitespace() {
            while template.get(t).is_some_and(|b| b.is_ascii_whitespace()) {
                t += 1;
            }
            cursor.skip_whitespace();
            continue;
        }
        if c != b'%' {
            if !cursor.eat(c) {
                break;
            }
            t += 1;
            continue;
        }

        t += 1;
        if template.get(t) == Some(&b'%') {
            if !cursor.eat(b'%') {
                break;
            }
            t += 1;
            continue;
        }
        let mut width: usize = 0;
        while let Some(digit) = template.get(t).filter(|b| b.is_ascii_digit()) {
            width = width.saturating_mul(10).saturating_add((digit - b'0') as usize);
            t += 1;
        }
        if template.get(t) != Some(&b'd') {
            debug!(
                "unsupported conversion in scan template {:?}",
                String::from_utf8_lossy(template)
            );
            break;
        }
        t += 1;

        cursor.skip_whitespace();
        if cursor.at_end() {
            break;
        }
        match cursor.integer((width > 0).then_some(width)) {
            Some(value) => values.push(value),
            None => break,
        }
    }

    Scan {
        values,
        consumed: cursor.pos,
    }
}
