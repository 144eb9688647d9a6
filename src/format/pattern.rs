use crate::sys;

/// One piece of a compiled output pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Handed to the platform `strftime` as is.
    Strftime(String),
    /// Zero-padded three-digit millisecond, which `strftime` has no specifier for.
    Millis,
}

// Friendly tokens and their strftime equivalents. Longest first, so that
// `yyyy` is never read as two unknown `yy`s.
const FRIENDLY_TOKENS: [(&str, &str); 6] = [
    ("yyyy", "%Y"),
    ("MM", "%m"),
    ("dd", "%d"),
    ("HH", "%H"),
    ("mm", "%M"),
    ("ss", "%S"),
];
const FRIENDLY_MILLIS: &str = "fff";

/// Compile a pattern mixing strftime specifiers (`%Y`, plus `%f` for
/// milliseconds) and friendly tokens (`yyyy MM dd HH mm ss fff`).
pub(crate) fn compile(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '%' {
            let mut chars = rest[1..].chars();
            match chars.next() {
                Some('f') => {
                    flush(&mut segments, &mut current);
                    segments.push(Segment::Millis);
                    rest = &rest[2..];
                }
                Some(specifier) => {
                    current.push('%');
                    current.push(specifier);
                    rest = &rest[1 + specifier.len_utf8()..];
                }
                None => {
                    // A lone trailing '%' is printed literally.
                    current.push_str("%%");
                    rest = "";
                }
            }
            continue;
        }

        if let Some(tail) = rest.strip_prefix(FRIENDLY_MILLIS) {
            flush(&mut segments, &mut current);
            segments.push(Segment::Millis);
            rest = tail;
            continue;
        }
        for (token, strftime) in FRIENDLY_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                current.push_str(strftime);
                rest = tail;
                continue 'outer;
            }
        }

        current.push(c);
        rest = &rest[c.len_utf8()..];
    }
    flush(&mut segments, &mut current);
    segments
}

fn flush(segments: &mut Vec<Segment>, current: &mut String) {
    if !current.is_empty() {
        segments.push(Segment::Strftime(std::mem::take(current)));
    }
}

/// Render compiled segments against a broken-down time.
pub(crate) fn render(segments: &[Segment], tm: &libc::tm, millisecond: u16) -> String {
    let mut output = String::new();
    for segment in segments {
        match segment {
            Segment::Strftime(format) => output.push_str(&sys::strftime(format, tm)),
            Segment::Millis => output.push_str(&format!("{:03}", millisecond)),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strftime(s: &str) -> Segment {
        Segment::Strftime(s.to_string())
    }

    #[test]
    fn friendly_tokens_become_strftime() {
        assert_eq!(
            compile("yyyy-MM-dd HH:mm:ss"),
            vec![strftime("%Y-%m-%d %H:%M:%S")]
        );
        assert_eq!(compile("yyyyMMdd_HHmmss"), vec![strftime("%Y%m%d_%H%M%S")]);
    }

    #[test]
    fn millis_split_the_pattern() {
        assert_eq!(
            compile("HH:mm:ss.fff"),
            vec![strftime("%H:%M:%S."), Segment::Millis]
        );
        assert_eq!(
            compile("%S.%f!"),
            vec![strftime("%S."), Segment::Millis, strftime("!")]
        );
        assert_eq!(compile("%f"), vec![Segment::Millis]);
    }

    #[test]
    fn percent_handling() {
        assert_eq!(compile("100%%"), vec![strftime("100%%")]);
        assert_eq!(compile("100%"), vec![strftime("100%%")]);
        assert_eq!(compile("%a %b"), vec![strftime("%a %b")]);
    }

    #[test]
    fn non_ascii_literals_pass_through() {
        assert_eq!(
            compile("yyyy年MM月dd日"),
            vec![strftime("%Y年%m月%d日")]
        );
    }

    #[test]
    fn render_utc() {
        let tm = sys::utc_breakdown(1_703_512_245).unwrap();
        let segments = compile("yyyy-MM-ddTHH:mm:ss.fffZ");
        assert_eq!(render(&segments, &tm, 7), "2023-12-25T13:50:45.007Z");
        assert_eq!(render(&compile(""), &tm, 7), "");
    }
}
