//! Link removal.
//!
//! A link starts with `http://` or `https://` (case-sensitive) and runs up
//! to, not including, the next ASCII whitespace byte, `<` or backspace. At
//! least one byte must follow the scheme. Links are deleted outright; no
//! placeholder is left behind.
//!
//! Works on raw bytes so it can run before the text is decoded. Every
//! removed span starts and ends on an ASCII byte, so valid UTF-8 input stays
//! valid UTF-8.

use core::ops::Range;
use std::borrow::Cow;

use memchr::memmem;

#[inline(always)]
const fn ends_link(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C | b'<' | 0x08)
}

/// Returns the byte range of the link starting at `at`, if there is one.
#[inline]
fn link_at(text: &[u8], at: usize) -> Option<Range<usize>> {
    let rest = &text[at..];
    let scheme = if rest.starts_with(b"http://") {
        7
    } else if rest.starts_with(b"https://") {
        8
    } else {
        return None;
    };

    let body_start = at + scheme;
    let body_len = text[body_start..]
        .iter()
        .position(|&b| ends_link(b))
        .unwrap_or(text.len() - body_start);

    if body_len == 0 {
        return None;
    }
    Some(at..body_start + body_len)
}

/// Finds the first link in `text`.
pub fn find_link(text: &[u8]) -> Option<Range<usize>> {
    memmem::find_iter(text, b"http").find_map(|at| link_at(text, at))
}

/// Deletes every link from `text`.
///
/// Borrows the input when it holds no link.
pub fn strip_urls(text: &[u8]) -> Cow<'_, [u8]> {
    let mut out: Option<Vec<u8>> = None;
    let mut cursor = 0usize;

    for at in memmem::find_iter(text, b"http") {
        if at < cursor {
            continue;
        }
        let Some(link) = link_at(text, at) else {
            continue;
        };
        let buf = out.get_or_insert_with(|| Vec::with_capacity(text.len()));
        buf.extend_from_slice(&text[cursor..link.start]);
        cursor = link.end;
    }

    match out {
        Some(mut buf) => {
            buf.extend_from_slice(&text[cursor..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(s: &str) -> String {
        String::from_utf8(strip_urls(s.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn removes_link_keeps_surrounding_space() {
        assert_eq!(
            strip("Check this out http://x.co/a great site!!"),
            "Check this out  great site!!"
        );
    }

    #[test]
    fn removes_https() {
        assert_eq!(strip("go https://example.org/path?q=1 now"), "go  now");
    }

    #[test]
    fn stops_at_angle_bracket() {
        assert_eq!(strip("<a>http://x.io/p</a>"), "<a></a>");
    }

    #[test]
    fn link_at_end_of_text() {
        assert_eq!(strip("see http://x.io"), "see ");
    }

    #[test]
    fn multiple_links() {
        assert_eq!(
            strip("http://a.b one https://c.d two http://e.f"),
            " one  two "
        );
    }

    #[test]
    fn adjacent_links_are_one_run() {
        assert_eq!(strip("http://a.bhttp://c.d end"), " end");
    }

    #[test]
    fn scheme_without_body_is_kept() {
        assert_eq!(strip("http:// alone"), "http:// alone");
        assert_eq!(strip("https://"), "https://");
    }

    #[test]
    fn other_schemes_and_case_untouched() {
        assert_eq!(strip("ftp://x.io HTTP://X.IO"), "ftp://x.io HTTP://X.IO");
        assert_eq!(strip("httpd is running"), "httpd is running");
    }

    #[test]
    fn borrows_when_nothing_to_strip() {
        let input = b"plain text";
        assert!(matches!(strip_urls(input), Cow::Borrowed(_)));
    }

    #[test]
    fn unicode_inside_link_removed_whole() {
        assert_eq!(strip("voir http://exemple.fr/café ici"), "voir  ici");
    }

    #[test]
    fn find_link_reports_range() {
        assert_eq!(find_link(b"go http://x.io now"), Some(3..14));
        assert_eq!(find_link(b"no links"), None);
        assert_eq!(find_link(b"http:// "), None);
    }
}
