//! Content-file line parsing for TVP / AGA mark records.
//!
//! A mark line carries the mark identifier as its second whitespace token
//! and ends with the two corner points of the mark's bounding box. Anything
//! between those is ignored.

use crate::domain::model::{MarkKind, MarkRecord};
use regex::Regex;
use std::sync::LazyLock;

static TVP_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.TVP([A-Z0-9]+)_NS").expect("TVP layer pattern"));
static AGA_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.AGA([A-Z0-9]+)_NS").expect("AGA layer pattern"));

/// Returns `(x1, y1, x2, y2)` from the last four numeric tokens.
///
/// Tokens are scanned from the end and non-numeric ones are skipped, so a
/// trailing comment or unit does not hide the coordinates. In file order the
/// four numbers read `x2 y2 x1 y1`.
pub fn extract_last_four_floats<S: AsRef<str>>(tokens: &[S]) -> Option<(f64, f64, f64, f64)> {
    let mut floats = Vec::with_capacity(4);
    for token in tokens.iter().rev() {
        if let Some(value) = parse_number(token.as_ref()) {
            floats.push(value);
            if floats.len() == 4 {
                break;
            }
        }
    }

    match floats.as_slice() {
        // 反向收集，所以順序是 y1 x1 y2 x2
        [y1, x1, y2, x2] => Some((*x1, *y1, *x2, *y2)),
        _ => None,
    }
}

/// Parses a numeric token. A single `_` between two digits is accepted as a
/// digit-group separator (`1_000.5`); any other underscore rejects the token.
pub fn parse_number(token: &str) -> Option<f64> {
    if !token.contains('_') {
        return token.parse().ok();
    }

    let bytes = token.as_bytes();
    let is_digit_at =
        |i: Option<usize>| i.and_then(|i| bytes.get(i)).is_some_and(u8::is_ascii_digit);
    let mut cleaned = String::with_capacity(token.len());
    for (i, c) in token.char_indices() {
        if c != '_' {
            cleaned.push(c);
        } else if !(is_digit_at(i.checked_sub(1)) && is_digit_at(Some(i + 1))) {
            return None;
        }
    }
    cleaned.parse().ok()
}

/// Layer suffix of a mark identifier, or an empty string when the identifier
/// does not follow the naming scheme.
pub fn parse_layer(kind: MarkKind, identifier: &str) -> String {
    let pattern = match kind {
        MarkKind::Tvp => &TVP_BODY,
        MarkKind::Aga => &AGA_BODY,
    };
    let Some(body) = pattern.captures(identifier).and_then(|caps| caps.get(1)) else {
        return String::new();
    };
    let body = body.as_str();

    let split = match kind {
        MarkKind::Tvp => body.rfind('Y'),
        MarkKind::Aga => body.rfind('Y').max(body.rfind('X')),
    };

    match split {
        Some(pos) => body[pos + 1..].to_string(),
        None => String::new(),
    }
}

pub fn parse_mark_line(kind: MarkKind, line: &str) -> Option<MarkRecord> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let mark = parts.get(1).copied().unwrap_or_default().to_string();
    let (x1, y1, x2, y2) = extract_last_four_floats(&parts)?;

    Some(MarkRecord {
        seq: 0,
        kind,
        layer: parse_layer(kind, &mark),
        mark,
        center_x: (x1 + x2) / 2.0,
        center_y: (y1 + y2) / 2.0,
        size_x: (x2 - x1).abs(),
        size_y: (y2 - y1).abs(),
        nearest: None,
    })
}

/// Parses every line tagged with `kind`'s marker. Lines without four
/// trailing coordinates are skipped.
pub fn parse_marks<S: AsRef<str>>(lines: &[S], kind: MarkKind) -> Vec<MarkRecord> {
    let marker = kind.line_marker();
    let mut records = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !line.contains(marker) {
            continue;
        }
        match parse_mark_line(kind, line) {
            Some(record) => records.push(record),
            None => tracing::debug!(
                "Skipping {} line {}: fewer than four numeric tokens",
                kind,
                index + 1
            ),
        }
    }

    records
}

/// Decodes raw file bytes, dropping sequences that are not valid UTF-8.
/// Characters already in the file, U+FFFD included, are kept.
pub fn decode_content(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

/// Splits content into lines on `\n`, `\r\n` or a bare `\r`. Empty lines are
/// dropped since they never carry a mark.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .split(['\r', '\n'])
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TVP_LINE: &str =
        "CELL TOP.TVPM1Y12_NS_A rect 10 ignored 100.0 200.0 110.0 220.0";

    #[test]
    fn test_extract_last_four_floats_skips_trailing_text() {
        let tokens = ["id", "1.0", "2.0", "3.0", "4.0", "um"];
        assert_eq!(extract_last_four_floats(&tokens), Some((3.0, 4.0, 1.0, 2.0)));
    }

    #[test]
    fn test_extract_last_four_floats_interleaved() {
        let tokens = ["id", "1", "a", "2", "b", "3", "4"];
        assert_eq!(extract_last_four_floats(&tokens), Some((3.0, 4.0, 1.0, 2.0)));
    }

    #[test]
    fn test_extract_last_four_floats_not_enough() {
        let tokens = ["id", "1", "2", "x"];
        assert_eq!(extract_last_four_floats(&tokens), None);
    }

    #[test]
    fn test_tvp_layer_after_last_y() {
        assert_eq!(parse_layer(MarkKind::Tvp, "TOP.TVPM1Y12_NS_A"), "12");
        assert_eq!(parse_layer(MarkKind::Tvp, "TOP.TVPAY1YV2_NS"), "V2");
        assert_eq!(parse_layer(MarkKind::Tvp, "TOP.TVPM12_NS"), "");
        assert_eq!(parse_layer(MarkKind::Tvp, "no match here"), "");
    }

    #[test]
    fn test_aga_layer_after_last_x_or_y() {
        assert_eq!(parse_layer(MarkKind::Aga, "TOP.AGAPOLYX3_NS_B"), "3");
        assert_eq!(parse_layer(MarkKind::Aga, "TOP.AGAX1Y2M_NS"), "2M");
        assert_eq!(parse_layer(MarkKind::Aga, "TOP.AGAY1XM3_NS"), "M3");
        assert_eq!(parse_layer(MarkKind::Aga, "TOP.AGA123_NS"), "");
    }

    #[test]
    fn test_parse_mark_line_geometry() {
        let record = parse_mark_line(MarkKind::Tvp, TVP_LINE).unwrap();
        assert_eq!(record.mark, "TOP.TVPM1Y12_NS_A");
        assert_eq!(record.layer, "12");
        assert_eq!(record.center_x, 105.0);
        assert_eq!(record.center_y, 210.0);
        assert_eq!(record.size_x, 10.0);
        assert_eq!(record.size_y, 20.0);
        assert!(record.nearest.is_none());
    }

    #[test]
    fn test_parse_marks_filters_by_marker() {
        let lines = vec![
            "_MC_TVP TOP.TVPM1Y12_NS 0 0 2 2".to_string(),
            "_MC_AGA TOP.AGAPOLYX3_NS 0 0 4 6".to_string(),
            "_MC_TVP broken 1 2".to_string(),
            "unrelated 1 2 3 4".to_string(),
        ];
        let tvp = parse_marks(&lines, MarkKind::Tvp);
        assert_eq!(tvp.len(), 1);
        assert_eq!(tvp[0].kind, MarkKind::Tvp);

        let aga = parse_marks(&lines, MarkKind::Aga);
        assert_eq!(aga.len(), 1);
        assert_eq!(aga[0].layer, "3");
        assert_eq!(aga[0].center_x, 2.0);
        assert_eq!(aga[0].center_y, 3.0);
    }

    #[test]
    fn test_short_lines() {
        assert!(parse_mark_line(MarkKind::Aga, "_MC_AGA").is_none());
        let record = parse_mark_line(MarkKind::Aga, "1 2 3 4").unwrap();
        assert_eq!(record.mark, "2");
        assert_eq!(record.layer, "");
    }

    #[test]
    fn test_decode_content_drops_invalid_bytes() {
        let bytes = b"_MC_TVP A\xff 1 2 3 4";
        assert_eq!(decode_content(bytes), "_MC_TVP A 1 2 3 4");
    }

    #[test]
    fn test_decode_content_keeps_replacement_char() {
        let mut bytes = "_MC_TVP A\u{FFFD}B 1 2 3 4".as_bytes().to_vec();
        bytes.extend_from_slice(b"\xc3");
        assert_eq!(decode_content(&bytes), "_MC_TVP A\u{FFFD}B 1 2 3 4");
    }

    #[test]
    fn test_parse_number_digit_groups() {
        assert_eq!(parse_number("1_000.5"), Some(1000.5));
        assert_eq!(parse_number("-2_5"), Some(-25.0));
        assert_eq!(parse_number("1e1_0"), Some(1e10));
        assert_eq!(parse_number("1__0"), None);
        assert_eq!(parse_number("_1"), None);
        assert_eq!(parse_number("1_"), None);
        assert_eq!(parse_number("1_.5"), None);
        assert_eq!(parse_number("-1.5"), Some(-1.5));
    }

    #[test]
    fn test_underscored_coordinates_are_counted() {
        let record = parse_mark_line(MarkKind::Tvp, "_MC_TVP T 0 0 2_000 2").unwrap();
        assert_eq!(record.center_x, 1000.0);
        assert_eq!(record.size_x, 2000.0);
    }

    #[test]
    fn test_split_lines_cr_only() {
        let content = "_MC_TVP A.TVPM1Y1_NS 0 0 2 2\r_MC_TVP B.TVPM1Y1_NS 10 0 12 2\r";
        let lines = split_lines(content);
        assert_eq!(lines.len(), 2);

        let records = parse_marks(&lines, MarkKind::Tvp);
        let centers: Vec<(&str, f64)> = records
            .iter()
            .map(|r| (r.mark.as_str(), r.center_x))
            .collect();
        assert_eq!(centers, vec![("A.TVPM1Y1_NS", 1.0), ("B.TVPM1Y1_NS", 11.0)]);
    }

    #[test]
    fn test_split_lines_mixed_endings() {
        let content = "a 1\r\nb 2\rc 3\nd 4\r\n\r\ne 5";
        assert_eq!(split_lines(content), vec!["a 1", "b 2", "c 3", "d 4", "e 5"]);
    }
}
