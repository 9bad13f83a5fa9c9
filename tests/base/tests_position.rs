//! Offset <-> line/character conversion over mixed line endings.

use dsl_analysis::{DocumentText, LineChr, TextSize};
use rstest::rstest;

const MIXED: &str = "Module Demo\r\n{\n    Entity Čvor;\r\n\r\n}";

#[test]
fn test_round_trip_within_bounds() {
    let text = DocumentText::new(MIXED);
    for line in 0..text.line_count() {
        let length = text.line_length(line);
        for chr in 0..=length + 3 {
            let offset = text.offset_of(LineChr::new(line, chr));
            assert_eq!(
                text.line_chr_of(offset),
                LineChr::new(line, chr.min(length)),
                "round trip of ({}, {})",
                line,
                chr
            );
        }
    }
}

#[rstest]
#[case(LineChr::new(0, 11), 11)] // end of line 0 is the \r
#[case(LineChr::new(0, 12), 11)]
#[case(LineChr::new(1, 0), 13)]
#[case(LineChr::new(2, 11), 26)]
#[case(LineChr::new(3, 0), 34)]
#[case(LineChr::new(4, 1), 37)] // Č took two bytes
#[case(LineChr::new(9, 9), 37)]
fn test_offset_of(#[case] position: LineChr, #[case] expected: u32) {
    assert_eq!(DocumentText::new(MIXED).offset_of(position), TextSize::new(expected));
}

#[rstest]
#[case(12, LineChr::new(0, 11))] // \n of \r\n maps to the \r
#[case(27, LineChr::new(2, 11))] // inside Č maps to its start
#[case(500, LineChr::new(4, 1))]
fn test_line_chr_of_normalizes(#[case] offset: u32, #[case] expected: LineChr) {
    assert_eq!(DocumentText::new(MIXED).line_chr_of(TextSize::new(offset)), expected);
}

#[test]
fn test_truncate_keeps_the_cursor_line_ending() {
    let text = DocumentText::new(MIXED);
    let truncated = text.truncate_at_line_end(text.offset_of(LineChr::new(1, 0)));
    assert_eq!(truncated.as_str(), "Module Demo\r\n{\n");

    let last = text.truncate_at_line_end(text.offset_of(LineChr::new(4, 0)));
    assert_eq!(last.as_str(), MIXED);
}
