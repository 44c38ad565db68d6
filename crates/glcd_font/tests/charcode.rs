use std::path::Path;

use glcd_font::{
    FontError, SjisToUnicode,
    charcode::{U16_TABLE_LEN, UNMAPPED_U16},
    jis_to_sjis, load_sjis_to_unicode_table,
};

const CP932: &str = "tests/files/cp932_excerpt.txt";

#[test]
fn test_load_sjis_to_unicode_table() {
    let table = load_sjis_to_unicode_table(Path::new(CP932)).unwrap();
    assert_eq!(table.get(0x00), Some(0x0000));
    assert_eq!(table.get(0x20), Some(0x0020));
    assert_eq!(table.get(0x7E), Some(0x007E));
    assert_eq!(table.get(0xA1), Some(0xFF61));
    assert_eq!(table.get(0xA2), Some(0xFF62));
    assert_eq!(table.get(0x8140), Some(0x3000));
    assert_eq!(table.get(0x8143), Some(0xFF0C));
    assert_eq!(table.get(0xFC4B), Some(0x9ED1));
}

#[test]
fn test_undefined_codes_are_absent() {
    let table = load_sjis_to_unicode_table(Path::new(CP932)).unwrap();
    assert!(!table.contains(0x80));
    assert_eq!(table.get(0x80), None);
    assert!(!table.contains(0x854F));
}

#[test]
fn test_missing_table_file() {
    let err = load_sjis_to_unicode_table(Path::new("tests/files/no_such_table.txt")).unwrap_err();
    assert!(matches!(err, FontError::TableLoad { .. }));
}

#[test]
fn test_jis_lookup_through_sjis() {
    let table = load_sjis_to_unicode_table(Path::new(CP932)).unwrap();
    assert_eq!(jis_to_sjis(0x7421), 0xEA9F);
    assert_eq!(table.jis_to_unicode(0x7421), Some(0x582F));
    assert_eq!(table.jis_to_unicode(0x2121), Some(0x3000));
}

#[test]
fn test_write_u16_table() {
    let table: SjisToUnicode = [(0x41, 0x41), (0x8140, 0x3000), (0x1_0000, 0x20), (0x8141, 0x2_0000)].into_iter().collect();
    let mut out = Vec::new();
    table.write_u16_table(&mut out).unwrap();

    assert_eq!(out.len(), U16_TABLE_LEN * 2);
    let entry = |sjis: usize| u16::from_le_bytes([out[sjis * 2], out[sjis * 2 + 1]]);
    assert_eq!(entry(0x41), 0x41);
    assert_eq!(entry(0x8140), 0x3000);
    assert_eq!(entry(0x8141), UNMAPPED_U16);
    assert_eq!(entry(0x00), UNMAPPED_U16);
    assert_eq!(entry(0xFFFF), UNMAPPED_U16);
}
