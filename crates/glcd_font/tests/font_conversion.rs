use std::path::Path;

use glcd_font::{
    CSourceWriter, ContiguousBlock, PackedGlyph, find_contiguous_blocks, load_sjis_to_unicode_table, pad_to_pages, parse_bdf_file, rotate, unrotate,
};
use pretty_assertions::assert_eq;

const RK8X16: &str = "tests/files/rk8x16.bdf";
const JIS16: &str = "tests/files/jis16.bdf";
const CP932: &str = "tests/files/cp932_excerpt.txt";

#[test]
fn test_find_contiguous_blocks() {
    let glyphs = parse_bdf_file(Path::new(RK8X16), None).unwrap();
    let blocks = find_contiguous_blocks(&glyphs);
    assert_eq!(
        blocks,
        vec![
            ContiguousBlock {
                start_code: 0x01,
                end_code: 0x7E,
                width: 8
            },
            ContiguousBlock {
                start_code: 0xA0,
                end_code: 0xDF,
                width: 8
            },
        ]
    );
}

#[test]
fn test_printable_ascii_is_one_block() {
    let glyphs: Vec<_> = parse_bdf_file(Path::new(RK8X16), None)
        .unwrap()
        .into_iter()
        .filter(|g| (0x20..=0x7E).contains(&g.code_point().unwrap()))
        .collect();
    let blocks = find_contiguous_blocks(&glyphs);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].start_code, 0x20);
    assert_eq!(blocks[0].end_code, 0x7E);
    assert_eq!(blocks[0].code_count(), 95);
}

#[test]
fn test_rotated_glyphs_round_trip() {
    let glyphs = parse_bdf_file(Path::new(RK8X16), None).unwrap();
    for glyph in &glyphs {
        let pages = rotate(&glyph.bitmap, glyph.width);
        assert_eq!(pages.len(), 16);
        assert_eq!(unrotate(&pages, glyph.width, glyph.height), glyph.bitmap);
    }
}

#[test]
fn test_wide_glyph_rotation() {
    let glyphs = parse_bdf_file(Path::new(JIS16), None).unwrap();
    let glyph = &glyphs[3];
    let pages = rotate(&glyph.bitmap, glyph.width);
    assert_eq!(pages.len(), 32);
    // column 0 has the top left pixel of the diagonal in page 0, bit 0
    assert_eq!(pages[0] & 1, 1);
    for x in 0..16 {
        for y in 0..16 {
            let byte = pages[(y / 8) * 16 + x];
            assert_eq!((byte >> (y % 8)) & 1 == 1, glyph.get_pixel(x as u32, y as u32), "pixel {x},{y}");
        }
    }
}

#[test]
fn test_emit_ascii_table() {
    let glyphs = parse_bdf_file(Path::new(RK8X16), None).unwrap();
    let packed: Vec<PackedGlyph> = glyphs
        .iter()
        .filter(|g| (0x20..=0x7E).contains(&g.code_point().unwrap()))
        .map(|g| PackedGlyph {
            code: g.code_point().unwrap(),
            bytes: rotate(&pad_to_pages(&g.bitmap), g.width),
        })
        .collect();
    assert_eq!(packed.len(), 95);

    let mut out = Vec::new();
    CSourceWriter::new("font8x16").write(&mut out, &packed).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 1 + 95 * 2 + 1);
    assert_eq!(lines[0], "const unsigned char font8x16[] PROGMEM = {");
    assert_eq!(lines[1], "\t/* character ' ', 0x20 */");
    let first: Vec<String> = packed[0].bytes.iter().map(u8::to_string).collect();
    assert_eq!(lines[2], format!("\t{},", first.join(",")));
    assert_eq!(lines[1 + 2 * (0x41 - 0x20)], "\t/* character 'A', 0x41 */");
}

#[test]
fn test_unicode_font_blocks_skip_unmapped() {
    let table = load_sjis_to_unicode_table(Path::new(CP932)).unwrap();
    let glyphs = parse_bdf_file(Path::new(JIS16), Some(&table)).unwrap();
    let blocks = find_contiguous_blocks(&glyphs);
    let starts: Vec<u32> = blocks.iter().map(|b| b.start_code).collect();
    assert_eq!(starts, vec![0x3000, 0x582F, 0xFF0C]);
    assert_eq!(blocks[0].end_code, 0x3001);
}
