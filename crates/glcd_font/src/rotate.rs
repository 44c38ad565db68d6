//! Conversion of row major glyph bitmaps into the page layout used by
//! column scanning LCD controllers.
//!
//! A page is a band of 8 rows. Each page is stored as one byte per column,
//! bit 0 being the top row of the page and bit 7 the bottom row. Pages
//! follow each other top to bottom.

/// Rows per page.
pub const PAGE_HEIGHT: usize = 8;

/// Rotates a row major bitmap 90° counterclockwise into column bytes.
///
/// `bitmap` holds one value per row with the leftmost pixel in bit
/// `width - 1`. The output has `width * ceil(height / 8)` bytes; a trailing
/// partial page is filled up with blank rows. Columns past the 32 bits a row
/// can hold are blank.
pub fn rotate(bitmap: &[u32], width: u32) -> Vec<u8> {
    let columns = width as usize;
    let mut out = Vec::with_capacity(columns * bitmap.len().div_ceil(PAGE_HEIGHT));

    for page in bitmap.chunks(PAGE_HEIGHT) {
        let mut work = vec![0u8; columns];
        for &row in page {
            for (x, byte) in work.iter_mut().enumerate() {
                *byte >>= 1;
                if row.checked_shr(width - 1 - x as u32).is_some_and(|bits| bits & 1 != 0) {
                    *byte |= 0x80;
                }
            }
        }
        let missing = PAGE_HEIGHT - page.len();
        if missing > 0 {
            work.iter_mut().for_each(|byte| *byte >>= missing);
        }
        out.extend_from_slice(&work);
    }
    out
}

/// Inverse of [`rotate`]: turns `height` rows worth of column bytes back into row values.
///
/// Bytes missing from `pages` read as blank, as do columns that don't fit a `u32` row.
pub fn unrotate(pages: &[u8], width: u32, height: u32) -> Vec<u32> {
    let columns = width as usize;
    (0..height as usize)
        .map(|y| {
            let page = y / PAGE_HEIGHT;
            let bit = y % PAGE_HEIGHT;
            let mut row = 0u32;
            for x in 0..columns {
                let byte = pages.get(page * columns + x).copied().unwrap_or(0);
                if (byte >> bit) & 1 != 0 {
                    row |= 1u32.checked_shl(width - 1 - x as u32).unwrap_or(0);
                }
            }
            row
        })
        .collect()
}

/// Pads `bitmap` with blank rows up to the next multiple of [`PAGE_HEIGHT`].
pub fn pad_to_pages(bitmap: &[u32]) -> Vec<u32> {
    let mut padded = bitmap.to_vec();
    padded.resize(bitmap.len().div_ceil(PAGE_HEIGHT) * PAGE_HEIGHT, 0);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PATTERN: [u32; 8] = [0b1111_0000, 0b1100_1100, 0b1010_1010, 0b1000_1000, 0b1000_0000, 0b1100_0000, 0b1110_0000, 0b1111_1111];

    const ROTATED: [u8; 8] = [0b1111_1111, 0b1110_0011, 0b1100_0101, 0b1000_0001, 0b1000_1110, 0b1000_0010, 0b1000_0100, 0b1000_0000];

    #[test]
    fn test_rotate_8x8() {
        assert_eq!(rotate(&PATTERN, 8), ROTATED.to_vec());
    }

    #[test]
    fn test_rotate_bit_order() {
        let out = rotate(&PATTERN, 8);
        for x in 0..8 {
            // top row ends up in bit 0, bottom row in bit 7
            assert_eq!(out[x] & 1, ((PATTERN[0] >> (7 - x)) & 1) as u8);
            assert_eq!(out[x] >> 7, ((PATTERN[7] >> (7 - x)) & 1) as u8);
        }
    }

    #[test]
    fn test_rotate_8x16() {
        let bitmap = pad_to_pages(&[&PATTERN[..], &[0u32; 8][..]].concat());
        let mut expected = ROTATED.to_vec();
        expected.extend_from_slice(&[0; 8]);
        assert_eq!(rotate(&bitmap, 8), expected);
    }

    #[test]
    fn test_rotate_16x8() {
        let mut expected = vec![0; 8];
        expected.extend_from_slice(&ROTATED);
        assert_eq!(rotate(&PATTERN, 16), expected);
    }

    #[test]
    fn test_rotate_16x16() {
        let bitmap = [&PATTERN[..], &[0u32; 8][..]].concat();
        let mut expected = vec![0; 8];
        expected.extend_from_slice(&ROTATED);
        expected.extend_from_slice(&[0; 16]);
        assert_eq!(rotate(&bitmap, 16), expected);
    }

    #[test]
    fn test_partial_page_matches_padding() {
        let partial = &PATTERN[..5];
        let out = rotate(partial, 8);
        assert_eq!(out.len(), 8);
        assert_eq!(out, rotate(&pad_to_pages(partial), 8));
    }

    #[test]
    fn test_odd_width() {
        let bitmap = [0b101, 0b010, 0b111];
        let out = rotate(&bitmap, 3);
        assert_eq!(out, vec![0b101, 0b110, 0b101]);
    }

    #[test]
    fn test_unrotate_round_trip() {
        let bitmap: Vec<u32> = (0..16).map(|i| (i * 0x1357) & 0xFFF).collect();
        let pages = rotate(&bitmap, 12);
        assert_eq!(pages.len(), 24);
        assert_eq!(unrotate(&pages, 12, 16), bitmap);
    }

    #[test]
    fn test_columns_beyond_row_bits_are_blank() {
        let out = rotate(&[1, 0x8000_0000], 40);
        assert_eq!(out.len(), 40);
        // only the 32 rightmost columns can carry pixels
        assert!(out[..8].iter().all(|&b| b == 0));
        assert_eq!(out[8], 0b10);
        assert_eq!(out[39], 0b01);
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 2);
        assert_eq!(unrotate(&out, 40, 2), vec![1, 0x8000_0000]);
        assert_eq!(unrotate(&[0xFF; 40], 40, 1), vec![u32::MAX]);
    }

    #[test]
    fn test_empty_bitmap() {
        assert!(rotate(&[], 8).is_empty());
        assert!(unrotate(&[], 8, 0).is_empty());
    }
}
