//! Detection of contiguous code ranges sharing one glyph width.

use crate::GlyphRecord;

/// A maximal run of consecutive code points whose glyphs all have the same width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContiguousBlock {
    pub start_code: u32,
    /// Inclusive.
    pub end_code: u32,
    pub width: u32,
}

impl ContiguousBlock {
    /// Number of code points in the block.
    pub fn code_count(&self) -> usize {
        (self.end_code - self.start_code) as usize + 1
    }

    pub fn contains(&self, code: u32) -> bool {
        (self.start_code..=self.end_code).contains(&code)
    }
}

/// Groups `glyphs` into maximal contiguous same width code ranges, ordered by start code.
///
/// Glyphs whose code is unmapped are ignored. An empty input yields no blocks.
pub fn find_contiguous_blocks(glyphs: &[GlyphRecord]) -> Vec<ContiguousBlock> {
    let mut codes: Vec<(u32, u32)> = glyphs.iter().filter_map(|g| g.code.as_code().map(|code| (code, g.width))).collect();
    codes.sort_by_key(|(code, _)| *code);

    let mut blocks = Vec::new();
    let mut iter = codes.into_iter();
    let Some((first, width)) = iter.next() else {
        return blocks;
    };

    let mut cur = ContiguousBlock {
        start_code: first,
        end_code: first,
        width,
    };
    for (code, width) in iter {
        if cur.end_code.checked_add(1) == Some(code) && width == cur.width {
            cur.end_code = code;
        } else {
            blocks.push(cur);
            cur = ContiguousBlock {
                start_code: code,
                end_code: code,
                width,
            };
        }
    }
    blocks.push(cur);
    blocks
}
