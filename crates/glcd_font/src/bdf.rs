//! BDF (Glyph Bitmap Distribution Format) font loader.
//!
//! Only the parts of the format needed to extract fixed height bitmaps are
//! read: `FONTBOUNDINGBOX`, `STARTCHAR`, `ENCODING`, `BBX`, `BITMAP`, the hex
//! bitmap rows and `ENDCHAR`. Everything else (properties, `SWIDTH`,
//! `DWIDTH`, comments, ...) is skipped.
//!
//! Encodings in the file are taken as JIS row/column codes. If a
//! [`SjisToUnicode`] table is passed, multi byte codes are remapped to
//! Unicode while loading.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use regex::Regex;

use crate::{FontError, Result, SjisToUnicode, StructuralError, jis_to_sjis};

lazy_static::lazy_static! {
    static ref FONT_BOUNDING_BOX: Regex = Regex::new(r"^FONTBOUNDINGBOX\s+(\d+)\s+(\d+)\s+(-?\d+)\s+(-?\d+)").unwrap();
    static ref ENCODING: Regex = Regex::new(r"^ENCODING\s+(-?\d+)").unwrap();
    static ref BBX: Regex = Regex::new(r"^BBX\s+(\d+)\s+(\d+)\s+(-?\d+)\s+(-?\d+)").unwrap();
}

/// Codes at or above this value are multi byte JIS codes and get remapped.
pub const MULTI_BYTE_START: u32 = 0x100;

/// Widest glyph a [`GlyphRecord`] row can hold.
pub const MAX_GLYPH_WIDTH: u32 = u32::BITS;

/// The code point of a loaded glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphCode {
    /// The code as found in the file, or its Unicode equivalent after remapping.
    Code(u32),
    /// Unicode remapping was requested but the Shift_JIS code has no table entry.
    Unmapped { jis: u32, sjis: u32 },
}

impl GlyphCode {
    pub fn as_code(&self) -> Option<u32> {
        match self {
            GlyphCode::Code(code) => Some(*code),
            GlyphCode::Unmapped { .. } => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, GlyphCode::Unmapped { .. })
    }
}

/// One glyph decoded from a `STARTCHAR` .. `ENDCHAR` block.
///
/// Each bitmap row holds `width` bits, the most significant of them being
/// the leftmost pixel. Row 0 is the top scan line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRecord {
    pub code: GlyphCode,
    /// The JIS code from the file, set when the code was remapped to Unicode.
    pub orig_code: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub bitmap: Vec<u32>,
}

impl GlyphRecord {
    /// Returns the glyph's code point.
    ///
    /// # Errors
    /// [`FontError::UnmappedCodePoint`] if Unicode remapping failed for this glyph.
    pub fn code_point(&self) -> Result<u32> {
        match self.code {
            GlyphCode::Code(code) => Ok(code),
            GlyphCode::Unmapped { jis, sjis } => Err(FontError::UnmappedCodePoint { jis, sjis }),
        }
    }

    pub fn orig_code(&self) -> Option<u32> {
        self.orig_code
    }

    /// Number of bytes one row occupies in the BDF file.
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8) as usize
    }

    /// Returns `false` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let row = self.bitmap.get(y as usize).copied().unwrap_or(0);
        row.checked_shr(self.width - 1 - x).is_some_and(|bits| bits & 1 == 1)
    }
}

/// Loads all glyphs from the BDF file at `path`, in file order.
///
/// With `unicode` set, codes >= 0x100 are converted JIS -> Shift_JIS ->
/// Unicode; glyphs missing from the table get [`GlyphCode::Unmapped`].
///
/// # Errors
/// [`FontError::FileNotFound`] if the file can't be opened, [`FontError::Structural`]
/// for the first broken invariant. No glyphs are returned on error.
pub fn parse_bdf_file(path: &Path, unicode: Option<&SjisToUnicode>) -> Result<Vec<GlyphRecord>> {
    let file = File::open(path).map_err(|source| FontError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let glyphs = parse_bdf(BufReader::new(file), unicode)?;
    log::debug!("Loaded {} glyphs from {}", glyphs.len(), path.display());
    Ok(glyphs)
}

/// Loads all glyphs from a BDF stream. See [`parse_bdf_file`].
pub fn parse_bdf<R: BufRead>(reader: R, unicode: Option<&SjisToUnicode>) -> Result<Vec<GlyphRecord>> {
    let mut parser = BdfParser::new(unicode);
    for (i, line) in reader.lines().enumerate() {
        parser.parse_line(i + 1, &line?)?;
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Idle,
    InBitmap,
}

#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    width: u32,
    height: u32,
    bytes_per_row: usize,
}

/// Per glyph data, reset on every `STARTCHAR`.
#[derive(Debug, Default)]
struct PendingGlyph {
    code: Option<u32>,
    bbx: Option<BoundingBox>,
    pattern: Vec<u32>,
}

/// Line driven BDF state machine.
pub struct BdfParser<'a> {
    unicode: Option<&'a SjisToUnicode>,
    global_height: Option<u32>,
    state: ParseState,
    pending: PendingGlyph,
    glyphs: Vec<GlyphRecord>,
    last_line: usize,
}

impl<'a> BdfParser<'a> {
    pub fn new(unicode: Option<&'a SjisToUnicode>) -> Self {
        Self {
            unicode,
            global_height: None,
            state: ParseState::Idle,
            pending: PendingGlyph::default(),
            glyphs: Vec::new(),
            last_line: 0,
        }
    }

    /// Feeds one line; `line_number` is only used for error reporting.
    pub fn parse_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let line = line.trim_end();
        self.last_line = line_number;

        if self.state == ParseState::InBitmap {
            if line == "ENDCHAR" {
                return self.end_char(line_number);
            }
            if line.starts_with("STARTCHAR") {
                log::warn!("BDF line {line_number}: STARTCHAR inside BITMAP, discarding unterminated glyph");
                self.start_char();
                return Ok(());
            }
            return self.bitmap_row(line_number, line);
        }

        if let Some(caps) = FONT_BOUNDING_BOX.captures(line) {
            self.global_height = Some(parse_number(line_number, line, &caps[2])?);
        } else if line.starts_with("STARTCHAR") {
            self.start_char();
        } else if let Some(caps) = ENCODING.captures(line) {
            // negative values mark unencoded glyphs
            let code: i64 = parse_number(line_number, line, &caps[1])?;
            self.pending.code = if code < 0 {
                None
            } else {
                Some(u32::try_from(code).map_err(|_| invalid_number(line_number, line))?)
            };
        } else if let Some(caps) = BBX.captures(line) {
            let width = parse_number(line_number, line, &caps[1])?;
            let height = parse_number(line_number, line, &caps[2])?;
            self.bounding_box(line_number, width, height)?;
        } else if line.starts_with("BITMAP") {
            self.state = ParseState::InBitmap;
        }
        Ok(())
    }

    /// Returns the glyphs of a completely read file.
    ///
    /// # Errors
    /// [`StructuralError::UnterminatedGlyph`] if the input stopped inside `BITMAP`.
    pub fn finish(self) -> Result<Vec<GlyphRecord>> {
        if self.state == ParseState::InBitmap {
            return Err(FontError::structural(self.last_line, StructuralError::UnterminatedGlyph));
        }
        Ok(self.glyphs)
    }

    fn start_char(&mut self) {
        self.pending = PendingGlyph::default();
        self.state = ParseState::Idle;
    }

    fn bounding_box(&mut self, line_number: usize, width: u32, height: u32) -> Result<()> {
        let Some(expected) = self.global_height else {
            return Err(FontError::structural(line_number, StructuralError::MissingFontBoundingBox));
        };
        if height != expected {
            return Err(FontError::structural(line_number, StructuralError::HeightMismatch { height, expected }));
        }
        if width > MAX_GLYPH_WIDTH {
            return Err(FontError::structural(line_number, StructuralError::WidthTooLarge(width)));
        }
        self.pending.bbx = Some(BoundingBox {
            width,
            height,
            bytes_per_row: width.div_ceil(8) as usize,
        });
        Ok(())
    }

    fn bitmap_row(&mut self, line_number: usize, line: &str) -> Result<()> {
        let Some(bbx) = self.pending.bbx else {
            return Err(FontError::structural(line_number, StructuralError::MissingBoundingBox));
        };
        let expected = bbx.bytes_per_row * 2;
        if line.len() != expected {
            return Err(FontError::structural(
                line_number,
                StructuralError::RowWidthMismatch { digits: line.len(), expected },
            ));
        }
        if !line.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FontError::structural(line_number, StructuralError::InvalidHexRow(line.to_string())));
        }
        let value = if line.is_empty() {
            0
        } else {
            u32::from_str_radix(line, 16).map_err(|_| FontError::structural(line_number, StructuralError::InvalidHexRow(line.to_string())))?
        };
        // rows are padded to whole bytes on the right
        let padding = bbx.bytes_per_row as u32 * 8 - bbx.width;
        self.pending.pattern.push(value >> padding);
        Ok(())
    }

    fn end_char(&mut self, line_number: usize) -> Result<()> {
        self.state = ParseState::Idle;
        let pending = std::mem::take(&mut self.pending);
        let (Some(bbx), Some(expected)) = (pending.bbx, self.global_height) else {
            return Err(FontError::structural(line_number, StructuralError::MissingBoundingBox));
        };
        if pending.pattern.len() != expected as usize {
            return Err(FontError::structural(
                line_number,
                StructuralError::RowCountMismatch {
                    rows: pending.pattern.len(),
                    expected,
                },
            ));
        }
        let Some(code) = pending.code else {
            return Err(FontError::structural(line_number, StructuralError::MissingEncoding));
        };

        let (code, orig_code) = self.remap(code);
        self.glyphs.push(GlyphRecord {
            code,
            orig_code,
            width: bbx.width,
            height: bbx.height,
            bitmap: pending.pattern,
        });
        Ok(())
    }

    fn remap(&self, code: u32) -> (GlyphCode, Option<u32>) {
        let Some(table) = self.unicode else {
            return (GlyphCode::Code(code), None);
        };
        if code < MULTI_BYTE_START {
            return (GlyphCode::Code(code), None);
        }
        let sjis = jis_to_sjis(code);
        let remapped = match table.get(sjis) {
            Some(unicode) => GlyphCode::Code(unicode),
            None => GlyphCode::Unmapped { jis: code, sjis },
        };
        (remapped, Some(code))
    }
}

fn invalid_number(line_number: usize, line: &str) -> FontError {
    FontError::structural(line_number, StructuralError::InvalidNumber(line.to_string()))
}

fn parse_number<T: std::str::FromStr>(line_number: usize, line: &str, text: &str) -> Result<T> {
    text.parse().map_err(|_| invalid_number(line_number, line))
}
