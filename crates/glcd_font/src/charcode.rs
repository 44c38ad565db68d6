//! Japanese character code conversion.
//!
//! Two conversions are provided:
//! - JIS X 0208 row/column (kuten) codes to Shift_JIS, computed arithmetically.
//! - Shift_JIS to Unicode, looked up in a table loaded from a CP932 style
//!   mapping file (`0x8140<TAB>0x3000<TAB>#IDEOGRAPHIC SPACE`).

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use regex::Regex;

use crate::{FontError, Result};

lazy_static::lazy_static! {
    static ref TABLE_LINE: Regex = Regex::new(r"0x([0-9a-fA-F]+)\s+0x([0-9a-fA-F]+)").unwrap();
}

/// Value written for Shift_JIS codes without a mapping in [`SjisToUnicode::write_u16_table`].
pub const UNMAPPED_U16: u16 = 0xFFFF;

/// Number of entries in the dumped 16 bit table.
pub const U16_TABLE_LEN: usize = 0x1_0000;

/// Converts a 2 byte JIS row/column code to Shift_JIS.
///
/// The input is not validated. Codes above 0xFFFF keep their extra high bits
/// and so never land on a valid 2 byte Shift_JIS code.
pub fn jis_to_sjis(jis: u32) -> u32 {
    let mut c1 = jis >> 8;
    let mut c2 = jis & 0xFF;
    if c1 % 2 == 0 {
        c1 = c1 / 2 + 0x70;
        c2 += 0x7D;
    } else {
        c1 = (c1 + 1) / 2 + 0x70;
        c2 += 0x1F;
    }
    if c1 >= 0xA0 {
        c1 += 0x40;
    }
    if c2 >= 0x7F {
        c2 += 1;
    }
    (c1 << 8) | c2
}

/// Loads a Shift_JIS to Unicode table from `path`.
///
/// Shorthand for [`SjisToUnicode::load`].
pub fn load_sjis_to_unicode_table(path: &Path) -> Result<SjisToUnicode> {
    SjisToUnicode::load(path)
}

/// Mapping from Shift_JIS codes to Unicode code points.
///
/// Codes missing from the source table are missing from the map; there is no
/// default entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SjisToUnicode {
    map: HashMap<u32, u32>,
}

impl SjisToUnicode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table from a mapping file.
    ///
    /// # Errors
    /// [`FontError::TableLoad`] if the file can't be opened, [`FontError::Io`] on read errors.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| FontError::TableLoad {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::read(BufReader::new(file))?;
        log::debug!("Loaded {} Shift_JIS mappings from {}", table.len(), path.display());
        Ok(table)
    }

    /// Reads mapping lines from `reader`.
    ///
    /// Lines without two hexadecimal columns are skipped, as are entries
    /// whose values don't fit into 32 bits.
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        for line in reader.lines() {
            let line = line?;
            let Some(caps) = TABLE_LINE.captures(&line) else {
                continue;
            };
            let (Ok(sjis), Ok(unicode)) = (u32::from_str_radix(&caps[1], 16), u32::from_str_radix(&caps[2], 16)) else {
                continue;
            };
            table.insert(sjis, unicode);
        }
        Ok(table)
    }

    pub fn insert(&mut self, sjis: u32, unicode: u32) {
        self.map.insert(sjis, unicode);
    }

    /// Returns the Unicode code point for `sjis`, or `None` if it has no mapping.
    pub fn get(&self, sjis: u32) -> Option<u32> {
        self.map.get(&sjis).copied()
    }

    pub fn contains(&self, sjis: u32) -> bool {
        self.map.contains_key(&sjis)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up the Unicode code point of a JIS row/column code.
    pub fn jis_to_unicode(&self, jis: u32) -> Option<u32> {
        self.get(jis_to_sjis(jis))
    }

    /// Writes the table as 65536 little endian `u16` values indexed by Shift_JIS code.
    ///
    /// Codes without a mapping are written as [`UNMAPPED_U16`]. Entries that
    /// don't fit into 16 bits are left out.
    pub fn write_u16_table<W: Write>(&self, mut writer: W) -> Result<()> {
        let mut table = vec![UNMAPPED_U16; U16_TABLE_LEN];
        for (&sjis, &unicode) in &self.map {
            match (u16::try_from(sjis), u16::try_from(unicode)) {
                (Ok(sjis), Ok(unicode)) => table[sjis as usize] = unicode,
                _ => log::warn!("Skipping mapping 0x{sjis:x} -> U+{unicode:04X}, it doesn't fit a 16 bit table"),
            }
        }

        let mut bytes = Vec::with_capacity(U16_TABLE_LEN * 2);
        for value in table {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        writer.write_all(&bytes)?;
        Ok(())
    }
}

impl FromIterator<(u32, u32)> for SjisToUnicode {
    fn from_iter<T: IntoIterator<Item = (u32, u32)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
