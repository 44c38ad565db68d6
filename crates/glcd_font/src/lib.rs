#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
//! Bitmap font conversion for monochrome graphic LCDs.
//!
//! BDF fonts are loaded into [`GlyphRecord`]s (optionally remapping JIS codes
//! to Unicode through a [`SjisToUnicode`] table), checked for contiguous code
//! ranges with [`find_contiguous_blocks`], rotated into controller page
//! layout with [`rotate`] and written out as C tables by [`CSourceWriter`].

mod error;
pub use error::*;

pub mod charcode;
pub use charcode::{SjisToUnicode, jis_to_sjis, load_sjis_to_unicode_table};

pub mod bdf;
pub use bdf::{BdfParser, GlyphCode, GlyphRecord, parse_bdf, parse_bdf_file};

pub mod blocks;
pub use blocks::{ContiguousBlock, find_contiguous_blocks};

pub mod rotate;
pub use rotate::{pad_to_pages, rotate, unrotate};

pub mod emit;
pub use emit::{CSourceWriter, PackedGlyph};
