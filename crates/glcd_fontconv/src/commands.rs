//! Implementations of the subcommands.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glcd_font::{CSourceWriter, GlyphRecord, PackedGlyph, SjisToUnicode, find_contiguous_blocks, pad_to_pages, parse_bdf_file, rotate, unrotate};

pub struct CSourceOptions {
    pub font: PathBuf,
    pub first: u32,
    pub last: u32,
    pub name: String,
    pub table: Option<PathBuf>,
    pub progmem: bool,
    pub defines: bool,
    pub output: Option<PathBuf>,
}

fn load_table(table: Option<&Path>) -> Result<Option<SjisToUnicode>> {
    let Some(path) = table else {
        return Ok(None);
    };
    let table = SjisToUnicode::load(path)?;
    log::info!("Loaded {} Shift_JIS mappings", table.len());
    Ok(Some(table))
}

fn load_font(font: &Path, table: Option<&SjisToUnicode>) -> Result<Vec<GlyphRecord>> {
    let glyphs = parse_bdf_file(font, table).with_context(|| format!("loading {}", font.display()))?;
    let unmapped = glyphs.iter().filter(|g| g.code.is_unmapped()).count();
    if unmapped > 0 {
        log::warn!("{unmapped} glyphs have no Unicode mapping and are left out");
    }
    Ok(glyphs)
}

fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?)),
        None => Box::new(io::stdout().lock()),
    })
}

pub fn c_source(options: &CSourceOptions) -> Result<()> {
    if options.first > options.last {
        bail!("first code 0x{:x} is above last code 0x{:x}", options.first, options.last);
    }
    let table = load_table(options.table.as_deref())?;
    let glyphs = load_font(&options.font, table.as_ref())?;

    let mut selected: Vec<GlyphRecord> = glyphs
        .into_iter()
        .filter(|g| g.code.as_code().is_some_and(|code| (options.first..=options.last).contains(&code)))
        .collect();

    let blocks = find_contiguous_blocks(&selected);
    let [block] = blocks.as_slice() else {
        bail!(
            "codes 0x{:x}-0x{:x} are not one contiguous same width range ({} blocks)",
            options.first,
            options.last,
            blocks.len()
        );
    };
    if block.start_code != options.first || block.end_code != options.last {
        bail!(
            "font only covers 0x{:x}-0x{:x} of 0x{:x}-0x{:x}",
            block.start_code,
            block.end_code,
            options.first,
            options.last
        );
    }

    selected.sort_by_key(|g| g.code.as_code());
    let height = selected[0].height;
    let packed = selected
        .iter()
        .map(|g| -> Result<PackedGlyph> {
            Ok(PackedGlyph {
                code: g.code_point()?,
                bytes: rotate(&pad_to_pages(&g.bitmap), g.width),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut writer = CSourceWriter::new(options.name.clone()).progmem(options.progmem);
    if options.defines {
        writer = writer.defines(block.width, height);
    }
    let mut out = open_output(options.output.as_deref())?;
    writer.write(&mut out, &packed)?;
    out.flush()?;

    log::info!("Wrote {} glyphs ({}x{}) as '{}'", packed.len(), block.width, height, writer.name());
    Ok(())
}

pub fn blocks(font: &Path, table: Option<&Path>) -> Result<()> {
    let table = load_table(table)?;
    let glyphs = load_font(font, table.as_ref())?;

    let mut out = io::stdout().lock();
    for block in find_contiguous_blocks(&glyphs) {
        writeln!(
            out,
            "0x{:04x}-0x{:04x} width {} ({} codes)",
            block.start_code,
            block.end_code,
            block.width,
            block.code_count()
        )?;
    }
    for glyph in glyphs.iter().filter(|g| g.code.is_unmapped()) {
        if let Err(err) = glyph.code_point() {
            writeln!(out, "unmapped: {err}")?;
        }
    }
    Ok(())
}

pub fn sjis_table(table: &Path, output: &Path) -> Result<()> {
    let table = SjisToUnicode::load(table)?;
    let mut out = BufWriter::new(File::create(output).with_context(|| format!("creating {}", output.display()))?);
    table.write_u16_table(&mut out)?;
    out.flush()?;
    log::info!("Wrote {} mappings to {}", table.len(), output.display());
    Ok(())
}

pub fn show(font: &Path, code: u32, table: Option<&Path>) -> Result<()> {
    let table = load_table(table)?;
    let glyphs = load_font(font, table.as_ref())?;
    let Some(glyph) = glyphs.iter().find(|g| g.code.as_code() == Some(code)) else {
        bail!("no glyph for code 0x{code:x} in {}", font.display());
    };

    let pages = rotate(&pad_to_pages(&glyph.bitmap), glyph.width);
    let rows = unrotate(&pages, glyph.width, glyph.height);

    let mut out = io::stdout().lock();
    writeln!(out, "0x{code:04x}: {}x{}, {} bytes", glyph.width, glyph.height, pages.len())?;
    for row in rows {
        let line: String = (0..glyph.width).rev().map(|bit| if (row >> bit) & 1 == 1 { '#' } else { '.' }).collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}
