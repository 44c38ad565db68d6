//! C source output for packed glyph tables.

use std::io::Write;

use crate::Result;

/// Rotated glyph data ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedGlyph {
    pub code: u32,
    pub bytes: Vec<u8>,
}

/// Writes glyph tables as `const unsigned char` arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSourceWriter {
    name: String,
    progmem: bool,
    defines: Option<(u32, u32)>,
}

impl CSourceWriter {
    /// `name` must be a valid C identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            progmem: true,
            defines: None,
        }
    }

    /// Place the table in program memory (AVR `PROGMEM`). On by default.
    pub fn progmem(mut self, progmem: bool) -> Self {
        self.progmem = progmem;
        self
    }

    /// Emit `#define`s for the glyph size and code range in front of the table.
    pub fn defines(mut self, width: u32, height: u32) -> Self {
        self.defines = Some((width, height));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn write<W: Write>(&self, mut writer: W, glyphs: &[PackedGlyph]) -> Result<()> {
        if let Some((width, height)) = self.defines {
            let prefix = self.name.to_ascii_uppercase();
            writeln!(writer, "#define {prefix}_WIDTH {width}")?;
            writeln!(writer, "#define {prefix}_HEIGHT {height}")?;
            if let (Some(first), Some(last)) = (glyphs.first(), glyphs.last()) {
                writeln!(writer, "#define {prefix}_FIRST 0x{:x}", first.code)?;
                writeln!(writer, "#define {prefix}_LAST 0x{:x}", last.code)?;
            }
        }

        let attribute = if self.progmem { " PROGMEM" } else { "" };
        writeln!(writer, "const unsigned char {}[]{attribute} = {{", self.name)?;
        for glyph in glyphs {
            writeln!(writer, "\t/* {} */", describe_code(glyph.code))?;
            let bytes: Vec<String> = glyph.bytes.iter().map(u8::to_string).collect();
            writeln!(writer, "\t{},", bytes.join(","))?;
        }
        writeln!(writer, "}};")?;
        Ok(())
    }
}

fn describe_code(code: u32) -> String {
    match char::from_u32(code) {
        Some(ch) if ch.is_ascii_graphic() || ch == ' ' => format!("character '{ch}', 0x{code:x}"),
        _ => format!("character U+{code:04X}"),
    }
}
