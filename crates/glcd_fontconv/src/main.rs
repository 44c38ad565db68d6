use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;

mod commands;

#[derive(Parser)]
#[command(version, about = "Converts BDF fonts into packed glyph tables for graphic LCD firmware.")]
pub struct Cli {
    #[arg(help = "Enable debug logging.", long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write a C table of rotated glyphs for a contiguous code range")]
    CSource {
        #[arg(help = "BDF font to convert.")]
        font: PathBuf,

        #[arg(help = "First code of the table.", long, value_parser = parse_code)]
        first: u32,

        #[arg(help = "Last code of the table (inclusive).", long, value_parser = parse_code)]
        last: u32,

        #[arg(help = "Name of the C array.", long, default_value = "font8x16")]
        name: String,

        #[arg(help = "CP932 mapping table; remaps JIS codes to Unicode.", long)]
        table: Option<PathBuf>,

        #[arg(help = "Don't place the table in PROGMEM.", long, default_value_t = false)]
        no_progmem: bool,

        #[arg(help = "Emit #defines for glyph size and code range.", long, default_value_t = false)]
        defines: bool,

        #[arg(help = "Output file, stdout if omitted.", long, short)]
        output: Option<PathBuf>,
    },

    #[command(about = "List the contiguous same width code ranges of a font")]
    Blocks {
        #[arg(help = "BDF font to inspect.")]
        font: PathBuf,

        #[arg(help = "CP932 mapping table; remaps JIS codes to Unicode.", long)]
        table: Option<PathBuf>,
    },

    #[command(about = "Write a Shift_JIS to Unicode table as 65536 little endian u16 values")]
    SjisTable {
        #[arg(help = "CP932 mapping table.")]
        table: PathBuf,

        #[arg(help = "Output file.", long, short, default_value = "sjis2uni.dat")]
        output: PathBuf,
    },

    #[command(about = "Print a glyph as it will appear on the display")]
    Show {
        #[arg(help = "BDF font to read.")]
        font: PathBuf,

        #[arg(help = "Code of the glyph.", value_parser = parse_code)]
        code: u32,

        #[arg(help = "CP932 mapping table; remaps JIS codes to Unicode.", long)]
        table: Option<PathBuf>,
    },
}

/// Parses decimal or `0x` prefixed hexadecimal codes.
fn parse_code(text: &str) -> std::result::Result<u32, String> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("invalid code '{text}': {e}"))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let _logger = Logger::try_with_env_or_str(if args.verbose { "debug" } else { "info" })?
        .log_to_stderr()
        .start()?;

    match args.command {
        Commands::CSource {
            font,
            first,
            last,
            name,
            table,
            no_progmem,
            defines,
            output,
        } => commands::c_source(&commands::CSourceOptions {
            font,
            first,
            last,
            name,
            table,
            progmem: !no_progmem,
            defines,
            output,
        }),
        Commands::Blocks { font, table } => commands::blocks(&font, table.as_deref()),
        Commands::SjisTable { table, output } => commands::sjis_table(&table, &output),
        Commands::Show { font, code, table } => commands::show(&font, code, table.as_deref()),
    }
}
