use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};
use std::{fs, process};

use direct::{ByteView, Symbols, ViewCreateInfo};

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one field at a byte offset
    Read {
        #[command(flatten)]
        source: Source,

        #[arg(long, default_value_t = 0, help = "Offset of the field")]
        offset: usize,

        #[arg(long = "as", value_enum, help = "Field type")]
        kind: FieldKind,

        #[arg(long, help = "Assemble bytes least-significant first")]
        little_endian: bool,
    },
    /// Decode consecutive fields of one type until the region ends
    Dump {
        #[command(flatten)]
        source: Source,

        #[arg(long = "as", value_enum, help = "Field type")]
        kind: FieldKind,

        #[arg(long, help = "Assemble bytes least-significant first")]
        little_endian: bool,
    },
    /// Print the well-known symbol registry
    Symbols,
    /// Resolve prefixed symbol names (@iterator, #key, !description)
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct Source {
    /// File holding the raw bytes
    #[arg(required_unless_present = "hex", conflicts_with = "hex")]
    file: Option<String>,

    #[arg(long, help = "Bytes given inline as hex, e.g. 3ff8000000000000")]
    hex: Option<String>,

    #[arg(long, default_value_t = 0, help = "Start of the view in the input")]
    byte_offset: usize,

    #[arg(long, help = "Length of the view (defaults to the rest)")]
    length: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FieldKind {
    U32,
    U64,
    I64,
    F64,
}

impl FieldKind {
    fn width(self) -> usize {
        match self {
            FieldKind::U32 => 4,
            FieldKind::U64 | FieldKind::I64 | FieldKind::F64 => 8,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .init();

    if let Err(err) = run(cli.command) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Read {
            source,
            offset,
            kind,
            little_endian,
        } => {
            let bytes = source.load()?;
            let view = source.view(&bytes)?;
            println!("{}", read_field(&view, offset, kind, little_endian)?);
        }
        Command::Dump {
            source,
            kind,
            little_endian,
        } => {
            let bytes = source.load()?;
            let view = source.view(&bytes)?;
            let width = kind.width();
            let mut offset = 0;
            while offset + width <= view.len() {
                let value = read_field(&view, offset, kind, little_endian)?;
                println!("{:>8}: {}", offset, value);
                offset += width;
            }
            if offset < view.len() {
                log::debug!("{} trailing bytes ignored", view.len() - offset);
            }
        }
        Command::Symbols => {
            let symbols = Symbols::install();
            for (tag, _) in symbols.well_known().iter() {
                println!("{}", tag);
            }
        }
        Command::Resolve { names } => {
            let symbols = Symbols::install();
            for name in &names {
                let tag = symbols.resolve(name).map_err(|err| err.to_string())?;
                println!("{} -> {}", name, tag);
            }
        }
    }
    Ok(())
}

fn read_field(
    view: &ByteView<'_>,
    offset: usize,
    kind: FieldKind,
    little_endian: bool,
) -> Result<String, String> {
    let result = match kind {
        FieldKind::U32 => view.read_u32(offset, little_endian).map(|v| v.to_string()),
        FieldKind::U64 => view.read_u64(offset, little_endian).map(|v| v.to_string()),
        FieldKind::I64 => view.read_i64(offset, little_endian).map(|v| v.to_string()),
        FieldKind::F64 => view.read_f64(offset, little_endian).map(|v| v.to_string()),
    };
    result.map_err(|err| err.to_string())
}

impl Source {
    fn load(&self) -> Result<Vec<u8>, String> {
        if let Some(hex) = &self.hex {
            return parse_hex(hex);
        }
        let Some(filename) = &self.file else {
            return Err("no input given".to_string());
        };
        let bytes = fs::read(filename)
            .map_err(|err| format!("reading file '{}': {}", filename, err))?;
        log::debug!("loaded {} bytes from {}", bytes.len(), filename);
        Ok(bytes)
    }

    fn view<'a>(&self, bytes: &'a [u8]) -> Result<ByteView<'a>, String> {
        let info = ViewCreateInfo {
            byte_offset: self.byte_offset,
            length: self.length,
        };
        ByteView::with_info(bytes, &info).map_err(|err| err.to_string())
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = text
        .bytes()
        .filter(|b| !b.is_ascii_whitespace() && *b != b'_')
        .collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{}'", text));
    }
    digits
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| format!("invalid hex byte in '{}'", text))
        })
        .collect()
}
