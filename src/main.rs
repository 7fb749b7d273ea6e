//! typeset: paginate a text file from the command line
//!
//! Prints pages in the same exchange format the WASM bindings return.

use std::env;
use std::fs;
use std::process::ExitCode;
use typeset_engine::commands;
use typeset_engine::{LayoutConfig, ScanOptions, Typesetter, WrapUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Pages,
    Chapters,
    Map,
}

#[derive(Debug, Clone)]
struct Args {
    path: String,
    mode: Mode,
    chapter: Option<usize>,
    max_lines: Option<usize>,
    max_chars: Option<usize>,
    config_path: Option<String>,
    max_heading_level: Option<u8>,
    numbered_headings: bool,
    graphemes: bool,
    keep_lines: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) if msg == "help requested" => {
            println!("{}", help_text());
            ExitCode::SUCCESS
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("{}", help_text());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let cli = parse_args(args)?;
    let typesetter = build_typesetter(&cli)?;

    let bytes = fs::read(&cli.path).map_err(|e| format!("cannot read '{}': {}", cli.path, e))?;
    let content = decode_text(&bytes);

    match cli.mode {
        Mode::Chapters => {
            for (i, title) in commands::parse_document_chapters(&content, &typesetter)
                .iter()
                .enumerate()
            {
                println!("{}\t{}", i, title);
            }
        }
        Mode::Map => {
            for (title, start_page) in
                commands::get_document_chapter_page_mapping(&content, &typesetter)
            {
                println!("{}\t{}", start_page, title);
            }
        }
        Mode::Pages => match cli.chapter {
            Some(index) => {
                let reply = commands::load_chapter_content_with_offset(&content, index, &typesetter)
                    .map_err(|e| e.to_string())?;
                print!("{}", reply.content);
                eprintln!(
                    "chapter {} starts at page {} of {}",
                    index, reply.absolute_start_page, reply.total_page_count
                );
            }
            None => print!("{}", commands::typeset_document(&content, &typesetter)),
        },
    }

    Ok(())
}

fn build_typesetter(cli: &Args) -> Result<Typesetter, String> {
    let mut config = match &cli.config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config '{}': {}", path, e))?;
            LayoutConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => LayoutConfig::default(),
    };

    if cli.max_lines.is_some() || cli.max_chars.is_some() {
        config = LayoutConfig::new(
            cli.max_lines.unwrap_or(config.max_lines_per_page()),
            cli.max_chars.unwrap_or(config.max_chars_per_line()),
        )
        .map_err(|e| e.to_string())?
        .with_wrap_unit(config.wrap_unit())
        .with_keep_wrapped_lines_together(config.keep_wrapped_lines_together());
    }
    if cli.graphemes {
        config = config.with_wrap_unit(WrapUnit::Grapheme);
    }
    if cli.keep_lines {
        config = config.with_keep_wrapped_lines_together(true);
    }

    let mut options = ScanOptions::default().with_numbered_headings(cli.numbered_headings);
    if let Some(level) = cli.max_heading_level {
        options = options.with_max_heading_level(level);
    }

    Ok(Typesetter::new(config).with_scan_options(options))
}

/// UTF-8, falling back to Latin-1 for legacy text files
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(err) => {
            log::warn!(
                "input is not valid UTF-8 (at byte {}), decoding as Latin-1",
                err.valid_up_to()
            );
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h") {
        return Err("help requested".to_string());
    }

    let path = match args.get(1) {
        Some(v) if !v.starts_with("--") => v.clone(),
        _ => return Err("missing input file".to_string()),
    };

    let mut cfg = Args {
        path,
        mode: Mode::Pages,
        chapter: None,
        max_lines: None,
        max_chars: None,
        config_path: None,
        max_heading_level: None,
        numbered_headings: false,
        graphemes: false,
        keep_lines: false,
    };

    let mut i = 2usize;
    while i < args.len() {
        match args[i].as_str() {
            "--chapter" => {
                cfg.chapter = Some(parse_value(&args, i, "--chapter")?);
                i += 2;
            }
            "--lines" => {
                cfg.max_lines = Some(parse_value(&args, i, "--lines")?);
                i += 2;
            }
            "--chars" => {
                cfg.max_chars = Some(parse_value(&args, i, "--chars")?);
                i += 2;
            }
            "--max-heading-level" => {
                cfg.max_heading_level = Some(parse_value(&args, i, "--max-heading-level")?);
                i += 2;
            }
            "--config" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                cfg.config_path = Some(v.clone());
                i += 2;
            }
            "--numbered-headings" => {
                cfg.numbered_headings = true;
                i += 1;
            }
            "--graphemes" => {
                cfg.graphemes = true;
                i += 1;
            }
            "--keep-lines" => {
                cfg.keep_lines = true;
                i += 1;
            }
            "--chapters" => {
                cfg.mode = Mode::Chapters;
                i += 1;
            }
            "--map" => {
                cfg.mode = Mode::Map;
                i += 1;
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    if cfg.chapter.is_some() && cfg.mode != Mode::Pages {
        return Err("--chapter cannot be combined with --chapters or --map".to_string());
    }

    Ok(cfg)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let v = args
        .get(i + 1)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    v.parse::<T>()
        .map_err(|_| format!("invalid {} value '{}'", flag, v))
}

fn help_text() -> &'static str {
    r#"typeset - paginate a plain or markdown-like text file

USAGE:
  typeset <file> [options]

MODES:
  default: print every page in the page exchange format
  --chapters: print chapter index and title, one per line
  --map: print absolute start page and title, one per line

OPTIONS:
  --chapter <n>               print only chapter n (0-based), numbered as in the full document
  --lines <n>                 lines per page (default: 30)
  --chars <n>                 characters per line (default: 80)
  --config <file>             layout configuration JSON (camelCase keys)
  --max-heading-level <n>     deepest '#' level that starts a chapter (default: 1, 0 disables)
  --numbered-headings         also start chapters on lines like '第一章 ...'
  --graphemes                 measure lines in grapheme clusters
  --keep-lines                never split one wrapped line across pages
  -h, --help                  show this help

Set RUST_LOG=debug for pagination diagnostics."#
}
