// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use regex_colorizer::{
    annotate, options::DEFAULT_CLASS_NAME, printer::escape_html, ColorizerError, ColorizerOptions,
};

/// Annotates regular expressions with HTML markup for syntax highlighting.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Patterns to annotate. When omitted, one pattern per line is read
    /// from `--file` or the standard input.
    patterns: Vec<String>,

    /// Read patterns from this file, one per line.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Class name of the pattern containers and the stylesheet scope.
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_CLASS_NAME)]
    class: String,

    /// Emit a complete HTML document with the default stylesheet.
    #[arg(short, long)]
    standalone: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ColorizerError> {
    let options = ColorizerOptions::new(&args.class)?;
    let patterns = read_patterns(args)?;

    log::debug!("annotating {} pattern(s)", patterns.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.standalone {
        write_document(&mut out, &options, &patterns)?;
    } else {
        for pattern in &patterns {
            writeln!(out, "{}", annotate(pattern))?;
        }
    }

    Ok(())
}

fn read_patterns(args: &Args) -> Result<Vec<String>, ColorizerError> {
    if !args.patterns.is_empty() {
        return Ok(args.patterns.clone());
    }

    let patterns: Vec<String> = match &args.file {
        Some(path) => fs::read_to_string(path)?
            .lines()
            .map(str::to_owned)
            .collect(),
        None => io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?,
    };

    Ok(patterns)
}

fn write_document(
    out: &mut impl Write,
    options: &ColorizerOptions,
    patterns: &[String],
) -> Result<(), ColorizerError> {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape_html(options.class_name()))?;
    writeln!(out, "<style>\n{}\n</style>", options.stylesheet())?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;

    for pattern in patterns {
        writeln!(
            out,
            "<pre class=\"{}\">{}</pre>",
            options.class_name(),
            annotate(pattern)
        )?;
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}
