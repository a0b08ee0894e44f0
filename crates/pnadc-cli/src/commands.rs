use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{info, info_span};

use pnadc_cli::summary::{preview_table, print_schema};
use pnadc_codebook::{CodebookLayout, build_schema_with_layout};
use pnadc_ingest::load;
use pnadc_model::{ReaderOptions, Schema};

use crate::cli::{ReadArgs, SchemaArgs};

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schema = load_schema(&args.codebook, args.sheet.as_deref())?;
    if args.json {
        let json = serde_json::to_string_pretty(&schema).context("serialize schema")?;
        println!("{json}");
    } else {
        print_schema(&schema);
    }
    Ok(())
}

pub fn run_read(args: &ReadArgs) -> Result<()> {
    let span = info_span!("read", microdata = %args.microdata.display());
    let _guard = span.enter();
    let started = Instant::now();

    let schema = load_schema(&args.codebook, None)?;
    let options = reader_options(args);

    let spinner = spinner(format!("Reading {}", args.microdata.display()));
    let loaded = load(&args.microdata, &schema, args.labels, &options);
    spinner.finish_and_clear();
    let mut frame =
        loaded.with_context(|| format!("load microdata {}", args.microdata.display()))?;

    println!(
        "{} rows x {} columns ({:.2?})",
        frame.height(),
        frame.width(),
        started.elapsed()
    );
    if args.preview > 0 && frame.height() > 0 {
        let table = preview_table(&frame, args.preview).context("render preview")?;
        println!("{table}");
    }
    if let Some(path) = &args.output {
        write_csv(&mut frame, path)?;
        info!(path = %path.display(), rows = frame.height(), "wrote csv");
        println!("Output: {}", path.display());
    }
    Ok(())
}

fn load_schema(codebook: &Path, sheet: Option<&str>) -> Result<Schema> {
    let mut layout = CodebookLayout::default();
    if let Some(sheet) = sheet {
        layout = layout.with_sheet(sheet);
    }
    build_schema_with_layout(codebook, &layout)
        .with_context(|| format!("build schema from {}", codebook.display()))
}

fn reader_options(args: &ReadArgs) -> ReaderOptions {
    ReaderOptions {
        row_limit: args.rows,
        column_filter: args.columns.clone(),
        encoding: args.encoding.clone(),
        chunk_size: args.chunk_size,
    }
}

fn write_csv(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .with_context(|| format!("write {}", path.display()))
}

fn spinner(message: String) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
