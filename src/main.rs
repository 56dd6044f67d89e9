//! voucher – command-line booking-confirmation generator.
//!
//! Usage:
//!   voucher <booking.json> [output.pdf] [--invoice NUM] [--date YYYY-MM-DD]
//!           [--style classic|slim] [--assets DIR] [--title "..."]
//!   voucher --sample [output.pdf]
//!
//! If `output.pdf` is omitted the file name is derived from the invoice
//! number (e.g. `WL-2026-0042` → `booking-confirmation-wl-2026-0042.pdf`).

use std::{env, fs, path::PathBuf, process};

use chrono::{Local, NaiveDate};
use serde_json::Value;
use voucher_forge::assets::DirAssets;
use voucher_forge::pipeline::{render_voucher, suggested_filename, RenderOptions};
use voucher_forge::samples;
use voucher_forge::style::LayoutStyle;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut invoice_no: Option<String> = None;
    let mut issue_date: Option<String> = None;
    let mut style_name: Option<String> = None;
    let mut asset_dir = "assets".to_string();
    let mut title: Option<String> = None;
    let mut use_sample = false;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sample" => use_sample = true,
            "--invoice" | "-i" => invoice_no = iter.next().cloned(),
            "--date" | "-d" => issue_date = iter.next().cloned(),
            "--style" | "-s" => style_name = iter.next().cloned(),
            "--assets" | "-a" => {
                if let Some(v) = iter.next() {
                    asset_dir = v.clone();
                }
            }
            "--title" | "-t" => title = iter.next().cloned(),
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    // With --sample the positional input becomes the output path.
    if use_sample && output_path.is_none() {
        output_path = input_path.take();
    }

    let payload: Value = if use_sample {
        match serde_json::from_str(samples::standard_booking()) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error parsing embedded sample: {e}");
                process::exit(1);
            }
        }
    } else {
        let input = match input_path.as_ref() {
            Some(p) => p,
            None => {
                eprintln!("Error: no booking file specified.");
                print_usage(&args[0]);
                process::exit(1);
            }
        };
        let json = match fs::read_to_string(input) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading '{}': {e}", input.display());
                process::exit(1);
            }
        };
        match serde_json::from_str(&json) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error parsing '{}': {e}", input.display());
                process::exit(1);
            }
        }
    };

    // Default invoice number: the input file stem, or a fixed sample id.
    let invoice_no = invoice_no.unwrap_or_else(|| {
        input_path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| "SAMPLE-0001".to_string())
    });

    let issue_date = match issue_date {
        Some(s) => match NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                eprintln!("Invalid --date '{s}' (expected YYYY-MM-DD)");
                process::exit(1);
            }
        },
        None => Local::now().date_naive(),
    };

    let style = match style_name.as_deref() {
        Some(name) => match LayoutStyle::by_name(name) {
            Some(s) => s,
            None => {
                eprintln!("Unknown style '{name}' (expected: classic, slim)");
                process::exit(1);
            }
        },
        None => LayoutStyle::classic(),
    };

    let mut options = RenderOptions {
        style,
        ..RenderOptions::default()
    };
    if let Some(t) = title {
        options.title = t;
    }

    let output = output_path.unwrap_or_else(|| PathBuf::from(suggested_filename(&invoice_no)));
    let assets = DirAssets::new(&asset_dir);

    match render_voucher(&payload, &invoice_no, issue_date, &assets, &options) {
        Ok((bytes, draft)) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(&output, &bytes) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            let pages = draft.pages.len();
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                output.display(),
                bytes.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error generating voucher: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("voucher – booking confirmation generator (voucher-forge)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <booking.json> [output.pdf] [flags]");
    eprintln!("  {prog} --sample [output.pdf]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <booking.json>  Booking record payload (a JSON object; fields optional)");
    eprintln!("  [output.pdf]    Output path (default: derived from the invoice number)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --invoice, -i   Invoice number (default: input filename stem)");
    eprintln!("  --date, -d      Issue date YYYY-MM-DD (default: today)");
    eprintln!("  --style, -s     Layout preset: classic or slim (default: classic)");
    eprintln!("  --assets, -a    Asset directory (default: ./assets; all assets optional)");
    eprintln!("  --title, -t     Document title");
    eprintln!("  --sample        Render the embedded sample booking");
    eprintln!("  --help          Print this message");
}
