use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info};

use billgrid::adapter::{Billing, Domain, Receivables};
use billgrid::config::{GridConfig, GridSpec};
use billgrid::render::render_table;
use billgrid::schema::ColumnSet;
use billgrid::value::format_currency;
use billgrid::{Grid, GridData, VecData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Billing,
    Receivables,
}

struct Args {
    data: Option<PathBuf>,
    schema: Option<PathBuf>,
    builtin: Builtin,
    search: Option<String>,
    filters: Vec<(String, String)>,
    /// (column, descending)
    sort: Option<(String, bool)>,
    export: Option<PathBuf>,
    limit: usize,
}

fn usage_error(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    eprintln!("Run with --help for usage.");
    std::process::exit(1);
}

/// Fetch the value following an option, or exit
fn option_value(args: &[String], i: usize, name: &str) -> String {
    match args.get(i + 1) {
        Some(v) => v.clone(),
        None => usage_error(&format!("{} requires an argument", name)),
    }
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        data: None,
        schema: None,
        builtin: Builtin::Billing,
        search: None,
        filters: Vec::new(),
        sort: None,
        export: None,
        limit: 20,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--schema" => {
                parsed.schema = Some(PathBuf::from(option_value(&args, i, "--schema")));
                i += 2;
            }
            "--receivables" => {
                parsed.builtin = Builtin::Receivables;
                i += 1;
            }
            "-q" | "--search" => {
                parsed.search = Some(option_value(&args, i, "--search"));
                i += 2;
            }
            "-f" | "--filter" => {
                let raw = option_value(&args, i, "--filter");
                match raw.split_once('=') {
                    Some((col, text)) => parsed.filters.push((col.to_string(), text.to_string())),
                    None => usage_error(&format!("Invalid filter '{}', expected COLUMN=TEXT", raw)),
                }
                i += 2;
            }
            "--sort" => {
                let raw = option_value(&args, i, "--sort");
                parsed.sort = Some(match raw.split_once(':') {
                    Some((col, "desc")) => (col.to_string(), true),
                    Some((col, "asc")) => (col.to_string(), false),
                    Some(_) => usage_error(&format!("Invalid sort '{}', expected COLUMN[:asc|:desc]", raw)),
                    None => (raw, false),
                });
                i += 2;
            }
            "-o" | "--export" => {
                parsed.export = Some(PathBuf::from(option_value(&args, i, "--export")));
                i += 2;
            }
            "-n" | "--limit" => {
                let raw = option_value(&args, i, "--limit");
                parsed.limit = raw
                    .parse()
                    .unwrap_or_else(|_| usage_error(&format!("Invalid limit: {}", raw)));
                i += 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => usage_error(&format!("Unknown option: {}", arg)),
            _ => {
                parsed.data = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    parsed
}

fn print_help() {
    eprintln!("billgrid - browse and export billing tables from CSV");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    billgrid [OPTIONS] [DATA.csv]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -s, --schema <FILE>      Grid spec (TOML) describing the columns");
    eprintln!("        --receivables        Use the accounts receivable columns instead of billing");
    eprintln!("    -q, --search <TEXT>      Keep rows where any column contains TEXT");
    eprintln!("    -f, --filter <COL=TEXT>  Keep rows where COL contains TEXT (repeatable)");
    eprintln!("        --sort <COL[:desc]>  Sort by a column");
    eprintln!("    -o, --export <PATH>      Write the filtered rows as CSV (a directory uses the grid title)");
    eprintln!("    -n, --limit <N>          Rows to print (default 20)");
    eprintln!("    -h, --help               Print this help message");
    eprintln!();
    eprintln!("The data file's header row must name every column id.");
}

fn build_grid(args: &Args) -> Result<Grid> {
    if let Some(path) = &args.schema {
        let spec = GridSpec::from_file(path)
            .with_context(|| format!("loading grid spec {}", path.display()))?;
        return Ok(spec.into_grid()?);
    }

    let today = Local::now().date_naive();
    let (title, columns) = match args.builtin {
        Builtin::Billing => (Billing.title(), Billing.columns()),
        Builtin::Receivables => {
            let domain = Receivables::new(today);
            (domain.title(), domain.columns())
        }
    };
    Ok(Grid::new(ColumnSet::new(columns)?, GridConfig::default()).with_title(title))
}

fn print_metrics(args: &Args, rows: &[billgrid::Row]) {
    if args.schema.is_some() {
        return;
    }
    match args.builtin {
        Builtin::Billing => {
            let m = Billing.metrics(rows);
            println!(
                "{} line items, {} units | charges {} | paid {} | outstanding {} | {} denied",
                m.line_items,
                m.units,
                format_currency(m.total_charges),
                format_currency(m.total_paid),
                format_currency(m.outstanding),
                m.denied
            );
        }
        Builtin::Receivables => {
            let m = Receivables::new(Local::now().date_naive()).metrics(rows);
            println!(
                "{} open | outstanding {} | 0-30 {} | 31-60 {} | 61-90 {} | 90+ {}",
                m.open_items,
                format_currency(m.outstanding),
                format_currency(m.aging.current),
                format_currency(m.aging.days_31_60),
                format_currency(m.aging.days_61_90),
                format_currency(m.aging.over_90)
            );
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut grid = build_grid(&args)?;
    let mut data = VecData::default();

    if let Some(path) = &args.data {
        let count = grid
            .import_file(path, &mut data)
            .with_context(|| format!("importing {}", path.display()))?;
        info!(count, file = %path.display(), "loaded data");
    }

    if let Some(search) = &args.search {
        grid.set_search(search);
    }
    for (column, text) in &args.filters {
        grid.set_filter(column, text)?;
    }
    if let Some((column, descending)) = &args.sort {
        grid.toggle_sort(column)?;
        if *descending {
            grid.toggle_sort(column)?;
        }
    }

    print_metrics(&args, data.rows());
    println!(
        "{} of {} rows match",
        grid.visible_rows(data.rows()).len(),
        data.rows().len()
    );
    print!("{}", render_table(&grid, data.rows(), args.limit));

    if let Some(path) = &args.export {
        let file = grid.export(data.rows())?;
        let target = if path.is_dir() {
            path.join(&file.file_name)
        } else {
            path.clone()
        };
        file.write_to(&target)?;
        println!("Exported to {}", target.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("billgrid started");

    let args = parse_args();
    run(args).map_err(|e| {
        error!(error = %e, "billgrid failed");
        e
    })
}
