//! Bill calculator entry point: CLI wiring and tariff-driven calculation.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use bill_calc::bill::calculator::BillCalculator;
use bill_calc::bill::form::{BillForm, FormState};
use bill_calc::bill::locale::Locale;
use bill_calc::config::TariffConfig;
use bill_calc::io::batch::{BatchOutcome, RowError, read_batch_file, run_batch};
use bill_calc::io::export::export_csv;

/// Electricity bill calculator for tiered household and flat institutional tariffs.
#[derive(Parser, Debug)]
#[command(name = "bill-calc", version, about)]
struct Args {
    /// Previous meter reading (kWh)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    previous: String,

    /// Current meter reading (kWh)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    current: String,

    /// Billing period in months [default: tariff default]
    #[arg(long, allow_hyphen_values = true)]
    months: Option<String>,

    /// Bill at the flat institutional rate
    #[arg(long)]
    institution: bool,

    /// Institution category: standard or premium
    #[arg(long, default_value = "standard")]
    category: String,

    /// Local-currency units per foreign-currency unit
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    exchange_rate: String,

    /// Load tariff from TOML config file
    #[arg(long, conflicts_with = "preset")]
    tariff: Option<PathBuf>,

    /// Use a built-in tariff preset (baseline)
    #[arg(long)]
    preset: Option<String>,

    /// Language for messages and labels: en or ar
    #[arg(long, default_value = "en", value_parser = parse_locale)]
    lang: Locale,

    /// Calculate every row of a CSV file instead of a single bill
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Export bill outcomes to CSV
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v')]
    verbose: bool,

    /// Start REST API server instead of calculating
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    s.parse()
}

fn load_tariff(args: &Args) -> TariffConfig {
    // --tariff takes priority, then --preset, then baseline default
    let tariff = if let Some(ref path) = args.tariff {
        TariffConfig::from_toml_file(path)
    } else if let Some(ref name) = args.preset {
        TariffConfig::from_preset(name)
    } else {
        Ok(TariffConfig::baseline())
    };
    let tariff = tariff.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let errors = tariff.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    tariff
}

fn write_export(outcomes: &[BatchOutcome], path: &Path, locale: Locale) {
    if let Err(e) = export_csv(outcomes, path, locale) {
        eprintln!("error: failed to write CSV: {e}");
        process::exit(1);
    }
    eprintln!("Bills written to {}", path.display());
}

fn run_single(args: &Args, calculator: &BillCalculator) {
    let mut form = BillForm::new(calculator.tariff());
    form.edit(|input| {
        input.previous = args.previous.clone();
        input.current = args.current.clone();
        if let Some(ref months) = args.months {
            input.months = months.clone();
        }
        input.institution_mode = args.institution;
        input.category = args.category.clone();
        input.exchange_rate = args.exchange_rate.clone();
    });

    let outcome = match form.submit(calculator) {
        FormState::Computed(bill) => {
            println!("{bill}");
            if args.lang != Locale::En {
                println!("{}", bill.category_label(args.lang));
            }
            Ok(bill.clone())
        }
        FormState::Error(e) => {
            eprintln!("error: {}", e.message(args.lang));
            Err(RowError::from(*e))
        }
        FormState::Idle => return,
    };
    let failed = outcome.is_err();

    if let Some(ref path) = args.csv_out {
        let outcomes = [BatchOutcome {
            id: "1".to_string(),
            outcome,
        }];
        write_export(&outcomes, path, args.lang);
    }
    if failed {
        process::exit(1);
    }
}

fn run_batch_file(args: &Args, calculator: &BillCalculator, path: &Path) {
    let rows = read_batch_file(path).unwrap_or_else(|e| {
        eprintln!("error: cannot read batch \"{}\": {e}", path.display());
        process::exit(1);
    });
    let outcomes = run_batch(calculator, &rows);

    for o in &outcomes {
        match &o.outcome {
            Ok(bill) => println!(
                "{:<12} {:>10} kWh  total={:>14.0}  {}",
                o.id,
                bill.consumption_kwh,
                bill.total_local.round(),
                bill.category_label(args.lang)
            ),
            Err(e) => println!("{:<12} error: {}", o.id, e.message(args.lang)),
        }
    }

    if let Some(ref path) = args.csv_out {
        write_export(&outcomes, path, args.lang);
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let tariff = load_tariff(&args);
    let calculator = BillCalculator::new(tariff);

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(bill_calc::api::AppState { calculator });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(bill_calc::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
        return;
    }

    match args.batch {
        Some(ref path) => run_batch_file(&args, &calculator, path),
        None => run_single(&args, &calculator),
    }
}
