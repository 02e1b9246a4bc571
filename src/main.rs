use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use dense_ols::config::{load_config, RegressionConfig};
use dense_ols::io::{read_libsvm, read_table, TableReaderConfig};
use dense_ols::math::{Matrix, Pivoting};
use dense_ols::models::{LinearRegression, Regressor};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DENSE_OLS_LOG", "error,dense_ols=info"))
        .init();

    let matches = Command::new("dense-ols")
        .version(clap::crate_version!())
        .about("Ordinary least-squares regression on dense data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("fit")
                .about("Fit a linear regression and print its R^2 on the training data")
                .arg(
                    Arg::new("data")
                        .help("Path to the training data (LibSVM, CSV or TSV)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .help("Input format. Inferred from the file extension when omitted.")
                        .value_parser(["libsvm", "csv", "tsv"]),
                )
                .arg(
                    Arg::new("target")
                        .short('t')
                        .long("target")
                        .help("Target column for CSV/TSV input")
                        .default_value("y")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON regression configuration")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pivoting")
                        .long("pivoting")
                        .help("Row interchange rule. Overrides the configuration file.")
                        .value_parser(["adjacent-swap", "partial"]),
                )
                .arg(
                    Arg::new("no_intercept")
                        .long("no-intercept")
                        .help("Fit through the origin.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("fit", sub_m)) => run_fit(sub_m),
        _ => unreachable!("subcommand_required prevents this"),
    }
}

fn run_fit(matches: &ArgMatches) -> Result<()> {
    let data_path = matches
        .get_one::<PathBuf>("data")
        .ok_or_else(|| anyhow!("missing data path"))?;

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => load_config(path)?,
        None => RegressionConfig::default(),
    };
    if let Some(pivoting) = matches.get_one::<String>("pivoting") {
        config.pivoting = pivoting.parse::<Pivoting>().map_err(|e| anyhow!(e))?;
    }
    if matches.get_flag("no_intercept") {
        config.fit_intercept = false;
    }

    let format = match matches.get_one::<String>("format") {
        Some(format) => format.clone(),
        None => infer_format(data_path),
    };
    let (x, y) = load_data(data_path, &format, matches)?;
    info!(
        "Loaded {} samples with {} features from {}",
        x.nrows(),
        x.ncols(),
        data_path.display()
    );

    let mut model = LinearRegression::new(config);
    model
        .fit(&x, &y)
        .with_context(|| format!("Failed to fit {}", model.name()))?;
    if let Some(coefficients) = model.coefficients() {
        info!("Coefficients:\n{}", coefficients);
    }

    let r2 = model.score(&x, &y).context("Failed to score model")?;
    println!("{}", r2);
    Ok(())
}

fn infer_format(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => "csv".to_string(),
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => "tsv".to_string(),
        _ => "libsvm".to_string(),
    }
}

fn load_data(path: &Path, format: &str, matches: &ArgMatches) -> Result<(Matrix<f64>, Matrix<f64>)> {
    match format {
        "libsvm" => {
            let data = read_libsvm(path)?;
            Ok((data.features(), data.targets()))
        }
        "csv" | "tsv" => {
            let config = TableReaderConfig {
                target_column: matches
                    .get_one::<String>("target")
                    .cloned()
                    .unwrap_or_else(|| "y".to_string()),
                delimiter: if format == "tsv" { b'\t' } else { b',' },
                feature_columns: None,
            };
            let data = read_table(path, &config)?;
            Ok((data.x, data.y))
        }
        other => Err(anyhow!("Unsupported input format: {}", other)),
    }
}
