use anyhow::Result;
use chrono::{Local, Utc};
use clap::Parser;
use colored::Colorize;
use std::process;

use workspace_metrics::collector::window_ending;
use workspace_metrics::export::{export_file, export_filename, ExportFormat};
use workspace_metrics::models::Aggregation;
use workspace_metrics::{config, logging, prompt, MetricsCollector};

#[derive(Parser)]
#[command(name = "workspace-metrics")]
#[command(about = "Export Webex workspace sensor and utilization metrics to XLSX, CSV, or JSON")]
#[command(version)]
struct Cli {
    /// Webex API access token; prompted for interactively when absent
    #[arg(long, env = "WEBEX_ACCESS_TOKEN")]
    token: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging();
    let config = config::get_config();

    // Validate the credential up front; everything after this is read-only
    // API traffic with the same token.
    let client = prompt::acquire_client(&config.api.base_url, cli.token)?;

    let location_name = prompt::prompt_line("\nEnter the location name: ")?;

    let aggregation_choice = prompt::prompt_line(
        "\nChoose aggregation:\n \
         1. hourly (the maximum time span is 48 hours)\n \
         2. daily (the maximum time span is 30 days)\n\
         Enter your choice: ",
    )?;
    let aggregation = match aggregation_choice.as_str() {
        "1" => Aggregation::Hourly,
        "2" => Aggregation::Daily,
        _ => {
            eprintln!(
                "{}",
                "Invalid aggregation choice. Please choose 1 for hourly or 2 for daily.".red()
            );
            process::exit(1);
        }
    };

    let format_choice = prompt::prompt_line(
        "\nChoose export format:\n \
         1. XLSX\n \
         2. CSV\n \
         3. JSON\n\
         Enter your choice: ",
    )?;
    let format = match format_choice.to_lowercase().as_str() {
        "1" => ExportFormat::Xlsx,
        "2" => ExportFormat::Csv,
        "3" => ExportFormat::Json,
        _ => {
            eprintln!(
                "{}",
                "Invalid export format choice. Please choose 1 for XLSX, 2 for CSV, or 3 for JSON."
                    .red()
            );
            process::exit(1);
        }
    };
    println!();

    // The window is fixed once here and reused for every fetch in the run.
    let (from, to) = window_ending(aggregation, Utc::now());

    let Some(location_id) = client.resolve_location(&location_name) else {
        eprintln!(
            "{}",
            format!("Unable to resolve location \"{location_name}\".").red()
        );
        return Ok(());
    };

    let collector = MetricsCollector::new(client, aggregation, from, to);
    let rows = collector.collect(&location_id);

    let filename = export_filename(Local::now().naive_local(), &location_name, aggregation, format);
    let path = config.paths.output_directory.join(filename);
    export_file(&rows, format, &path)?;
    println!("{}", format!("Data saved to {}", path.display()).green());

    Ok(())
}
