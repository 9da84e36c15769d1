use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use sauce_report::report::{self, html::RenderOptions};
use sauce_report::utils::config::Config;
use sauce_report::{ReportStore, SessionSigner, TestRecord};

#[derive(Parser)]
#[command(name = "sauce-report")]
#[command(version)]
#[command(about = "HTML summary reports for end-to-end mobile test runs", long_about = None)]
struct Cli {
    /// Report directory holding one JSON file per test
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sauce Labs username
    #[arg(long, global = true, env = "SAUCE_USERNAME")]
    username: Option<String>,

    /// Sauce Labs access key
    #[arg(long, global = true, env = "SAUCE_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete all records from a previous run
    Reset,

    /// Save the outcome of one test
    Record {
        /// Test name, also the record's file name
        #[arg(short, long)]
        name: String,

        /// Test step, in order. Can be specified multiple times.
        #[arg(short, long)]
        step: Vec<String>,

        /// Sauce Labs job id. Can be specified multiple times.
        #[arg(short, long)]
        job: Vec<String>,

        /// Failure message; omit for a passed test
        #[arg(short, long)]
        error: Option<String>,
    },

    /// Build a report from the recorded tests
    Build {
        /// Output format (html, page, json, junit)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Interpolate test text into HTML without escaping
        #[arg(long, default_value = "false")]
        raw_html: bool,
    },

    /// Print pass/fail counts
    Summary,

    /// Print the signed session URL of a job
    Sign {
        job_id: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let store = ReportStore::new(cli.dir.clone().unwrap_or_else(|| config.report_dir.clone()));
    let username = cli.username.clone().or_else(|| config.sauce_username.clone());
    let access_key = cli.access_key.clone().or_else(|| config.sauce_access_key.clone());

    match cli.command {
        Commands::Reset => {
            store.reset()?;
            println!(
                "{} Cleared report dir: {}",
                "✓".green().bold(),
                store.dir().display()
            );
        }

        Commands::Record {
            name,
            step,
            job,
            error,
        } => {
            let record = TestRecord {
                name,
                steps: step,
                jobs: job,
                error,
            };
            let path = store.save(&record)?;
            let outcome = if record.is_passed() {
                "passed".green()
            } else {
                "failed".red()
            };
            println!(
                "{} Saved {} ({}) to {}",
                "✓".green().bold(),
                record.name.cyan(),
                outcome,
                path.display()
            );
        }

        Commands::Build {
            format,
            output,
            raw_html,
        } => {
            let signer = match (username, access_key) {
                (Some(user), Some(key)) => SessionSigner::new(&user, &key),
                _ => {
                    log::warn!("Sauce Labs credentials not set; session links will not authenticate");
                    SessionSigner::new("", "")
                }
            };
            let options = RenderOptions {
                escape_html: config.escape_html && !raw_html,
            };

            let written =
                report::generate_report(&store, &signer, &format, options, output.as_deref())?;
            if !written {
                println!(
                    "{} No tests recorded in {}, no report generated",
                    "⚠".yellow(),
                    store.dir().display()
                );
            }
        }

        Commands::Summary => {
            let records = store.load_all()?;
            match sauce_report::summary(&records) {
                Some(summary) => {
                    println!("  Total:   {}", summary.total.to_string().cyan());
                    println!("  Passed:  {}", summary.passed.to_string().green());
                    println!("  Failed:  {}", summary.failed.to_string().red());
                    println!("  Rate:    {}%", summary.pass_percentage.to_string().bold());
                    for record in sauce_report::failed(&records) {
                        println!(
                            "  {} {}: {}",
                            "✗".red(),
                            record.name,
                            record.error.as_deref().unwrap_or_default()
                        );
                    }
                }
                None => println!("{} No tests recorded", "⚠".yellow()),
            }
        }

        Commands::Sign { job_id } => {
            let (Some(user), Some(key)) = (username, access_key) else {
                anyhow::bail!("Sauce Labs credentials required (--username/--access-key or SAUCE_USERNAME/SAUCE_ACCESS_KEY)");
            };
            println!("{}", SessionSigner::new(&user, &key).sign(&job_id)?);
        }
    }

    Ok(())
}
