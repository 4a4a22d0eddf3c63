use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use subclash::pipeline::{run_generate, run_parse};
use subclash::Settings;

/// Convert a proxy subscription into Clash configuration files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory for nodes.json and the generated configs
    #[arg(short, long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and decode the subscription into nodes.json
    Parse {
        /// Subscription URL, overrides SUBSCRIPTION_URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Read the subscription body from a local file instead of fetching it
        #[arg(long, value_name = "FILE", conflicts_with = "url")]
        input: Option<PathBuf>,
    },
    /// Generate clash.yaml, clash_meta.yaml and subscription.txt from nodes.json
    Generate {
        /// Nodes file to read instead of <output-dir>/nodes.json
        #[arg(long, value_name = "FILE")]
        nodes: Option<PathBuf>,

        /// Clash template to merge nodes into
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
    },
    /// Run parse and generate in one go
    Convert {
        /// Subscription URL, overrides SUBSCRIPTION_URL
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
}

fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    if let Some(output_dir) = args.output_dir {
        settings.output_dir = output_dir;
    }

    match args.command {
        Command::Parse { url, input } => {
            settings.override_subscription_url(url);
            let nodes = run_parse(&settings, input.as_deref()).context("parse failed")?;
            info!("Parsed {} nodes", nodes.len());
        }
        Command::Generate { nodes, template } => {
            run_generate(&settings, nodes.as_deref(), template.as_deref())
                .context("generate failed")?;
        }
        Command::Convert { url } => {
            settings.override_subscription_url(url);
            run_parse(&settings, None).context("parse failed")?;
            run_generate(&settings, None, None).context("generate failed")?;
        }
    }
    Ok(())
}

fn main() {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if let Err(e) = run(Args::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
