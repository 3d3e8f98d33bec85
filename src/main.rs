use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use opskit::config;
use opskit::monitor::{self, LiveMetrics};
use opskit::ops::cluster::{self, WorkloadKind};
use opskit::ops::image;
use opskit::ops::mirror;
use opskit::ops::runner::SystemRunner;

#[derive(Parser)]
#[command(
    name = "opskit",
    about = "Host resource reports, image build/push, and cluster image rollout"
)]
struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the contents of a target directory with a source directory
    Replace {
        source_dir: PathBuf,
        target_dir: PathBuf,
    },
    /// Build an image from a Dockerfile directory, then push it
    Build {
        dockerfile_dir: PathBuf,
        /// Image name including version tag, e.g. my-image:1.0
        image_name: String,
        /// Registry to tag for and push to
        #[arg(long)]
        registry: Option<String>,
    },
    /// Roll every workload of a kind in a namespace to a new image
    Update {
        #[arg(value_enum)]
        resource_type: WorkloadKind,
        namespace: String,
        new_image: String,
    },
    /// Write a host resource snapshot report
    Monitor {
        /// Report path (defaults to monitor.txt)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Per-process CPU sampling interval in milliseconds
        #[arg(long)]
        process_sample_ms: Option<u64>,
        /// Global CPU sampling interval in milliseconds
        #[arg(long)]
        host_cpu_sample_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => config::load_config_from_path(path),
        None => config::load_config(),
    };

    let mut runner = SystemRunner;
    match cli.command {
        Command::Replace {
            source_dir,
            target_dir,
        } => mirror::replace_directory(&source_dir, &target_dir),
        Command::Build {
            dockerfile_dir,
            image_name,
            registry,
        } => image::build_and_push(
            &mut runner,
            &config.image.engine,
            &dockerfile_dir,
            &image_name,
            registry.as_deref(),
        ),
        Command::Update {
            resource_type,
            namespace,
            new_image,
        } => cluster::update_images(
            &mut runner,
            &config.cluster.kubectl,
            resource_type,
            &namespace,
            &new_image,
        )
        .map(|_| ()),
        Command::Monitor {
            output,
            process_sample_ms,
            host_cpu_sample_ms,
        } => {
            let monitor_cfg = &config.monitor;
            let output = output.unwrap_or_else(|| monitor_cfg.output.clone());
            let host_sample = Duration::from_millis(
                host_cpu_sample_ms.unwrap_or(monitor_cfg.host_cpu_sample_ms),
            );
            let process_sample = Duration::from_millis(
                process_sample_ms.unwrap_or(monitor_cfg.process_sample_ms),
            );
            let mut source =
                LiveMetrics::new(host_sample, process_sample, &monitor_cfg.mount_point);
            monitor::run(&mut source, &output, monitor_cfg.top_processes)
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
