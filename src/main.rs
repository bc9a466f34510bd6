//! # Recibo CLI
//!
//! Command-line interface for the receipt printer bridge.
//!
//! ## Usage
//!
//! ```bash
//! # Run the bridge: ingestion server + print worker
//! recibo serve --listen 127.0.0.1:9100 --device /dev/usb/lp0
//!
//! # Render a job file straight to the device
//! recibo print job.json --device /dev/usb/lp0
//!
//! # Inspect what a job would send, without a printer
//! recibo print job.json --hex
//! ```
//!
//! Flags override the corresponding `RECIBO_*` environment variables.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use recibo::{
    interp,
    job::wire,
    protocol::codegen,
    server,
    sink::{DeviceSink, FileSink},
    Bridge, BridgeConfig, BridgeError,
};

/// Recibo - receipt printer bridge
#[derive(Parser, Debug)]
#[command(name = "recibo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the ingestion server and print worker
    Serve {
        /// Listen address for the ingestion API
        #[arg(long)]
        listen: Option<String>,

        /// Printer device path
        #[arg(long)]
        device: Option<String>,
    },

    /// Render one job file and send it to the device
    Print {
        /// Path to a wire-format job JSON file
        job: PathBuf,

        /// Printer device path
        #[arg(long)]
        device: Option<String>,

        /// Dump encoded bytes as hex instead of printing
        #[arg(long)]
        hex: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), BridgeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, device } => {
            let mut config = BridgeConfig::from_env()?;
            if let Some(listen) = listen {
                config.listen_addr = listen;
            }
            if let Some(device) = device {
                config.device_path = device;
            }
            serve(config)
        }
        Commands::Print { job, device, hex } => {
            let config = BridgeConfig::from_env()?;
            let device = device.unwrap_or(config.device_path.clone());
            print_one(&config, &job, &device, hex)
        }
    }
}

fn serve(config: BridgeConfig) -> Result<(), BridgeError> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let sink = FileSink::open(&config.device_path)?;
        let (bridge, mut events) = Bridge::start(sink, &config);

        info!(
            printer_id = %config.printer_id,
            device = %config.device_path,
            "bridge started"
        );

        // The broker transport consumes these in production; standalone
        // runs just log them.
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                info!(
                    job_ref = %event.job_ref,
                    status = ?event.status,
                    message = %event.message,
                    "job event"
                );
            }
        });

        server::serve(bridge, &config.listen_addr).await
    })
}

fn print_one(
    config: &BridgeConfig,
    job_path: &PathBuf,
    device: &str,
    hex: bool,
) -> Result<(), BridgeError> {
    let payload = std::fs::read(job_path)?;
    let job = wire::parse_job(&payload)?;
    let rendered = interp::render(&job, &config.interp_options());

    if let Some(e) = rendered.error {
        return Err(e);
    }

    if hex {
        let bytes = codegen::encode(&rendered.ops);
        for row in bytes.chunks(16) {
            let hex: Vec<String> = row.iter().map(|b| format!("{b:02x}")).collect();
            println!("{}", hex.join(" "));
        }
        return Ok(());
    }

    let mut sink = FileSink::open(device)?;
    for op in &rendered.ops {
        sink.submit(op)?;
    }
    sink.flush()?;
    println!("Printed {} operations to {device}", rendered.ops.len());
    Ok(())
}
