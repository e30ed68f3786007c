//! Drive a scan session end to end with a scripted camera.
//!
//! ```bash
//! scan-sim --mode qr "(01)04012345678901(17)20250131(10)AB12"
//! RUST_LOG=debug scan-sim --deny
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use scan_bridge_core::{CameraPermission, ScanResult, Symbology};
use scan_bridge_host::{
    HostConfig, HostError, NavigationRequest, RecordingWebHost, ScanCoordinator, SimulatedPlatform,
};

/// Simulate a scan action, feed codes through the camera, then dismiss.
#[derive(Debug, Parser)]
#[command(name = "scan-sim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Mode token placed in the action URL (qr, bar, or empty for both)
    #[arg(short, long, default_value = "")]
    mode: String,

    /// Report the camera permission as denied
    #[arg(long)]
    deny: bool,

    /// Fail to open the capture device
    #[arg(long)]
    no_device: bool,

    /// Symbology the codes are reported as (EAN-13 is accepted in every mode)
    #[arg(short, long, value_enum, default_value_t = SymbologyArg::Ean13)]
    symbology: SymbologyArg,

    /// Host configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raw codes delivered as consecutive frame ticks
    codes: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SymbologyArg {
    Ean13,
    Qr,
    DataMatrix,
}

impl From<SymbologyArg> for Symbology {
    fn from(arg: SymbologyArg) -> Self {
        match arg {
            SymbologyArg::Ean13 => Symbology::Ean13,
            SymbologyArg::Qr => Symbology::Qr,
            SymbologyArg::DataMatrix => Symbology::DataMatrix,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), HostError> {
    let config = match &cli.config {
        Some(path) => HostConfig::load(path)?,
        None => HostConfig::default(),
    };

    let permission = if cli.deny {
        CameraPermission::Denied
    } else {
        CameraPermission::Allowed
    };
    let mut platform = SimulatedPlatform::new(permission);
    platform.fail_open(cli.no_device);
    let feed = platform.feed();

    let url = format!(
        "{}://scan?{}={}",
        config.action_scheme, config.action_query_key, cli.mode
    );
    let mut coordinator = ScanCoordinator::new(platform, RecordingWebHost::default(), config)?;
    coordinator.set_preview_sink(Arc::new(|code: &str| println!("preview: {}", code)));

    let policy = coordinator.decide_policy(&NavigationRequest::link(url.as_str()));
    log::debug!("{} -> {:?}", url, policy);

    for code in &cli.codes {
        feed.queue_code(cli.symbology.into(), code);
    }
    let delivered = feed.pump();
    if delivered < cli.codes.len() {
        log::warn!(
            "{} codes were not delivered (symbology not accepted in this mode, or capture ended)",
            cli.codes.len() - delivered
        );
    }
    coordinator.dismiss();

    let web = coordinator.web();
    let web = web.lock();
    for script in &web.scripts {
        println!("script: {}", script);
    }
    for (title, message) in &web.alerts {
        println!("alert: {} - {}", title, message);
    }
    match coordinator.last_result() {
        Some(ScanResult::CaptureFailed(e)) => println!("capture failed: {}", e),
        Some(ScanResult::NoCode) => println!("no code"),
        _ => {}
    }
    Ok(())
}
