mod acquisition;
mod app;
mod buffer;
mod config;
mod display;
mod logger;
mod parser;
mod plotter;
mod recorder;
mod serial;
mod session;
mod types;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use eframe::egui;
use log::{error, info};

use app::GSensorApp;
use config::{AppConfig, ConfigManager};
use serial::{list_ports, SerialLink};
use session::Session;

#[derive(Parser, Debug)]
#[command(version, about = "gSENSOR Serial Plotter - Real-time accelerometer visualization")]
struct Cli {
    /// Serial port (default: platform specific, e.g. /dev/ttyACM0)
    #[arg(short = 'p', long, env = "GSENSOR_PORT")]
    port: Option<String>,

    /// Baud rate (default: 115200)
    #[arg(short = 'b', long, env = "GSENSOR_BAUD")]
    baud: Option<u32>,

    /// List available serial ports and exit
    #[arg(short = 'l', long)]
    list: bool,

    /// Close the window after this many seconds (default: indefinite)
    #[arg(short = 'd', long, value_parser = parse_duration)]
    duration: Option<Duration>,

    /// Configuration file (default: ./gsensor.toml if present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|e| format!("invalid duration '{}': {}", value, e))?;
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("invalid duration '{}': {}", value, e))
}

fn print_ports() -> ExitCode {
    match list_ports() {
        Ok(ports) if ports.is_empty() => {
            println!("No serial ports found");
            ExitCode::SUCCESS
        }
        Ok(ports) => {
            println!("Available serial ports:");
            for port in ports {
                println!("  {}: {}", port.device, port.description);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// 配置文件 < 环境变量/命令行
fn load_config(cli: &Cli) -> Result<ConfigManager, config::ConfigError> {
    let mut manager = ConfigManager::discover(cli.config.as_deref())?;
    if let Some(path) = manager.config_path() {
        info!("Loaded configuration from {}", path.display());
    }

    let config = manager.get_config_mut();
    if let Some(port) = &cli.port {
        config.serial.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.serial.baud = baud;
    }
    config.validate()?;
    Ok(manager)
}

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        vsync: config.window.vsync,
        hardware_acceleration: if config.window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(config.window.resizable),
        ..Default::default()
    }
}

fn main() -> ExitCode {
    dotenv().ok(); // 加载 .env 文件
    logger::init_logger();

    let cli = Cli::parse();
    if cli.list {
        return print_ports();
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let settings = config.get_config().clone();

    info!("gSENSOR Serial Plotter");
    info!("Port: {}", settings.serial.port);
    info!("Baud: {}", settings.serial.baud);
    info!("Recording rate: {}", settings.recording_rate());

    let mut link = match SerialLink::open(&settings.serial) {
        Ok(link) => link,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(settings.buffer.capacity);
    if let Err(e) = acquisition::verify_stream(
        &mut link,
        &mut session,
        settings.serial.verify_attempts,
        Duration::from_millis(settings.serial.verify_interval_ms),
    ) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let options = native_options(&settings);
    let app = GSensorApp::new(config, session, Some(Box::new(link)), cli.duration);

    if let Err(e) = eframe::run_native(
        &settings.window.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    ) {
        error!("GUI failed: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Stopped by user");
    ExitCode::SUCCESS
}
