#![forbid(unsafe_code)]

mod adaptor;
mod backend;
mod cli;
mod command;
mod config;
mod constants;
mod property;
mod property_map;
mod types;
mod x11_utils;

use anyhow::Result;
use clap::Parser;
use std::collections::BTreeMap;
use std::process::ExitCode;
use tracing::{info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use adaptor::{PropertyAdaptor, XinputAdaptor, XsetwacomAdaptor};
use backend::TabletBackend;
use cli::{BackendKind, Cli, Command, Target};
use command::xsetwacom_runner;
use config::Config;
use x11_utils::X11Input;

fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // LOG_LEVEL wins over the config file; --verbose wins over both
    let level_name = std::env::var("LOG_LEVEL")
        .ok()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| constants::config::DEFAULT_LOG_LEVEL.to_string());

    let log_level = if cli.verbose {
        TraceLevel::DEBUG
    } else {
        match level_name.to_lowercase().as_str() {
            "trace" => TraceLevel::TRACE,
            "debug" => TraceLevel::DEBUG,
            "warn" => TraceLevel::WARN,
            "error" => TraceLevel::ERROR,
            _ => TraceLevel::INFO,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn xsetwacom_adaptor(device: &str, cli: &Cli, config: &Config) -> Box<dyn PropertyAdaptor> {
    let timeout = config.command_timeout(cli.timeout_ms);
    let runner = xsetwacom_runner(config.xsetwacom_path.as_deref(), timeout);

    Box::new(
        XsetwacomAdaptor::with_button_map(device, config.button_map(device), runner)
            .check_exit_status(config.check_exit_status),
    )
}

fn xinput_adaptor(device: &str, x11: &X11Input) -> Box<dyn PropertyAdaptor> {
    Box::new(XinputAdaptor::new(device, x11, x11.clone()))
}

/// Construct the adaptor for `target`; backends are fixed for the process lifetime
fn build_adaptor(target: &Target, cli: &Cli, config: &Config) -> Result<Box<dyn PropertyAdaptor>> {
    let device = target.device.as_str();
    match target.backend {
        BackendKind::Xsetwacom => Ok(xsetwacom_adaptor(device, cli, config)),
        BackendKind::Xinput => {
            let x11 = X11Input::connect()?;
            Ok(xinput_adaptor(device, &x11))
        }
        BackendKind::Auto => {
            let mut backend = TabletBackend::new(device);
            match X11Input::connect() {
                Ok(x11) => backend.add_adaptor(xinput_adaptor(device, &x11)),
                Err(e) => warn!(error = %format!("{e:#}"), "XInput unavailable, continuing with xsetwacom only"),
            }
            backend.add_adaptor(xsetwacom_adaptor(device, cli, config));
            Ok(Box::new(backend))
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &cli.command {
        Command::Devices => {
            let x11 = X11Input::connect()?;
            for name in x11.device_names()? {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::List { target } => {
            let adaptor = build_adaptor(target, cli, config)?;
            for property in adaptor.properties() {
                println!("{property}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Get { target, property } => {
            let adaptor = build_adaptor(target, cli, config)?;
            match adaptor.try_get_property(*property) {
                Ok(value) => {
                    println!("{value}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    eprintln!("{err}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Set { target, property, value } => {
            let adaptor = build_adaptor(target, cli, config)?;
            if adaptor.set_property(*property, value) {
                info!(device = %target.device, property = %property, value = %value, "Property applied");
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("Failed to set {property} on '{}'", target.device);
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Dump { target } => {
            let adaptor = build_adaptor(target, cli, config)?;
            let values: BTreeMap<String, String> = adaptor
                .properties()
                .into_iter()
                .map(|property| (property.key().to_string(), adaptor.get_property(property)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&cli, &config)?;

    run(&cli, &config)
}
