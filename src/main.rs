use clap::Parser;
use site_auditor::AuditConfig;
use std::process::ExitCode;

mod args;
use args::{Args, convert_command};

/// Build the run configuration from the optional file, the environment and the flags
fn load_config(args: &Args) -> site_auditor::Result<AuditConfig> {
    let mut config = match &args.config {
        Some(path) => AuditConfig::from_file(path)?,
        None => AuditConfig::default(),
    };

    config.apply_env();

    if let Some(url) = &args.url {
        config.target_url = url.clone();
    }
    if let Some(webdriver) = &args.webdriver {
        config.webdriver_url = webdriver.clone();
    }
    if args.headless {
        config.headless = true;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let task = convert_command(args.command);
    ::log::info!("Starting {:?} of {}", task, config.target_url);
    ::log::info!("Using WebDriver at {}", config.webdriver_url);

    let start_time = std::time::Instant::now();
    if let Err(e) = site_auditor::run(task, &config).await {
        ::log::error!("{:?} failed: {}", task, e);
        return ExitCode::FAILURE;
    }

    ::log::info!(
        "{:?} complete in {:.2} seconds",
        task,
        start_time.elapsed().as_secs_f64()
    );
    ExitCode::SUCCESS
}
