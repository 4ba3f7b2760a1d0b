use clap::{Parser, Subcommand};
use site_auditor::Task;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-auditor")]
#[command(about = "Harvests, screenshots and clicks through a website in a real browser")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (defaults are used for anything it omits)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Site to audit, overriding the configuration
    #[arg(short, long)]
    pub url: Option<String>,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// WebDriver server URL, overriding the configuration and WEBDRIVER_URL
    #[arg(long)]
    pub webdriver: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Save every link on the target page to the links file
    Harvest,
    /// Screenshot each link from the links file
    Walk,
    /// Harvest, then walk
    Audit,
    /// Click through the navigation menu, then submit the contact form
    Tour,
}

/// Convert from the CLI subcommand to the library task
pub fn convert_command(command: Command) -> Task {
    match command {
        Command::Harvest => Task::Harvest,
        Command::Walk => Task::Walk,
        Command::Audit => Task::Audit,
        Command::Tour => Task::Tour,
    }
}
