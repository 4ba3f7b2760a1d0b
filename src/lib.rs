pub mod audit;
pub mod config;
pub mod error;
pub mod filter;
pub mod html;
pub mod links;
pub mod session;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AuditConfig;
pub use error::{AuditError, Result};
pub use links::LinkSet;
pub use session::{Page, WebDriverSession};

/// The runs the tool can perform against a site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Collect and persist the target page's links
    Harvest,
    /// Screenshot every link in an existing links file
    Walk,
    /// Harvest, then walk
    Audit,
    /// Click through the navigation menu, then submit the contact form
    Tour,
}

/// Open a browser session, perform `task` and close the session again.
///
/// The session is closed on every exit path, including failures of the task.
pub async fn run(task: Task, config: &AuditConfig) -> Result<()> {
    config.validate()?;

    let session = WebDriverSession::connect(config).await?;
    let result = run_on(&session, task, config).await;
    session.finish(result).await
}

/// Perform `task` on an already open page
pub async fn run_on<P: Page>(page: &P, task: Task, config: &AuditConfig) -> Result<()> {
    match task {
        Task::Harvest => {
            audit::harvest(page, config).await?;
        }
        Task::Walk => {
            audit::walk_saved(page, config).await?;
        }
        Task::Audit => {
            audit::audit(page, config).await?;
        }
        Task::Tour => {
            audit::tour(page, config).await?;
        }
    }
    Ok(())
}
