use crate::config::{AuditConfig, FormConfig};
use crate::error::Result;
use crate::session::{Element, Page};

/// What the filler does with a form field, decided from its class attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    /// No class: decorative, not a real field
    Skip,
    /// Click it and stop, the form is being submitted
    Submit,
    Email,
    Text,
}

impl FieldAction {
    /// Classify a field by the marker substrings in its class attribute.
    ///
    /// The submit marker wins over the email marker.
    pub fn classify(class: &str, form: &FormConfig) -> Self {
        if class.is_empty() {
            FieldAction::Skip
        } else if class.contains(&form.submit_marker) {
            FieldAction::Submit
        } else if class.contains(&form.email_marker) {
            FieldAction::Email
        } else {
            FieldAction::Text
        }
    }
}

/// Outcome of a form fill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormReport {
    pub filled: usize,
    pub skipped: usize,
    pub submitted: bool,
}

/// Fills the contact form on the current page with placeholder values and submits it.
///
/// Whether the page accepted the input is not checked.
pub async fn fill_form<P: Page>(page: &P, config: &AuditConfig) -> Result<FormReport> {
    let form = &config.form;
    let fields = page.find_all(&form.field_selector()).await?;
    let mut report = FormReport::default();

    ::log::info!(
        "Filling {} fields in {}",
        fields.len(),
        form.container_selector
    );

    for field in fields {
        let class = field.attr("class").await?.unwrap_or_default();

        match FieldAction::classify(&class, form) {
            FieldAction::Skip => {
                report.skipped += 1;
            }
            FieldAction::Submit => {
                ::log::info!("Submitting form");
                field.click().await?;
                page.wait_until_ready(config.navigation_timeout()).await?;
                report.submitted = true;
                break;
            }
            FieldAction::Email => {
                field.focus().await?;
                field.type_text(&form.placeholder_email).await?;
                report.filled += 1;
            }
            FieldAction::Text => {
                field.focus().await?;
                field.type_text(&form.placeholder_text).await?;
                report.filled += 1;
                tokio::time::sleep(form.field_pause()).await;
            }
        }
    }

    ::log::info!(
        "Form pass complete - {} filled, {} skipped, submitted: {}",
        report.filled,
        report.skipped,
        report.submitted
    );

    Ok(report)
}
