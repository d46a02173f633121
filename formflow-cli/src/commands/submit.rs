//! Simulate a submission of the demo form

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use formflow::csrf::{CsrfTokens, MemorySession};
use formflow::forms::{FormState, Outcome, FORM_ID_FIELD, FORM_TOKEN_FIELD};
use formflow::request::SubmittedRequest;

use crate::contact::contact_form;

/// Render the contact form once, then submit `fields` with the issued id and token
pub struct SubmitCommand {
    fields: Vec<(String, String)>,
    config: Option<PathBuf>,
}

impl SubmitCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(fields: Vec<(String, String)>, config: Option<PathBuf>) -> Self {
        Self { fields, config }
    }

    /// Run the two requests and return the second outcome
    ///
    /// Explicit `_form_id` or `_form_token` fields replace the issued ones,
    /// which makes it easy to try the mismatch paths.
    ///
    /// # Errors
    ///
    /// Configuration loading or form definition errors.
    pub fn run(&self) -> Result<Outcome> {
        let config = super::load_config(self.config.as_deref())?;
        let tokens = CsrfTokens::with_settings(MemorySession::default(), &config.security);
        let mut form = contact_form(&config);
        form.process(&SubmittedRequest::get(), &tokens)?;

        let mut pairs = self.fields.clone();
        for (name, issued) in [(FORM_ID_FIELD, form.form_id()), (FORM_TOKEN_FIELD, form.form_token())] {
            if !pairs.iter().any(|(k, _)| k == name) {
                let issued = issued.context("form was not rendered")?;
                pairs.push((name.to_owned(), issued.to_owned()));
            }
        }

        tracing::debug!(fields = pairs.len(), "submitting demo form");
        Ok(form.process(&SubmittedRequest::post(pairs), &tokens)?)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn execute(&self) -> Result<()> {
        let outcome = self.run()?;
        let status = match outcome.state {
            FormState::Valid => style("Accepted").green().bold(),
            FormState::Invalid => style("Rejected").yellow().bold(),
            FormState::TokenInvalid => style("Refused").red().bold(),
            FormState::Unsubmitted => style("Not submitted").dim(),
        };
        eprintln!("{status}");
        println!("{}", outcome.html);
        Ok(())
    }
}
