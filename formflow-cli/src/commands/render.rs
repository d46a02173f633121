//! Render the demo form as a first view would

use std::path::PathBuf;

use anyhow::Result;
use formflow::csrf::{CsrfTokens, MemorySession};
use formflow::request::SubmittedRequest;

use crate::contact::contact_form;

/// Print the unsubmitted contact form
pub struct RenderCommand {
    config: Option<PathBuf>,
}

impl RenderCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(config: Option<PathBuf>) -> Self {
        Self { config }
    }

    /// Produce the form markup
    ///
    /// # Errors
    ///
    /// Configuration loading or form definition errors.
    pub fn run(&self) -> Result<String> {
        let config = super::load_config(self.config.as_deref())?;
        let tokens = CsrfTokens::with_settings(MemorySession::default(), &config.security);
        let mut form = contact_form(&config);
        let outcome = form.process(&SubmittedRequest::get(), &tokens)?;
        Ok(outcome.html)
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn execute(&self) -> Result<()> {
        println!("{}", self.run()?);
        Ok(())
    }
}
