//! formflow: fluent HTML forms with validation and CSRF protection
//!
//! A form is declared once as a tree of elements. The same definition then
//! renders the blank form, checks a submission, re-renders it with the
//! submitted values and error messages, or hands the accepted values to a
//! success handler.
//!
//! # Quick Start
//!
//! ```rust
//! use formflow::prelude::*;
//!
//! let tokens = CsrfTokens::new(MemorySession::default());
//! let mut contact = form("Contact", "/contact")
//!     .add(input("Name").required())
//!     .add(email("Email"))
//!     .add(radios("Are you happy?", Members::from_labels(["Yes", "No"])))
//!     .add(submit("Send"))
//!     .on_success(|f| format!("Thanks, {}", f.value_of("Name").unwrap_or_default()));
//!
//! let page = contact.process(&SubmittedRequest::get(), &tokens).unwrap();
//! assert_eq!(page.state, FormState::Unsubmitted);
//! assert!(page.html.contains(r#"<form action="/contact" method="post" id="form-contact">"#));
//! ```
//!
//! # Modules
//!
//! - [`forms`]: element tree, factories, validation and the request lifecycle
//! - [`render`]: the [`Renderer`](render::Renderer) trait and the built-in HTML renderer
//! - [`csrf`]: per-form tokens kept in a caller-supplied session
//! - [`request`]: the submitted-data abstraction a form reads from
//! - [`config`]: layered configuration (defaults, TOML, environment)
//! - [`observability`]: tracing subscriber setup for binaries

// Lint configuration is handled at the workspace level in Cargo.toml

pub mod config;
pub mod csrf;
pub mod error;
pub mod forms;
pub mod observability;
pub mod render;
pub mod request;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use formflow::prelude::*;
    //! ```

    pub use crate::config::FormsConfig;
    pub use crate::csrf::{CsrfTokens, MemorySession, Session, TokenStore};
    pub use crate::error::FormError;
    pub use crate::forms::{
        button, checkboxes, date, email, fieldset, form, hidden, input, integer, multi_select,
        number, password, radios, reset, search, select, submit, tel, textarea, url, yes_no,
        ElementBuilder, Form, FormState, Members, Outcome, Validation,
    };
    pub use crate::render::{BasicHtmlRenderer, Renderer, Target};
    pub use crate::request::{Method, RequestSource, SubmittedRequest};
}
