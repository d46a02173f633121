//! Form definition, validation and processing
//!
//! Forms are built with factory functions and chained setters, then driven
//! by [`Form::process`]:
//! - Anti-CSRF token issued on first view and checked on submission
//! - Every element validated on each submission, all errors collected
//! - Re-render with submitted values and errors, or a success handler
//!
//! # Quick Start
//!
//! ```rust
//! use formflow::csrf::{CsrfTokens, MemorySession};
//! use formflow::forms::{form, input, submit, ElementBuilder, FormState};
//! use formflow::request::SubmittedRequest;
//!
//! let tokens = CsrfTokens::new(MemorySession::default());
//! let mut contact = form("Contact", "/contact")
//!     .add(input("Name").required())
//!     .add(submit("Send"))
//!     .on_success(|f| format!("OK:{}", f.value_of("Name").unwrap_or_default()));
//!
//! // First view
//! let page = contact.process(&SubmittedRequest::get(), &tokens).unwrap();
//! assert_eq!(page.state, FormState::Unsubmitted);
//! assert!(page.html.contains(r#"name="_form_token""#));
//!
//! // Submission
//! let id = contact.form_id().unwrap().to_owned();
//! let token = contact.form_token().unwrap().to_owned();
//! let request = SubmittedRequest::post([
//!     ("name", "Ben"),
//!     ("_form_id", id.as_str()),
//!     ("_form_token", token.as_str()),
//! ]);
//! let done = contact.process(&request, &tokens).unwrap();
//! assert_eq!(done.html, "OK:Ben");
//! ```
//!
//! # Sets
//!
//! Radio, checkbox and select sets take a [`Members`] list:
//!
//! ```rust
//! use formflow::forms::{checkboxes, radios, ElementBuilder, Members};
//!
//! let happy = radios("Are you happy?", Members::from_labels(["Yes", "No"])).required();
//! let options = checkboxes("Options", Members::from_pairs([("spam_me", "Spam me"), ("extra", "Extras")]))
//!     .value(["spam_me"]);
//! assert_eq!(options.core().name(), "options[]");
//! # let _ = happy;
//! ```

mod builder;
mod element;
mod element_set;
mod error;
mod field;
mod fingerprint;
mod form;
mod members;
mod named_set;
mod simplify;
mod validation;

pub use builder::{
    button, checkboxes, date, email, fieldset, form, hidden, input, integer, multi_select, number,
    password, radios, reset, search, select, submit, tel, textarea, url, yes_no,
};
pub use element::{Datalist, ElementBuilder, ElementCore, FormElement, Node};
pub use element_set::{ElementSet, SetKind};
pub use error::{FieldError, ValidationErrors, FORM_ERRORS_KEY};
pub use field::{ButtonType, ElementKind, FieldValue, FormatCheck, InputType};
pub use fingerprint::fingerprint;
pub use form::{Form, FormState, Outcome, SuccessHandler, FORM_ID_FIELD, FORM_TOKEN_FIELD};
pub use members::{Member, MemberKey, Members};
pub(crate) use members::select_key;
pub use named_set::{NamedSet, Value};
pub use simplify::simplify;
pub use validation::{
    check_format, parse_bool, ElementValidator, FormValidator, Pattern, Rules, Validation, Whitelist,
};
