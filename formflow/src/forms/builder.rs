//! Factory functions for elements, sets and forms
//!
//! Each factory takes the human label and derives name and id from it with
//! [`simplify`](super::simplify).
//!
//! # Examples
//!
//! ```rust
//! use formflow::forms::{email, fieldset, form, input, submit, textarea, ElementBuilder};
//!
//! let contact = form("Contact", "/contact")
//!     .add("<h3>Contact us</h3>")
//!     .add(
//!         fieldset("About you")
//!             .add(input("Name").required())
//!             .add(email("Email").required()),
//!     )
//!     .add(textarea("Message").required())
//!     .add(submit("Send"));
//!
//! assert_eq!(contact.id(), "form-contact");
//! ```

use super::element::{ElementBuilder, FormElement};
use super::element_set::{ElementSet, SetKind};
use super::field::{ButtonType, ElementKind, InputType};
use super::form::Form;
use super::members::Members;
use super::simplify::simplify;

fn typed(label: &str, input_type: InputType) -> FormElement {
    FormElement::new(label, ElementKind::Input(input_type))
}

/// Text input
#[must_use]
pub fn input(label: &str) -> FormElement {
    typed(label, InputType::Text)
}

/// Search input
#[must_use]
pub fn search(label: &str) -> FormElement {
    typed(label, InputType::Search)
}

/// Telephone input
#[must_use]
pub fn tel(label: &str) -> FormElement {
    typed(label, InputType::Tel)
}

/// Email input, checked as an email address
#[must_use]
pub fn email(label: &str) -> FormElement {
    typed(label, InputType::Email)
}

/// URL input, checked as an absolute URL
#[must_use]
pub fn url(label: &str) -> FormElement {
    typed(label, InputType::Url)
}

/// Date input, checked as `YYYY-MM-DD`
#[must_use]
pub fn date(label: &str) -> FormElement {
    typed(label, InputType::Date)
}

/// Number input, checked as a float
#[must_use]
pub fn number(label: &str) -> FormElement {
    typed(label, InputType::Number)
}

/// Whole-number input
#[must_use]
pub fn integer(label: &str) -> FormElement {
    typed(label, InputType::Integer)
}

/// Yes/no text input
#[must_use]
pub fn yes_no(label: &str) -> FormElement {
    typed(label, InputType::Boolean)
}

/// Password input
#[must_use]
pub fn password(label: &str) -> FormElement {
    typed(label, InputType::Password)
}

/// Hidden input with a fixed value; never labelled
#[must_use]
pub fn hidden(name: &str, value: &str) -> FormElement {
    typed(name, InputType::Hidden).value(value).no_label()
}

/// Textarea, limited to 2000 characters unless changed
#[must_use]
pub fn textarea(label: &str) -> FormElement {
    FormElement::new(label, ElementKind::TextArea).maxlength(2000)
}

fn button_of(label: &str, button_type: ButtonType) -> FormElement {
    let value = simplify(label);
    FormElement::new(label, ElementKind::Button(button_type))
        .attr("value", value)
        .no_label()
}

/// Plain button
#[must_use]
pub fn button(label: &str) -> FormElement {
    button_of(label, ButtonType::Button)
}

/// Submit button
#[must_use]
pub fn submit(label: &str) -> FormElement {
    button_of(label, ButtonType::Submit)
}

/// Reset button
#[must_use]
pub fn reset(label: &str) -> FormElement {
    button_of(label, ButtonType::Reset)
}

/// Titled group of elements
#[must_use]
pub fn fieldset(label: &str) -> ElementSet {
    ElementSet::fieldset(label)
}

/// Radio set; needs two or more members
#[must_use]
pub fn radios(label: &str, members: Members) -> ElementSet {
    ElementSet::with_members(label, SetKind::Radios, members)
}

/// Checkbox set, submitted as `name[]`
#[must_use]
pub fn checkboxes(label: &str, members: Members) -> ElementSet {
    ElementSet::with_members(label, SetKind::Checkboxes, members)
}

/// Single select
#[must_use]
pub fn select(label: &str, members: Members) -> ElementSet {
    ElementSet::with_members(label, SetKind::Select { multiple: false }, members)
}

/// Multiple select, submitted as `name[]`
#[must_use]
pub fn multi_select(label: &str, members: Members) -> ElementSet {
    ElementSet::with_members(label, SetKind::Select { multiple: true }, members)
}

/// Form posting to `action`
#[must_use]
pub fn form(name: &str, action: &str) -> Form {
    Form::new(name, action)
}
