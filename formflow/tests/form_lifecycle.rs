//! Integration tests for the form request lifecycle
//!
//! Drives complete forms through first view, submission, rejection and
//! acceptance with an in-memory session.

use formflow::config::{FormsConfig, MessageSettings};
use formflow::csrf::{CsrfTokens, MemorySession, TokenStore};
use formflow::forms::{
    checkboxes, fieldset, form, input, integer, submit, textarea, ElementBuilder, FieldValue,
    Form, FormState, Members, Outcome,
};
use formflow::request::{Method, SubmittedRequest};

/// Helper to create a token store
fn store() -> CsrfTokens<MemorySession> {
    CsrfTokens::new(MemorySession::default())
}

/// Helper to build the contact form used by most tests
fn contact() -> Form {
    form("Contact", "/contact")
        .add(input("Name").required())
        .add(textarea("Message"))
        .add(submit("Send"))
        .on_success(|f| format!("OK:{}", f.value_of("Name").unwrap_or_default()))
}

/// Submit `fields` together with the form's current id and token
fn submit_fields(f: &mut Form, tokens: &CsrfTokens<MemorySession>, fields: &[(&str, &str)]) -> Outcome {
    let mut pairs: Vec<(String, String)> = fields
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    pairs.push(("_form_id".into(), f.form_id().unwrap().to_owned()));
    pairs.push(("_form_token".into(), f.form_token().unwrap().to_owned()));
    f.process(&SubmittedRequest::post(pairs), tokens).unwrap()
}

#[test]
fn test_first_view_issues_token() {
    let tokens = store();
    let mut f = contact();
    let outcome = f.process(&SubmittedRequest::get(), &tokens).unwrap();

    assert_eq!(outcome.state, FormState::Unsubmitted);
    let id = f.form_id().unwrap();
    let token = f.form_token().unwrap();
    assert_eq!(id.len(), 64);
    assert!(outcome.html.contains(&format!(r#"name="_form_id" value="{id}""#)));
    assert!(outcome.html.contains(&format!(r#"name="_form_token" value="{token}""#)));
    assert!(tokens.check(id, token).unwrap());
}

#[test]
fn test_valid_submission_calls_success_handler() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("name", "  Ben  "), ("message", "Hi")]);
    assert_eq!(outcome.state, FormState::Valid);
    assert_eq!(outcome.html, "OK:Ben");
    assert!(tokens.session().is_empty());
}

#[test]
fn test_empty_required_field_rerenders_with_error() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();
    let first_token = f.form_token().unwrap().to_owned();

    let outcome = submit_fields(&mut f, &tokens, &[("name", ""), ("message", "Hello there")]);
    assert_eq!(outcome.state, FormState::Invalid);
    assert_eq!(f.error_for("Name"), Some("* Requires your input"));
    assert!(outcome.html.contains("* Requires your input"));
    assert!(outcome.html.contains(">Hello there</textarea>"));

    let second_token = f.form_token().unwrap().to_owned();
    assert_ne!(first_token, second_token);
    assert!(tokens.check(f.form_id().unwrap(), &second_token).unwrap());
    assert!(!tokens.check(f.form_id().unwrap(), &first_token).unwrap());
}

#[test]
fn test_resubmission_after_error_succeeds() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();
    submit_fields(&mut f, &tokens, &[("name", "")]);

    let outcome = submit_fields(&mut f, &tokens, &[("name", "Ada")]);
    assert_eq!(outcome.state, FormState::Valid);
    assert_eq!(outcome.html, "OK:Ada");
}

#[test]
fn test_form_id_mismatch() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();
    let id = f.form_id().unwrap().to_owned();
    let token = f.form_token().unwrap().to_owned();

    let request = SubmittedRequest::post([("name", "Ben"), ("_form_id", "bogus"), ("_form_token", token.as_str())]);
    let outcome = f.process(&request, &tokens).unwrap();
    assert_eq!(outcome.state, FormState::TokenInvalid);
    assert_eq!(outcome.html, MessageSettings::default().id_mismatch);
    assert!(tokens.check(&id, &token).unwrap());
    assert!(!f.has_errors());
    assert_eq!(f.value_of("Name"), None);

    // an empty required field would fail validation if it ran
    let request = SubmittedRequest::post([("name", ""), ("_form_id", "bogus"), ("_form_token", token.as_str())]);
    f.process(&request, &tokens).unwrap();
    assert_eq!(f.errors().count(), 0);
    assert_eq!(f.error_for("Name"), None);
    assert!(!f.is_submitting());
}

#[test]
fn test_token_mismatch() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();
    let id = f.form_id().unwrap().to_owned();
    let token = f.form_token().unwrap().to_owned();

    let request = SubmittedRequest::post([("name", "Ben"), ("_form_id", id.as_str()), ("_form_token", "forged")]);
    let outcome = f.process(&request, &tokens).unwrap();
    assert_eq!(outcome.state, FormState::TokenInvalid);
    assert_eq!(outcome.html, MessageSettings::default().token_mismatch);
    assert!(tokens.check(&id, &token).unwrap());
}

#[test]
fn test_replayed_token_is_rejected() {
    let tokens = store();
    let mut f = contact();
    f.process(&SubmittedRequest::get(), &tokens).unwrap();
    let id = f.form_id().unwrap().to_owned();
    let token = f.form_token().unwrap().to_owned();
    let request = SubmittedRequest::post([("name", "Ben"), ("_form_id", id.as_str()), ("_form_token", token.as_str())]);

    assert_eq!(f.process(&request, &tokens).unwrap().state, FormState::Valid);
    assert_eq!(f.process(&request, &tokens).unwrap().state, FormState::TokenInvalid);
}

#[test]
fn test_get_form_ignores_post_data() {
    let tokens = store();
    let mut f = form("Search", "/search")
        .method("get")
        .add(input("Query"))
        .on_success(|_| "found".into());
    let outcome = f
        .process(&SubmittedRequest::post([("query", "rust")]), &tokens)
        .unwrap();
    assert_eq!(outcome.state, FormState::Unsubmitted);
    assert!(outcome.html.contains(r#"method="get""#));

    let id = f.form_id().unwrap().to_owned();
    let token = f.form_token().unwrap().to_owned();
    let request = SubmittedRequest::from_pairs(
        Method::Get,
        [("query", "rust"), ("_form_id", id.as_str()), ("_form_token", token.as_str())],
    );
    assert_eq!(f.process(&request, &tokens).unwrap().html, "found");
}

#[test]
fn test_render_is_idempotent() {
    let tokens = store();
    let mut f = contact();
    let outcome = f.process(&SubmittedRequest::get(), &tokens).unwrap();
    let first = f.render().unwrap();
    let second = f.render().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, outcome.html);
}

#[test]
fn test_fingerprint_is_structural() {
    let tokens = store();
    let mut a = contact();
    let mut b = contact();
    a.process(&SubmittedRequest::get(), &tokens).unwrap();
    b.process(&SubmittedRequest::get(), &tokens).unwrap();
    assert_eq!(a.form_id(), b.form_id());

    let mut c = form("Contact", "/contact").add(input("Name")).on_success(|_| String::new());
    c.process(&SubmittedRequest::get(), &tokens).unwrap();
    assert_ne!(a.form_id(), c.form_id());
}

#[test]
fn test_range_error_message() {
    let tokens = store();
    let mut f = form("Order", "/order")
        .add(integer("Quantity").min(1).max(10))
        .on_success(|_| "ordered".into());
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("quantity", "15")]);
    assert_eq!(outcome.state, FormState::Invalid);
    assert_eq!(f.error_for("Quantity"), Some("Value must be 10 or less"));
}

#[test]
fn test_whitelist_and_pattern_errors_collected() {
    let tokens = store();
    let mut f = form("Paint", "/")
        .add(input("Color").whitelist("red, green"))
        .add(input("Code").pattern_with("^[A-Z]{3}$", "Three capitals please"))
        .on_success(|_| "painted".into());
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("color", "blue"), ("code", "ab")]);
    assert_eq!(outcome.state, FormState::Invalid);
    assert_eq!(f.error_for("Color"), Some("Please choose one of: red, green"));
    assert_eq!(f.error_for("Code"), Some("Three capitals please"));
    assert_eq!(f.errors().count(), 2);
}

#[test]
fn test_checkbox_values_are_captured() {
    let tokens = store();
    let mut f = form("Prefs", "/")
        .add(checkboxes("Options", Members::from_pairs([("spam_me", "Spam me"), ("extra", "Extras")])).required())
        .on_success(|f| format!("{:?}", f.values_of("Options").unwrap()));
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("options[]", "spam_me"), ("options[]", "extra")]);
    assert_eq!(outcome.state, FormState::Valid);
    assert_eq!(
        outcome.html,
        format!("{:?}", FieldValue::Many(vec!["spam_me".into(), "extra".into()]))
    );
}

#[test]
fn test_required_checkbox_set_needs_one_checked() {
    let tokens = store();
    let mut f = form("Prefs", "/")
        .add(checkboxes("Options", Members::from_labels(["A", "B"])).required())
        .on_success(|_| "OK".into());
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("other", "x")]);
    assert_eq!(outcome.state, FormState::Invalid);
    assert_eq!(f.error_for("Options"), Some("* Requires your input"));
}

#[test]
fn test_fieldset_required_flag_reaches_children() {
    let tokens = store();
    let mut f = form("Address", "/")
        .add(
            fieldset("Where")
                .required()
                .add(input("Street"))
                .add(input("Note").ignore_parent(&["required"])),
        )
        .on_success(|_| "OK".into());
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    let outcome = submit_fields(&mut f, &tokens, &[("note", "")]);
    assert_eq!(outcome.state, FormState::Invalid);
    assert_eq!(f.error_for("Street"), Some("* Requires your input"));
    assert_eq!(f.error_for("Note"), None);
}

#[test]
fn test_configured_messages() {
    let tokens = store();
    let mut config = FormsConfig::default();
    config.messages.required = "Fill this in".into();
    let mut f = contact().configure(&config);
    f.process(&SubmittedRequest::get(), &tokens).unwrap();

    submit_fields(&mut f, &tokens, &[("name", "")]);
    assert_eq!(f.error_for("Name"), Some("Fill this in"));
}

#[test]
fn test_unknown_renderer_is_config_error() {
    let tokens = store();
    let mut f = contact().set_renderer_named("fancy");
    let err = f.process(&SubmittedRequest::get(), &tokens).unwrap_err();
    assert_eq!(err.to_string(), "Configuration error: renderer [fancy] cannot be found");
}
