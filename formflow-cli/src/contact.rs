//! The demo contact form
//!
//! Shows most of what the library offers in one form: fieldsets, typed
//! inputs, patterns, a whitelist, custom validators, radio, checkbox and
//! multi-select sets with initial values, and a custom affix formatter.

use std::sync::Arc;

use formflow::config::FormsConfig;
use formflow::forms::{
    checkboxes, email, fieldset, form, hidden, input, integer, multi_select, password, radios,
    submit, tel, textarea, url, yes_no, ElementBuilder, Form, Members, Validation,
};
use formflow::render::{escape, BasicHtmlRenderer};

/// Departments a message can be forwarded to; groups become `<optgroup>`s
#[must_use]
pub fn departments() -> Members {
    Members::new()
        .item("Inhuman Resources")
        .group(
            "Sales",
            Members::new()
                .keyed("bk", "Books")
                .item("Records")
                .item("Post Complaint Therapy"),
        )
        .group(
            "Complaints",
            Members::from_labels([
                "Complaints about the Books dept.",
                "Complaints about the Records dept.",
                "Complaints about the Complaints dept.",
                "Complaints about the Post Complaint Therapy dept.",
            ]),
        )
}

/// Wraps the `options` checkboxes in an ordered list and breaks after each agreement radio
#[must_use]
pub fn affix(markup: &str, owner: &str, index: usize, max: usize) -> String {
    match owner {
        "options" => {
            let open = if index == 0 { "<ol><li>" } else { "<li>" };
            let close = if index == max { "</li>\n</ol>\n" } else { "</li>" };
            format!("{open}{markup}{close}")
        }
        "agreement" => format!("{markup}<br>"),
        _ => markup.to_owned(),
    }
}

/// Build the contact form, styled and worded by `config`
#[must_use]
pub fn contact_form(config: &FormsConfig) -> Form {
    let renderer = BasicHtmlRenderer::from_settings(&config.render).with_affix_formatter(affix);

    form("contact", "./")
        .configure(config)
        .set_renderer(Arc::new(renderer))
        .flag("novalidate")
        .on_success(|f| {
            format!(
                "<h3>Thank you {}, your message has been sent.</h3>",
                escape(f.value_of("Name").unwrap_or_default())
            )
        })
        .add(
            fieldset("About you...")
                .add(
                    input("Your Name")
                        .named("name")
                        .note("Your name please")
                        .autocomplete("off")
                        .autofocus()
                        .required()
                        .match_with(|el, _| {
                            Validation::check(el.value().as_str() == Some("Ben"), "Name must be 'Ben'. No exceptions.")
                        }),
                )
                .add(
                    email("Your Email")
                        .named("email")
                        .note("Your email address")
                        .required()
                        .autocomplete("off"),
                )
                .add(url("Website").named("url").note("Your URL here (optional)"))
                .add(hidden("secret", "123"))
                .add(password("Your Password").named("pass").note("Enter a password").required())
                .add(tel("Phone").named("tel").note("A contact number please").pattern_with(
                    r"/^\s*\+?[0-9][-0-9]*[\s0-9-]*\s*$/",
                    "Enter a valid phone number. This can start with an international code like +44 if needed.",
                ))
                .add(
                    input("Are you human?")
                        .named("human")
                        .pattern_with("/^yes|yep|yeah|sure am|indeed$/i", "Some form of affirmation is needed.")
                        .required(),
                )
                .add(
                    yes_no("Were you alive when you celebrated your last birthday?")
                        .named("alive")
                        .note("Babies excluded.")
                        .required_with("Just yes or no please."),
                )
                .add(integer("How old are you?").named("age").value("5").min(2).max(10)),
        )
        .add(
            fieldset("Your message...").add(
                textarea("Message")
                    .named("msg")
                    .note("Your message to us")
                    .required()
                    .pattern_with("/^[^0-9]*$/", "No numbers please!")
                    .whitelist("great,good,fantastic,amazing"),
            ),
        )
        .add(
            fieldset("Legal stuff...")
                .add(
                    radios(
                        ">Do you agree to our terms?",
                        Members::from_pairs([("n", "You must be joking."), ("y", "Yes, I do, I do, I do!")]),
                    )
                    .named("agreement")
                    .required_with("* Please select one of the options")
                    .match_with(|el, _| {
                        Validation::check(el.value().as_str() == Some("y"), "To proceed, we need your agreement.")
                    }),
                )
                .add(
                    checkboxes(
                        "Additional Options...",
                        Members::from_pairs([("spam_me", "Spam my email address"), ("extra", "Extra frequently")]),
                    )
                    .named("options")
                    .required()
                    .value(["spam_me"]),
                )
                .add(
                    multi_select("Forward to which departments?", departments())
                        .named("depts")
                        .required_with("Please choose at least one department")
                        .value(["complaints-2", "complaints-3", "sales-0"]),
                ),
        )
        .add(submit("Send"))
}
