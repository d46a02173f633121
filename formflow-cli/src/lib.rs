//! formflow demo front-end
//!
//! Builds the example contact form and renders it, simulates a submission,
//! or serves it over HTTP.

pub mod commands;
pub mod contact;

pub use contact::contact_form;
