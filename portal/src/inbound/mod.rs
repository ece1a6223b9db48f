//! Inbound adapters that translate terminal input into domain calls and
//! domain views back into text.
//!
//! Argument parsing lives under [`cli`]; rendering lives under [`console`].

pub mod cli;
pub mod console;
