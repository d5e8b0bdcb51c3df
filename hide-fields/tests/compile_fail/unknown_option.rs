//! Test: An unsupported option inside `#[hide(...)]`.
//!
//! `skip` is the only list option; replacements use `#[hide = "..."]`.

use hide_fields::Hide;

#[derive(Hide)]
struct Login {
    // ERROR: unsupported #[hide(...)] option
    #[hide(mask)]
    password: String,
}

fn main() {}
