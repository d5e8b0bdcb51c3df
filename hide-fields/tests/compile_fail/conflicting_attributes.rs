//! Test: More than one `#[hide]` attribute on the same field.
//!
//! A field has exactly one replacement, so the attributes cannot be merged.

use hide_fields::Hide;

#[derive(Hide)]
struct Login {
    // ERROR: multiple #[hide] attributes specified on the same field
    #[hide = "***"]
    #[hide(skip)]
    password: String,
}

fn main() {}
