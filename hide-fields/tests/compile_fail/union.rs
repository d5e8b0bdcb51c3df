//! Test: Deriving `Hide` for a union.
//!
//! The active field of a union is unknown at runtime, so it cannot be walked.

use hide_fields::Hide;

#[derive(Hide)]
union Bits {
    // ERROR: `Hide` cannot be derived for unions
    int: u32,
    float: f32,
}

fn main() {}
