//! Test: Walking a field whose type does not implement `Hideable`.
//!
//! Every field that is not `#[hide(skip)]` is walked, so its type must
//! implement `Hideable`. External types like `std::time::Instant` do not.

use hide_fields::Hide;
use std::time::Instant;

#[derive(Hide)]
struct Record {
    // ERROR: Instant doesn't implement Hideable
    // Add #[hide(skip)] to leave it out of the walk
    #[hide]
    started: Instant,
}

fn main() {}
