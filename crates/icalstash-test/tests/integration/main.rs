#![expect(
    unused_must_use,
    reason = "Assertion helpers return the response so checks can be chained"
)]

mod helpers;

mod encoding;
mod lifecycle;
mod save;
mod validation;
