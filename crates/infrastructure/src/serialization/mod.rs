//! JSON encoding of files written by the client.
//!
//! Files are pretty-printed with 2-space indentation and a trailing
//! newline so they stay readable when inspected by hand.

mod json;

pub use json::*;
