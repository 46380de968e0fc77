//! Date tokens used in note path templates.
//!
//! A configured file name such as `{{today}}.md` is rendered against the
//! current local date before it is joined onto the project directory.

pub mod datemath;

pub use datemath::{
    DateBase, DateExpr, DateMathError, DurationUnit, evaluate_date_expr,
    has_date_tokens, parse_date_expr, render_date_tokens,
};
