//! Effect text interpretation
//!
//! Effect slots carry free text such as `Strike & Blast Attack +10%` or
//! `4% to Blast Defense per 'Tag: Saiyan' battle member`. The parser runs
//! an ordered clause grammar over the text, turning recognized clauses
//! into stat contributions and leaving the rest as descriptive text.

pub mod clause;
pub mod parser;

pub use clause::{Clause, ClauseContext, ClauseKind, Contribution, GRAMMAR};
pub use parser::{
    option_count, parse_effect, split_options, EffectContext, Leftover, ParsedEffect, Selector,
};
