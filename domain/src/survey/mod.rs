//! Survey domain
//!
//! Questions, the answer vector produced for each (persona, model) exchange,
//! and the two text conventions that couple the prompt to the reply:
//!
//! | Direction | Function | Shape |
//! |-----------|----------|-------|
//! | prompt → model | [`format::format_survey`] | `"{id}. {text}\n   {options}"` blocks |
//! | model → row | [`parsing::parse_response`] | `"{id}：{answer}"` lines |

pub mod answer;
pub mod format;
pub mod parsing;
pub mod question;
pub mod row;
