//! Prompt templates and localized text
//!
//! - `language`: output languages and the fixed console/mail strings
//! - `template`: MiniJinja-backed multi-language templates
//! - `recommend`: the pick request sent to the model

mod language;
mod recommend;
mod template;

pub use language::Language;
pub use recommend::{candidate_lines, format_number, recommendation_template, render_recommendation_prompt};
pub use template::PromptTemplate;
