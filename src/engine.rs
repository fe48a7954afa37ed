//! The expression engine, independent of any numeric type.
//!
//! Compilation runs in three steps:
//! - [`tokenizer`] checks the braces and classifies the text into
//!   [`token::Token`]s, consulting the [`registry`] and the embedder's
//!   [`recognizer`];
//! - [`shunting_yard`] rearranges the tokens into postfix [`node::Node`]s;
//! - [`evaluator::fold`] computes every part that does not depend on a
//!   variable.
//!
//! [`evaluator::evaluate`] then walks the folded nodes as many times as
//! needed. [`parser::Parser`] ties the steps together.

pub mod evaluator;
pub mod node;
pub mod parser;
pub mod recognizer;
pub mod registry;
pub mod shunting_yard;
pub mod token;
pub mod tokenizer;
