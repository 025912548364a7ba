//! Rendering of query answers.
//!
//! Every listing is a single line joined with `", "`. Names compare by bytes,
//! so `Zerrikanian` sorts before `aether`.

use crate::parser::Stack;

const SEPARATOR: &str = ", ";

fn join_stacks(stacks: &[Stack]) -> String {
    stacks
        .iter()
        .map(|s| format!("{} {}", s.quantity, s.name))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// `Total ingredient?` style listing: ascending by name, `None` when empty.
pub fn stock_listing(stacks: impl IntoIterator<Item = Stack>) -> String {
    let mut stacks: Vec<Stack> = stacks.into_iter().collect();
    if stacks.is_empty() {
        return "None".to_string();
    }
    stacks.sort_by(|a, b| a.name.cmp(&b.name));
    join_stacks(&stacks)
}

/// `What is in` listing: descending by quantity, ties ascending by name.
pub fn formula_listing(ingredients: &[Stack]) -> String {
    let mut sorted = ingredients.to_vec();
    sorted.sort_by(|a, b| b.quantity.cmp(&a.quantity).then_with(|| a.name.cmp(&b.name)));
    join_stacks(&sorted)
}

/// Plain names, ascending, duplicates dropped.
pub fn name_listing<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    let mut names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    names.sort_unstable();
    names.dedup();
    names.join(SEPARATOR)
}
