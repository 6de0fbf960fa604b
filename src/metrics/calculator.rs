//! Halstead measurement over a semantic model's token streams.
//!
//! Operations are measured individually (in parallel), then rolled up
//! into one aggregate record per class and per namespace. The output
//! order is deterministic: methods in discovery order, then classes,
//! then namespaces, each in first-seen order.

use std::collections::HashSet;

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::debug;

use crate::model::{BodyToken, MethodSymbol, OperationBody, SemanticModel};

use super::halstead::HalsteadMetrics;

/// Keywords that count as operators. Every other keyword token is
/// discarded.
pub const OPERATOR_KEYWORDS: [&str; 13] = [
    "if", "for", "while", "do", "switch", "try", "catch", "case", "break", "continue",
    "return", "throw", "default",
];

/// Measure every operation with a body, then aggregate per class and
/// per namespace.
pub fn analyze<M: SemanticModel>(model: &M) -> Vec<HalsteadMetrics> {
    let mut seen = HashSet::new();
    let mut work: Vec<(MethodSymbol, OperationBody)> = Vec::new();
    for unit in model.units() {
        for symbol in model.declared_types(&unit.name) {
            for method in model.methods_of(&symbol.qualified_name) {
                if !seen.insert(method.qualified_name.clone()) {
                    continue;
                }
                if let Some(body) = model.body_of(&method.qualified_name) {
                    work.push((method, body));
                }
            }
        }
    }

    let methods: Vec<HalsteadMetrics> = work
        .par_iter()
        .map(|(method, body)| measure_operation(method, body))
        .collect();

    let mut by_class: IndexMap<String, Vec<HalsteadMetrics>> = IndexMap::new();
    for record in &methods {
        by_class
            .entry(class_key(&record.element_id))
            .or_default()
            .push(record.clone());
    }
    let classes: Vec<HalsteadMetrics> = by_class
        .iter()
        .map(|(id, parts)| HalsteadMetrics::aggregate(id, "class", parts))
        .collect();

    let mut by_namespace: IndexMap<String, Vec<HalsteadMetrics>> = IndexMap::new();
    for record in &classes {
        by_namespace
            .entry(namespace_key(&record.element_id))
            .or_default()
            .push(record.clone());
    }
    let namespaces = by_namespace
        .iter()
        .map(|(id, parts)| HalsteadMetrics::aggregate(id, "namespace", parts));

    debug!(
        methods = methods.len(),
        classes = classes.len(),
        "halstead analysis done"
    );
    methods
        .iter()
        .cloned()
        .chain(classes.iter().cloned())
        .chain(namespaces)
        .collect()
}

/// Containing class of an operation ID: the signature head with its
/// member segment stripped.
fn class_key(operation_id: &str) -> String {
    let head = operation_id.split('(').next().unwrap_or(operation_id);
    match head.rfind('.') {
        Some(i) => head[..i].to_string(),
        None => head.to_string(),
    }
}

/// Containing namespace of a class ID, `<global>` for bare names.
fn namespace_key(class_id: &str) -> String {
    match class_id.rfind('.') {
        Some(i) => class_id[..i].to_string(),
        None => "<global>".to_string(),
    }
}

fn measure_operation(method: &MethodSymbol, body: &OperationBody) -> HalsteadMetrics {
    let mut operators: Vec<&str> = Vec::new();
    let mut operands: Vec<&str> = Vec::new();

    for param in &method.parameters {
        operands.push(&param.name);
    }
    for token in &body.tokens {
        match token {
            BodyToken::This => operands.push("this"),
            BodyToken::Identifier { text, is_type } => {
                operands.push(text);
                // Type names double as both usage and annotation.
                if *is_type {
                    operands.push(text);
                }
            }
            BodyToken::Literal(text) => operands.push(text),
            BodyToken::Operator(text) => operators.push(text),
            BodyToken::Keyword(word) => {
                if OPERATOR_KEYWORDS.contains(&word.as_str()) {
                    operators.push(word);
                }
            }
            BodyToken::Conditional => {
                operators.push("?");
                operators.push(":");
            }
        }
    }

    let unique_operators = operators.iter().collect::<HashSet<_>>().len();
    let unique_operands = operands.iter().collect::<HashSet<_>>().len();
    HalsteadMetrics::new(
        &method.qualified_name,
        "method",
        unique_operators,
        unique_operands,
        operators.len(),
        operands.len(),
    )
}
