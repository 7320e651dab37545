use overlay_logging::overlay_warn;
use serde_json::{Map, Value};

use crate::ClassifiedText;

// Well past anything a real product page produces; the guard only protects
// against pathological payloads blowing the stack.
const MAX_DEPTH: usize = 128;

const INGREDIENT_TITLES: &[&str] = &["ingredients", "allergens"];
const INFO_TITLES: &[&str] = &["otherInformation", "dietaryInformation"];

/// Walks the untyped page state tree and buckets description fragments into
/// `ingredients` and `info`. Arrays are visited in index order and object
/// fields in map iteration order, so output is deterministic for one tree.
/// Pure function of the input.
pub fn classify_product_data(state: &Value) -> ClassifiedText {
    let mut out = ClassifiedText::default();
    walk(state, 0, &mut out);
    out
}

fn walk(node: &Value, depth: usize, out: &mut ClassifiedText) {
    if depth > MAX_DEPTH {
        overlay_warn!("Product data tree deeper than {MAX_DEPTH}; pruning");
        return;
    }
    match node {
        Value::Array(items) => {
            for item in items {
                walk(item, depth + 1, out);
            }
        }
        Value::Object(fields) => {
            classify_object(fields, out);
            // Relevant content nests arbitrarily deep, and a matching node
            // can itself contain further title/content pairs.
            for value in fields.values() {
                walk(value, depth + 1, out);
            }
        }
        _ => {}
    }
}

fn classify_object(fields: &Map<String, Value>, out: &mut ClassifiedText) {
    if fields.contains_key("title") && fields.contains_key("content") {
        let title = fields.get("title").and_then(Value::as_str);
        let content = fields.get("content").and_then(Value::as_str);
        if let (Some(title), Some(content)) = (title, content) {
            if INGREDIENT_TITLES.contains(&title) {
                out.ingredients.push(content.to_string());
            } else if INFO_TITLES.contains(&title) {
                out.info.push(content.to_string());
            }
        }
        return;
    }
    if let Some(detail) = fields.get("detailedDescription").and_then(Value::as_str) {
        out.info.push(detail.to_string());
    }
}
