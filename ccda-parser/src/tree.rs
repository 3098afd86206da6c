//! Accessors over the generic parsed tree.
//!
//! Attributes are `@_name` fields, inline text sits under `#text` (or the node
//! is itself a string), and a repeated element may be either a bare node or a
//! list. This module is the only place that deals with those conventions.

use serde_json::Value;

pub const ATTRIBUTE_PREFIX: &str = "@_";
pub const TEXT_KEY: &str = "#text";

/// Attribute value when `attribute` is given, otherwise the node's inline text.
/// Blank values read as `None`. A list reads its first element.
pub fn text_or_attr(node: Option<&Value>, attribute: Option<&str>) -> Option<String> {
    let node = first(node)?;
    let raw = match attribute {
        Some(name) => node.get(format!("{ATTRIBUTE_PREFIX}{name}").as_str())?,
        None => match node {
            Value::Object(map) => map.get(TEXT_KEY)?,
            leaf => leaf,
        },
    };
    scalar_text(raw)
}

pub fn attr(node: Option<&Value>, name: &str) -> Option<String> {
    text_or_attr(node, Some(name))
}

pub fn text(node: Option<&Value>) -> Option<String> {
    text_or_attr(node, None)
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Uniform sequence view: nothing for absent/null, one element for a bare
/// node, the elements of a list.
pub fn as_sequence(node: Option<&Value>) -> Vec<&Value> {
    match node {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter(|item| !item.is_null()).collect(),
        Some(single) => vec![single],
    }
}

/// First element of the sequence view.
pub fn first(node: Option<&Value>) -> Option<&Value> {
    as_sequence(node).into_iter().next()
}

/// First occurrence of the named child across the sequence view of `node`.
pub fn child<'a>(node: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    as_sequence(node)
        .into_iter()
        .find_map(|item| item.get(name).filter(|value| !value.is_null()))
}

/// All occurrences of the named child, flattened.
pub fn children<'a>(node: Option<&'a Value>, name: &str) -> Vec<&'a Value> {
    as_sequence(node)
        .into_iter()
        .flat_map(|item| as_sequence(item.get(name)))
        .collect()
}

/// Follows `child` through each segment.
pub fn path<'a>(node: Option<&'a Value>, segments: &[&str]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(node?, |current, segment| child(Some(current), segment))
}

/// Named child elements of a node in document order, repeated elements expanded.
pub fn elements(node: &Value) -> Vec<(&str, &Value)> {
    let Value::Object(map) = node else {
        return Vec::new();
    };
    map.iter()
        .filter(|(key, _)| !key.starts_with(ATTRIBUTE_PREFIX) && key.as_str() != TEXT_KEY)
        .flat_map(|(key, value)| {
            as_sequence(Some(value))
                .into_iter()
                .map(move |item| (key.as_str(), item))
        })
        .collect()
}

/// Every element named `name` anywhere below `node`, preorder.
pub fn find_all<'a>(node: &'a Value, name: &str) -> Vec<&'a Value> {
    let mut found = Vec::new();
    collect_named(node, name, &mut found);
    found
}

fn collect_named<'a>(node: &'a Value, name: &str, found: &mut Vec<&'a Value>) {
    for (key, value) in elements(node) {
        if key == name {
            found.push(value);
        }
        collect_named(value, name, found);
    }
}

/// `@_root` of every direct `templateId` child.
pub fn template_roots(node: Option<&Value>) -> Vec<String> {
    children(node, "templateId")
        .into_iter()
        .filter_map(|template| attr(Some(template), "root"))
        .collect()
}

pub fn has_template(node: Option<&Value>, root: &str) -> bool {
    children(node, "templateId")
        .into_iter()
        .any(|template| attr(Some(template), "root").as_deref() == Some(root))
}

/// Every non-attribute text value below `node`, own text first.
pub fn collect_text(node: Option<&Value>) -> Vec<String> {
    let mut pieces = Vec::new();
    for item in as_sequence(node) {
        collect_text_into(item, &mut pieces);
    }
    pieces
}

fn collect_text_into(node: &Value, pieces: &mut Vec<String>) {
    if let Some(own) = text(Some(node)) {
        pieces.push(own);
    }
    for (_, value) in elements(node) {
        collect_text_into(value, pieces);
    }
}

/// Narrative markup flattened into one whitespace-normalized string.
pub fn narrative_text(node: Option<&Value>) -> Option<String> {
    let joined = collect_text(node).join(" ");
    let normalized = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    (!normalized.is_empty()).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_attributes_and_text() {
        let node = json!({ "@_code": "M", "@_blank": "  ", "#text": "Male" });
        assert_eq!(attr(Some(&node), "code").as_deref(), Some("M"));
        assert_eq!(attr(Some(&node), "blank"), None);
        assert_eq!(text(Some(&node)).as_deref(), Some("Male"));
        assert_eq!(text(Some(&json!(12345))).as_deref(), Some("12345"));
        assert_eq!(text(None), None);
    }

    #[test]
    fn list_nodes_read_first_element() {
        let node = json!([{ "@_root": "a" }, { "@_root": "b" }]);
        assert_eq!(attr(Some(&node), "root").as_deref(), Some("a"));
        assert_eq!(template_roots(Some(&json!({ "templateId": node }))), vec!["a", "b"]);
    }

    #[test]
    fn child_searches_every_occurrence() {
        let node = json!([{ "act": {} }, { "observation": { "@_id": "x" } }]);
        let found = child(Some(&node), "observation");
        assert_eq!(attr(found, "id").as_deref(), Some("x"));
        assert!(path(Some(&node), &["observation", "missing"]).is_none());
    }

    #[test]
    fn narrative_flattens_nested_markup() {
        let node = json!({
            "list": { "item": ["one", "two"] },
            "paragraph": ["First  line", { "content": "bold", "#text": "mixed" }]
        });
        assert_eq!(
            narrative_text(Some(&node)).as_deref(),
            Some("one two First line mixed bold")
        );
    }

    #[test]
    fn find_all_is_preorder() {
        let tree = json!({
            "templateId": { "@_root": "1" },
            "x": { "section": { "templateId": [{ "@_root": "2" }, { "@_root": "3" }] } }
        });
        let roots: Vec<String> = find_all(&tree, "templateId")
            .into_iter()
            .filter_map(|t| attr(Some(t), "root"))
            .collect();
        assert_eq!(roots, vec!["1", "2", "3"]);
    }
}
