use std::cmp::Ordering;

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::StoreError;

/// Field map of a stored document (the id is kept separately).
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self { id: id.into(), fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Decodes the document into a typed record, exposing the document id as
    /// an `id` field.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.fields.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|source| StoreError::Decode {
            id: self.id.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filters plus an optional ordering over one collection.
///
/// When `order_by` is set, documents lacking that field are not part of the
/// result. Ties keep insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn matches(&self, document: &Document) -> bool {
        let filters_pass = self
            .filters
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected));
        let has_order_field = self
            .order_by
            .as_ref()
            .is_none_or(|(field, _)| document.get(field).is_some());
        filters_pass && has_order_field
    }

    /// Filters and orders `documents`, which must be in insertion order.
    pub fn apply<'a>(&self, documents: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
        let mut selected: Vec<Document> = documents.into_iter().filter(|d| self.matches(d)).cloned().collect();
        if let Some((field, direction)) = &self.order_by {
            selected.sort_by(|a, b| {
                let ordering = compare_values(a.get(field), b.get(field));
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        selected
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// RFC 3339 timestamps compare as instants; anything else compares as text.
fn compare_strings(left: &str, right: &str) -> Ordering {
    match (DateTime::parse_from_rfc3339(left), DateTime::parse_from_rfc3339(right)) {
        (Ok(l), Ok(r)) => l.cmp(&r).then_with(|| left.cmp(right)),
        _ => left.cmp(right),
    }
}

/// Total order over JSON values: by type first, then by value for scalars.
fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(left), Some(right)) => match (left, right) {
            (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
            (Value::Number(l), Value::Number(r)) => {
                let l = l.as_f64().unwrap_or(f64::NAN);
                let r = r.as_f64().unwrap_or(f64::NAN);
                l.partial_cmp(&r).unwrap_or(Ordering::Equal)
            }
            (Value::String(l), Value::String(r)) => compare_strings(l, r),
            _ => type_rank(left).cmp(&type_rank(right)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        match value {
            Value::Object(fields) => Document::new(id, fields),
            _ => unreachable!("test documents are objects"),
        }
    }

    #[test]
    fn ordering_is_stable_for_ties() {
        let docs = vec![
            doc("b", json!({ "order": 2 })),
            doc("a1", json!({ "order": 1 })),
            doc("a2", json!({ "order": 1 })),
        ];
        let query = Query::collection("menu").order_by("order", Direction::Ascending);
        let ids: Vec<_> = query.apply(&docs).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["a1", "a2", "b"]);
    }

    #[test]
    fn descending_order_and_filters_combine() {
        let docs = vec![
            doc("old", json!({ "to": "u1", "createdAt": "2024-01-01T00:00:00Z" })),
            doc("other", json!({ "to": "u2", "createdAt": "2024-01-03T00:00:00Z" })),
            doc("new", json!({ "to": "u1", "createdAt": "2024-01-02T00:00:00Z" })),
        ];
        let query = Query::collection("notifications")
            .where_eq("to", "u1")
            .order_by("createdAt", Direction::Descending);
        let ids: Vec<_> = query.apply(&docs).into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn documents_without_the_order_field_are_excluded() {
        let docs = vec![doc("with", json!({ "order": 1 })), doc("without", json!({}))];
        let query = Query::collection("menu").order_by("order", Direction::Ascending);
        assert_eq!(query.apply(&docs).len(), 1);
    }

    #[test]
    fn decode_exposes_the_document_id() {
        #[derive(serde::Deserialize)]
        struct Named {
            id: String,
            name: String,
        }
        let named: Named = doc("x-1", json!({ "name": "Ops" })).decode().expect("decode");
        assert_eq!(named.id, "x-1");
        assert_eq!(named.name, "Ops");
    }
}
