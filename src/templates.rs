//! Fixed request bodies: the class schema and the sample documents.

use serde::{Deserialize, Serialize};

pub const SAMPLE_TITLE: &str = "Sample article";
pub const SAMPLE_CONTENT: &str = "This is the content of the sample article.";
pub const SAMPLE_VECTOR: [f64; 5] = [0.1, 0.2, 0.3, 0.4, 0.5];

/// A property declaration inside a class schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    pub name: String,
    pub data_type: Vec<String>,
}

impl PropertySchema {
    fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: vec![data_type.to_string()],
        }
    }
}

/// Body of `POST /v1/schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchema {
    pub class: String,
    pub description: String,
    pub vectorizer: String,
    pub properties: Vec<PropertySchema>,
}

/// Schema for a text document class. Vectors are supplied by the client,
/// so no server-side vectorizer is configured.
pub fn document_schema(class: &str) -> ClassSchema {
    ClassSchema {
        class: class.to_string(),
        description: "Stores text documents with embeddings".to_string(),
        vectorizer: "none".to_string(),
        properties: vec![
            PropertySchema::new("text", "text"),
            PropertySchema::new("title", "string"),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProperties {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f64>>,
}

/// Body of `POST /v1/objects`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    pub class: String,
    pub properties: DocumentProperties,
}

pub fn sample_document(class: &str) -> NewObject {
    NewObject {
        class: class.to_string(),
        properties: DocumentProperties {
            title: SAMPLE_TITLE.to_string(),
            content: SAMPLE_CONTENT.to_string(),
            vector: None,
        },
    }
}

/// The sample document with [`SAMPLE_VECTOR`] stored as a property.
pub fn sample_document_with_vector(class: &str) -> NewObject {
    let mut object = sample_document(class);
    object.properties.vector = Some(SAMPLE_VECTOR.to_vec());
    object
}
