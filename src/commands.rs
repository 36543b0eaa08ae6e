//! Single-key commands and the workflows behind them.

use crate::config::ClientConfig;
use crate::delete::{delete_class_objects, DeletionReport};
use crate::error::{ClientError, Result};
use crate::templates::{document_schema, sample_document, sample_document_with_vector, NewObject};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use serde_json::Value;
use std::fmt;
use tracing::info;

/// A command selected by one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateSchema,
    CreateDocument,
    CreateDocumentWithVector,
    ListDocuments,
    DeleteAllDocuments,
    Quit,
    Unrecognized(char),
}

impl Command {
    pub fn from_key(key: char) -> Self {
        match key {
            '0' => Command::CreateSchema,
            '1' => Command::CreateDocument,
            '2' => Command::CreateDocumentWithVector,
            '3' => Command::ListDocuments,
            '4' => Command::DeleteAllDocuments,
            'e' => Command::Quit,
            other => Command::Unrecognized(other),
        }
    }
}

/// What a dispatched command produced, ready to be shown to the user.
#[derive(Debug)]
pub enum Outcome {
    SchemaCreated,
    DocumentCreated,
    /// Raw listing body from the server.
    Documents(String),
    Deleted(DeletionReport),
    Failed(ClientError),
    NotFound(char),
    Quit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SchemaCreated => write!(f, "Schema created successfully"),
            Outcome::DocumentCreated => write!(f, "Document created successfully"),
            Outcome::Documents(body) => match serde_json::from_str::<Value>(body) {
                Ok(value) => match serde_json::to_string_pretty(&value) {
                    Ok(pretty) => write!(f, "{}", pretty),
                    Err(_) => write!(f, "{}", body),
                },
                Err(_) => write!(f, "{}", body),
            },
            Outcome::Deleted(report) => {
                writeln!(f, "Documents found: {}", report.total_found)?;
                write!(
                    f,
                    "Documents deleted: {} of {}",
                    report.deleted, report.total_found
                )?;
                for failure in &report.failures {
                    write!(f, "\n  {}: {}", failure.id, failure.error)?;
                }
                Ok(())
            }
            Outcome::Failed(err) => write!(f, "Error: {}", err),
            Outcome::NotFound(_) => write!(f, "Command not found."),
            Outcome::Quit => Ok(()),
        }
    }
}

/// Send `request` and turn a non-2xx answer into `RequestFailed`.
async fn send_checked<T: Transport + ?Sized>(
    transport: &T,
    request: ApiRequest,
) -> Result<ApiResponse> {
    let response = transport.execute(request).await?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(ClientError::RequestFailed {
            status: response.status,
            body: response.body,
        })
    }
}

fn to_body<S: serde::Serialize>(value: &S) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ClientError::InvalidConfig {
        reason: format!("cannot encode request body: {}", e),
    })
}

pub async fn create_schema<T: Transport + ?Sized>(transport: &T, class: &str) -> Result<()> {
    let body = to_body(&document_schema(class))?;
    send_checked(transport, ApiRequest::post(["v1", "schema"], body)).await?;
    info!(class, "schema created");
    Ok(())
}

pub async fn create_document<T: Transport + ?Sized>(
    transport: &T,
    object: &NewObject,
) -> Result<()> {
    let body = to_body(object)?;
    send_checked(transport, ApiRequest::post(["v1", "objects"], body)).await?;
    info!(
        class = %object.class,
        with_vector = object.properties.vector.is_some(),
        "document created"
    );
    Ok(())
}

/// Fetch `GET /v1/objects` and return the body as sent by the server.
pub async fn list_documents<T: Transport + ?Sized>(transport: &T) -> Result<String> {
    let response = send_checked(transport, ApiRequest::get(["v1", "objects"])).await?;
    Ok(response.body)
}

/// Run `command` to completion. Errors become [`Outcome::Failed`]; nothing
/// here panics on a server or network failure.
pub async fn dispatch<T: Transport + ?Sized>(
    command: Command,
    transport: &T,
    config: &ClientConfig,
) -> Outcome {
    let class = config.class_name.as_str();
    let result = match command {
        Command::CreateSchema => create_schema(transport, class)
            .await
            .map(|_| Outcome::SchemaCreated),
        Command::CreateDocument => create_document(transport, &sample_document(class))
            .await
            .map(|_| Outcome::DocumentCreated),
        Command::CreateDocumentWithVector => {
            create_document(transport, &sample_document_with_vector(class))
                .await
                .map(|_| Outcome::DocumentCreated)
        }
        Command::ListDocuments => list_documents(transport).await.map(Outcome::Documents),
        Command::DeleteAllDocuments => {
            delete_class_objects(transport, class, config.delete_concurrency)
                .await
                .map(Outcome::Deleted)
        }
        Command::Quit => Ok(Outcome::Quit),
        Command::Unrecognized(key) => Ok(Outcome::NotFound(key)),
    };
    result.unwrap_or_else(Outcome::Failed)
}
