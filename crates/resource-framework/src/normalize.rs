//! # Error Normalizer
//!
//! Turns a raw transport outcome into either success or one [`ResourceError`].
//!
//! Policy:
//! 1. No response (transport failure) is always [`ResourceError::Connection`].
//! 2. A status in the operation's accepted set is success, whatever the body looks like.
//! 3. Any other status is [`ResourceError::Api`], annotated with whatever the error
//!    document says.
//!
//! Two error documents are recognized:
//!
//! ```xml
//! <error>
//!   <symbol>not_found</symbol>
//!   <description lang="en-US">Couldn't find Account with account_code = abc</description>
//! </error>
//!
//! <errors>
//!   <error field="purchase.currency" symbol="blank">can't be blank</error>
//! </errors>
//! ```

use crate::codec::MarkupCodec;
use crate::error::{ApiErrorDetail, ResourceError};
use crate::request::{AcceptedStatus, RawResponse};
use crate::transport::TransportError;
use crate::value::Value;
use reqwest::StatusCode;

/// Classifies one outcome. `None` means success.
pub fn normalize(
    outcome: Result<&RawResponse, &TransportError>,
    accepted: AcceptedStatus,
    codec: &dyn MarkupCodec,
) -> Option<ResourceError> {
    let response = match outcome {
        Ok(response) => response,
        Err(e) => return Some(ResourceError::Connection(e.to_string())),
    };

    if accepted.contains(response.status) {
        return None;
    }

    let extracted = if response.body.trim().is_empty() {
        None
    } else {
        codec.decode(&response.body).ok().map(|doc| extract(&doc.body))
    };
    let (message, symbol, details) = extracted.unwrap_or_default();

    Some(ResourceError::Api {
        status: response.status,
        message: message.unwrap_or_else(|| fallback_message(response.status)),
        symbol,
        details,
    })
}

type Extracted = (Option<String>, Option<String>, Vec<ApiErrorDetail>);

fn extract(body: &Value) -> Extracted {
    let symbol = body
        .get("symbol")
        .and_then(Value::as_text)
        .map(str::to_string);
    let description = body.get("description").and_then(text_of);

    let details: Vec<ApiErrorDetail> = match body.get("error") {
        Some(Value::List(items)) => items.iter().filter_map(detail).collect(),
        Some(item) => detail(item).into_iter().collect(),
        None => Vec::new(),
    };

    let message = description
        .or_else(|| details.first().map(describe))
        .or_else(|| symbol.clone());

    (message, symbol, details)
}

fn detail(item: &Value) -> Option<ApiErrorDetail> {
    let message = text_of(item)?;
    let attr = |key: &str| item.get(key).and_then(Value::as_text).map(str::to_string);
    Some(ApiErrorDetail {
        field: attr("@field"),
        symbol: attr("@symbol"),
        message,
    })
}

fn describe(detail: &ApiErrorDetail) -> String {
    match &detail.field {
        Some(field) => format!("{field} {}", detail.message),
        None => detail.message.clone(),
    }
}

/// Text of a leaf, or the `#text` of an element that also carries attributes.
fn text_of(value: &Value) -> Option<String> {
    value
        .as_text()
        .or_else(|| value.get("#text").and_then(Value::as_text))
        .map(str::to_string)
}

fn fallback_message(status: u16) -> String {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("unexpected status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::XmlCodec;
    use crate::error::ErrorKind;

    fn run(status: u16, body: &str, accepted: AcceptedStatus) -> Option<ResourceError> {
        let response = RawResponse::new(status, body);
        normalize(Ok(&response), accepted, &XmlCodec::default())
    }

    #[test]
    fn test_accepted_status_is_success_regardless_of_body() {
        assert_eq!(run(201, "<purchase/>", AcceptedStatus::CREATE), None);
        assert_eq!(run(204, "", AcceptedStatus::CREATE), None);
        assert_eq!(run(200, "not xml at all", AcceptedStatus::CREATE), None);
    }

    #[test]
    fn test_transport_failure_is_connection_error() {
        let err = TransportError("connection reset".into());
        let result = normalize(Err(&err), AcceptedStatus::CREATE, &XmlCodec::default());
        assert_eq!(result, Some(ResourceError::Connection("connection reset".into())));
    }

    #[test]
    fn test_single_error_document() {
        let body = r#"<error>
            <symbol>not_found</symbol>
            <description lang="en-US">Couldn't find Account with account_code = abc</description>
        </error>"#;
        let err = run(404, body, AcceptedStatus::FETCH).unwrap();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(404));
        match err {
            ResourceError::Api {
                message, symbol, ..
            } => {
                assert_eq!(message, "Couldn't find Account with account_code = abc");
                assert_eq!(symbol.as_deref(), Some("not_found"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_field_errors_document() {
        let body = r#"<errors>
            <error field="purchase.currency" symbol="blank">can't be blank</error>
            <error field="purchase.account.account_code" symbol="taken">has already been taken</error>
        </errors>"#;
        match run(422, body, AcceptedStatus::CREATE).unwrap() {
            ResourceError::Api {
                status,
                message,
                details,
                ..
            } => {
                assert_eq!(status, 422);
                assert_eq!(message, "purchase.currency can't be blank");
                assert_eq!(details.len(), 2);
                assert_eq!(details[1].symbol.as_deref(), Some("taken"));
                assert_eq!(
                    details[1].field.as_deref(),
                    Some("purchase.account.account_code")
                );
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_reason() {
        match run(503, "<html>oops", AcceptedStatus::FETCH).unwrap() {
            ResourceError::Api { message, details, .. } => {
                assert_eq!(message, "Service Unavailable");
                assert!(details.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(run(599, "", AcceptedStatus::FETCH).unwrap().message(), "unexpected status 599");
    }
}
