/*
[INPUT]:  Operation descriptor, variables, optional access token
[OUTPUT]: Value (or typed struct) at the operation's response path
[POS]:    HTTP layer - generic GraphQL request dispatcher
[UPDATE]: When changing envelope classification, headers or retry rules
*/

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::graphql::{Operation, RequestEnvelope, ResponseEnvelope};
use crate::http::{LensClient, LensError, Result};
use crate::types::AccessToken;

impl LensClient {
    /// Execute a catalog operation and return the value at its response path
    ///
    /// Queries are retried on transient network failures according to the
    /// client's retry policy; mutations are sent exactly once.
    pub async fn execute(
        &self,
        operation: &Operation,
        variables: Value,
        token: Option<&AccessToken>,
    ) -> Result<Value> {
        let max_retries = if operation.is_idempotent() {
            self.config().retry.max_retries
        } else {
            0
        };

        let mut attempt = 0;
        loop {
            let result = self
                .execute_document(
                    operation.name,
                    operation.document,
                    variables.clone(),
                    operation.auth_required,
                    token,
                )
                .await;

            match result {
                Ok(envelope) => return envelope.into_data_at(operation.response_path),
                Err(err) if attempt < max_retries && err.is_retryable() => {
                    let delay = err
                        .retry_delay()
                        .map(std::time::Duration::from_secs)
                        .unwrap_or_else(|| self.config().retry.delay_for(attempt));
                    warn!(
                        operation = operation.name,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying operation"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Execute a catalog operation with typed variables and a typed result
    pub async fn execute_typed<V, T>(
        &self,
        operation: &Operation,
        variables: &V,
        token: Option<&AccessToken>,
    ) -> Result<T>
    where
        V: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let variables = serde_json::to_value(variables)?;
        let value = self.execute(operation, variables, token).await?;
        serde_json::from_value(value).map_err(|e| {
            LensError::Protocol(format!(
                "unexpected {} response shape: {e}",
                operation.name
            ))
        })
    }

    /// Send one GraphQL document and classify the response envelope
    ///
    /// Fails with `MissingToken` before any I/O when `auth_required` is set and
    /// no token is supplied. A non-empty `errors` array is an `Api` error even
    /// when `data` is also present.
    pub async fn execute_document(
        &self,
        operation_name: &str,
        query: &str,
        variables: Value,
        auth_required: bool,
        token: Option<&AccessToken>,
    ) -> Result<ResponseEnvelope> {
        let token = match (auth_required, token) {
            (true, None) => {
                return Err(LensError::MissingToken {
                    operation: operation_name.to_string(),
                });
            }
            (true, Some(token)) => Some(token),
            (false, _) => None,
        };

        let headers = self.build_headers(token)?;
        let body = RequestEnvelope {
            operation_name,
            variables,
            query,
        };

        debug!(operation = operation_name, authorized = token.is_some(), "sending operation");

        let response = self
            .http()
            .post(self.api_url().clone())
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        let envelope: ResponseEnvelope = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(LensError::http_status(status, &bytes)),
            Err(e) => {
                return Err(LensError::Protocol(format!(
                    "{operation_name} response is not valid JSON: {e}"
                )));
            }
        };

        envelope.check_errors()?;

        if !status.is_success() {
            return Err(LensError::http_status(status, &bytes));
        }

        debug!(operation = operation_name, status = status.as_u16(), "operation completed");
        Ok(envelope)
    }

    pub(crate) fn transport_error(&self, err: reqwest::Error) -> LensError {
        if err.is_timeout() {
            LensError::Timeout {
                duration: self.config().timeout,
            }
        } else {
            LensError::Network(err)
        }
    }
}
