//! Attendance service client - login and clock event submission.
//!
//! The upstream contract is loose: the clock endpoint answers with plain
//! `ok`, a JSON object, or anything else, and success has to be read from
//! a combination of status code and body. [`interpret_clock_response`]
//! pins that down as an ordered policy.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use serde_json::Value;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::http::describe_transport_error;
use crate::config::{
    Config, CLOCK_EVENT_PATH, JSON_CONTENT_TYPE, LOGIN_PATH, MSG_REGISTERED, MSG_REGISTER_FAILED,
};
use crate::domain::{ClockEvent, EmployeeId, Session};
use crate::errors::{AppError, AppResult};

/// Status codes the clock endpoint uses for an accepted event
const CLOCK_ACCEPTED: [u16; 2] = [200, 201];

/// Remote attendance API.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// Log in and obtain a single-use session.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Session>;

    /// Submit one clock event. Returns the message to show on success.
    async fn submit_clock_event(&self, session: &Session, event: &ClockEvent) -> AppResult<String>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// reqwest implementation of [`AttendanceApi`].
#[derive(Clone)]
pub struct HttpAttendanceClient {
    client: Client,
    login_url: String,
    clock_url: String,
}

impl HttpAttendanceClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            login_url: config.api_url(LOGIN_PATH),
            clock_url: config.api_url(CLOCK_EVENT_PATH),
        }
    }
}

#[async_trait]
impl AttendanceApi for HttpAttendanceClient {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Session> {
        tracing::debug!(url = %self.login_url, "Authenticating");

        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| AppError::AuthNetwork(describe_transport_error(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::AuthNetwork(describe_transport_error(&e)))?;

        parse_login_response(status, &body)
    }

    async fn submit_clock_event(&self, session: &Session, event: &ClockEvent) -> AppResult<String> {
        tracing::debug!(url = %self.clock_url, employee = %event.employee_id, "Submitting clock event");

        let payload = serde_json::to_vec(event)
            .map_err(|e| AppError::internal(format!("Failed to encode clock event: {}", e)))?;

        let response = self
            .client
            .post(&self.clock_url)
            .bearer_auth(&session.token)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                AppError::registration(format!(
                    "Falha ao registrar ponto: {}",
                    describe_transport_error(&e)
                ))
            })?;

        let status = response.status().as_u16();
        // An unreadable body is treated like an empty one; the status decides
        let body = response.text().await.unwrap_or_default();

        tracing::debug!(status, "Clock endpoint answered");
        interpret_clock_response(status, &body)
    }
}

/// Validate the login answer and extract the session.
///
/// Only `200` is accepted. The body must be a JSON object carrying a
/// non-empty `token` and `employee[0].idMutuario`.
pub fn parse_login_response(status: u16, body: &str) -> AppResult<Session> {
    if status != 200 {
        return Err(AppError::auth_protocol(format!(
            "Falha na autenticação: {}",
            status
        )));
    }

    if body.trim().is_empty() {
        return Err(AppError::auth_protocol("Resposta de autenticação vazia"));
    }

    let data: Value = serde_json::from_str(body).map_err(|e| {
        AppError::auth_protocol(format!(
            "Erro ao processar resposta de autenticação: {}",
            e
        ))
    })?;

    let token = data
        .get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::auth_protocol("Falha ao obter token de autenticação"))?;

    let employee_id = data
        .get("employee")
        .and_then(|employees| employees.get(0))
        .and_then(|first| first.get("idMutuario"))
        .cloned()
        .and_then(EmployeeId::from_value)
        .ok_or_else(|| AppError::auth_protocol("Falha ao obter idMutuario"))?;

    Ok(Session::new(token, employee_id))
}

/// Normalize the clock endpoint answer into a message or a failure.
///
/// In order:
/// 1. accepted status and body `ok` (any case, trimmed): default success message
/// 2. body is JSON: its `message` field (or a default), success decided by status
/// 3. accepted status, body not JSON: default success message
/// 4. otherwise: raw trimmed body, or `Erro <status>` when empty
pub fn interpret_clock_response(status: u16, body: &str) -> AppResult<String> {
    let accepted = CLOCK_ACCEPTED.contains(&status);
    let trimmed = body.trim();

    if accepted && trimmed.eq_ignore_ascii_case("ok") {
        return Ok(MSG_REGISTERED.to_string());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let message = json.get("message").and_then(message_text);
            if accepted {
                Ok(message.unwrap_or_else(|| MSG_REGISTERED.to_string()))
            } else {
                Err(AppError::registration(
                    message.unwrap_or_else(|| MSG_REGISTER_FAILED.to_string()),
                ))
            }
        }
        Err(_) if accepted => Ok(MSG_REGISTERED.to_string()),
        Err(_) if trimmed.is_empty() => Err(AppError::registration(format!("Erro {}", status))),
        Err(_) => Err(AppError::registration(trimmed)),
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
