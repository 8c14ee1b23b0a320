use awc::error::SendRequestError;
use awc::http::StatusCode;
use awc::http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use awc::{Client, ClientRequest, SendClientRequest};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use vmws_config::definitions::{TOOL_NAME, VMREST_MEDIA_TYPE};
use vmws_utils::errors::VmwsError;

/// vmrest answers power changes only once the guest has reacted, which can take a while.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body vmrest sends along with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(rename = "Message", alias = "message")]
    message: String,
}

pub struct Request {
    request: ClientRequest,
    vm_id: Option<String>,
}

impl Request {
    fn new(request: ClientRequest) -> Self {
        Self {
            request: request
                .insert_header((USER_AGENT, TOOL_NAME))
                .insert_header((ACCEPT, VMREST_MEDIA_TYPE)),
            vm_id: None,
        }
    }

    fn client() -> Client {
        Client::builder().timeout(REQUEST_TIMEOUT).finish()
    }

    pub fn get(url: &str) -> Self {
        Self::new(Self::client().get(url))
    }

    pub fn put(url: &str) -> Self {
        Self::new(Self::client().put(url))
    }

    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.request = self.request.basic_auth(username, password);
        self
    }

    /// Marks the request as addressing a single VM so that a 404 maps to `VmNotFound`.
    pub fn vm(mut self, vm_id: &str) -> Self {
        self.vm_id = Some(vm_id.to_owned());
        self
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T, VmwsError> {
        debug!("sending {} request to {}", self.request.get_method(), self.request.get_uri());
        let send_request = self.request.send();
        Self::do_send(send_request, self.vm_id).await
    }

    pub async fn json_with_data<T, V>(self, data: &T) -> Result<V, VmwsError>
    where
        T: Serialize,
        V: DeserializeOwned,
    {
        debug!("sending {} request to {}", self.request.get_method(), self.request.get_uri());
        let send_request = self
            .request
            .insert_header((CONTENT_TYPE, VMREST_MEDIA_TYPE))
            .send_json(data);
        Self::do_send(send_request, self.vm_id).await
    }

    /// Sends the request and returns only the status code.
    pub async fn status(self) -> Result<StatusCode, VmwsError> {
        let response = self.request.send().await.map_err(send_error)?;
        Ok(response.status())
    }

    async fn do_send<T: DeserializeOwned>(
        send_request: SendClientRequest,
        vm_id: Option<String>,
    ) -> Result<T, VmwsError> {
        let mut response = send_request.await.map_err(send_error)?;
        let status = response.status();
        debug!("response from server status: {status}");
        let body = response
            .body()
            .await
            .map_err(|e| VmwsError::ProtocolError(format!("unable to read response body: {e}")))?;

        if status.is_success() {
            return serde_json::from_slice::<T>(&body).map_err(|e| {
                VmwsError::ProtocolError(format!("response body is not the expected json: {e}"))
            });
        }

        match (status, vm_id) {
            (StatusCode::UNAUTHORIZED, _) => Err(VmwsError::Unauthorized),
            (StatusCode::NOT_FOUND, Some(vm_id)) => Err(VmwsError::VmNotFound(vm_id)),
            (st, _) => Err(VmwsError::OperationRejected {
                status: st.as_u16(),
                message: server_message(&body, st),
            }),
        }
    }
}

fn server_message(body: &[u8], status: StatusCode) -> String {
    if let Ok(message) = serde_json::from_slice::<ServerMessage>(body) {
        return message.message;
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        format!("request failed with status code: {status}")
    } else {
        text
    }
}

fn send_error(error: SendRequestError) -> VmwsError {
    debug!("request could not be completed: {error}");
    match error {
        SendRequestError::Connect(_) => VmwsError::ServerUnreachable(error.to_string()),
        SendRequestError::Timeout => VmwsError::ProtocolError(format!(
            "no response within {}s",
            REQUEST_TIMEOUT.as_secs()
        )),
        SendRequestError::Url(_) => VmwsError::ConfigInvalid(format!("base_url: {error}")),
        e => VmwsError::ProtocolError(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_vmrest_message_field() {
        let body = br#"{"Code":106,"Message":"The operation is not supported"}"#;
        assert_eq!(
            server_message(body, StatusCode::BAD_REQUEST),
            "The operation is not supported"
        );
    }

    #[test]
    fn only_connect_failures_are_unreachable() {
        assert!(matches!(
            send_error(SendRequestError::Timeout),
            VmwsError::ProtocolError(_)
        ));
        assert!(matches!(
            send_error(SendRequestError::Connect(awc::error::ConnectError::Disconnected)),
            VmwsError::ServerUnreachable(_)
        ));
    }

    #[test]
    fn server_message_falls_back_to_text_or_status() {
        assert_eq!(
            server_message(b"  busy  ", StatusCode::CONFLICT),
            "busy"
        );
        assert_eq!(
            server_message(b"", StatusCode::INTERNAL_SERVER_ERROR),
            "request failed with status code: 500 Internal Server Error"
        );
    }
}
