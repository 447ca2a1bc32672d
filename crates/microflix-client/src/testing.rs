//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::normalize::RawResponse;
use crate::transport::{OutboundRequest, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Response(RawResponse),
    Failure(String),
}

/// Records every request and answers from a queue; the last reply repeats.
#[derive(Debug, Clone, Default)]
pub(crate) struct StubTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    sent: Arc<Mutex<Vec<OutboundRequest>>>,
}

impl StubTransport {
    pub(crate) fn replying(response: RawResponse) -> Self {
        let stub = Self::default();
        stub.push(Reply::Response(response));
        stub
    }

    pub(crate) fn failing(message: &str) -> Self {
        let stub = Self::default();
        stub.push(Reply::Failure(message.to_string()));
        stub
    }

    fn push(&self, reply: Reply) {
        self.replies.lock().expect("replies lock").push_back(reply);
    }

    pub(crate) fn last_request(&self) -> Option<OutboundRequest> {
        self.sent.lock().expect("sent lock").last().cloned()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        self.sent.lock().expect("sent lock").push(request);
        let reply = {
            let mut replies = self.replies.lock().expect("replies lock");
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(ApiError::Transport(message.into())),
            None => Ok(RawResponse::empty(204)),
        }
    }
}
