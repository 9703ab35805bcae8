//! Scripted transport for exercising the session without a network.

use std::cell::RefCell;
use std::collections::VecDeque;

use etcd2_transport::{Error as TransportError, HttpExecutor, HttpRequest, HttpResponse};

/// An executor that replays a fixed script of responses in order and
/// records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    script: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    recorded: RefCell<Vec<HttpRequest>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_ok(self, body: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back(Ok(ScriptedExecutor::response(200, body)));
        self
    }

    pub fn respond_status(self, status: u16, body: &str) -> Self {
        self.script
            .borrow_mut()
            .push_back(Ok(ScriptedExecutor::response(status, body)));
        self
    }

    pub fn respond_transport_failure(self) -> Self {
        self.script
            .borrow_mut()
            .push_back(Err(TransportError::Connection {
                message: "scripted transport failure".to_string(),
            }));
        self
    }

    pub fn recorded(&self) -> Vec<HttpRequest> {
        self.recorded.borrow().clone()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            status_text: String::new(),
            body: body.to_string(),
        }
    }
}

impl HttpExecutor for ScriptedExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.recorded.borrow_mut().push(request.clone());
        self.script
            .borrow_mut()
            .pop_front()
            .expect("scripted executor ran out of responses")
    }
}
