//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use serde_json::json;
use turnout::{
    Args, Controller, ControllerResult, Middleware, MiddlewareEntry, Next, Outcome, Publisher,
    Request, RouterError, Signature,
};

/// Publisher that records every outcome it receives.
#[derive(Default)]
pub struct CapturePublisher {
    outcomes: Mutex<Vec<Outcome>>,
}

impl CapturePublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn count(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Outcome> {
        self.outcomes.lock().unwrap().last().cloned()
    }
}

impl Publisher for CapturePublisher {
    fn publish(&self, outcome: &Outcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

/// Event log for middleware/controller ordering assertions.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Middleware entry that records `label` and continues.
pub fn tap(log: &EventLog, label: &str) -> MiddlewareEntry {
    let log = log.clone();
    let label = label.to_string();
    MiddlewareEntry::func(move |req, next| {
        log.lock().unwrap().push(label.clone());
        next.run(req)
    })
}

/// Controller that records `label` and returns it as the body.
pub fn recording_controller(log: &EventLog, label: &str) -> (Signature, impl Fn(Args) -> ControllerResult) {
    let log = log.clone();
    let label = label.to_string();
    (Signature::new(), move |_args: Args| {
        log.lock().unwrap().push(label.clone());
        Ok(Outcome::from(label.as_str()))
    })
}

/// Controller class fixture used by the class-reference tests.
pub struct UsersController;

impl Controller for UsersController {
    fn signature(&self, action: &str) -> Option<Signature> {
        match action {
            "index" => Some(Signature::new()),
            "show" => Some(Signature::new().value("id")),
            _ => None,
        }
    }

    fn call(&self, action: &str, args: Args) -> ControllerResult {
        match action {
            "index" => Ok(json!(["ana", "bo"]).into()),
            "show" => Ok(json!({ "id": args.str("id").unwrap_or("-") }).into()),
            other => Err(RouterError::InvalidController {
                reference: format!("Users@{other}"),
                reason: "action is not exposed".to_string(),
            }),
        }
    }
}

/// Middleware class fixture: stamps an attribute onto the request.
pub struct StampMiddleware {
    pub key: String,
    pub value: serde_json::Value,
}

impl Middleware for StampMiddleware {
    fn handle(&self, request: Request, next: Next<'_>) -> ControllerResult {
        next.run(request.with_attribute(self.key.clone(), self.value.clone()))
    }
}
