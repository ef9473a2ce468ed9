use crate::container::Container;
use crate::controller::ControllerResult;
use crate::request::Request;

use super::core::MiddlewareEntry;

/// An ordered middleware stack around one terminal function.
///
/// The chain borrows everything it touches, so it costs nothing to build per
/// dispatch. Entries are materialized lazily as execution reaches them.
pub struct Chain<'a> {
    entries: &'a [MiddlewareEntry],
    container: &'a dyn Container,
    terminal: &'a (dyn Fn(Request) -> ControllerResult + 'a),
}

impl<'a> Chain<'a> {
    pub fn new(
        entries: &'a [MiddlewareEntry],
        container: &'a dyn Container,
        terminal: &'a (dyn Fn(Request) -> ControllerResult + 'a),
    ) -> Self {
        Self {
            entries,
            container,
            terminal,
        }
    }

    /// Run the whole chain, ending in the terminal function unless a
    /// middleware stops early.
    pub fn run(&self, request: Request) -> ControllerResult {
        self.run_from(0, request)
    }

    fn run_from(&self, index: usize, request: Request) -> ControllerResult {
        match self.entries.get(index) {
            Some(entry) => {
                let middleware = entry.materialize(self.container)?;
                middleware.handle(
                    request,
                    Next {
                        chain: self,
                        index: index + 1,
                    },
                )
            }
            None => (self.terminal)(request),
        }
    }
}

/// Continuation handed to each middleware: the rest of the chain.
///
/// `run` takes `&self`, so a middleware may invoke its continuation more
/// than once (retries) or not at all (short-circuit).
pub struct Next<'a> {
    chain: &'a Chain<'a>,
    index: usize,
}

impl Next<'_> {
    pub fn run(&self, request: Request) -> ControllerResult {
        self.chain.run_from(self.index, request)
    }
}
