//! # Mocks for Client Tests
//!
//! Domain clients (the wrappers around [`ResourceClient`]) often contain
//! logic of their own: mapping results, unwrapping action variants, resolving
//! external data before a create. These helpers let that logic be tested
//! without spawning a real [`ResourceActor`](crate::ResourceActor).
//!
//! Two styles are available:
//!
//! - **Scripted**: [`MockClient`] answers requests from a FIFO queue of
//!   expectations (`expect_get(id).return_ok(..)`), and [`MockClient::verify`]
//!   checks that the queue was drained.
//! - **Channel-level**: [`create_mock_client`] hands back the raw receiver;
//!   [`expect_create`], [`expect_get`], [`expect_list`] and [`expect_action`]
//!   pop the next request so the test can inspect the payload and reply by
//!   hand.
//!
//! | | MockClient | Channel-level | Real actor |
//! |---|---|---|---|
//! | Inspect payloads | no | yes | no |
//! | Error injection | `return_err` | reply with `Err` | needs real state |
//! | State | none | none | real |
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Seat { id: u32 }
//! #[derive(Debug)] struct SeatCreate;
//! #[derive(Debug, thiserror::Error)] #[error("seat error")] struct SeatError;
//!
//! #[async_trait]
//! impl ActorEntity for Seat {
//!     type Id = u32; type Create = SeatCreate; type Update = (); type Action = ();
//!     type ActionResult = (); type Query = (); type Context = (); type Error = SeatError;
//!     fn from_create_params(id: u32, _: SeatCreate) -> Result<Self, SeatError> { Ok(Self { id }) }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), SeatError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SeatError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Seat>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Outcome<T, R> = Result<R, FrameworkError<<T as ActorEntity>::Error>>;

/// A scripted reply, consumed in FIFO order.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Outcome<T, Option<T>>,
    },
    List {
        response: Outcome<T, Vec<T>>,
    },
    Create {
        response: Outcome<T, T::Id>,
    },
    Update {
        id: T::Id,
        response: Outcome<T, T>,
    },
    Delete {
        id: T::Id,
        response: Outcome<T, ()>,
    },
    Action {
        id: T::Id,
        response: Outcome<T, T::ActionResult>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A client backed by a queue of scripted replies instead of a real actor.
///
/// Requests must arrive in the order the expectations were registered; a
/// mismatched kind or id panics inside the mock task, which the caller then
/// observes as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with an empty expectation queue. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                match (request, next) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "mock get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "mock update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        assert_eq!(id, want, "mock delete called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        assert_eq!(id, want, "mock action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => panic!("unexpected request: {request:?}"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        self.reply(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Reply<T, Vec<T>> {
        self.reply(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> Reply<T, T::Id> {
        self.reply(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<T, T> {
        self.reply(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<T, ()> {
        self.reply(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<T, T::ActionResult> {
        self.reply(move |response| Expectation::Action { id, response })
    }

    /// Panics if any registered expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().expect("mock queue poisoned").len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn reply<R>(
        &mut self,
        build: impl FnOnce(Outcome<T, R>) -> Expectation<T> + Send + 'static,
    ) -> Reply<T, R> {
        Reply {
            queue: self.expectations.clone(),
            build: Box::new(build),
        }
    }
}

/// Finishes an expectation with the value the mock should answer.
pub struct Reply<T: ActorEntity, R> {
    queue: Queue<T>,
    build: Box<dyn FnOnce(Outcome<T, R>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError<T::Error>) {
        self.push(Err(error));
    }

    fn push(self, outcome: Outcome<T, R>) {
        let expectation = (self.build)(outcome);
        self.queue
            .lock()
            .expect("mock queue poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// A client plus the raw receiver its requests arrive on.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pops the next request if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a `List`.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Query, Response<Vec<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
