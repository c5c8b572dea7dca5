// src/store/store_server.rs — Async message passing for Store
//
// A single background task owns the rusqlite connection; every caller goes
// through the channel. This serializes all database access, which also keeps
// interleaved turns on the same session from corrupting history order.

use tokio::sync::{mpsc, oneshot};

use crate::store::store::{MessageRow, Store};

#[derive(Debug)]
pub enum StoreCommand {
    EnsureSession {
        id: String,
        user_id: String,
        resp: oneshot::Sender<anyhow::Result<()>>,
    },
    InsertMessage {
        id: String,
        session_id: String,
        role: String,
        content: String,
        resp: oneshot::Sender<anyhow::Result<()>>,
    },
    QueryMessages {
        session_id: String,
        resp: oneshot::Sender<anyhow::Result<Vec<MessageRow>>>,
    },
    InsertProjectData {
        id: String,
        session_id: String,
        payload: String,
        resp: oneshot::Sender<anyhow::Result<()>>,
    },
    LatestProjectData {
        session_id: String,
        resp: oneshot::Sender<anyhow::Result<Option<String>>>,
    },
}

/// A handle to the Store that uses message passing.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreCommand>,
}

impl StoreHandle {
    pub fn new(tx: mpsc::Sender<StoreCommand>) -> Self {
        Self { tx }
    }

    pub async fn ensure_session(&self, id: String, user_id: String) -> anyhow::Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::EnsureSession {
                id,
                user_id,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn insert_message(
        &self,
        id: String,
        session_id: String,
        role: String,
        content: String,
    ) -> anyhow::Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::InsertMessage {
                id,
                session_id,
                role,
                content,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn query_messages(&self, session_id: String) -> anyhow::Result<Vec<MessageRow>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::QueryMessages {
                session_id,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn insert_project_data(
        &self,
        id: String,
        session_id: String,
        payload: String,
    ) -> anyhow::Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::InsertProjectData {
                id,
                session_id,
                payload,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }

    pub async fn latest_project_data(&self, session_id: String) -> anyhow::Result<Option<String>> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx
            .send(StoreCommand::LatestProjectData {
                session_id,
                resp: resp_tx,
            })
            .await?;
        resp_rx.await?
    }
}

/// Helper to spawn the store server and return a handle.
pub fn spawn_store_server(store: Store) -> (StoreHandle, tokio::task::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(100);
    let handle = StoreHandle::new(tx);
    let join_handle = tokio::spawn(run_store_server(store, rx));
    (handle, join_handle)
}

/// The background task that owns the Store.
pub async fn run_store_server(store: Store, mut rx: mpsc::Receiver<StoreCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            StoreCommand::EnsureSession { id, user_id, resp } => {
                let res = store.ensure_session(&id, &user_id);
                let _ = resp.send(res);
            }
            StoreCommand::InsertMessage {
                id,
                session_id,
                role,
                content,
                resp,
            } => {
                let res = store.insert_message(&id, &session_id, &role, &content);
                let _ = resp.send(res);
            }
            StoreCommand::QueryMessages { session_id, resp } => {
                let res = store.query_messages(&session_id);
                let _ = resp.send(res);
            }
            StoreCommand::InsertProjectData {
                id,
                session_id,
                payload,
                resp,
            } => {
                let res = store.insert_project_data(&id, &session_id, &payload);
                let _ = resp.send(res);
            }
            StoreCommand::LatestProjectData { session_id, resp } => {
                let res = store.latest_project_data(&session_id);
                let _ = resp.send(res);
            }
        }
    }
}
