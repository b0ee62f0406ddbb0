use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use zk_election::{
    new_err, CoordinationClient, CoordinationEvent, CoordinationEventChannel, ElectionError,
    ElectionErrorKind,
};

#[derive(Clone, Debug)]
struct NamespaceNode {
    // None for persistent nodes
    owner_session: Option<u64>,
}

#[derive(Clone, Debug)]
struct Session {
    event_tx: Sender<CoordinationEvent>,
    connected: bool,
}

#[derive(Debug, Default)]
struct Namespace {
    nodes: BTreeMap<String, NamespaceNode>,
    sequences: HashMap<String, u64>,
    sessions: HashMap<u64, Session>,
    watches: HashMap<String, HashSet<u64>>,
    last_session_id: u64,
}

impl Namespace {
    fn open_session(&mut self, event_tx: Sender<CoordinationEvent>) -> u64 {
        self.last_session_id += 1;
        let session_id = self.last_session_id;

        self.sessions.insert(
            session_id,
            Session {
                event_tx,
                connected: true,
            },
        );
        self.send_event(session_id, CoordinationEvent::SessionConnected);

        session_id
    }

    fn check_session(&self, session_id: u64) -> Result<(), ElectionError> {
        match self.sessions.get(&session_id) {
            Some(session) if session.connected => Ok(()),
            _ => new_err(
                ElectionErrorKind::Coordination,
                format!("Session {} is not connected", session_id),
                String::new(),
            ),
        }
    }

    fn delete_node(&mut self, path: &str) -> bool {
        if self.nodes.remove(path).is_none() {
            return false;
        }

        trace!("Node {} deleted", path);
        if let Some(watchers) = self.watches.remove(path) {
            for session_id in watchers {
                self.send_event(session_id, CoordinationEvent::NodeDeleted(path.to_string()));
            }
        }

        true
    }

    // Removes the session with its ephemeral nodes and watches.
    fn close_session(&mut self, session_id: u64, event: Option<CoordinationEvent>) {
        let owned: Vec<String> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.owner_session == Some(session_id))
            .map(|(path, _)| path.clone())
            .collect();

        self.remove_watches(session_id);

        for path in owned {
            self.delete_node(&path);
        }

        if let Some(event) = event {
            self.send_event(session_id, event);
        }
        self.sessions.remove(&session_id);
    }

    fn remove_watches(&mut self, session_id: u64) {
        self.watches.retain(|_, watchers| {
            watchers.remove(&session_id);
            !watchers.is_empty()
        });
    }

    fn children(&self, namespace: &str) -> Vec<String> {
        let prefix = format!("{}/", namespace.trim_end_matches('/'));

        self.nodes
            .keys()
            .filter_map(|path| path.strip_prefix(prefix.as_str()))
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .map(|name| name.to_string())
            .collect()
    }

    fn send_event(&self, session_id: u64, event: CoordinationEvent) {
        if let Some(session) = self.sessions.get(&session_id) {
            if let Err(err) = session.event_tx.send(event) {
                debug!("Session {} event receiver is gone: {}", session_id, err);
            }
        }
    }
}

/// Basic in-memory ZooKeeper-like service: a hierarchical namespace with ephemeral
/// sequential nodes, one-shot deletion watches and session lifecycle.
#[derive(Clone, Debug, Default)]
pub struct MemoryCoordinationService {
    namespace: Arc<Mutex<Namespace>>,
}

impl MemoryCoordinationService {
    pub fn new() -> MemoryCoordinationService {
        MemoryCoordinationService::default()
    }

    /// Creates a persistent node, e.g. the election root.
    pub fn create_namespace(&self, path: &str) {
        let mut namespace = self.namespace.lock();

        namespace.nodes.insert(
            path.trim_end_matches('/').to_string(),
            NamespaceNode {
                owner_session: None,
            },
        );
    }

    /// Opens a new session. The `SessionConnected` event is already queued on the client.
    pub fn connect(&self) -> MemoryCoordinationClient {
        let (event_tx, event_rx): (Sender<CoordinationEvent>, Receiver<CoordinationEvent>) =
            crossbeam_channel::unbounded();

        let session_id = self.namespace.lock().open_session(event_tx.clone());
        debug!("Session {} opened", session_id);

        MemoryCoordinationClient {
            service: self.clone(),
            state: Arc::new(Mutex::new(ClientState {
                session_id,
                injected_failures: 0,
            })),
            event_tx,
            event_rx,
        }
    }

    /// Deletes a node regardless of its owner and fires its watches.
    pub fn delete_node(&self, path: &str) -> bool {
        self.namespace.lock().delete_node(path)
    }

    /// Child names of the namespace node, ordered by name.
    pub fn children(&self, namespace: &str) -> Vec<String> {
        self.namespace.lock().children(namespace)
    }
}

#[derive(Debug)]
struct ClientState {
    session_id: u64,
    injected_failures: u32,
}

/// Session-bound client of the MemoryCoordinationService. Clones share the session.
#[derive(Clone, Debug)]
pub struct MemoryCoordinationClient {
    service: MemoryCoordinationService,
    state: Arc<Mutex<ClientState>>,
    event_tx: Sender<CoordinationEvent>,
    event_rx: Receiver<CoordinationEvent>,
}

impl MemoryCoordinationClient {
    pub fn session_id(&self) -> u64 {
        self.state.lock().session_id
    }

    /// Makes the next `count` calls fail with a connectivity error.
    pub fn fail_next_calls(&self, count: u32) {
        self.state.lock().injected_failures = count;
    }

    /// Drops the connection. Calls fail until `reconnect`.
    pub fn disconnect(&self) {
        let session_id = self.session_id();
        let mut namespace = self.service.namespace.lock();

        if let Some(session) = namespace.sessions.get_mut(&session_id) {
            session.connected = false;
        }
        namespace.remove_watches(session_id);
        namespace.send_event(session_id, CoordinationEvent::SessionDisconnected);

        debug!("Session {} disconnected", session_id);
    }

    /// Expires the session: its ephemeral nodes are deleted and their watchers notified.
    pub fn expire_session(&self) {
        let session_id = self.session_id();

        self.service
            .namespace
            .lock()
            .close_session(session_id, Some(CoordinationEvent::SessionExpired));

        debug!("Session {} expired", session_id);
    }

    /// Replaces the current session with a fresh one. Ephemeral nodes of the old session are
    /// removed.
    pub fn reconnect(&self) {
        let mut state = self.state.lock();
        let mut namespace = self.service.namespace.lock();

        namespace.close_session(state.session_id, None);
        let old_session_id = state.session_id;
        state.session_id = namespace.open_session(self.event_tx.clone());

        debug!("Session {} replaced by session {}", old_session_id, state.session_id);
    }

    fn begin_call(&self, operation: &str) -> Result<u64, ElectionError> {
        let mut state = self.state.lock();

        if state.injected_failures > 0 {
            state.injected_failures -= 1;
            return new_err(
                ElectionErrorKind::Coordination,
                format!("{} failed: connection loss", operation),
                "injected failure".to_string(),
            );
        }

        Ok(state.session_id)
    }
}

impl CoordinationClient for MemoryCoordinationClient {
    fn create_ephemeral_sequential(&self, path_prefix: &str) -> Result<String, ElectionError> {
        let session_id = self.begin_call("Create")?;
        let mut namespace = self.service.namespace.lock();
        namespace.check_session(session_id)?;

        let parent = match path_prefix.rfind('/') {
            Some(0) => "/".to_string(),
            Some(position) => path_prefix[..position].to_string(),
            None => {
                return new_err(
                    ElectionErrorKind::Coordination,
                    format!("Invalid path {}", path_prefix),
                    String::new(),
                )
            }
        };
        if !namespace.nodes.contains_key(&parent) {
            return new_err(
                ElectionErrorKind::Coordination,
                format!("Parent node {} does not exist", parent),
                String::new(),
            );
        }

        let sequence = {
            let counter = namespace.sequences.entry(parent).or_insert(0);
            let sequence = *counter;
            *counter += 1;
            sequence
        };

        let path = format!("{}{:010}", path_prefix, sequence);
        namespace.nodes.insert(
            path.clone(),
            NamespaceNode {
                owner_session: Some(session_id),
            },
        );
        trace!("Session {} created {}", session_id, path);

        Ok(path)
    }

    fn list_children(&self, namespace_path: &str) -> Result<Vec<String>, ElectionError> {
        let session_id = self.begin_call("List")?;
        let namespace = self.service.namespace.lock();
        namespace.check_session(session_id)?;

        if !namespace.nodes.contains_key(namespace_path.trim_end_matches('/')) {
            return new_err(
                ElectionErrorKind::Coordination,
                format!("Node {} does not exist", namespace_path),
                String::new(),
            );
        }

        Ok(namespace.children(namespace_path))
    }

    fn exists_with_watch(&self, path: &str) -> Result<bool, ElectionError> {
        let session_id = self.begin_call("Exists")?;
        let mut namespace = self.service.namespace.lock();
        namespace.check_session(session_id)?;

        // only deletions are watched: nothing to watch on a missing node
        if !namespace.nodes.contains_key(path) {
            return Ok(false);
        }

        namespace
            .watches
            .entry(path.to_string())
            .or_insert_with(HashSet::new)
            .insert(session_id);

        Ok(true)
    }
}

impl CoordinationEventChannel for MemoryCoordinationClient {
    fn coordination_event_rx(&self) -> Receiver<CoordinationEvent> {
        self.event_rx.clone()
    }
}
