use crossbeam_channel::Receiver;
use derive_more::Display;

use crate::errors::ElectionError;

pub mod path;

/// Last known state of the coordination session as seen through its events.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum SessionState {
    Connected,
    Disconnected,
    Expired,
}

/// Notification delivered by the coordination service to the session owner.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum CoordinationEvent {
    /// Session established (or re-established) and usable.
    SessionConnected,

    /// Connection to the service dropped.
    SessionDisconnected,

    /// Session expired server-side. All its ephemeral nodes are gone.
    SessionExpired,

    /// A watched node was deleted. Carries the full node path.
    NodeDeleted(String),
}

impl CoordinationEvent {
    /// True for the events which invalidate the session and all its watches.
    pub fn is_session_loss(&self) -> bool {
        match self {
            CoordinationEvent::SessionDisconnected | CoordinationEvent::SessionExpired => true,
            _ => false,
        }
    }
}

/// API abstraction for the ZooKeeper-like coordination service client.
/// All calls are blocking and bound to the client's current session.
pub trait CoordinationClient: Clone + Send + 'static {
    /// Creates an ephemeral sequential node. Returns the full path including the
    /// service-assigned sequence suffix.
    fn create_ephemeral_sequential(&self, path_prefix: &str) -> Result<String, ElectionError>;

    /// Lists the child names (not full paths) of the namespace node.
    fn list_children(&self, namespace: &str) -> Result<Vec<String>, ElectionError>;

    /// Checks the node existence and arms a one-shot deletion watch on it.
    fn exists_with_watch(&self, path: &str) -> Result<bool, ElectionError>;
}

/// Abstraction for the channel delivering the session and watch notifications.
pub trait CoordinationEventChannel {
    /// Returns receiver channel for the coordination events of the session.
    fn coordination_event_rx(&self) -> Receiver<CoordinationEvent>;
}
