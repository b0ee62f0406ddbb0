use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::RwLock;

use crate::leadership::status::{ElectionStatus, Role};

/// Outbound notifications of the election engine.
pub trait ElectionNotifier: Send + 'static {
	fn publish_status(&self, status: ElectionStatus);
	fn notify_role_change(&self, status: ElectionStatus);
	fn notify_session_lost(&self, reason: String);
}

pub trait ElectionObserverChannelRx {
	fn role_change_rx(&self) -> &Receiver<ElectionStatus>;
	fn session_lost_rx(&self) -> &Receiver<String>;
}

/// Publishes engine snapshots behind a lock and forwards role changes and
/// session loss over channels. The engine is the only writer.
#[derive(Debug, Clone)]
pub struct ElectionObserver {
	status: Arc<RwLock<ElectionStatus>>,
	role_change_tx: Sender<ElectionStatus>,
	role_change_rx: Receiver<ElectionStatus>,
	session_lost_tx: Sender<String>,
	session_lost_rx: Receiver<String>,
}

impl ElectionObserver {
	pub fn new() -> ElectionObserver {
		let (role_change_tx, role_change_rx): (Sender<ElectionStatus>, Receiver<ElectionStatus>) =
			crossbeam_channel::unbounded();
		let (session_lost_tx, session_lost_rx): (Sender<String>, Receiver<String>) =
			crossbeam_channel::unbounded();

		ElectionObserver {
			status: Arc::new(RwLock::new(ElectionStatus::default())),
			role_change_tx,
			role_change_rx,
			session_lost_tx,
			session_lost_rx,
		}
	}

	pub fn status(&self) -> ElectionStatus {
		self.status.read().clone()
	}

	pub fn role(&self) -> Role {
		self.status.read().role
	}
}

impl Default for ElectionObserver {
	fn default() -> Self {
		ElectionObserver::new()
	}
}

impl ElectionNotifier for ElectionObserver {
	fn publish_status(&self, status: ElectionStatus) {
		*self.status.write() = status;
	}

	fn notify_role_change(&self, status: ElectionStatus) {
		if let Err(err) = self.role_change_tx.send(status) {
			warn!("Cannot send role change notification: {}", err);
		}
	}

	fn notify_session_lost(&self, reason: String) {
		if let Err(err) = self.session_lost_tx.send(reason) {
			warn!("Cannot send session lost notification: {}", err);
		}
	}
}

impl ElectionObserverChannelRx for ElectionObserver {
	fn role_change_rx(&self) -> &Receiver<ElectionStatus> {
		&self.role_change_rx
	}

	fn session_lost_rx(&self) -> &Receiver<String> {
		&self.session_lost_rx
	}
}
