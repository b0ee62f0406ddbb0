use std::thread;
use std::time::Duration;

use crate::candidate::CandidateId;
use crate::coordination::path::ElectionPath;
use crate::coordination::{CoordinationClient, CoordinationEvent, SessionState};
use crate::errors::{new_err, ElectionError, ElectionErrorKind, Result};
use crate::leadership::backoff::Backoff;
use crate::leadership::registrar;
use crate::leadership::resolver::{self, Decision};
use crate::leadership::status::observer::ElectionNotifier;
use crate::leadership::status::{CandidateStatus, ElectionStatus, Role};
use crate::node::configuration::ElectionLimits;


/// Election protocol state machine.
///
/// The engine owns the election state exclusively: it is driven by `start` on the caller's
/// thread and then by `handle_event` on the dispatcher thread, never by both at once.
/// Observers only see the snapshots pushed through the notifier.
pub struct ElectionEngine<Cc, Bp, En>
where
	Cc: CoordinationClient,
	Bp: Backoff,
	En: ElectionNotifier,
{
	client: Cc,
	election_path: ElectionPath,
	backoff: Bp,
	limits: ElectionLimits,
	notifier: En,
	state: ElectionStatus,
	session: SessionState,
	resolution_deferred: bool,
	deferred_rounds: u32,
	// last role and leader sent to the role change listeners
	announced_role: Role,
	announced_leader: Option<CandidateId>,
}

impl<Cc, Bp, En> ElectionEngine<Cc, Bp, En>
where
	Cc: CoordinationClient,
	Bp: Backoff,
	En: ElectionNotifier,
{
	pub fn new(client: Cc, election_path: ElectionPath, backoff: Bp, limits: ElectionLimits, notifier: En) -> ElectionEngine<Cc, Bp, En> {
		let engine = ElectionEngine {
			client,
			election_path,
			backoff,
			limits,
			notifier,
			state: ElectionStatus::default(),
			session: SessionState::Connected,
			resolution_deferred: false,
			deferred_rounds: 0,
			announced_role: Role::Unresolved,
			announced_leader: None,
		};
		engine.notifier.publish_status(engine.state.clone());

		engine
	}

	pub fn state(&self) -> &ElectionStatus {
		&self.state
	}

	pub fn session_state(&self) -> SessionState {
		self.session
	}

	/// True when the last resolution round ran out of attempts and waits for a retry.
	pub fn is_resolution_deferred(&self) -> bool {
		self.resolution_deferred
	}

	/// Delay before the deferred resolution round is retried, if one is pending.
	pub fn deferred_resolution_timeout(&self) -> Option<Duration> {
		if !self.is_resolution_deferred() {
			return None;
		}

		let attempt = self.limits.max_resolve_attempts.max(1) + self.deferred_rounds;
		Some(self.backoff.next_backoff_timeout(attempt))
	}

	/// Retries a deferred resolution round. Fails the election once
	/// `max_deferred_resolutions` rounds were retried without a decision.
	pub fn retry_deferred_resolution(&mut self) {
		if !self.resolution_deferred || self.state.status != CandidateStatus::Resolving {
			trace!("No deferred resolution in status {}", self.state.status);
			return;
		}

		self.resolution_deferred = false;
		if self.deferred_rounds >= self.limits.max_deferred_resolutions {
			let err = ElectionError::new(ElectionErrorKind::ResolutionTransientFailure,
										 format!("Leadership unresolved after {} deferred rounds", self.deferred_rounds),
										 String::new());
			self.fail(&err);
			return;
		}

		self.deferred_rounds += 1;
		info!("Candidate {:?} retries deferred resolution, round {}", self.state.candidate_id, self.deferred_rounds);
		self.reresolve();
	}

	/// Registers the candidate entry and runs the first resolution.
	pub fn start(&mut self) -> Result<()> {
		if self.state.status != CandidateStatus::Unregistered {
			return new_err(ElectionErrorKind::RegistrationFailed,
						   format!("Election already started. Status: {}", self.state.status),
						   String::new());
		}

		let result = self.join_election();
		if let Err(err) = &result {
			self.fail(err);
		}

		result
	}

	pub fn handle_event(&mut self, event: CoordinationEvent) {
		trace!("Candidate {:?} received {:?} in status {}", self.state.candidate_id, event, self.state.status);

		match event {
			CoordinationEvent::SessionDisconnected => self.lose_session(SessionState::Disconnected),
			CoordinationEvent::SessionExpired => self.lose_session(SessionState::Expired),
			CoordinationEvent::SessionConnected => self.restore_session(),
			CoordinationEvent::NodeDeleted(path) => self.on_node_deleted(&path),
		}
	}

	fn join_election(&mut self) -> Result<()> {
		let result = self.register_and_resolve();

		self.recover_missing_entry(result)
	}

	fn register_and_resolve(&mut self) -> Result<()> {
		self.set_status(CandidateStatus::Registering);
		let candidate_id = registrar::register(&self.client, &self.election_path)?;
		self.state.candidate_id = Some(candidate_id);

		self.set_status(CandidateStatus::Resolving);
		self.resolve_leadership()
	}

	// A vanished own entry invalidates the identity: one fresh registration is allowed.
	fn recover_missing_entry(&mut self, result: Result<()>) -> Result<()> {
		match result {
			Err(ref err) if err.kind() == ElectionErrorKind::SelfEntryMissing => {
				warn!("{} Registering again", err);
				self.clear_state(CandidateStatus::Unregistered);
				self.register_and_resolve()
			}
			result => result,
		}
	}

	fn resolve_leadership(&mut self) -> Result<()> {
		let candidate_id = match self.state.candidate_id.clone() {
			Some(candidate_id) => candidate_id,
			None => {
				return new_err(ElectionErrorKind::SelfEntryMissing,
							   "No candidate entry registered in the current session".to_string(),
							   String::new());
			}
		};

		let max_attempts = self.limits.max_resolve_attempts.max(1);
		for attempt in 1..=max_attempts {
			match resolver::resolve(&self.client, &self.election_path, &candidate_id) {
				Ok(decision) => {
					self.deferred_rounds = 0;
					self.apply_decision(decision);
					return Ok(());
				}
				Err(err) => {
					if err.kind() != ElectionErrorKind::ResolutionTransientFailure {
						return Err(err);
					}

					warn!("Candidate {} resolution attempt {}/{} failed: {}", candidate_id, attempt, max_attempts, err);
					if attempt < max_attempts {
						thread::sleep(self.backoff.next_backoff_timeout(attempt));
					}
				}
			}
		}

		warn!("Candidate {} defers resolution", candidate_id);
		self.resolution_deferred = true;

		Ok(())
	}

	fn apply_decision(&mut self, decision: Decision) {
		match decision {
			Decision::Leader => {
				self.state.status = CandidateStatus::Leader;
				self.state.role = Role::Leader;
				self.state.leader_id = self.state.candidate_id.clone();
				self.state.watched_predecessor = None;
			}
			Decision::Follower { leader, predecessor } => {
				self.state.status = CandidateStatus::Following;
				self.state.role = Role::Follower;
				self.state.leader_id = Some(leader);
				self.state.watched_predecessor = Some(predecessor);
			}
		}
		self.notifier.publish_status(self.state.clone());

		if self.announced_role == self.state.role && self.announced_leader == self.state.leader_id {
			debug!("Candidate {:?} keeps role {}", self.state.candidate_id, self.state.role);
			return;
		}

		match self.state.role {
			Role::Leader => info!("Candidate {:?} is the leader now", self.state.candidate_id),
			_ => info!("Candidate {:?} follows leader {:?}, watching predecessor {:?}",
					   self.state.candidate_id, self.state.leader_id, self.state.watched_predecessor),
		}
		self.announce_role();
	}

	fn on_node_deleted(&mut self, path: &str) {
		let watched_path = match (&self.state.status, &self.state.watched_predecessor) {
			(CandidateStatus::Following, Some(predecessor)) => self.election_path.full_path(predecessor),
			_ => {
				trace!("Ignoring deletion of {} in status {}", path, self.state.status);
				return;
			}
		};

		if watched_path != path {
			trace!("Ignoring deletion of {}: watching {}", path, watched_path);
			return;
		}

		info!("Predecessor {} deleted. Candidate {:?} resolves leadership again", path, self.state.candidate_id);
		self.state.role = Role::Unresolved;
		self.state.leader_id = None;
		self.state.watched_predecessor = None;
		self.set_status(CandidateStatus::Resolving);
		self.reresolve();
	}

	fn reresolve(&mut self) {
		let result = self.resolve_leadership();
		let result = self.recover_missing_entry(result);

		if let Err(err) = result {
			self.fail(&err);
		}
	}

	fn lose_session(&mut self, session: SessionState) {
		self.session = session;

		match self.state.status {
			CandidateStatus::SessionLost | CandidateStatus::Fatal => {
				trace!("Session {} in status {}", session, self.state.status);
				return;
			}
			_ => {}
		}

		warn!("Session {}. Candidate {:?} discards its election state", session, self.state.candidate_id);
		self.clear_state(CandidateStatus::SessionLost);
		self.notifier.notify_session_lost(format!("Coordination session {}", session));
	}

	fn restore_session(&mut self) {
		self.session = SessionState::Connected;

		match self.state.status {
			CandidateStatus::SessionLost => {
				info!("Coordination session restored");
				self.set_status(CandidateStatus::Unregistered);

				if self.limits.rejoin_after_session_loss {
					if let Err(err) = self.join_election() {
						self.fail(&err);
					}
				}
			}
			CandidateStatus::Resolving if self.resolution_deferred => {
				info!("Coordination session reconnected");
				self.retry_deferred_resolution();
			}
			status => trace!("Session connected in status {}", status),
		}
	}

	fn fail(&mut self, err: &ElectionError) {
		error!("Candidate {:?} election failed: {}", self.state.candidate_id, err);

		self.clear_state(CandidateStatus::Fatal);
		self.notifier.notify_session_lost(format!("Election failed: {}", err));
	}

	fn clear_state(&mut self, status: CandidateStatus) {
		self.state = ElectionStatus {
			status,
			..ElectionStatus::default()
		};
		self.resolution_deferred = false;
		self.deferred_rounds = 0;
		self.notifier.publish_status(self.state.clone());

		if self.announced_role != Role::Unresolved {
			self.announce_role();
		}
	}

	fn announce_role(&mut self) {
		self.announced_role = self.state.role;
		self.announced_leader = self.state.leader_id.clone();
		self.notifier.notify_role_change(self.state.clone());
	}

	fn set_status(&mut self, status: CandidateStatus) {
		debug!("Candidate {:?} status {} -> {}", self.state.candidate_id, self.state.status, status);

		self.state.status = status;
		self.notifier.publish_status(self.state.clone());
	}
}
