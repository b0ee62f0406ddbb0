use std::time::Instant;

use crossbeam_channel::{after, never, Receiver};

use crate::coordination::{CoordinationClient, CoordinationEvent};
use crate::leadership::backoff::Backoff;
use crate::leadership::engine::ElectionEngine;
use crate::leadership::status::observer::ElectionNotifier;

pub struct EventDispatcherParams<Cc, Bp, En>
where
	Cc: CoordinationClient,
	Bp: Backoff,
	En: ElectionNotifier,
{
	pub engine: ElectionEngine<Cc, Bp, En>,
	pub coordination_event_rx: Receiver<CoordinationEvent>,
}

/// Single writer loop: feeds coordination events into the engine one by one and fires
/// deferred resolution retries after their backoff.
pub fn run_event_dispatcher<Cc, Bp, En>(
	params: EventDispatcherParams<Cc, Bp, En>,
	terminate_worker_rx: Receiver<()>,
) where
	Cc: CoordinationClient,
	Bp: Backoff,
	En: ElectionNotifier,
{
	info!("Election event dispatcher worker started");

	let EventDispatcherParams { mut engine, coordination_event_rx } = params;
	let mut retry_deadline: Option<Instant> = None;
	loop {
		retry_deadline = match (engine.deferred_resolution_timeout(), retry_deadline) {
			(Some(_), Some(deadline)) => Some(deadline),
			(Some(timeout), None) => Some(Instant::now() + timeout),
			(None, _) => None,
		};
		let retry_timer = match retry_deadline {
			Some(deadline) => after(deadline.saturating_duration_since(Instant::now())),
			None => never(),
		};

		select!(
			recv(terminate_worker_rx) -> res  => {
				if res.is_err() {
					error!("Abnormal exit for election event dispatcher worker");
				}
				break
			},
			recv(retry_timer) -> _ => {
				retry_deadline = None;
				engine.retry_deferred_resolution();
			},
			recv(coordination_event_rx) -> event_result => {
				let event = match event_result {
					Ok(event) => event,
					Err(err) => {
						error!("Coordination event channel closed: {}", err);
						engine.handle_event(CoordinationEvent::SessionExpired);
						break
					}
				};

				let mut batch = vec![event];
				batch.extend(coordination_event_rx.try_iter());

				for event in prioritize_events(batch) {
					engine.handle_event(event);
				}
			}
		);
	}

	info!("Election event dispatcher worker stopped. Session {}", engine.session_state());
}

/// Orders a batch of queued events for delivery.
///
/// A session loss invalidates every watch armed before it, so everything queued ahead of
/// the last loss event is dropped and the loss is delivered first. Events that arrived after
/// it keep their order.
pub(crate) fn prioritize_events(mut batch: Vec<CoordinationEvent>) -> Vec<CoordinationEvent> {
	match batch.iter().rposition(|event| event.is_session_loss()) {
		Some(position) => {
			for dropped in &batch[..position] {
				trace!("Dropping {:?} superseded by session loss", dropped);
			}
			batch.split_off(position)
		}
		None => batch,
	}
}
