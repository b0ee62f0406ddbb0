use std::thread::JoinHandle;
use std::thread;
use crossbeam_channel::{Sender, Receiver};

/// Background thread with a termination channel.
#[derive(Debug)]
pub struct Worker {
    pub join_handle : JoinHandle<()>,
    pub terminate_worker_tx : Sender<()>
}

pub fn run_worker<T: Send + 'static, F: Fn(T, Receiver<()>) + Send + 'static>(worker : F, params : T) -> Worker {
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) = crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move|| worker (params, terminate_worker_rx));

    Worker{join_handle, terminate_worker_tx}
}

impl Worker {
    pub fn terminate(&self) {
        let send_result = self.terminate_worker_tx.send(());
        if send_result.is_err() {
            error!("Cannot send termination signal")
        }
    }

    pub fn join(self) {
        let join_result = self.join_handle.join();
        if join_result.is_err() {
            error!("Worker returned an error")
        }
    }
}
