use std::{sync::mpsc, time::Duration};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win,
    Lose,
}

/// Creates the single-slot channel a game reports its outcome through.
pub(crate) fn channel() -> (Notifier, Outcomes) {
    let (tx, rx) = mpsc::sync_channel(1);
    (Notifier { tx: Some(tx) }, Outcomes { rx })
}

/// Producer half. Sends at most one outcome and hangs up right after, so a
/// waiting receiver always wakes up: either with the outcome or with the
/// channel closed.
#[derive(Debug)]
pub(crate) struct Notifier {
    tx: Option<mpsc::SyncSender<Outcome>>,
}

impl Notifier {
    /// Returns `false` if an outcome was already sent.
    pub(crate) fn notify(&mut self, outcome: Outcome) -> bool {
        let Some(tx) = self.tx.take() else {
            return false;
        };
        // the slot is empty because nothing was sent before, so this never blocks
        if tx.try_send(outcome).is_err() {
            log::warn!("outcome {:?} dropped, nobody is listening", outcome);
        }
        true
    }
}

/// Consumer half, yielding exactly one [`Outcome`] and then disconnecting.
///
/// The engine never times out on its own; pick a bound with
/// [`Outcomes::recv_timeout`] when waiting.
#[derive(Debug)]
pub struct Outcomes {
    rx: mpsc::Receiver<Outcome>,
}

impl Outcomes {
    /// Blocks until the game ends. Fails once the outcome was already taken or
    /// the game was dropped before ending.
    pub fn recv(&self) -> Result<Outcome, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Outcome, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<Outcome, mpsc::TryRecvError> {
        self.rx.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_once_then_closes() {
        let (mut notifier, outcomes) = channel();

        assert!(notifier.notify(Outcome::Lose));
        assert!(!notifier.notify(Outcome::Win));

        assert_eq!(outcomes.recv(), Ok(Outcome::Lose));
        assert_eq!(outcomes.try_recv(), Err(mpsc::TryRecvError::Disconnected));
    }

    #[test]
    fn dropping_the_producer_unblocks_the_consumer() {
        let (notifier, outcomes) = channel();
        drop(notifier);
        assert_eq!(outcomes.recv(), Err(mpsc::RecvError));
    }

    #[test]
    fn missing_listener_is_not_an_error() {
        let (mut notifier, outcomes) = channel();
        drop(outcomes);
        assert!(notifier.notify(Outcome::Win));
    }

    #[test]
    fn consumer_can_wait_on_another_thread() {
        let (mut notifier, outcomes) = channel();
        let waiter = std::thread::spawn(move || outcomes.recv_timeout(Duration::from_secs(5)));
        notifier.notify(Outcome::Win);
        assert_eq!(waiter.join().unwrap(), Ok(Outcome::Win));
    }
}
