//! Timed chain assembly with a simulated mining delay.
//!
//! The delay between block creations is a cooperative, cancellable wait
//! with no side effects besides elapsed time. Cancelling simply stops
//! further block creation; the chain handed back is valid up to the last
//! block that was appended.

use std::time::Duration;

use cairn_crypto::hashing::DefaultHash;
use tokio::sync::watch;
use tracing::instrument;

use crate::{
    clock::{Clock, SystemClock},
    primitives::errors::ChainError,
};

use super::chain::Chain;

/// Builds whole chains from payload lists, pausing between appends to
/// simulate mining time.
pub struct ChainAssembler<C: Clock> {
    delay: Duration,
    clock: C,
}

/// A handle pair for cancelling an in-flight assembly. Send `true` (or
/// drop the sender) to stop after the block currently being waited on.
pub fn cancel_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}

impl ChainAssembler<SystemClock> {
    pub fn new(delay: Duration) -> Self {
        ChainAssembler {
            delay,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> ChainAssembler<C> {
    pub fn with_clock(delay: Duration, clock: C) -> Self {
        ChainAssembler { delay, clock }
    }

    /// Appends one block per payload, waiting `delay` before each block
    /// after the genesis one. Nonces follow the block index.
    ///
    /// # Errors
    ///
    /// * `ChainError::EmptyInput` if `payloads` is empty.
    #[instrument(skip_all, fields(payloads = payloads.len()))]
    pub async fn assemble(
        &self,
        payloads: &[String],
        mut cancel: watch::Receiver<bool>,
    ) -> Result<Chain, ChainError> {
        if payloads.is_empty() {
            return Err(ChainError::EmptyInput);
        }

        let mut chain = Chain::new();
        let mut hasher = DefaultHash::new();

        for (index, payload) in payloads.iter().enumerate() {
            if index > 0 && !self.wait_or_cancel(&mut cancel).await {
                tracing::info!(appended = chain.len(), "assembly cancelled");
                return Ok(chain);
            }
            chain.append(payload.clone(), index as u64, &self.clock, &mut hasher);
        }

        tracing::debug!(blocks = chain.len(), "assembly complete");
        Ok(chain)
    }

    /// Waits out the mining delay. Returns false if cancellation won.
    async fn wait_or_cancel(&self, cancel: &mut watch::Receiver<bool>) -> bool {
        let sleep = tokio::time::sleep(self.delay);
        tokio::pin!(sleep);
        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                changed = cancel.changed() => {
                    // a dropped sender also counts as cancellation
                    if changed.is_err() || *cancel.borrow() {
                        return false;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{blockchain::validation::validate, clock::SteppingClock};
    use cairn_crypto::{hashing::DefaultHash, types::GENESIS_PREVIOUS_HASH};

    fn payloads(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_assemble_produces_valid_chain() {
        let assembler = ChainAssembler::with_clock(
            Duration::from_secs(1),
            SteppingClock::new(1_700_000_000_000, 1_000),
        );
        let (_tx, rx) = cancel_channel();
        let chain = assembler
            .assemble(&payloads(&["genesis", "one", "two"]), rx)
            .await
            .unwrap();

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.blocks()[0].previous_hash, GENESIS_PREVIOUS_HASH);
        assert_eq!(chain.blocks()[2].nonce, 2);
        assert!(validate(&chain, &mut DefaultHash::new()).is_valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_payloads_rejected() {
        let assembler = ChainAssembler::new(Duration::from_millis(10));
        let (_tx, rx) = cancel_channel();
        let result = assembler.assemble(&[], rx).await;
        assert_eq!(result.unwrap_err(), ChainError::EmptyInput);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_leaves_valid_prefix() {
        let assembler = ChainAssembler::with_clock(
            Duration::from_secs(60),
            SteppingClock::new(1_700_000_000_000, 1_000),
        );
        let (tx, rx) = cancel_channel();
        // cancel before the first delay elapses
        tx.send(true).unwrap();

        let chain = assembler
            .assemble(&payloads(&["genesis", "one", "two"]), rx)
            .await
            .unwrap();

        assert_eq!(chain.len(), 1);
        assert!(validate(&chain, &mut DefaultHash::new()).is_valid);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_cancels() {
        let assembler = ChainAssembler::with_clock(
            Duration::from_secs(60),
            SteppingClock::new(1_700_000_000_000, 1_000),
        );
        let (tx, rx) = cancel_channel();
        drop(tx);

        let chain = assembler
            .assemble(&payloads(&["genesis", "one"]), rx)
            .await
            .unwrap();
        assert_eq!(chain.len(), 1);
    }
}
