//! Poll loop orchestration.
//!
//! The loop is a three-state machine:
//! - `Running`: every tick evaluates readiness; once the deadline has passed
//!   without success the Pod deletion is requested and the loop expires
//! - `Satisfied`: every interface had an address
//! - `Expired`: the wait budget ran out
//!
//! Both terminal states are absorbing. Ticks after that are no-ops, and
//! `run` parks the process in an idle tail until the orchestrator stops it.

use std::time::Duration;

use kicker_clock::Clock;
use kicker_kube::PodTerminator;
use kicker_netlink::NetworkEnumerator;
use tracing::{debug, error, info};

use crate::config::KickerConfig;
use crate::readiness::ReadinessEvaluator;
use crate::sleeper::Sleeper;
use crate::terminate::{TerminationOutcome, TerminationTrigger};

/// Sleep between wake-ups of the idle tail.
pub const IDLE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// State of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Satisfied,
    Expired,
}

impl LoopState {
    /// True for `Satisfied` and `Expired`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, LoopState::Running)
    }
}

/// Drives readiness evaluation until success or deadline.
pub struct PollLoop<'a, N, T, C> {
    config: &'a KickerConfig,
    evaluator: ReadinessEvaluator<N>,
    trigger: TerminationTrigger<T>,
    clock: C,
    deadline: Duration,
    state: LoopState,
    termination: Option<TerminationOutcome>,
}

impl<'a, N, T, C> PollLoop<'a, N, T, C>
where
    N: NetworkEnumerator,
    T: PodTerminator,
    C: Clock,
{
    /// Create a loop in `Running` state. The deadline is fixed here, at
    /// `clock.now() + termination_timeout`.
    pub fn new(config: &'a KickerConfig, enumerator: N, terminator: T, clock: C) -> Self {
        let deadline = clock.now() + config.termination_timeout;

        Self {
            config,
            evaluator: ReadinessEvaluator::new(enumerator),
            trigger: TerminationTrigger::new(terminator),
            clock,
            deadline,
            state: LoopState::Running,
            termination: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Monotonic instant (per the loop's clock) after which the loop expires.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Outcome of the termination request, once one has been made.
    pub fn termination(&self) -> Option<&TerminationOutcome> {
        self.termination.as_ref()
    }

    /// Process one tick and return the resulting state.
    pub fn tick(&mut self) -> LoopState {
        if self.state.is_terminal() {
            debug!(state = ?self.state, "no-op");
            return self.state;
        }

        if self.evaluator.evaluate(&self.config.interface_names) {
            info!("all Calico addresses exist");
            self.state = LoopState::Satisfied;
            return self.state;
        }

        if self.clock.now() >= self.deadline {
            error!("time to wait for address to come live has expired; killing Pod");
            self.state = LoopState::Expired;

            let identity = &self.config.identity;
            let outcome = self
                .trigger
                .terminate(&identity.namespace, identity.name.as_deref());
            self.termination = Some(outcome);
        }

        self.state
    }

    /// Tick every `check_interval` until a terminal state is reached.
    ///
    /// The first tick happens one interval after the call.
    pub fn run_until_terminal<S: Sleeper>(&mut self, sleeper: &S) -> LoopState {
        while !self.state.is_terminal() {
            sleeper.sleep(self.config.check_interval);
            self.tick();
        }
        self.state
    }

    /// Run to a terminal state, then idle forever.
    pub fn run<S: Sleeper>(&mut self, sleeper: &S) -> ! {
        self.run_until_terminal(sleeper);
        idle_forever(sleeper)
    }
}

/// Keep the process resident without doing anything.
///
/// Exiting would let the kubelet restart the container and repeat the whole
/// wait, so the process stays up until the orchestrator stops it.
pub fn idle_forever<S: Sleeper>(sleeper: &S) -> ! {
    loop {
        sleeper.sleep(IDLE_INTERVAL);
        debug!("no-op");
    }
}
