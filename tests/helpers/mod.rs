/// Test doubles to simulate the CAN bus and tick source during
/// integration tests.
use std::sync::{Arc, Mutex};

use cycletx::transport::can_frame::CanFrame;
use cycletx::transport::traits::{can_bus::CanTransport, tick_source::TickSource};
use cycletx::transport::BusConfig;
use tokio::sync::mpsc;

#[derive(Debug, PartialEq, Eq)]
/// Error the mock bus reports when scripted to refuse a call.
pub struct BusRefused;

#[derive(Default)]
struct BusState {
    frames: Vec<CanFrame>,
    open_calls: u32,
    close_calls: u32,
    is_open: bool,
    fail_next_opens: u32,
    failing_ids: Vec<u32>,
}

#[derive(Clone, Default)]
#[allow(dead_code)]
/// In-memory bus reproducing the `CanTransport` contract. Clones share
/// state, so a test can keep an inspector handle after moving the bus
/// into the supervisor.
pub struct MockBus {
    state: Arc<Mutex<BusState>>,
}

#[allow(dead_code)]
impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` open attempts fail.
    pub fn script_open_failures(&self, count: u32) {
        self.state.lock().unwrap().fail_next_opens = count;
    }

    /// Refuse every transmit for the given identifier.
    pub fn script_transmit_failure_for(&self, can_id: u32) {
        self.state.lock().unwrap().failing_ids.push(can_id);
    }

    /// Every successfully transmitted frame, in transmission order.
    pub fn frames(&self) -> Vec<CanFrame> {
        self.state.lock().unwrap().frames.clone()
    }

    pub fn open_calls(&self) -> u32 {
        self.state.lock().unwrap().open_calls
    }

    pub fn close_calls(&self) -> u32 {
        self.state.lock().unwrap().close_calls
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().unwrap().is_open
    }
}

impl CanTransport for MockBus {
    type Error = BusRefused;

    async fn open<'a>(&'a mut self, _config: &'a BusConfig) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.open_calls += 1;
        if state.fail_next_opens > 0 {
            state.fail_next_opens -= 1;
            return Err(BusRefused);
        }
        state.is_open = true;
        Ok(())
    }

    async fn transmit<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if state.failing_ids.contains(&frame.raw_id()) {
            return Err(BusRefused);
        }
        state.frames.push(*frame);
        Ok(())
    }

    async fn close(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.close_calls += 1;
        state.is_open = false;
    }
}

#[derive(Default)]
struct TickState {
    started: bool,
    start_calls: u32,
    stop_calls: u32,
}

/// Tick source driven by the test instead of a timer: each pushed value
/// is delivered as one tick with that monotonic timestamp.
#[allow(dead_code)]
pub struct MockTicks {
    rx: mpsc::UnboundedReceiver<u64>,
    state: Arc<Mutex<TickState>>,
}

#[derive(Clone)]
#[allow(dead_code)]
/// Test-side handle feeding ticks into a [`MockTicks`].
pub struct TickHandle {
    tx: mpsc::UnboundedSender<u64>,
    state: Arc<Mutex<TickState>>,
}

#[allow(dead_code)]
impl TickHandle {
    pub fn tick(&self, now_ms: u64) {
        self.tx.send(now_ms).expect("tick source dropped");
    }

    pub fn start_calls(&self) -> u32 {
        self.state.lock().unwrap().start_calls
    }

    pub fn stop_calls(&self) -> u32 {
        self.state.lock().unwrap().stop_calls
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().unwrap().started
    }
}

#[allow(dead_code)]
/// Build an interconnected tick source / handle pair.
pub fn mock_ticks() -> (MockTicks, TickHandle) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = Arc::new(Mutex::new(TickState::default()));
    (
        MockTicks {
            rx,
            state: state.clone(),
        },
        TickHandle { tx, state },
    )
}

impl TickSource for MockTicks {
    fn start(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.start_calls += 1;
        state.started = true;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.stop_calls += 1;
        state.started = false;
    }

    async fn next_tick(&mut self) -> u64 {
        if !self.state.lock().unwrap().started {
            // A stopped source delivers nothing until started again.
            std::future::pending::<()>().await;
        }
        match self.rx.recv().await {
            Some(now_ms) => now_ms,
            None => std::future::pending().await,
        }
    }
}
