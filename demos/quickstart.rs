//! # Quickstart Demo
//!
//! Minimal host-side run of cycletx:
//! - Seed an (empty) in-memory store with default message definitions
//! - Load them into the shared message table
//! - Drive the scheduler supervisor with the real periodic ticker
//! - Start, observe status, stop
//!
//! The bus is a stand-in that prints every frame; on a target you would
//! implement `CanTransport` over the actual CAN driver instead.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use cycletx::infra::codec::hex;
use cycletx::scheduler::message::{CyclicMessage, MessageTable};
use cycletx::scheduler::supervisor::{
    CommandChannel, SchedulerCommand, SchedulerService, SharedMessageTable, StatusWatch,
};
use cycletx::store::MessageStore;
use cycletx::transport::can_frame::CanFrame;
use cycletx::transport::tick::PeriodicTicker;
use cycletx::transport::traits::can_bus::CanTransport;
use cycletx::transport::BusConfig;
use tokio::time::{sleep, Duration};

static TABLE: SharedMessageTable<16> = SharedMessageTable::new(MessageTable::new());
static COMMANDS: CommandChannel<4> = CommandChannel::new();
static STATUS: StatusWatch<2> = StatusWatch::new();

/// Bus stand-in: accepts every frame and prints it.
struct PrintBus;

impl CanTransport for PrintBus {
    type Error = core::convert::Infallible;

    async fn open<'a>(&'a mut self, config: &'a BusConfig) -> Result<(), Self::Error> {
        println!("   [bus] open @ {} bps", config.bitrate_bps);
        Ok(())
    }

    async fn transmit<'a>(&'a mut self, frame: &'a CanFrame) -> Result<(), Self::Error> {
        println!(
            "   [bus] {} {} [{}]",
            hex::identifier_to_hex(frame.raw_id()),
            if frame.is_extended() { "ext" } else { "std" },
            hex::payload_to_hex(&frame.data)
        );
        Ok(())
    }

    async fn close(&mut self) {
        println!("   [bus] closed");
    }
}

/// In-memory stand-in for the external store (payloads kept as hex text).
#[derive(Default)]
struct MemStore {
    rows: Vec<(u32, u32, bool, String, i32, bool)>,
}

impl MessageStore for MemStore {
    type Error = core::convert::Infallible;

    async fn load_all<'a, const N: usize>(
        &'a mut self,
        into: &'a mut MessageTable<N>,
    ) -> Result<usize, Self::Error> {
        into.clear();
        for (identity, can_id, extended, payload_hex, cycle_time_ms, enabled) in &self.rows {
            let message = CyclicMessage::builder(*can_id)
                .identity(*identity)
                .extended(*extended)
                .payload_hex(payload_hex)
                .cycle_time_ms(*cycle_time_ms)
                .enabled(*enabled)
                .build();
            // Seeded row count never exceeds the demo table capacity.
            let _ = into.push(message);
        }
        Ok(into.len())
    }

    async fn save_all<'a, const N: usize>(
        &'a mut self,
        table: &'a MessageTable<N>,
    ) -> Result<(), Self::Error> {
        self.rows = table
            .iter()
            .map(|message| {
                (
                    message.identity,
                    message.can_id,
                    message.extended,
                    message.payload_hex().as_str().to_owned(),
                    message.cycle_time_ms,
                    message.is_enabled(),
                )
            })
            .collect();
        Ok(())
    }
}

/// Store-side collaborator concern: seed defaults when nothing is
/// persisted yet.
async fn seed_defaults(store: &mut MemStore) {
    let mut seeds: MessageTable<16> = MessageTable::new();
    let defaults = [
        (1, 0x123, false, "11 22 33 44 00 00 00 00", 100),
        (2, 0x234, false, "11 22 33 44 00 00 00 00", 100),
        (3, 0x345, false, "11 22 33 44 00 00 00 00", 100),
        (4, 0x456, true, "AA BB CC DD EE FF 00 00", 50),
    ];
    for (identity, can_id, extended, payload, cycle) in defaults {
        let _ = seeds.push(
            CyclicMessage::builder(can_id)
                .identity(identity)
                .extended(extended)
                .payload_hex(payload)
                .cycle_time_ms(cycle)
                .build(),
        );
    }
    store.save_all(&seeds).await.expect("in-memory save");
}

#[tokio::main]
async fn main() {
    println!("=== cycletx Quickstart ===\n");

    // ======================================================================
    // 1. Load message definitions from the (seeded) store
    // ======================================================================
    println!("1. Loading message definitions");

    let mut store = MemStore::default();
    seed_defaults(&mut store).await;

    {
        let mut table = TABLE.lock().await;
        let loaded = store.load_all(&mut table).await.expect("in-memory load");
        println!("   Loaded {} messages:", loaded);
        for message in table.iter() {
            println!(
                "   {}  cycle {:>3} ms  [{}]",
                hex::identifier_to_hex(message.can_id),
                message.cycle_time_ms,
                message.payload_hex()
            );
        }
    }
    println!();

    // ======================================================================
    // 2. Spawn the supervisor with the real 1 ms ticker
    // ======================================================================
    println!("2. Spawning the scheduler supervisor");

    let service = SchedulerService::new(
        PrintBus,
        PeriodicTicker::default(),
        BusConfig::default(),
        &TABLE,
        &COMMANDS,
        Some(&STATUS),
    );
    tokio::spawn(service.drive());
    println!();

    // ======================================================================
    // 3. Start, let it transmit for a while, stop
    // ======================================================================
    println!("3. Running for 300 ms");

    let mut status = STATUS.receiver().expect("status receiver");
    COMMANDS.send(SchedulerCommand::Start).await;
    sleep(Duration::from_millis(300)).await;

    let snapshot = status.get().await;
    println!(
        "\n   Status: {:?}, sent {} frames, {} failures\n",
        snapshot.state, snapshot.frames_sent, snapshot.send_failures
    );

    COMMANDS.send(SchedulerCommand::Stop).await;
    sleep(Duration::from_millis(20)).await;

    let snapshot = status.get().await;
    println!("4. Final state: {:?}", snapshot.state);
}
