//! Replays a flight log to stdout at 10x the recorded default rate.
//!
//! Usage: replay_demo [log.csv]
//!
//! Without an argument, streams a small bundled sample.

use std::time::Duration;

use skylog_core::log::FetchError;
use skylog_core::registry::ChannelRegistry;
use skylog_core::replay::TelemetryManager;

const SAMPLE: &str = "\
time,AX,AY,AZ,GX,GY,GZ,BA,BT,BP
0,0.2,0.0,9.8,0.01,0.00,0.02,120,15.2,991
100,1.4,0.1,14.2,0.40,0.12,0.09,131,15.2,990
200,12.8,0.4,38.0,1.10,0.30,0.22,164,15.3,987
300,9.1,0.2,22.5,0.80,0.21,0.18,221,15.4,981
400,2.3,0.1,11.0,0.30,0.10,0.07,290,15.5,974
500,-3.8,0.0,4.2,0.12,0.05,0.03,342,15.6,969
";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let manager = TelemetryManager::new(
        ChannelRegistry::flight_default(),
        Duration::from_millis(100),
    );

    let subscription = manager.subscribe(|snapshot| {
        let altitude = snapshot
            .series
            .get("altitude")
            .and_then(|entries| entries.last());
        match altitude {
            Some(entry) => println!(
                "t={:>6} record {:>3}/{} altitude={:?}",
                entry.time,
                snapshot.cursor + 1,
                snapshot.total,
                entry.value("BA")
            ),
            None => println!("record {:>3}/{}", snapshot.cursor + 1, snapshot.total),
        }
    });

    match std::env::args().nth(1) {
        Some(path) => manager.ingest_path(path).await,
        None => {
            manager
                .ingest(async { Ok::<_, FetchError>(SAMPLE.to_string()) })
                .await
        }
    }

    let snapshot = manager.snapshot().await;
    if let Some(err) = snapshot.error {
        eprintln!("ingest failed: {err}");
        std::process::exit(1);
    }
    println!("loaded {} records, replaying...", snapshot.total);

    manager.start().await;
    while manager.snapshot().await.streaming {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    manager.unsubscribe(subscription);
    println!("replay complete");
}
