use anyhow::Context;
use bridge::http::HttpBridge;
use bridge::readings::LiveReadings;
use clap::Parser;
use generator::synthetic::{fill_readings, SyntheticConfig};
use service::options::RuntimeOptions;
use service::store::ConfigStore;
use service::ticker::{epoch_now, Ticker};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod bridge;
mod generator;
mod service;

#[derive(Parser)]
#[command(author, version, about = "Radar map fusion host driver")]
struct Args {
    /// Load runtime options from YAML
    #[arg(long)]
    options: Option<PathBuf>,
    /// Path to the persisted JSON config store
    #[arg(long, default_value = "radar_map.json")]
    store: PathBuf,
    /// HTTP bridge bind address
    #[arg(long, default_value = "127.0.0.1:8020")]
    bind: SocketAddr,
    /// Seed for synthetic offline readings
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Run a single tick against synthetic readings and print a summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Keep the HTTP bridge and tick loop alive for live readings
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = if let Some(path) = args.options {
        RuntimeOptions::load(path)?
    } else {
        RuntimeOptions::from_args(args.store, args.bind, args.seed)
    };

    let store = Arc::new(Mutex::new(ConfigStore::load(&options.store_path)?));
    let readings = LiveReadings::new();
    let mut ticker = Ticker::new(store.clone(), readings.clone());

    if args.offline {
        let synthetic = SyntheticConfig {
            seed: options.seed,
            ..Default::default()
        };
        {
            let guard = store.lock().unwrap();
            if guard.data.radars.is_empty() {
                println!("No radars configured; add some via the config store first.");
            }
            fill_readings(&guard.data, &synthetic, &readings);
        }

        let result = ticker.tick(epoch_now());
        for (map_group, state) in &result.maps {
            println!(
                "Offline tick -> map {}: {} fused targets",
                map_group,
                state.targets.len()
            );
            for target in &state.targets {
                println!(
                    "  {} at ({:.2}, {:.2}) from {:?}",
                    target.id, target.x, target.y, target.sources
                );
            }
        }
        for zone in &result.zones {
            println!(
                "  zone {}/{} -> occupied {}, count {}",
                zone.map_group, zone.zone, zone.occupied, zone.count
            );
        }
    }

    if args.serve {
        let bridge = HttpBridge::new(
            options.bind,
            ticker.state_handle(),
            store.clone(),
            readings.clone(),
        );
        bridge.publish_status(&format!(
            "HTTP bridge on {} (Ctrl+C to stop)",
            options.bind
        ));

        let mut updates = ticker.subscribe();
        let zone_logger = async move {
            while updates.changed().await.is_ok() {
                let result = updates.borrow_and_update().clone();
                for zone in result.zones.iter().filter(|zone| zone.changed) {
                    log::info!(
                        "zone {}/{} -> occupied {}",
                        zone.map_group,
                        zone.zone,
                        zone.occupied
                    );
                }
            }
        };

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for the tick loop")?;
        runtime.block_on(async {
            tokio::select! {
                _ = ticker.run() => {}
                _ = zone_logger => {}
                result = signal::ctrl_c() => {
                    result.context("awaiting Ctrl+C to exit")?;
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
