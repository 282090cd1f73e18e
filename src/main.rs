use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use xcfg::{Config, ConfigStore};

#[derive(Debug, Serialize, Deserialize)]
struct Window {
    width: u32,
    height: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let id = std::env::args().nth(1).unwrap_or_else(|| "xcfg-demo".to_string());
    let mut store = ConfigStore::open(&id, Config::default()).context("config store init failed")?;
    info!("using {}", store.path().display());

    store.set("theme", "dark", false)?;
    store.set("window", serde_json::to_value(Window { width: 800, height: 600 })?, false)?;
    store.set("recent", json!(["a.txt", "b.txt"]), false)?;

    if let Some(handle) = store.set("launches", 1, true)? {
        handle.wait().context("saving config failed")?;
    }

    let window: Option<Window> = store.get_as("window")?;
    println!("id: {}", store.id());
    println!("window: {:?}", window);
    println!("{}", store.to_json()?);

    Ok(())
}
