//! TUIO host — operator console.
//!
//! Runs the lifecycle state machine against the echo peer and feeds it
//! operator commands from stdin, one per line:
//!
//! ```text
//! <kind> [tag] [args]
//!
//! start_session
//! data_requested mpu_9255 data_sensor
//! stop_session
//! shutdown
//! ```
//!
//! End of input requests shutdown.  `RUST_LOG` controls verbosity
//! (default `info`).
//!
//! ```text
//! ┌────────────┐ post_named ┌──────────────────────┐ RelayCommand ┌───────────┐
//! │   stdin    │──────────▶│  Host (driver + FSM) │────────────▶│ Echo peer │
//! └────────────┘            │                      │◀────────────│           │
//!                           └──────────┬───────────┘  PeerEvent   └───────────┘
//!                                      ▼
//!                                LogEventSink
//! ```

use std::io::BufRead;

use anyhow::{Context, Result, anyhow};
use log::info;

use tuio::adapters::echo_peer;
use tuio::adapters::log_sink::LogEventSink;
use tuio::app::service::Host;
use tuio::config::FsmConfig;
use tuio::events::{EventKind, Frame};
use tuio::link::PeerLink;

fn load_config(path: Option<String>) -> Result<FsmConfig> {
    let Some(path) = path else {
        return Ok(FsmConfig::default());
    };
    let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = FsmConfig::from_json(&json).with_context(|| format!("loading {path}"))?;
    info!("Configuration loaded from {}", path);
    Ok(config)
}

/// Split an operator line into `(kind, tag, args)`.  `args` keeps the
/// rest of the line, inner spaces included.
fn parse_line(line: &str) -> Option<(&str, &str, &str)> {
    let (kind, rest) = split_word(line)?;
    let (tag, args) = split_word(rest).unwrap_or_default();
    Some((kind, tag, args))
}

fn split_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let (word, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
    Some((word, rest.trim()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // ── 1. Configuration ──────────────────────────────────────
    let config = load_config(std::env::args().nth(1))?;

    // ── 2. Collaborator + state machine ───────────────────────
    let link = PeerLink::new();
    let peer = echo_peer::spawn(link.clone()).context("starting echo peer")?;
    let host = Host::start(&config, link, LogEventSink::new()).context("starting host")?;
    let handle = host.handle();

    info!("System ready. Enter '<kind> [tag] [args]'; EOF shuts down.");

    // ── 3. Operator loop ──────────────────────────────────────
    let mut shutdown_sent = false;
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let Some((kind, tag, args)) = parse_line(&line) else {
            continue;
        };

        // Unknown kinds are logged by post_named; keep reading.
        if handle
            .post_named(kind, Frame::new(tag.as_bytes(), args.as_bytes()))
            .is_ok()
            && kind == EventKind::Shutdown.as_str()
        {
            shutdown_sent = true;
            break;
        }
    }

    if !shutdown_sent {
        host.shutdown();
    }

    // ── 4. Teardown ───────────────────────────────────────────
    let fsm = host.join().context("driver thread")?;
    let served = peer
        .join()
        .map_err(|_| anyhow!("echo peer thread panicked"))?;

    let stats = fsm.stats();
    info!(
        "Done in {}: {} events ({} local, {} peer, {} ignored), {} relay commands",
        fsm.current_state(),
        stats.dispatched(),
        stats.local,
        stats.peer,
        stats.ignored,
        served.len()
    );
    Ok(())
}
