//! netlabel — a tiny network throughput indicator, written in Rust.
//!
//! Every 100 ms it sums the byte counters of all physical interfaces,
//! averages the transfer rate over the last second and shows it as a
//! one-line label such as `↓ 2 KiB/s ↑ 340 KiB/s` (or `-` when idle).
//!
//! Keybindings: q / Esc quit, p pauses, r restarts the averaging window.

#![allow(dead_code)]

mod app;
mod config;
mod format;
mod input;
mod poller;
mod system;
mod ui;

use std::io::{self, IsTerminal};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use app::App;
use config::NetLabelConfig;
use poller::{CancelToken, Poller};
use system::collector::Collector;
use ui::line::LineSink;
use ui::status_bar::StatusBar;
use ui::DisplaySink;

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
    );

    let config = NetLabelConfig::default();
    let result = if io::stdout().is_terminal() {
        run_tui(&config)
    } else {
        run_plain(&config)
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Status bar on the terminal, with keyboard control
fn run_tui(config: &NetLabelConfig) -> Result<()> {
    let mut sink = StatusBar::create()?;
    let token = CancelToken::new();
    let wait_token = token.clone();

    let result = run_indicator(config, &mut sink, token, move |app, timeout| {
        wait_for_key(app, timeout, &wait_token)
    });

    // Release the terminal before reporting anything
    sink.destroy()?;
    result
}

/// Plain lines on stdout; stops when the process is interrupted
fn run_plain(config: &NetLabelConfig) -> Result<()> {
    let mut sink = LineSink::stdout();
    let result = run_indicator(config, &mut sink, CancelToken::new(), |_, timeout| {
        std::thread::sleep(timeout);
        Ok(())
    });
    sink.destroy()?;
    result
}

/// Handle input events until the timeout elapses or a key arrives
fn wait_for_key(app: &mut App, timeout: Duration, token: &CancelToken) -> Result<()> {
    if event::poll(timeout)? {
        // On some platforms crossterm fires Press and Release; only handle Press
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                input::handle_input(app, key);
                if app.should_quit {
                    token.cancel();
                }
            }
        }
    }
    Ok(())
}

/// Main indicator loop: one pipeline run per tick, label pushed to the sink
fn run_indicator<S, W>(
    config: &NetLabelConfig,
    sink: &mut S,
    token: CancelToken,
    wait: W,
) -> Result<()>
where
    S: DisplaySink,
    W: FnMut(&mut App, Duration) -> Result<()>,
{
    let mut app = App::new(config);
    let mut collector = Collector::new(config);
    log::info!(
        "sampling {} every {} ms over {} samples",
        collector.source_name(),
        config.sample_interval_ms,
        config.history_depth
    );

    sink.set_text(&app.label)?;

    let poller = Poller::new(config.sample_interval(), token);
    poller.run(&mut app, wait, |app| {
        collector.refresh(app, Instant::now());
        log::trace!(
            "tick {}: totals {:?}, estimate {:?}, source ok {}, resets {}",
            app.tick,
            app.totals,
            app.estimate,
            app.source_ok,
            app.counter_resets
        );
        sink.set_text(&app.label)?;
        Ok(ControlFlow::Continue(()))
    })
}
