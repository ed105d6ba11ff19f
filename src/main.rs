//! Reachpad - virtual trackpad server
//!
//! Turns OSC control messages from a remote sender into desktop pointer,
//! scroll, and keyboard actions.

use reachpad::actuate::{Actuator, DesktopActuator, RecordingActuator};
use reachpad::app::cli::{Cli, Commands, ConfigAction};
use reachpad::app::config::Config;
use reachpad::dispatch::{Dispatcher, MessageQueue};
use reachpad::handlers::default_handlers;
use reachpad::transport::UdpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Run {
            bind,
            port,
            dry_run,
        } => {
            run_server(bind, port, dry_run, &config)?;
        }
        Commands::Addresses => {
            run_addresses(&config)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn run_server(
    bind: Option<String>,
    port: Option<u16>,
    dry_run: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let port = port.unwrap_or(config.server.port);

    // Register all handlers before anything can arrive; a duplicate pattern
    // fails here, not mid-stream
    let mut dispatcher = Dispatcher::new();
    for handler in default_handlers(config) {
        dispatcher.register(handler)?;
    }
    info!(handlers = dispatcher.handler_count(), "Handlers registered");

    let mut actuator: Box<dyn Actuator> = if dry_run {
        info!("Dry run: actions will be recorded, not injected");
        Box::new(RecordingActuator::new())
    } else {
        Box::new(DesktopActuator::new())
    };

    let queue = MessageQueue::with_capacity(config.server.queue_size);
    let stats = queue.stats();
    let (producer, mut consumer) = queue.split();

    let listener = UdpListener::bind(&bind, port)?;
    info!(addr = %listener.local_addr()?, "Bound UDP listener");

    // Set up Ctrl+C handler
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_handler = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_handler.store(true, Ordering::SeqCst);
    })?;

    let listener_stop = stop_flag.clone();
    let listener_thread = std::thread::spawn(move || {
        listener.run(producer, listener_stop);
    });

    info!("Running... Press Ctrl+C to stop");

    let tick_interval = Duration::from_secs_f64(1.0 / config.server.tick_hz as f64);
    let mut next_tick = Instant::now() + tick_interval;

    // Dispatch loop: drain the queue in order, tick at the configured rate
    loop {
        if stop_flag.load(Ordering::SeqCst) {
            break;
        }

        for message in consumer.pop_batch(64) {
            dispatcher.dispatch(&message, actuator.as_mut());
        }

        let now = Instant::now();
        if now >= next_tick {
            dispatcher.tick(actuator.as_mut());
            next_tick += tick_interval;
            // After a long stall, rebase rather than firing a burst of ticks
            if next_tick < now {
                next_tick = now + tick_interval;
            }
        }

        std::thread::sleep(Duration::from_millis(1));
    }

    // Teardown: release anything held before exiting
    dispatcher.reset(actuator.as_mut());

    if let Err(err) = listener_thread.join() {
        warn!(?err, "Listener thread panicked");
    }

    info!(
        received = stats.received.load(Ordering::Relaxed),
        dropped = stats.dropped.load(Ordering::Relaxed),
        dispatched = stats.dispatched.load(Ordering::Relaxed),
        "Stopped"
    );

    Ok(())
}

fn run_addresses(config: &Config) -> anyhow::Result<()> {
    let mut dispatcher = Dispatcher::new();
    for handler in default_handlers(config) {
        dispatcher.register(handler)?;
    }

    println!("Registered addresses:");
    for (pattern, handler) in dispatcher.routes() {
        println!("  {:<20} -> {}", pattern, handler);
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = config.to_toml()?;
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", toml_str);
        }
        ConfigAction::Get { key } => {
            let toml_str = config.to_toml()?;
            match find_toml_value(&toml_str, &key) {
                Some(v) => println!("{} = {}", key, v),
                None => {
                    anyhow::bail!("Configuration key '{}' not found", key);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let config_path = Config::default_path();
            if !config_path.exists() {
                anyhow::bail!("No config file found. Run 'reachpad init' first.");
            }

            // Load, modify, validate, and save
            let mut toml_content = std::fs::read_to_string(&config_path)?;
            if !set_toml_value(&mut toml_content, &key, &value) {
                anyhow::bail!("Failed to set '{}'. Key may not exist in config.", key);
            }
            let updated: Config = toml::from_str(&toml_content)
                .map_err(|e| anyhow::anyhow!("Resulting config is not valid TOML: {e}"))?;
            updated.validate()?;
            std::fs::write(&config_path, &toml_content)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            let default_config = Config::default();
            default_config.save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}

/// Simple TOML value lookup by dotted key. The last dot separates the leaf
/// key; everything before it names the section, so nested sections like
/// `channels.joy-left.gain` resolve against `[channels.joy-left]`.
fn find_toml_value<'a>(toml_str: &'a str, key: &str) -> Option<&'a str> {
    let (section_name, leaf_key) = key.rsplit_once('.').unwrap_or(("", key));

    let mut in_section = section_name.is_empty();
    for line in toml_str.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = trimmed[1..trimmed.len() - 1].trim_matches('"');
            in_section = section == section_name;
            continue;
        }

        if in_section {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim().trim_matches('"');
                if line_key == leaf_key {
                    return Some(trimmed[eq_pos + 1..].trim());
                }
            }
        }
    }

    None
}

/// Simple TOML value setter by dotted key, same section rules as
/// [`find_toml_value`].
fn set_toml_value(toml_str: &mut String, key: &str, value: &str) -> bool {
    let (section_name, leaf_key) = key.rsplit_once('.').unwrap_or(("", key));

    let mut in_section = section_name.is_empty();
    let mut found = false;

    let lines: Vec<String> = toml_str.lines().map(|l| l.to_string()).collect();
    let mut new_lines = Vec::with_capacity(lines.len());

    for line in &lines {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let section = trimmed[1..trimmed.len() - 1].trim_matches('"');
            in_section = section == section_name;
        }

        if in_section && !found {
            if let Some(eq_pos) = trimmed.find('=') {
                let line_key = trimmed[..eq_pos].trim().trim_matches('"');
                if line_key == leaf_key {
                    new_lines.push(format!("{} = {}", leaf_key, value));
                    found = true;
                    continue;
                }
            }
        }

        new_lines.push(line.clone());
    }

    if found {
        *toml_str = new_lines.join("\n");
        if !toml_str.ends_with('\n') {
            toml_str.push('\n');
        }
    }

    found
}
