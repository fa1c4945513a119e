use std::io::{self, BufRead, Write};

use miette::Report;
use pixlab::{Outcome, Resolution, Session, SessionConfig};

/// Environment variable overriding the `default` resolution
const RESOLUTION_VAR: &str = "PIXLAB_RESOLUTION";

fn main() -> io::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let mut session = Session::with_config(config_from_env());
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        match session.execute(&line) {
            Ok(Outcome::Nothing) => {}
            Ok(Outcome::Registered { name }) => {
                if let Some(node) = session.registry().get(&name) {
                    write!(stdout, "{name} = {}", node.outline())?;
                }
            }
            Ok(Outcome::PropertySet { name, property }) => {
                let node = session.registry().get(&name);
                if let Some(value) = node.and_then(|n| n.borrow().get(&property)) {
                    writeln!(stdout, "{name}.{property} = {value}")?;
                }
            }
            Ok(Outcome::Listing(entries)) => {
                for entry in entries {
                    writeln!(stdout, "{entry}")?;
                }
            }
            Ok(Outcome::Render(node)) => write!(stdout, "{}", node.outline())?,
            Err(err) => eprintln!("{:?}", Report::new(err)),
        }
        stdout.flush()?;
    }
    Ok(())
}

fn config_from_env() -> SessionConfig {
    let config = SessionConfig::default();
    let Ok(text) = std::env::var(RESOLUTION_VAR) else {
        return config;
    };
    match text.parse::<Resolution>() {
        Ok(resolution) => config.with_default_resolution(resolution),
        Err(err) => {
            tracing::warn!(%text, "ignoring {RESOLUTION_VAR}: {err}");
            config
        }
    }
}
