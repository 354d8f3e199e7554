use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;

use chipfield::cli::CliArgs;
use chipfield::messages::{parse_script, HostMsg};
use chipfield::render::render_session;
use chipfield::session::Session;
use chipfield::theme::{load_theme, Theme};
use chipfield::update::update;

/// Collect gestures from arguments, a script file, or stdin
fn read_gestures(args: &CliArgs) -> Result<Vec<HostMsg>> {
    if let Some(path) = &args.script {
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        return parse_script(&script).with_context(|| format!("In script {}", path.display()));
    }

    if !args.gestures.is_empty() {
        return args
            .gestures
            .iter()
            .map(|g| {
                g.parse::<HostMsg>()
                    .with_context(|| format!("Invalid gesture {:?}", g))
            })
            .collect();
    }

    let mut script = String::new();
    std::io::stdin()
        .read_to_string(&mut script)
        .context("Failed to read gestures from stdin")?;
    Ok(parse_script(&script)?)
}

fn main() -> Result<()> {
    chipfield::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config();
    if args.save_config {
        args.save_config(&config)
            .map_err(anyhow::Error::msg)
            .context("Failed to save config")?;
    }

    let theme = if args.plain {
        None
    } else {
        Some(load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Failed to load theme {}: {}", config.theme, e);
            Theme::default()
        }))
    };

    let gestures = read_gestures(&args)?;
    let mut session = Session::from_config(&config);

    for msg in gestures {
        let Some(cmd) = update(&mut session, msg) else {
            continue;
        };
        if !args.json && cmd.needs_redraw() {
            println!("{}", render_session(&session, theme.as_ref()));
        }
        if let Some(titles) = cmd.submitted() {
            if !args.json {
                println!("Submitted: {}", titles.join(", "));
            }
            break;
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&session.snapshot())
            .context("Failed to serialize field state")?;
        println!("{}", json);
    }

    Ok(())
}
