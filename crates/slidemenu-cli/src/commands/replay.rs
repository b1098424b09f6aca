use std::path::Path;

use anyhow::{Context, Result};

use slidemenu_core::script::{FrameSource, GestureScript, Trace};
use slidemenu_core::AppConfig;

pub fn run(config: &AppConfig, path: &Path, json: bool) -> Result<()> {
    let script = GestureScript::load(path)
        .with_context(|| format!("Failed to load gesture script {}", path.display()))?;
    let trace = script.replay(&config.panel)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        print_trace(&trace);
    }
    Ok(())
}

fn print_trace(trace: &Trace) {
    println!("action width: {}", trace.action_width);
    println!();
    println!("{:>7}  {:<24} {:>6}  {:<6} {}", "t(ms)", "source", "offset", "open", "direction");

    for frame in &trace.frames {
        let source = match frame.source {
            FrameSource::Pointer { phase, disposition } => {
                format!("{:?} -> {:?}", phase, disposition).to_lowercase()
            }
            FrameSource::Tick => "tick".to_string(),
        };
        println!(
            "{:>7}  {:<24} {:>6}  {:<6} {:?}",
            frame.t_ms, source, frame.offset, frame.is_open, frame.direction
        );
    }

    println!();
    if !trace.activated.is_empty() {
        let names: Vec<String> = trace.activated.iter().map(|kind| kind.to_string()).collect();
        println!("activated: {}", names.join(", "));
    }
    println!(
        "settled {} at offset {}",
        if trace.is_open { "open" } else { "closed" },
        trace.final_offset
    );
}
