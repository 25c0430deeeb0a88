//! seismic-replay: headless driver for the seismic wave effect.
//!
//! Usage:
//!   seismic-replay run --script impacts.json --config seismic.toml --dt 0.016 --ticks 600
//!   seismic-replay config

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use serde::Deserialize;

use seismic_core::commands::SeismicCommand;
use seismic_core::config::SeismicConfig;
use seismic_core::enums::ShaderKeyword;
use seismic_core::state::PublishedState;
use seismic_core::SeismicError;
use seismic_sim::{ParameterSink, SeismicSense};

/// One scripted command, applied at the start of `tick`.
#[derive(Debug, Deserialize)]
struct ScriptEntry {
    tick: u64,
    command: SeismicCommand,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "config" => cmd_config(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "seismic-replay: replay impact scripts through the wave buffer\n\
         \n\
         Commands:\n\
         \n\
         run       Replay a script and print one JSON line per sink call\n\
         \n\
           --script <path>    JSON array of {{\"tick\": n, \"command\": {{...}}}}\n\
           --config <path>    TOML settings (optional, default settings otherwise)\n\
           --dt <secs>        Seconds per tick (default: 1/60)\n\
           --ticks <N>        Number of ticks to run (default: 600)\n\
         \n\
         config    Print the default settings as TOML\n\
         \n\
         Script commands: AddWave {{point}}, SetConfig {{config}}, Enable, Disable\n\
         \n\
         Example:\n\
         \n\
           seismic-replay run --script hits.json --dt 0.02 --ticks 300\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_or_exit<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        Some(raw) => match raw.parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("Error: invalid value for {flag}: {raw}");
                process::exit(1);
            }
        },
        None => default,
    }
}

// --- Run command ---

/// Writes every sink call to stdout as a JSON line.
struct JsonLinesSink<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    fn write_line(&mut self, value: serde_json::Value) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.out, "{value}") {
            eprintln!("Error writing output: {e}");
            self.failed = true;
        }
    }
}

impl<W: Write> ParameterSink for JsonLinesSink<W> {
    fn push(&mut self, state: &PublishedState) {
        self.write_line(serde_json::json!({ "push": state }));
    }

    fn set_keyword(&mut self, keyword: ShaderKeyword, enabled: bool) {
        self.write_line(serde_json::json!({
            "keyword": keyword.name(),
            "enabled": enabled,
        }));
    }
}

/// Parse a script and order it by tick. The sort is stable, so same-tick
/// commands keep their file order.
fn parse_script(text: &str) -> serde_json::Result<Vec<ScriptEntry>> {
    let mut script: Vec<ScriptEntry> = serde_json::from_str(text)?;
    script.sort_by_key(|entry| entry.tick);
    Ok(script)
}

/// Enable the driver, then run `ticks` frames, queueing each scripted
/// command right before its tick. Ticks while disabled push nothing.
fn replay(
    sense: &mut SeismicSense,
    script: Vec<ScriptEntry>,
    dt: f32,
    ticks: u64,
    sink: &mut dyn ParameterSink,
) -> Result<(), SeismicError> {
    sense.enable(sink);

    let mut entries = script.into_iter().peekable();
    for tick in 0..ticks {
        while let Some(entry) = entries.next_if(|e| e.tick <= tick) {
            sense.queue_command(entry.command);
        }
        match sense.tick(dt, sink) {
            Ok(_) | Err(SeismicError::NotEnabled) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

fn cmd_run(args: &[String]) {
    let script_path = match flag_value(args, "--script") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --script <path> is required");
            process::exit(1);
        }
    };

    let config = match flag_value(args, "--config") {
        Some(p) => match SeismicConfig::load(p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {e}");
                process::exit(1);
            }
        },
        None => SeismicConfig::default(),
    };

    let dt: f32 = parse_or_exit(args, "--dt", 1.0 / 60.0);
    let ticks: u64 = parse_or_exit(args, "--ticks", 600);

    let script = match fs::read_to_string(&script_path)
        .map_err(|e| e.to_string())
        .and_then(|text| parse_script(&text).map_err(|e| e.to_string()))
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading script {}: {e}", script_path.display());
            process::exit(1);
        }
    };

    let mut sense = match SeismicSense::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut sink = JsonLinesSink {
        out: BufWriter::new(stdout.lock()),
        failed: false,
    };

    if let Err(e) = replay(&mut sense, script, dt, ticks, &mut sink) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    if let Err(e) = sink.out.flush() {
        eprintln!("Error writing output: {e}");
        process::exit(1);
    }
    if sink.failed {
        process::exit(1);
    }
    eprintln!("Done! {ticks} ticks at dt={dt}");
}

// --- Config command ---

fn cmd_config() {
    match toml::to_string_pretty(&SeismicConfig::default()) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            eprintln!("Error serializing config: {e}");
            process::exit(1);
        }
    }
}
