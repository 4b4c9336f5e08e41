mod layout;
mod replay;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keypad_core::{Sample, Timing};
use std::fs;

#[derive(Parser)]
#[command(name = "keypad-cli")]
#[command(about = "Matrix keypad debounce replay and layout tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a sample sequence through the debounce state machine
    Replay {
        /// Samples, one character per scan tick, '.' for no key
        samples: Option<String>,
        /// Read samples from a file instead
        #[arg(long, conflicts_with = "samples")]
        file: Option<String>,
        /// Loop period in milliseconds
        #[arg(long, default_value_t = 10)]
        tick_ms: u16,
        /// Debounce threshold in milliseconds
        #[arg(long, default_value_t = 40)]
        debounce_ms: u16,
        /// Print every tick, not just the emitted keys
        #[arg(long)]
        trace: bool,
    },
    /// Validate and print the compiled-in keypad layout
    Layout {
        /// Also write an SVG picture of the layout
        #[arg(long)]
        svg: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            samples,
            file,
            tick_ms,
            debounce_ms,
            trace,
        } => {
            let timing = Timing::new(tick_ms, debounce_ms);
            let config = layout::builtin_config(timing);
            config.validate().context("checking keypad configuration")?;

            let script = match (samples, file) {
                (Some(samples), _) => samples,
                (None, Some(path)) => {
                    fs::read_to_string(&path).with_context(|| format!("reading {}", path))?
                }
                (None, None) => anyhow::bail!("give a sample string or --file"),
            };
            let samples =
                replay::parse_samples(&script, |c| config.contains(c)).context("parsing samples")?;
            log::debug!(
                "replaying {} samples, tick {} ms, debounce {} ms",
                samples.len(),
                tick_ms,
                debounce_ms
            );

            let records = replay::replay(&samples, timing);
            for record in &records {
                if trace {
                    println!(
                        "{:>5} {:>6}ms  {}  {:<22} {}",
                        record.tick,
                        record.tick as u32 * u32::from(tick_ms),
                        show_sample(record.sample),
                        replay::describe_state(&record.state),
                        record.emitted.map(String::from).unwrap_or_default(),
                    );
                } else if let Some(key) = record.emitted {
                    println!("{}", key);
                }
            }

            let count = records.iter().filter(|r| r.emitted.is_some()).count();
            if trace {
                println!("{} key(s) emitted from {} ticks", count, records.len());
            }
        }
        Command::Layout { svg } => {
            let config = layout::builtin_config(Timing::default());
            config.validate().context("checking keypad configuration")?;

            println!(
                "{}x{} keypad, active {:?}, columns pulled {:?}",
                config.rows(),
                config.cols(),
                config.active,
                config.column_pull()
            );
            print!("{}", layout::render_text(config.keymap));

            if let Some(path) = svg {
                fs::write(&path, layout::render_svg(config.keymap))
                    .with_context(|| format!("writing {}", path))?;
                println!("Wrote {}", path);
            }
        }
    }

    Ok(())
}

fn show_sample(sample: Sample) -> char {
    sample.unwrap_or(replay::NO_KEY)
}
