use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use touchinject::config::{DEVICE_ENV, resolve_device};
use touchinject::{Command, Config, DEFAULT_TAP_HOLD_MS, LogicalExtent};
use tracing_subscriber::EnvFilter;

/// Swipe step count when none is given on the command line
const DEFAULT_SWIPE_STEPS: i32 = 20;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Input device node (default: $TOUCHINJECT_DEVICE or /dev/input/event1)
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Grab the device so other readers don't see the injected events
    #[arg(long)]
    grab: bool,

    /// Logical screen size that X/Y coordinates are given in
    #[arg(long, num_args = 2, value_names = ["W", "H"])]
    map: Option<Vec<u32>>,

    /// Number of multitouch slots (default: read from the device)
    #[arg(long, value_name = "N")]
    slots: Option<usize>,

    /// Print events as JSON lines on stdout instead of writing them (--map is ignored)
    #[arg(long)]
    dry_run: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,

    #[command(subcommand)]
    gesture: Gesture,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Gesture {
    /// Press and lift at X Y
    Tap {
        x: i32,
        y: i32,
        #[arg(default_value_t = DEFAULT_TAP_HOLD_MS)]
        hold_ms: u64,
    },
    /// Press at X Y and keep the contact down
    Press { x: i32, y: i32 },
    /// Lift the contact left by press
    Release,
    /// Press at X Y for HOLD_MS milliseconds
    #[command(name = "longpress")]
    LongPress { x: i32, y: i32, hold_ms: u64 },
    /// Drag from X1 Y1 to X2 Y2
    Swipe {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: u64,
        #[arg(default_value_t = DEFAULT_SWIPE_STEPS)]
        steps: i32,
    },
    /// Put a contact down in SLOT
    MtDown { slot: i32, x: i32, y: i32 },
    /// Move the contact in SLOT
    MtMove { slot: i32, x: i32, y: i32 },
    /// Lift the contact in SLOT
    MtUp { slot: i32 },
}

impl From<Gesture> for Command {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Tap { x, y, hold_ms } => Command::Tap { x, y, hold_ms },
            Gesture::Press { x, y } => Command::Press { x, y },
            Gesture::Release => Command::Release,
            Gesture::LongPress { x, y, hold_ms } => Command::LongPress { x, y, hold_ms },
            Gesture::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration_ms,
                steps,
            } => Command::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration_ms,
                steps,
            },
            Gesture::MtDown { slot, x, y } => Command::MtDown { slot, x, y },
            Gesture::MtMove { slot, x, y } => Command::MtMove { slot, x, y },
            Gesture::MtUp { slot } => Command::MtUp { slot },
        }
    }
}

impl Args {
    fn config(&self) -> Config {
        let logical_extent = match self.map.as_deref() {
            Some([width, height]) => LogicalExtent::new(*width, *height),
            _ => LogicalExtent::disabled(),
        };

        Config {
            device: resolve_device(self.device.clone(), std::env::var_os(DEVICE_ENV)),
            grab: self.grab,
            logical_extent,
            slots: self.slots,
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr, stdout is reserved for --dry-run output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    let command = Command::from(args.gesture);

    tracing::info!("Starting touchinject {}", command.name());
    if !config.dry_run {
        tracing::info!("Device: {}", config.device.display());
    }

    let mut session = touchinject::session::open(&config)
        .with_context(|| format!("Failed to set up {}", config.device.display()))?;

    session
        .execute(command)
        .await
        .with_context(|| format!("{} failed", command.name()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("touchinject").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn tap_hold_defaults_to_100ms() {
        let args = parse(&["tap", "400", "240"]);
        assert_eq!(
            Command::from(args.gesture),
            Command::Tap {
                x: 400,
                y: 240,
                hold_ms: 100
            }
        );
    }

    #[test]
    fn swipe_steps_default_to_20() {
        let args = parse(&["--grab", "swipe", "100", "200", "700", "200", "400"]);
        assert!(args.grab);
        assert_eq!(
            Command::from(args.gesture),
            Command::Swipe {
                x1: 100,
                y1: 200,
                x2: 700,
                y2: 200,
                duration_ms: 400,
                steps: 20
            }
        );
    }

    #[test]
    fn map_sets_logical_extent() {
        let args = parse(&[
            "-d",
            "/dev/input/event4",
            "--map",
            "800",
            "480",
            "mt-down",
            "0",
            "200",
            "120",
        ]);
        let config = args.config();
        assert_eq!(config.device, PathBuf::from("/dev/input/event4"));
        assert_eq!(config.logical_extent, LogicalExtent::new(800, 480));
        assert_eq!(
            Command::from(args.gesture),
            Command::MtDown {
                slot: 0,
                x: 200,
                y: 120
            }
        );
    }

    #[test]
    fn multitouch_and_longpress_names() {
        assert_eq!(
            parse(&["mt-move", "1", "5", "6"]).gesture,
            Gesture::MtMove { slot: 1, x: 5, y: 6 }
        );
        assert_eq!(parse(&["mt-up", "1"]).gesture, Gesture::MtUp { slot: 1 });
        assert_eq!(
            parse(&["longpress", "1", "2", "1500"]).gesture,
            Gesture::LongPress {
                x: 1,
                y: 2,
                hold_ms: 1500
            }
        );
        assert_eq!(parse(&["release"]).gesture, Gesture::Release);
    }

    #[test]
    fn rejects_missing_or_unknown_command() {
        assert!(Args::try_parse_from(["touchinject"]).is_err());
        assert!(Args::try_parse_from(["touchinject", "pinch", "1", "2"]).is_err());
        assert!(Args::try_parse_from(["touchinject", "longpress", "1", "2"]).is_err());
    }

    #[test]
    fn version_flag_is_lowercase_v() {
        let err = Args::try_parse_from(["touchinject", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
