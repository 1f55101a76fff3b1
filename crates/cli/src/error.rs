//! Failures of a `flowfield` invocation and the exit codes they map to.
//!
//! | code | kind            | typical cause                                    |
//! |------|-----------------|--------------------------------------------------|
//! | 2    | (clap)          | unparseable arguments, before any run starts     |
//! | 10   | `simulation`    | a frame the surface rejected, a failed restart   |
//! | 11   | `io`            | PNG or seed file not writable, replay not found  |
//! | 12   | `input`         | bad `--params`, bad seed file, out-of-range knob |
//! | 13   | `serialization` | JSON output could not be produced                |

use flowfield_core::EngineError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The simulation or render surface refused an operation.
    Simulation(EngineError),
    /// Reading a replay file or writing a PNG / seed file failed.
    Io(String),
    /// Arguments parsed but describe an invalid run.
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Short machine-readable label, reported as `"kind"` under `--json`.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Simulation(_) => "simulation",
            CliError::Io(_) => "io",
            CliError::Input(_) => "input",
            CliError::Serialization(_) => "serialization",
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(e) => write!(f, "simulation: {e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

/// Snapshot failures arrive as `EngineError::Io` and keep the I/O code;
/// everything else the core reports is a simulation failure.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
