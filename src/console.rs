use crossterm::style::{StyledContent, Stylize};
use std::sync::atomic::{AtomicBool, Ordering};
use strum_macros::{Display, EnumIter};

// Set while the TUI owns the terminal.
static QUIET: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl Severity {
    fn tag(self) -> StyledContent<String> {
        let tag = format!("[{self}]");
        match self {
            Severity::Error => tag.red().bold(),
            Severity::Warning => tag.yellow().bold(),
            Severity::Info => tag.blue().bold(),
            Severity::Success => tag.green().bold(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Severity::Error | Severity::Warning)
    }
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Print a user-facing message with a colored severity tag and mirror it to the log.
///
/// While quiet, the log is the only place the message ends up.
pub fn emit(severity: Severity, message: &str) {
    if QUIET.load(Ordering::Relaxed) {
        match severity {
            Severity::Error => log::error!("{message}"),
            Severity::Warning => log::warn!("{message}"),
            Severity::Info | Severity::Success => log::info!("{message}"),
        }
        return;
    }

    log::debug!("{severity}: {message}");

    if severity.to_stderr() {
        eprintln!("{} {message}", severity.tag());
    } else {
        println!("{} {message}", severity.tag());
    }
}
