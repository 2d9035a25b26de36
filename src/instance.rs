use log::{info, warn};
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Binary name other instances run under.
pub const PROCESS_NAME: &str = "sandwichtimer";

/// Kill every other running instance of the timer, returning how many were
/// signalled. The scan skips the current process and matches names
/// case-insensitively.
pub fn quit_running_instances() -> usize {
    let mut system = System::new();
    // everything() ensures process names are populated
    system.refresh_processes_specifics(ProcessesToUpdate::All, ProcessRefreshKind::everything());

    let own_pid = std::process::id();
    let mut stopped = 0;

    for (pid, process) in system.processes() {
        if pid.as_u32() == own_pid {
            continue;
        }

        let name = process.name().to_string_lossy();
        if !name.eq_ignore_ascii_case(PROCESS_NAME) {
            continue;
        }

        if process.kill() {
            info!("Stopped running instance (pid {})", pid.as_u32());
            stopped += 1;
        } else {
            warn!("Failed to stop instance (pid {})", pid.as_u32());
        }
    }

    stopped
}
