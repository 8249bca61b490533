//! Plain-text result reports.
//!
//! One section per simulated policy: a title line, one row per execution
//! run (adjacent slices of the same process merged), then the two
//! averages. Sections can be appended to a file so that several policies
//! share one report.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::scheduler::{SchedulingPolicy, SimulationResult};

/// Renders one report section.
pub fn render(
    title: &str,
    result: &SimulationResult,
    include_priority: bool,
) -> io::Result<String> {
    let mut buf = Vec::new();
    write_report(&mut buf, title, result, include_priority)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes one report section to `out`.
///
/// Rows read arrival, burst and priority from `result.processes`; a
/// timeline entry with no matching metrics is an `InvalidData` error.
pub fn write_report<W: Write + ?Sized>(
    out: &mut W,
    title: &str,
    result: &SimulationResult,
    include_priority: bool,
) -> io::Result<()> {
    writeln!(out, "=== {title} ===")?;

    if include_priority {
        writeln!(
            out,
            "{:<8}{:>10}{:>10}{:>10}{:>10}{:>10}{:>12}",
            "Process", "Arrival", "Burst", "Priority", "Start", "End", "Turnaround"
        )?;
    } else {
        writeln!(
            out,
            "{:<8}{:>10}{:>10}{:>10}{:>10}{:>12}",
            "Process", "Arrival", "Burst", "Start", "End", "Turnaround"
        )?;
    }

    for iv in result.timeline.merged().iter() {
        let p = result.metrics_for(iv.process).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("timeline references unknown process P{}", iv.process),
            )
        })?;
        let label = format!("P{}", iv.process);
        let turnaround = iv.end - p.arrival_time;
        if include_priority {
            writeln!(
                out,
                "{:<8}{:>10.2}{:>10.2}{:>10}{:>10.2}{:>10.2}{:>12.2}",
                label, p.arrival_time, p.burst_time, p.priority, iv.start, iv.end, turnaround
            )?;
        } else {
            writeln!(
                out,
                "{:<8}{:>10.2}{:>10.2}{:>10.2}{:>10.2}{:>12.2}",
                label, p.arrival_time, p.burst_time, iv.start, iv.end, turnaround
            )?;
        }
    }

    writeln!(out, "Average Turnaround Time: {:.2}", result.avg_turnaround)?;
    writeln!(out, "Average Waiting Time: {:.2}", result.avg_waiting)
}

/// Writes a section titled with the policy's description. The priority
/// column is shown for non-preemptive priority scheduling only.
pub fn write_policy_report<W: Write + ?Sized>(
    out: &mut W,
    policy: &dyn SchedulingPolicy,
    result: &SimulationResult,
) -> io::Result<()> {
    let include_priority = policy.name() == "Priority";
    write_report(out, policy.description(), result, include_priority)
}

/// Appends one report section, followed by a blank line, to the file at
/// `path`, creating it if needed.
pub fn append_to_file(
    path: impl AsRef<Path>,
    title: &str,
    result: &SimulationResult,
    include_priority: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_report(&mut file, title, result, include_priority)?;
    writeln!(file)?;
    debug!("appended '{title}' report to {}", path.display());
    Ok(())
}
