use graph_config::SourceKind;
use graph_core::{GraphError, MetricSource, Reading, Result};
use sysinfo::{Pid, ProcessesToUpdate, System};

const MIB: u64 = 1 << 20;

/// Series reported by [`MemorySource`], in rendering order.
pub const SERIES_NAMES: [&str; 2] = ["used", "total"];

/// Samples memory counters through `sysinfo`, reported in MiB.
///
/// - [`SourceKind::System`]:  `used` = used RAM, `total` = installed RAM.
/// - [`SourceKind::Process`]: `used` = resident set, `total` = virtual size
///   of this process.
pub struct MemorySource {
    kind: SourceKind,
    sys:  System,
    pid:  Option<Pid>,
}

impl MemorySource {
    pub fn new(kind: SourceKind) -> Self {
        let pid = match kind {
            SourceKind::System => None,
            SourceKind::Process => sysinfo::get_current_pid().ok(),
        };
        Self {
            kind,
            sys: System::new(),
            pid,
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    fn read_bytes(&mut self) -> Result<(u64, u64)> {
        match self.kind {
            SourceKind::System => {
                self.sys.refresh_memory();
                Ok((self.sys.used_memory(), self.sys.total_memory()))
            }
            SourceKind::Process => {
                let pid = self
                    .pid
                    .ok_or_else(|| GraphError::Sampler("current pid unavailable".into()))?;
                self.sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                let process = self
                    .sys
                    .process(pid)
                    .ok_or_else(|| GraphError::Sampler(format!("process {pid} not found")))?;
                Ok((process.memory(), process.virtual_memory()))
            }
        }
    }
}

impl std::fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySource")
            .field("kind", &self.kind)
            .field("pid", &self.pid)
            .finish()
    }
}

impl MetricSource for MemorySource {
    fn names(&self) -> Vec<String> {
        SERIES_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn sample(&mut self) -> Result<Reading> {
        let (used, total) = self.read_bytes()?;
        tracing::trace!(used = %format_bytes(used), total = %format_bytes(total), "memory sample");
        Ok(Reading::from([
            (SERIES_NAMES[0].to_string(), to_mib(used)),
            (SERIES_NAMES[1].to_string(), to_mib(total)),
        ]))
    }
}

/// Convert a byte count to (fractional) MiB.
pub fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB as f64
}

/// Format a byte count as a human-readable string (e.g. `"7.3 GiB"`).
pub fn format_bytes(bytes: u64) -> String {
    const GIB: u64 = 1 << 30;
    const KIB: u64 = 1 << 10;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
