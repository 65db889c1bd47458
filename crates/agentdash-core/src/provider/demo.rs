//! Built-in sample datasets for `--demo` and tests.

use super::StaticSource;
use crate::value::{FieldValue, Row};

const OSES: &[&str] = &["Ubuntu 22.04", "Windows 11", "macOS 14", "Debian 12"];
const VENDORS: &[&str] = &["Dell", "Lenovo", "Apple", "HP"];
const COMMANDS: &[&str] = &[
    "sudo apt update",
    "df -h",
    "systemctl status nginx",
    "Get-Process | Sort-Object CPU -Descending | Select-Object -First 10",
    "uptime",
    "journalctl -u sshd --since '1 hour ago' --no-pager | tail -n 50",
];
const TASK_STATUSES: &[&str] = &["completed", "pending", "running", "failed", "completed"];

/// Sample agents, `agent-1` .. `agent-{count}`.
pub fn agents(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|i| {
            let status = if i % 3 == 0 { "offline" } else { "online" };
            Row::new()
                .with("agent_id", format!("agent-{i}"))
                .with("os", OSES[i % OSES.len()])
                .with("ip", format!("10.0.{}.{}", i / 250, i % 250 + 1))
                .with("mac", format!("02:00:00:00:{:02x}:{:02x}", i / 256, i % 256))
                .with("hostname", format!("host-{i:02}"))
                .with("vendor", VENDORS[i % VENDORS.len()])
                .with("username", format!("user{}", i % 4))
                .with("status", status)
                .with("last_seen", format!("2024-06-{:02}T{:02}:15:00Z", 1 + i % 28, i % 24))
        })
        .collect()
}

/// Sample tasks spread over `agent_count` agents.
pub fn tasks(count: usize, agent_count: usize) -> Vec<Row> {
    let agent_count = agent_count.max(1);
    (1..=count)
        .map(|i| {
            let status = TASK_STATUSES[i % TASK_STATUSES.len()];
            let finished = matches!(status, "completed" | "failed");
            let returncode: FieldValue = if finished {
                FieldValue::Integer(if status == "failed" { 1 } else { 0 })
            } else {
                FieldValue::Null
            };
            let os_type = if i % 4 == 1 { "windows" } else { "linux" };
            Row::new()
                .with("task_id", format!("t{i:03}"))
                .with("agent_id", format!("agent-{}", 1 + i % agent_count))
                .with("os_type", os_type)
                .with("status", status)
                .with("command", COMMANDS[i % COMMANDS.len()])
                .with("stdout", if status == "completed" { "ok\n" } else { "" })
                .with("stderr", if status == "failed" { "permission denied" } else { "" })
                .with("returncode", returncode)
                .with("created_at", format!("2024-06-{:02}T08:{:02}:00Z", 1 + i % 28, i % 60))
                .with("updated_at", format!("2024-06-{:02}T09:{:02}:00Z", 1 + i % 28, i % 60))
        })
        .collect()
}

/// Demo agents as a source.
pub fn agents_source() -> StaticSource {
    StaticSource::new("demo agents", agents(12))
}

/// Demo tasks as a source.
pub fn tasks_source() -> StaticSource {
    StaticSource::new("demo tasks", tasks(37, 12))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_ids_are_unique() {
        let rows = agents(30);
        let mut ids: Vec<String> = rows.iter().map(|r| r.display("agent_id")).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn tasks_reference_existing_agents() {
        let rows = tasks(20, 5);
        for row in &rows {
            let agent = row.display("agent_id");
            let n: usize = agent.trim_start_matches("agent-").parse().unwrap();
            assert!((1..=5).contains(&n));
        }
        let pending = rows.iter().find(|r| r.display("status") == "pending").unwrap();
        assert!(pending.get("returncode").unwrap().is_null());
    }
}
