//! Dashboard aggregates over the loaded agents and tasks.

use std::collections::HashMap;

use crate::value::Row;

/// Agent counts by connectivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentStatusCounts {
    pub online: usize,
    pub offline: usize,
    /// Any other (or missing) status.
    pub other: usize,
}

/// Totals shown in the summary panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub agents: usize,
    pub tasks: usize,
    pub agent_status: AgentStatusCounts,
    /// `(status, count)`, most frequent first, ties by name.
    pub task_status: Vec<(String, usize)>,
}

impl DashboardSummary {
    pub fn from_rows(agents: &[Row], tasks: &[Row]) -> Self {
        let mut agent_status = AgentStatusCounts::default();
        for agent in agents {
            match agent.display("status").trim().to_lowercase().as_str() {
                "online" => agent_status.online += 1,
                "offline" => agent_status.offline += 1,
                _ => agent_status.other += 1,
            }
        }

        let mut by_status: HashMap<String, usize> = HashMap::new();
        for task in tasks {
            let status = task.display("status").trim().to_lowercase();
            let status = if status.is_empty() {
                "unknown".to_string()
            } else {
                status
            };
            *by_status.entry(status).or_default() += 1;
        }
        let mut task_status: Vec<(String, usize)> = by_status.into_iter().collect();
        task_status.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            agents: agents.len(),
            tasks: tasks.len(),
            agent_status,
            task_status,
        }
    }

    /// Share of agents that are online, in percent. `None` without agents.
    pub fn online_pct(&self) -> Option<f64> {
        (self.agents > 0).then(|| self.agent_status.online as f64 * 100.0 / self.agents as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(key: &str, status: Option<&str>) -> Row {
        Row::new().with(key, "x").with("status", status)
    }

    #[test]
    fn counts_agent_statuses() {
        let agents = vec![
            with_status("agent_id", Some("online")),
            with_status("agent_id", Some("ONLINE")),
            with_status("agent_id", Some("offline")),
            with_status("agent_id", None),
            with_status("agent_id", Some("degraded")),
        ];
        let s = DashboardSummary::from_rows(&agents, &[]);
        assert_eq!(s.agents, 5);
        assert_eq!(
            s.agent_status,
            AgentStatusCounts {
                online: 2,
                offline: 1,
                other: 2
            }
        );
        assert_eq!(s.online_pct(), Some(40.0));
    }

    #[test]
    fn orders_task_statuses() {
        let tasks = vec![
            with_status("task_id", Some("pending")),
            with_status("task_id", Some("completed")),
            with_status("task_id", Some("Completed")),
            with_status("task_id", Some("failed")),
            with_status("task_id", None),
        ];
        let s = DashboardSummary::from_rows(&[], &tasks);
        assert_eq!(s.tasks, 5);
        assert_eq!(
            s.task_status,
            vec![
                ("completed".to_string(), 2),
                ("failed".to_string(), 1),
                ("pending".to_string(), 1),
                ("unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn empty_is_zero() {
        let s = DashboardSummary::from_rows(&[], &[]);
        assert_eq!(s, DashboardSummary::default());
        assert_eq!(s.online_pct(), None);
    }
}
