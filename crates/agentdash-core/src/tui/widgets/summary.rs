//! Summary panel: agent and task totals.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::summary::DashboardSummary;
use crate::tui::style::Styles;
use crate::view::tasks::status_class;

/// Height of the summary panel including its border.
pub const SUMMARY_HEIGHT: u16 = 4;

/// Summary lines; placeholders while any dataset is loading.
pub fn summary_lines(summary: &DashboardSummary, loading: bool) -> Vec<Line<'static>> {
    if loading && summary.agents == 0 && summary.tasks == 0 {
        return vec![
            Line::from(vec![
                Span::styled("AGT ", Styles::label()),
                Span::styled("···", Styles::dim()),
            ]),
            Line::from(vec![
                Span::styled("TSK ", Styles::label()),
                Span::styled("···", Styles::dim()),
            ]),
        ];
    }

    let s = &summary.agent_status;
    let mut agents = vec![
        Span::styled("AGT ", Styles::label()),
        Span::raw(format!("total {:<5}", summary.agents)),
        Span::styled(format!("online {:<5}", s.online), Styles::online()),
        Span::styled(format!("offline {:<5}", s.offline), Styles::dim()),
        Span::raw(format!("other {:<5}", s.other)),
    ];
    if let Some(pct) = summary.online_pct() {
        agents.push(Span::raw(format!("up {:.0}%", pct)));
    }

    let mut tasks = vec![
        Span::styled("TSK ", Styles::label()),
        Span::raw(format!("total {:<5}", summary.tasks)),
    ];
    for (status, count) in &summary.task_status {
        tasks.push(Span::styled(
            format!("{} {:<5}", status, count),
            Styles::from_class(status_class(status)),
        ));
    }

    vec![Line::from(agents), Line::from(tasks)]
}

pub fn render_summary(frame: &mut Frame, area: Rect, summary: &DashboardSummary, loading: bool) {
    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .style(Styles::default());
    frame.render_widget(
        Paragraph::new(summary_lines(summary, loading)).block(block),
        area,
    );
}
