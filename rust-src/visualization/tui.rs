//! Interactive terminal dashboard built on ratatui.

use std::io::{self, Write};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode,
    enable_raw_mode,
    EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis,
    Bar,
    BarChart,
    BarGroup,
    Block,
    Borders,
    Chart as LineChart,
    Dataset,
    GraphType as DatasetType,
    Paragraph,
};
use ratatui::{Frame, Terminal};
use tracing::warn;

use crate::aggregation::{SeriesKey, SeriesRow, SummaryRow};
use crate::error::LoadError;
use crate::models::Roster;
use crate::view::{Dashboard, DashboardState, GraphType};

use super::charts::{build_charts, Chart};
use super::color::{parse_hex_color, series_rgb, SUMMARY_FILL};
use super::dashboard::{LOADING_MESSAGE, NO_DATA_MESSAGE};


const POLL_INTERVAL: Duration = Duration::from_millis(200);
const SIDEBAR_WIDTH: u16 = 30;
const ACCENT: Color = Color::Cyan;


/// Raw mode plus alternate screen, restored on drop.
///
/// Dropping restores the terminal on every exit path, including errors
/// while setting up and panics inside the event loop.
struct TerminalGuard<W: Write> {
    out: W,
}


impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> io::Result<Self> {
        enable_raw_mode()?;
        Self::on_alternate_screen(out)
    }

    fn on_alternate_screen(out: W) -> io::Result<Self> {
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}


impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.out, LeaveAlternateScreen, Show);
    }
}


/// Run the interactive dashboard until the user quits.
///
/// `pending` delivers the single load outcome. Quitting before it arrives
/// drops the receiver and the late result is discarded.
pub fn run_tui(
    mut dashboard: Dashboard,
    pending: Receiver<Result<Roster, LoadError>>,
    source: &str,
) -> Result<()> {
    let _guard = TerminalGuard::enter(io::stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    event_loop(&mut terminal, &mut dashboard, &pending, source)
}


fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard,
    pending: &Receiver<Result<Roster, LoadError>>,
    source: &str,
) -> Result<()> {
    loop {
        poll_load(dashboard, pending);

        terminal.draw(|frame| draw(frame, &*dashboard, source))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(dashboard, key.code) {
                return Ok(());
            }
        }
    }
}


/// Settle the dashboard once the loader reports back.
fn poll_load(dashboard: &mut Dashboard, pending: &Receiver<Result<Roster, LoadError>>) {
    if !dashboard.state.is_loading() {
        return;
    }

    match pending.try_recv() {
        Ok(outcome) => dashboard.resolve(outcome),
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            warn!("worklog loader exited without a result");
            dashboard.resolve(Ok(Vec::new()));
        }
    }
}


/// Apply a key press. Returns `true` when the user asked to quit.
pub fn handle_key(dashboard: &mut Dashboard, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('d') | KeyCode::Right => dashboard.cycle_developer(1),
        KeyCode::Char('D') | KeyCode::Left => dashboard.cycle_developer(-1),
        KeyCode::Char('g') | KeyCode::Tab => dashboard.cycle_graph_type(),
        _ => {}
    }
    false
}


/// Draw the whole screen.
pub fn draw(frame: &mut Frame, dashboard: &Dashboard, source: &str) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Weekly Developer Activity",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL)),
        header,
    );

    let [sidebar, main] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(0),
    ])
    .areas(body);

    draw_sidebar(frame, sidebar, dashboard);
    draw_main(frame, main, dashboard);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" d/→ ", Style::default().fg(ACCENT)),
            Span::raw("next developer "),
            Span::styled(" D/← ", Style::default().fg(ACCENT)),
            Span::raw("previous "),
            Span::styled(" g/Tab ", Style::default().fg(ACCENT)),
            Span::raw("graph type "),
            Span::styled(" q ", Style::default().fg(ACCENT)),
            Span::raw("quit  "),
            Span::styled(source.to_string(), Style::default().add_modifier(Modifier::DIM)),
        ])),
        footer,
    );
}


fn option_line(label: &str, selected: bool) -> Line<'static> {
    if selected {
        Line::from(Span::styled(
            format!("> {}", label),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(format!("  {}", label))
    }
}


/// Selector panel: developer options then graph type options.
fn draw_sidebar(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let mut lines = vec![Line::from(Span::styled(
        "Developer:",
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for option in dashboard.developer_options() {
        let selected = option == dashboard.view.selected_developer;
        lines.push(option_line(option.option_label(), selected));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Graph Type:",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for graph in GraphType::CHOICES {
        lines.push(option_line(graph.option_label(), graph == dashboard.view.graph_type));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Options")),
        area,
    );
}


/// Chart area: load state message or the visible charts stacked vertically.
fn draw_main(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let message = match dashboard.state {
        DashboardState::Loading => Some(LOADING_MESSAGE),
        DashboardState::Empty => Some(NO_DATA_MESSAGE),
        DashboardState::Ready(_) => None,
    };

    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(message).block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let charts = build_charts(dashboard);
    if charts.is_empty() {
        frame.render_widget(
            Paragraph::new("Select a developer to see the line chart.")
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }

    let areas = Layout::vertical(vec![Constraint::Fill(1); charts.len()]).split(area);
    for (chart, chart_area) in charts.iter().zip(areas.iter()) {
        match chart {
            Chart::Summary { rows, .. } => draw_summary(frame, *chart_area, &chart.title(), rows),
            Chart::DeveloperLine { legend, series, .. } => {
                draw_lines(frame, *chart_area, &chart.title(), legend, series)
            }
            Chart::DeveloperBar { legend, series, .. } => {
                draw_grouped_bars(frame, *chart_area, &chart.title(), legend, series)
            }
        }
    }
}


fn rgb_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}


fn bar_value(value: i64) -> u64 {
    value.max(0) as u64
}


fn draw_summary(frame: &mut Frame, area: Rect, title: &str, rows: &[SummaryRow]) {
    let color = parse_hex_color(SUMMARY_FILL).map(rgb_color).unwrap_or(Color::Magenta);
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(bar_value(row.value))
                .label(Line::from(row.name.clone()))
                .style(Style::default().fg(color))
        })
        .collect();

    let slots = rows.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / slots).saturating_sub(1).max(1);

    frame.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(1),
        area,
    );
}


fn draw_lines(frame: &mut Frame, area: Rect, title: &str, legend: &[SeriesKey], series: &[SeriesRow]) {
    let points: Vec<Vec<(f64, f64)>> = legend
        .iter()
        .map(|key| {
            series
                .iter()
                .enumerate()
                .map(|(i, row)| (i as f64, row.value(&key.label) as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = legend
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(index, (key, data))| {
            Dataset::default()
                .name(key.label.clone())
                .marker(Marker::Braille)
                .graph_type(DatasetType::Line)
                .style(Style::default().fg(rgb_color(series_rgb(&key.fill_color, index))))
                .data(data)
        })
        .collect();

    let y_max = points
        .iter()
        .flatten()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    let x_max = (series.len().saturating_sub(1) as f64).max(1.0);

    let first = series.first().map(|r| r.date.clone()).unwrap_or_default();
    let last = series.last().map(|r| r.date.clone()).unwrap_or_default();

    let chart = LineChart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first), Span::raw(last)]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    frame.render_widget(chart, area);
}


fn draw_grouped_bars(frame: &mut Frame, area: Rect, title: &str, legend: &[SeriesKey], series: &[SeriesRow]) {
    let colors: Vec<Color> = legend
        .iter()
        .enumerate()
        .map(|(index, key)| rgb_color(series_rgb(&key.fill_color, index)))
        .collect();

    let slots = (series.len() * legend.len().max(1)).max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / slots).saturating_sub(1).clamp(1, 6);

    let mut chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2);

    for row in series {
        let bars: Vec<Bar> = legend
            .iter()
            .zip(colors.iter())
            .map(|(key, color)| {
                Bar::default()
                    .value(bar_value(row.value(&key.label)))
                    .style(Style::default().fg(*color))
            })
            .collect();
        chart = chart.data(BarGroup::default().label(Line::from(row.date.clone())).bars(&bars));
    }

    frame.render_widget(chart, area);
}
