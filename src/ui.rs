use std::error::Error;
use std::io;

use chrono::{DateTime, Datelike, Local, NaiveDate};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::calendar::{CalendarCell, first_day_of_month, month_grid, shift_month};
use crate::config::AppConfig;
use crate::ledger::{EventKind, Ledger, format_clock_time, format_worked_duration};
use crate::summary::{HoursSeries, build_series, start_of_week, week_hours};
use crate::view::{ActiveView, SummaryPeriod, ViewCoordinator, WidgetTransitions};

const ACTIVE_TAB_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Yellow);
const TODAY_CELL_COLOR: Color = Color::Yellow;
const BAR_COLOR: Color = Color::Cyan;

pub fn run_dashboard(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Month the calendar renderer is showing. Constructed when the calendar
/// view activates and dropped when it deactivates, so re-entering the view
/// starts back at the current month.
struct CalendarPanel {
    month: NaiveDate,
}

impl CalendarPanel {
    fn new(today: NaiveDate) -> Self {
        Self {
            month: first_day_of_month(today),
        }
    }

    fn shift(&mut self, delta: i32) {
        self.month = first_day_of_month(shift_month(self.month, delta));
    }
}

/// Chart renderer state: remembers the drawable width so bars can be scaled,
/// updated through the resize notification while active.
struct ChartPanel {
    width: u16,
}

impl ChartPanel {
    fn new(width: u16) -> Self {
        Self { width }
    }

    fn resize(&mut self, width: u16) {
        self.width = width;
    }
}

struct App {
    ledger: Ledger,
    coordinator: ViewCoordinator,
    calendar_panel: Option<CalendarPanel>,
    chart_panel: Option<ChartPanel>,
    last_width: u16,
    status: String,
}

impl App {
    fn new() -> Self {
        Self {
            ledger: Ledger::new(),
            coordinator: ViewCoordinator::default(),
            calendar_panel: None,
            chart_panel: None,
            last_width: 80,
            status: "Ready".to_string(),
        }
    }

    fn toggle_clock(&mut self, now: DateTime<Local>) {
        let kind = if self.ledger.is_clocked_in() {
            EventKind::Out
        } else {
            EventKind::In
        };
        self.ledger.append(kind, now);
        self.status = match kind {
            EventKind::In => format!("Clocked in at {}", format_clock_time(now)),
            EventKind::Out => format!("Clocked out at {}", format_clock_time(now)),
        };
    }

    fn select_view(&mut self, view: ActiveView, today: NaiveDate) {
        let transitions = self.coordinator.select_view(view);
        self.apply_transitions(transitions, today);
    }

    fn select_period(&mut self, period: SummaryPeriod, today: NaiveDate) {
        let transitions = self.coordinator.select_period(period);
        self.apply_transitions(transitions, today);
    }

    fn apply_transitions(&mut self, transitions: WidgetTransitions, today: NaiveDate) {
        if transitions.calendar_constructed {
            self.calendar_panel = Some(CalendarPanel::new(today));
        }
        if transitions.calendar_destroyed {
            self.calendar_panel = None;
        }
        if transitions.chart_constructed {
            self.chart_panel = Some(ChartPanel::new(self.last_width));
        }
        if transitions.chart_destroyed {
            self.chart_panel = None;
        }

        debug_assert_eq!(
            self.calendar_panel.is_some(),
            self.coordinator.calendar_widget().is_active()
        );
        debug_assert_eq!(
            self.chart_panel.is_some(),
            self.coordinator.chart_widget().is_active()
        );
    }

    fn notify_resize(&mut self, width: u16) {
        self.last_width = width;
        if self.coordinator.resize_reaches_chart() {
            if let Some(chart) = &mut self.chart_panel {
                chart.resize(width);
            }
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
) -> Result<(), Box<dyn Error>> {
    let mut app = App::new();
    let tick_period = config.tick_period();

    loop {
        let now = Local::now();
        terminal.draw(|frame| draw_dashboard(frame, &app, config, now))?;

        if !event::poll(tick_period)? {
            continue;
        }

        match event::read()? {
            CEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(&mut app, key.code, Local::now()) {
                    break;
                }
            }
            CEvent::Resize(width, _) => {
                app.notify_resize(width);
            }
            _ => {}
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, now: DateTime<Local>) -> bool {
    let today = now.date_naive();
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Tab => {
            let next = app.coordinator.active_view().next();
            app.select_view(next, today);
        }
        KeyCode::BackTab => {
            let prev = app.coordinator.active_view().prev();
            app.select_view(prev, today);
        }
        KeyCode::Char('1') => app.select_view(ActiveView::Today, today),
        KeyCode::Char('2') => app.select_view(ActiveView::Calendar, today),
        KeyCode::Char('3') => app.select_view(ActiveView::Summary, today),
        KeyCode::Char('4') => app.select_view(ActiveView::Profile, today),
        KeyCode::Char(' ') => app.toggle_clock(now),
        KeyCode::Char('w') => app.select_period(SummaryPeriod::Weekly, today),
        KeyCode::Char('m') => app.select_period(SummaryPeriod::Monthly, today),
        KeyCode::Char('n') => {
            if let Some(panel) = &mut app.calendar_panel {
                panel.shift(1);
            }
        }
        KeyCode::Char('N') => {
            if let Some(panel) = &mut app.calendar_panel {
                panel.shift(-1);
            }
        }
        _ => {}
    }
    false
}

fn draw_dashboard(frame: &mut Frame, app: &App, config: &AppConfig, now: DateTime<Local>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_tab_bar(frame, layout[0], app.coordinator.active_view());

    match app.coordinator.active_view() {
        ActiveView::Today => render_today_view(frame, layout[1], app, now),
        ActiveView::Calendar => render_calendar_view(frame, layout[1], app, now.date_naive()),
        ActiveView::Summary => render_summary_view(frame, layout[1], app, config, now),
        ActiveView::Profile => render_profile_view(frame, layout[1]),
    }

    render_footer(frame, layout[2], app);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: ActiveView) {
    let views = [
        ActiveView::Today,
        ActiveView::Calendar,
        ActiveView::Summary,
        ActiveView::Profile,
    ];
    let mut spans = Vec::new();
    for (index, view) in views.iter().enumerate() {
        let label = format!(" {} {} ", index + 1, view.title());
        let style = if *view == active {
            ACTIVE_TAB_STYLE.add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("punchboard"));
    frame.render_widget(bar, area);
}

fn render_today_view(frame: &mut Frame, area: Rect, app: &App, now: DateTime<Local>) {
    let worked = app.ledger.worked_duration(now);
    let clocked_in = app.ledger.is_clocked_in();

    let open_since = app
        .ledger
        .sessions(now)
        .into_iter()
        .find(|session| session.open)
        .map(|session| session.start);

    let state_line = if let Some(since) = open_since {
        Line::from(Span::styled(
            format!("CLOCKED IN  since {}", format_clock_time(since)),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "CLOCKED OUT",
            Style::default().fg(Color::DarkGray),
        ))
    };

    let mut lines = vec![
        Line::from(format!("Current time  {}", format_clock_time(now))),
        Line::from(vec![
            Span::raw("Worked today  "),
            Span::styled(
                format_worked_duration(worked),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        state_line,
        Line::from(""),
        Line::from(format!(
            "space: {}",
            if clocked_in { "clock out" } else { "clock in" }
        )),
        Line::from(""),
        Line::from("Entries"),
    ];

    if app.ledger.entries().is_empty() {
        lines.push(Line::from("(no entries yet)"));
    } else {
        for entry in app.ledger.entries().iter().rev().take(12) {
            let (marker, style) = match entry.kind {
                EventKind::In => ("IN ", Style::default().fg(Color::LightGreen)),
                EventKind::Out => ("OUT", Style::default().fg(Color::LightRed)),
            };
            lines.push(Line::from(vec![
                Span::styled(marker, style),
                Span::raw(format!("  {}", format_clock_time(entry.timestamp))),
            ]));
        }
    }

    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Today"));
    frame.render_widget(panel, area);
}

fn render_calendar_view(frame: &mut Frame, area: Rect, app: &App, today: NaiveDate) {
    let Some(panel) = &app.calendar_panel else {
        return;
    };

    let cells = month_grid(panel.month, today);
    let mut lines = Vec::new();
    lines.push(Line::from(format!(
        "{} {}",
        panel.month.format("%B"),
        panel.month.year()
    )));
    lines.push(Line::from("Mo Tu We Th Fr Sa Su"));

    for week in cells.chunks(7) {
        let spans = week.iter().map(calendar_cell_span).collect::<Vec<_>>();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    lines.push(Line::from("n next month | N previous month"));

    let calendar =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Calendar"));
    frame.render_widget(calendar, area);
}

fn calendar_cell_span(cell: &CalendarCell) -> Span<'static> {
    match cell.day {
        None => Span::raw("   "),
        Some(day) => {
            let style = if cell.today {
                Style::default()
                    .fg(Color::Black)
                    .bg(TODAY_CELL_COLOR)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Span::styled(format!("{day:>2} "), style)
        }
    }
}

fn render_summary_view(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    config: &AppConfig,
    now: DateTime<Local>,
) {
    let period = app.coordinator.summary_period();
    let mut lines = vec![segment_line(period), Line::from("")];

    match period {
        SummaryPeriod::Weekly => {
            let daily = if app.ledger.entries().is_empty() {
                config.reference_week.clone()
            } else {
                week_hours(&app.ledger, start_of_week(now.date_naive()), now)
            };
            let series = build_series(&daily);
            let width = app
                .chart_panel
                .as_ref()
                .map(|chart| chart.width)
                .unwrap_or(area.width);
            lines.extend(chart_lines(&series, width));
            if app.ledger.entries().is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "(reference week; clock in to track real hours)",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        SummaryPeriod::Monthly => {
            lines.push(Line::from(format!(
                "Total worked  {}",
                format_worked_duration(app.ledger.worked_duration(now))
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "(monthly breakdown needs history beyond this session)",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(panel, area);
}

fn segment_line(period: SummaryPeriod) -> Line<'static> {
    let weekly_style = if period == SummaryPeriod::Weekly {
        ACTIVE_TAB_STYLE
    } else {
        Style::default().fg(Color::Gray)
    };
    let monthly_style = if period == SummaryPeriod::Monthly {
        ACTIVE_TAB_STYLE
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(" w Weekly ", weekly_style),
        Span::raw("  "),
        Span::styled(" m Monthly ", monthly_style),
    ])
}

fn chart_lines(series: &HoursSeries, width: u16) -> Vec<Line<'static>> {
    let max_hours = series
        .values
        .iter()
        .cloned()
        .fold(0.0f64, f64::max)
        .max(1.0);
    let bar_space = width.saturating_sub(14).max(8) as f64;

    series
        .labels
        .iter()
        .zip(&series.values)
        .map(|(label, hours)| {
            let bar_width = ((hours / max_hours) * bar_space).round() as usize;
            let bar = if *hours > 0.0 {
                "=".repeat(bar_width.max(1))
            } else {
                String::new()
            };
            Line::from(vec![
                Span::raw(format!("{label:<2} {hours:>5.1}h ")),
                Span::styled(bar, Style::default().fg(BAR_COLOR)),
            ])
        })
        .collect()
}

fn render_profile_view(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Alex Vega",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Software Developer"),
        Line::from(""),
        Line::from("Settings"),
        Line::from("Notifications"),
        Line::from("Log out"),
    ];

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile"));
    frame.render_widget(panel, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(vec![
        Line::from("1-4/Tab views | space clock in/out | w/m summary period | n/N month | q quit"),
        Line::from(app.status.clone()),
    ])
    .block(Block::default().borders(Borders::ALL).title("Shortcuts"));
    frame.render_widget(footer, area);
}
