//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Clear, Gauge, Paragraph, Wrap};

use super::controls::CONCEPT_KEYS;
use super::runtime::{App, Mode};
use super::style;
use crate::account::Meter;
use crate::concepts;
use crate::machine::story::{
    api_progress, can_go_next, can_go_previous, chapter_status, progress_percent,
};
use crate::machine::{ChapterId, ExplorerState};
use crate::tariff::FuelType;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.mode {
        Mode::Dashboard => render_dashboard(frame, app, chunks[1]),
        Mode::Story => render_story(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

/// Header bar: account number, balance, current mode and machine state.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let location = match app.mode {
        Mode::Dashboard => format!("{:?}", app.explorer.state()),
        Mode::Story => {
            let chapter = app.chapter();
            format!("Chapter {}/{}", chapter.number, ChapterId::ALL.len())
        }
    };
    let header = Line::from(vec![
        Span::styled(
            " ENERGY EXPLORER ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.account.number,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {:?} │ {} │ {location} ",
            app.account.status,
            app.account.balance_display(),
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    if app.explorer.matches(ExplorerState::SchemaMap) {
        render_schema_map(frame, app, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // property
            Constraint::Length(6), // electricity
            Constraint::Length(5), // gas
            Constraint::Min(8),    // consumption
        ])
        .split(columns[0]);

    render_property(frame, app, left[0]);
    render_electricity(frame, app, left[1]);
    render_gas(frame, app, left[2]);
    render_consumption(frame, app, left[3]);

    if app.explorer.matches(ExplorerState::ViewingConcept) {
        render_concept_panel(frame, app, columns[1]);
    } else {
        render_concept_list(frame, app, columns[1]);
    }

    if app.is_decoding() {
        render_decoder(frame, app, centered(area, 60, 12));
    }
}

fn render_property(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.account.properties.first() {
        Some(p) => vec![
            Line::from(format!("  {}", p.address)),
            Line::from(format!("  {}", p.postcode)),
        ],
        None => vec![Line::from("  No property on this account")],
    };
    let block = Block::default()
        .title(" Property [p] ")
        .borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_electricity(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.account.primary_electricity() {
        Some(point) => {
            let tariff = point
                .agreements
                .first()
                .map_or("-", |a| a.tariff_code.as_str());
            vec![
                Line::from(format!("  MPAN [e]    {}", point.mpan)),
                Line::from(format!("  Meter [k]   {}", first_serial(&point.meters))),
                Line::from(format!("  Tariff [i]  {tariff}")),
                Line::from(format!("  Region [r]  {}", point.region_code())),
            ]
        }
        None => vec![Line::from("  No electricity supply")],
    };
    let block = Block::default()
        .title(" Electricity ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style::ELECTRICITY));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_gas(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.account.primary_gas() {
        Some(point) => {
            let tariff = point
                .agreements
                .first()
                .map_or("-", |a| a.tariff_code.as_str());
            vec![
                Line::from(format!("  MPRN [g]    {}", point.mprn)),
                Line::from(format!("  Meter       {}", first_serial(&point.meters))),
                Line::from(format!("  Tariff      {tariff}")),
            ]
        }
        None => vec![Line::from("  No gas supply")],
    };
    let block = Block::default()
        .title(" Gas ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style::GAS));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn first_serial(meters: &[Meter]) -> &str {
    meters.first().map_or("-", |m| m.serial_number.as_str())
}

/// Weekly electricity usage as a bar chart (whole kWh).
fn render_consumption(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<(&str, u64)> = app
        .account
        .primary_electricity()
        .and_then(|p| p.meters.first())
        .map(|m| {
            m.consumption
                .iter()
                .map(|c| (c.weekday, c.quantity.max(0.0).round() as u64))
                .collect()
        })
        .unwrap_or_default();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Consumption kWh [c] ")
                .borders(Borders::ALL),
        )
        .data(data.as_slice())
        .bar_width(4)
        .bar_gap(1)
        .bar_style(Style::default().fg(style::ELECTRICITY));
    frame.render_widget(chart, area);
}

/// Concept hotkeys with visited markers.
fn render_concept_list(frame: &mut Frame, app: &App, area: Rect) {
    let visited = &app.explorer.context().visited_concepts;
    let mut lines: Vec<Line> = CONCEPT_KEYS
        .iter()
        .map(|(key, id)| {
            let seen = visited.contains(id);
            let color = if seen {
                style::VISITED
            } else {
                style::FOOTER_FG
            };
            Line::from(vec![
                Span::styled(
                    format!(" {} ", style::visited_marker(seen)),
                    Style::default().fg(color),
                ),
                Span::styled(format!("[{key}] "), Style::default().fg(style::HIGHLIGHT)),
                Span::raw(concepts::concept(*id).title),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        " Explored {}/{}",
        visited.len(),
        concepts::catalog().len()
    )));

    let block = Block::default().title(" Concepts ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Side panel for the active concept, with its format breakdown and links.
fn render_concept_panel(frame: &mut Frame, app: &App, area: Rect) {
    let Some(concept) = app.active_concept() else {
        return;
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(concept.short_description, bold)),
        Line::from(""),
        Line::from(concept.full_description),
        Line::from(""),
        Line::from(vec![
            Span::styled("API path  ", bold),
            Span::raw(concept.api_path),
        ]),
        Line::from(vec![
            Span::styled("Example   ", bold),
            Span::raw(concept.example),
        ]),
    ];
    if !concept.segments.is_empty() {
        lines.push(Line::from(""));
        for seg in concept.segments {
            lines.push(Line::from(format!("  {:<12} {}", seg.value, seg.label)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Related", bold)));
    let selected = app.selected_related();
    for id in concept.related {
        let title = concepts::concept(*id).title;
        let line = if Some(*id) == selected {
            Line::from(Span::styled(
                format!(" ▸ {title}"),
                Style::default().fg(style::HIGHLIGHT),
            ))
        } else {
            Line::from(format!("   {title}"))
        };
        lines.push(line);
    }

    let block = Block::default()
        .title(format!(" {} ", concept.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style::HIGHLIGHT));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Tariff decoder overlay.
fn render_decoder(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            app.tariff_code.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let color = match &app.decoded {
        Some(decoded) => {
            for seg in decoded.segments() {
                lines.push(Line::from(format!("  {:<12} {}", seg.label, seg.value)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "  {} · {} · {}",
                decoded.fuel_type.label(),
                decoded.rate_type.label(),
                decoded.region_name
            )));
            style::fuel_color(&decoded.fuel_type)
        }
        None => {
            lines.push(Line::from("  This code cannot be decoded."));
            style::fuel_color(&FuelType::Other(String::new()))
        }
    };

    let block = Block::default()
        .title(" Tariff Decoder ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Tree of the account graph, annotated with concept visits.
fn render_schema_map(frame: &mut Frame, app: &App, area: Rect) {
    let visited = &app.explorer.context().visited_concepts;
    let node = |depth: usize, label: String, id: concepts::ConceptId| {
        let seen = visited.contains(&id);
        let color = if seen {
            style::VISITED
        } else {
            style::HEADER_FG
        };
        Line::from(vec![
            Span::raw("  ".repeat(depth)),
            Span::styled(
                format!("{} {label}", style::visited_marker(seen)),
                Style::default().fg(color),
            ),
        ])
    };

    use crate::concepts::ConceptId as C;
    let account = &app.account;
    let mut lines = vec![
        node(0, format!("account {}", account.number), C::AccountNumber),
        node(1, format!("balance {}", account.balance), C::Balance),
    ];
    for property in &account.properties {
        lines.push(node(
            1,
            format!("property {}", property.postcode),
            C::Property,
        ));
        for point in &property.electricity_meter_points {
            lines.push(node(2, format!("mpan {}", point.mpan), C::Mpan));
            lines.push(node(
                3,
                format!("gspGroupId {}", point.gsp_group_id),
                C::GspRegion,
            ));
            for meter in &point.meters {
                lines.push(node(3, format!("meter {}", meter.serial_number), C::Meter));
                lines.push(node(4, "consumption[]".to_string(), C::Consumption));
            }
            for agreement in &point.agreements {
                lines.push(node(
                    3,
                    format!("tariff {}", agreement.tariff_code),
                    C::TariffCode,
                ));
            }
        }
        for point in &property.gas_meter_points {
            lines.push(node(2, format!("mprn {}", point.mprn), C::Mprn));
            for meter in &point.meters {
                lines.push(node(3, format!("meter {}", meter.serial_number), C::Meter));
            }
            for agreement in &point.agreements {
                lines.push(node(
                    3,
                    format!("tariff {}", agreement.tariff_code),
                    C::TariffCode,
                ));
            }
        }
    }

    let block = Block::default().title(" Schema Map ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_story(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // chapter strip
            Constraint::Length(3), // progress
            Constraint::Min(6),    // chapter body
        ])
        .split(area);

    render_chapter_strip(frame, app, chunks[0]);
    render_progress(frame, app, chunks[1]);
    render_chapter(frame, app, chunks[2]);
}

fn render_chapter_strip(frame: &mut Frame, app: &App, area: Rect) {
    let ctx = app.story.context();
    let spans: Vec<Span> = ChapterId::ALL
        .into_iter()
        .flat_map(|chapter| {
            let (marker, color) = style::chapter_marker(chapter_status(ctx, chapter));
            [
                Span::styled(
                    format!(" {}{marker} ", chapter.index() + 1),
                    Style::default().fg(color),
                ),
                Span::raw(" "),
            ]
        })
        .collect();
    let block = Block::default().title(" Chapters ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_progress(frame: &mut Frame, app: &App, area: Rect) {
    let pct = progress_percent(app.story.context());
    let gauge = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::PROGRESS))
        .percent(u16::from(pct))
        .label(format!("{pct}%"));
    frame.render_widget(gauge, area);
}

fn render_chapter(frame: &mut Frame, app: &App, area: Rect) {
    let ctx = app.story.context();
    let chapter = app.chapter();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(chapter.subtitle, bold)),
        Line::from(""),
    ];
    if chapter.topics.is_empty() {
        lines.push(Line::from("  Nothing to explore in this chapter yet."));
    } else {
        let selected = app.selected_topic();
        for topic in chapter.topics {
            let explored = ctx.explored_concepts.contains(*topic);
            let marker = style::visited_marker(explored);
            let line = if Some(*topic) == selected {
                Line::from(Span::styled(
                    format!(" ▸ {marker} {topic}"),
                    Style::default().fg(style::HIGHLIGHT),
                ))
            } else {
                Line::from(format!("   {marker} {topic}"))
            };
            lines.push(line);
        }
    }

    let (explored, goal) = api_progress(ctx);
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "  API concepts explored: {explored}/{goal}"
    )));
    let mut nav = Vec::new();
    if can_go_previous(ctx) {
        nav.push("← previous");
    }
    if can_go_next(ctx) {
        nav.push("next →");
    }
    lines.push(Line::from(format!("  {}", nav.join("   "))));

    let block = Block::default()
        .title(format!(" {}. {} ", chapter.number, chapter.title))
        .borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Footer with keybinding hints, or the last status message.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match (&app.status, app.mode) {
        (Some(status), _) => (format!(" {status}"), style::STATUS_FG),
        (None, Mode::Dashboard) => (
            " q:Quit  s:Story  t:Tariff  m:Map  Esc:Close  Tab/Enter:Related".to_string(),
            style::FOOTER_FG,
        ),
        (None, Mode::Story) => (
            " q:Quit  s:Dashboard  ←/→:Chapter  1-7:Jump  Tab/e:Explore  R:Reset".to_string(),
            style::FOOTER_FG,
        ),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(color),
    )));
    frame.render_widget(footer, area);
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
