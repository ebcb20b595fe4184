//! The Ascent rendering (read-only from state).

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

use super::actions::*;
use super::catalog::{
    education_rank, education_tier, job_tier, real_estate, upgrade, ACHIEVEMENTS, UPGRADES,
};
use super::format::{format_money, format_money_short};
use super::logic::PurchaseKind;
use super::state::{
    asset_value, can_take_job, current_education, current_job, income_breakdown,
    owned_asset_total, study_progress, study_remaining_secs, EconomyState,
};
use super::{degree_count, AscentGame, Offer, OfferRow, Tab};

struct Panes {
    header: Rect,
    work: Rect,
    tabs: Rect,
    content: Rect,
    log: Rect,
}

fn panes(area: Rect) -> Panes {
    // Log panel on the right when wide, underneath when narrow.
    let (main_area, log_area) = if is_narrow_layout(area.width) {
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(12), Constraint::Length(6)])
            .split(area);
        (v[0], v[1])
    } else {
        let h = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h[0], h[1])
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Length(3), // Work button
            Constraint::Length(1), // Tab bar
            Constraint::Min(4),    // Tab content
        ])
        .split(main_area);

    Panes {
        header: chunks[0],
        work: chunks[1],
        tabs: chunks[2],
        content: chunks[3],
        log: log_area,
    }
}

/// Offer lines that fit inside the tab content box. Both border styles
/// take a row at the top and bottom.
pub fn offer_height(area: Rect) -> usize {
    panes(area).content.height.saturating_sub(2) as usize
}

pub fn render(
    game: &AscentGame,
    f: &mut Frame,
    area: Rect,
    now_ms: u64,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let is_narrow = is_narrow_layout(area.width);
    let borders = if is_narrow {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    };
    let panes = panes(area);

    let state = game.state();
    render_header(state, f, panes.header, borders, is_narrow);
    render_work_button(state, f, panes.work, borders, now_ms, click_state);
    render_tab_bar(game.tab, f, panes.tabs, click_state);
    match game.tab {
        Tab::Career | Tab::Assets => {
            render_offers(game, f, panes.content, borders, now_ms, click_state)
        }
        Tab::Stats => render_stats(state, f, panes.content, borders),
        Tab::Achievements => render_achievements(state, f, panes.content, borders),
    }
    render_log(game, f, panes.log, borders);
}

// ── Header ─────────────────────────────────────────────────────

fn render_header(
    state: &EconomyState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    is_narrow: bool,
) {
    let money = |v: f64| {
        if is_narrow {
            format_money_short(v)
        } else {
            format_money(v)
        }
    };
    let job = current_job(state);
    let education = current_education(state);
    let income = income_breakdown(state).total();

    let lines = vec![
        Line::from(vec![
            Span::styled(" Cash: ", Style::default().fg(Color::Gray)),
            Span::styled(
                money(state.cash),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (+{}/tick)", money(income)),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Net worth: ", Style::default().fg(Color::Gray)),
            Span::styled(money(state.net_worth), Style::default().fg(Color::White)),
            Span::styled(
                format!("  Click: +{}", money(state.click_value)),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {} {}", job.icon, job.name),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  🎓 {}", education.name),
                Style::default().fg(Color::Magenta),
            ),
        ]),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " The Ascent ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Work button ────────────────────────────────────────────────

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(filled) + &"░".repeat(width.saturating_sub(filled))
}

fn render_work_button(
    state: &EconomyState,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    now_ms: u64,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    if state.is_studying() {
        let remaining = study_remaining_secs(state, now_ms);
        let bar = progress_bar(study_progress(state, now_ms), 16);
        cl.push_clickable(
            Line::from(vec![
                Span::styled(" 📚 Studying ", Style::default().fg(Color::Magenta)),
                Span::styled(bar, Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!(" {}s left", remaining),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            CLICK_WORK,
        );
    } else {
        cl.push_clickable(
            Line::from(Span::styled(
                format!(" [SPACE] 💼 Work  +{}", format_money(state.click_value)),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            CLICK_WORK,
        );
    }

    let border_color = if state.is_studying() {
        Color::DarkGray
    } else {
        Color::Yellow
    };
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(border_color));

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Tabs ───────────────────────────────────────────────────────

fn render_tab_bar(active: Tab, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let mut bar = TabBar::new(" │ ");
    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        bar = bar.tab(format!("{}:{}", i + 1, tab.label()), style, tab.action_id());
    }
    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

// ── Career / Assets ────────────────────────────────────────────

struct OfferView {
    icon: &'static str,
    name: &'static str,
    detail: String,
    available: bool,
}

fn describe_offer(state: &EconomyState, offer: &Offer, now_ms: u64) -> Option<OfferView> {
    let view = match offer.kind {
        PurchaseKind::Education => {
            let tier = education_tier(offer.id)?;
            let detail = if state.is_studying() {
                format!("in class, {}s left", study_remaining_secs(state, now_ms))
            } else {
                format!("{}  {}s", format_money(tier.cost), tier.study_secs)
            };
            OfferView {
                icon: "🎓",
                name: tier.name,
                detail,
                available: !state.is_studying() && state.cash >= tier.cost,
            }
        }
        PurchaseKind::Job => {
            let job = job_tier(offer.id)?;
            let qualified = can_take_job(state, job);
            let detail = if qualified {
                format!("{}/tick", format_money(job.salary))
            } else {
                let needs = education_tier(job.required_education)
                    .map_or(job.required_education, |t| t.name);
                format!("needs {}", needs)
            };
            OfferView {
                icon: job.icon,
                name: job.name,
                detail,
                available: qualified,
            }
        }
        PurchaseKind::Upgrade => {
            let u = upgrade(offer.id)?;
            let owned = state.purchased_upgrades.contains(u.id);
            let detail = if owned {
                "owned".to_string()
            } else if u.rate_bonus > 0.0 {
                format!("{}  +{}/tick", format_money(u.cost), format_money(u.rate_bonus))
            } else {
                format!("{}  +{}/click", format_money(u.cost), format_money(u.click_bonus))
            };
            OfferView {
                icon: u.icon,
                name: u.name,
                detail,
                available: !owned && state.cash >= u.cost,
            }
        }
        PurchaseKind::Asset => {
            let a = real_estate(offer.id)?;
            let count = state.owned_assets.get(a.id).copied().unwrap_or(0);
            OfferView {
                icon: a.icon,
                name: a.name,
                detail: format!(
                    "{}  +{}/tick  x{}",
                    format_money(a.cost),
                    format_money(a.income),
                    count
                ),
                available: state.cash >= a.cost,
            }
        }
    };
    Some(view)
}

fn section_title(kind: PurchaseKind) -> &'static str {
    match kind {
        PurchaseKind::Education => " Education",
        PurchaseKind::Job => " Jobs",
        PurchaseKind::Upgrade => " Upgrades",
        PurchaseKind::Asset => " Real estate",
    }
}

fn render_offers(
    game: &AscentGame,
    f: &mut Frame,
    area: Rect,
    borders: Borders,
    now_ms: u64,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let state = game.state();
    let list = game.offer_list();
    let mut cl = ClickableList::new();

    for row in &list.rows {
        let i = match *row {
            OfferRow::Heading(kind) => {
                cl.push(Line::from(Span::styled(
                    section_title(kind),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::UNDERLINED),
                )));
                continue;
            }
            OfferRow::Offer(i) => i,
        };
        // Keep one line per row so the scroll offset stays aligned.
        let Some(view) = list
            .offers
            .get(i)
            .and_then(|offer| describe_offer(state, offer, now_ms))
        else {
            cl.push(Line::default());
            continue;
        };
        let key = (b'a' + i as u8) as char;
        let (key_style, text_style) = if view.available {
            (
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", key), key_style),
                Span::styled(format!("{} {:<22}", view.icon, view.name), text_style),
                Span::styled(view.detail, Style::default().fg(Color::Gray)),
            ]),
            BUY_OFFER_BASE + i as u16,
        );
    }

    let title = match game.tab {
        Tab::Assets => " Assets ",
        _ => " Career ",
    };
    let hint = Style::default().fg(Color::Yellow);
    let mut block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Green))
        .title(title);
    if list.more_above() {
        block = block.title(Line::styled(" ▲ [-] ", hint).right_aligned());
    }
    if list.more_below() {
        block = block.title_bottom(Line::styled(" ▼ [=] ", hint).right_aligned());
    }

    let scroll = list.scroll as u16;
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, scroll);
        // The scroll hints sit on the border rows.
        if list.more_above() {
            cs.add_row_target(area, area.y, SCROLL_UP);
        }
        if list.more_below() {
            let bottom = area.y + area.height.saturating_sub(1);
            cs.add_row_target(area, bottom, SCROLL_DOWN);
        }
    }
    f.render_widget(
        Paragraph::new(cl.into_lines())
            .block(block)
            .scroll((scroll, 0)),
        area,
    );
}

// ── Stats ──────────────────────────────────────────────────────

fn stat_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<16}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn render_stats(state: &EconomyState, f: &mut Frame, area: Rect, borders: Borders) {
    let income = income_breakdown(state);
    let degrees = education_rank(&state.education_level).unwrap_or(0);

    let lines = vec![
        stat_line("Total clicks", state.total_clicks.to_string()),
        stat_line("Total earned", format_money(state.total_earned)),
        stat_line("Salary", format!("{}/tick", format_money(income.salary))),
        stat_line("Rent", format!("{}/tick", format_money(income.assets))),
        stat_line("Auto-clickers", format!("{}/tick", format_money(income.auto_click))),
        stat_line(
            "Properties",
            format!("{} ({})", owned_asset_total(state), format_money(asset_value(state))),
        ),
        stat_line(
            "Upgrades",
            format!("{}/{}", state.purchased_upgrades.len(), UPGRADES.len()),
        ),
        stat_line("Degrees", format!("{}/{}", degrees, degree_count())),
        stat_line(
            "Achievements",
            format!("{}/{}", state.unlocked_achievements.len(), ACHIEVEMENTS.len()),
        ),
    ];

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Stats ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Achievements ───────────────────────────────────────────────

fn render_achievements(state: &EconomyState, f: &mut Frame, area: Rect, borders: Borders) {
    let lines: Vec<Line> = ACHIEVEMENTS
        .iter()
        .map(|a| {
            let unlocked = state.unlocked_achievements.contains(a.id);
            let (mark, style) = if unlocked {
                (
                    "✔",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            Line::from(vec![
                Span::styled(format!(" {} {} {:<16}", mark, a.icon, a.name), style),
                Span::styled(
                    format!("{}  +{}", a.description, format_money(a.reward)),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Achievements ");
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

// ── Log ────────────────────────────────────────────────────────

fn render_log(game: &AscentGame, f: &mut Frame, area: Rect, borders: Borders) {
    let visible_height = area.height.saturating_sub(2) as usize;

    // Newest first.
    let lines: Vec<Line> = game
        .log()
        .iter()
        .rev()
        .take(visible_height)
        .enumerate()
        .map(|(i, n)| {
            let style = if n.is_important() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if i < 3 {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(n.line(), style))
        })
        .collect();

    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Log ");
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
