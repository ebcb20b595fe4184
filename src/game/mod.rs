//! The Ascent: climb from a cardboard box to the corner office.
//!
//! [`AscentGame`] owns the single economy state of a session and is the only
//! way to change it. Callers dispatch intents; each accepted intent replaces
//! the state wholesale with the engine's result.

pub mod actions;
pub mod catalog;
pub mod format;
pub mod logic;
pub mod notify;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;
use tracing::debug;

use crate::config::GameConfig;
use crate::input::{ClickState, InputEvent};

use actions::*;
use catalog::{EDUCATION_TIERS, JOB_TIERS, REAL_ESTATE, UPGRADES};
use logic::{item_name, purchase_cost, PurchaseKind, Rejection, Transition};
use notify::Notification;
use state::{next_education_tier, study_remaining_secs, EconomyState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Career,
    Assets,
    Stats,
    Achievements,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Career, Tab::Assets, Tab::Stats, Tab::Achievements];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Career => "Career",
            Tab::Assets => "Assets",
            Tab::Stats => "Stats",
            Tab::Achievements => "Achievements",
        }
    }

    pub fn action_id(self) -> u16 {
        match self {
            Tab::Career => TAB_CAREER,
            Tab::Assets => TAB_ASSETS,
            Tab::Stats => TAB_STATS,
            Tab::Achievements => TAB_ACHIEVEMENTS,
        }
    }

    fn from_action(action_id: u16) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.action_id() == action_id)
    }
}

/// What an intent changed, for the caller to surface.
#[derive(Clone, Debug, PartialEq)]
pub struct StateDelta {
    pub cash_before: f64,
    pub cash_after: f64,
    pub notifications: Vec<Notification>,
}

impl StateDelta {
    pub fn cash_change(&self) -> f64 {
        self.cash_after - self.cash_before
    }
}

/// A purchasable row on the active tab. Row `i` is bound to key `a + i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Offer {
    pub kind: PurchaseKind,
    pub id: &'static str,
}

/// One line of the offer list: a section heading or offer `i` of the tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfferRow {
    Heading(PurchaseKind),
    Offer(usize),
}

/// The active tab's offers laid out as lines, with scrolling applied.
pub struct OfferList {
    pub offers: Vec<Offer>,
    pub rows: Vec<OfferRow>,
    /// Index into `rows` of the first line on screen.
    pub scroll: usize,
    /// Lines that fit on screen.
    pub height: usize,
}

impl OfferList {
    fn new(offers: Vec<Offer>, scroll: usize, height: usize) -> Self {
        let mut rows = Vec::with_capacity(offers.len() + 4);
        let mut last_kind = None;
        for (i, offer) in offers.iter().enumerate() {
            if last_kind != Some(offer.kind) {
                rows.push(OfferRow::Heading(offer.kind));
                last_kind = Some(offer.kind);
            }
            rows.push(OfferRow::Offer(i));
        }
        let max_scroll = rows.len().saturating_sub(height);
        Self {
            offers,
            rows,
            scroll: scroll.min(max_scroll),
            height,
        }
    }

    pub fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(self.height)
    }

    pub fn more_above(&self) -> bool {
        self.scroll > 0
    }

    pub fn more_below(&self) -> bool {
        self.scroll < self.max_scroll()
    }

    pub fn is_on_screen(&self, index: usize) -> bool {
        self.rows
            .iter()
            .skip(self.scroll)
            .take(self.height)
            .any(|row| *row == OfferRow::Offer(index))
    }
}

pub struct AscentGame {
    state: EconomyState,
    log: VecDeque<Notification>,
    log_capacity: usize,
    pub tab: Tab,
    offer_scroll: usize,
    /// Offer lines that fit on screen; unbounded until the first resize.
    offer_height: usize,
}

impl AscentGame {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: EconomyState::with_config(config),
            log: VecDeque::with_capacity(config.log_capacity),
            log_capacity: config.log_capacity.max(1),
            tab: Tab::Career,
            offer_scroll: 0,
            offer_height: usize::MAX,
        }
    }

    /// Track the terminal size so scrolling and key bindings match the screen.
    pub fn resize(&mut self, area: Rect) {
        self.offer_height = render::offer_height(area).max(1);
    }

    /// Read-only snapshot for rendering.
    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    /// Oldest first.
    pub fn log(&self) -> &VecDeque<Notification> {
        &self.log
    }

    fn add_log(&mut self, notification: Notification) {
        debug!(kind = ?notification.kind, amount = ?notification.amount, "{}", notification.title);
        self.log.push_back(notification);
        while self.log.len() > self.log_capacity {
            self.log.pop_front();
        }
    }

    /// Swap in the transition's state, then check achievements when asked.
    fn commit(&mut self, transition: Transition, check_achievements: bool) -> StateDelta {
        let cash_before = self.state.cash;
        let Transition { state, mut events } = transition;
        self.state = if check_achievements {
            let mut checked = logic::evaluate_achievements(&state);
            events.append(&mut checked.events);
            checked.state
        } else {
            state
        };
        for event in &events {
            self.add_log(event.clone());
        }
        StateDelta {
            cash_before,
            cash_after: self.state.cash,
            notifications: events,
        }
    }

    pub fn click(&mut self, now_ms: u64) -> Result<StateDelta, Rejection> {
        match logic::click(&self.state) {
            Ok(t) => Ok(self.commit(t, true)),
            Err(reason) => {
                let remaining = study_remaining_secs(&self.state, now_ms);
                self.add_log(Notification::studying(remaining));
                debug!(%reason, "click rejected");
                Err(reason)
            }
        }
    }

    pub fn purchase(
        &mut self,
        kind: PurchaseKind,
        id: &str,
        now_ms: u64,
    ) -> Result<StateDelta, Rejection> {
        match logic::purchase(&self.state, kind, id, now_ms) {
            Ok(t) => Ok(self.commit(t, true)),
            Err(reason) => {
                let name = item_name(kind, id).unwrap_or(id);
                let notice = match reason {
                    Rejection::InsufficientFunds => {
                        let cost = purchase_cost(kind, id).unwrap_or(0.0);
                        Notification::insufficient_funds(name, cost, self.state.cash)
                    }
                    other => Notification::rejected(name, other),
                };
                self.add_log(notice);
                debug!(?kind, item = id, %reason, "purchase rejected");
                Err(reason)
            }
        }
    }

    /// Achievements are already part of the engine's tick.
    pub fn tick(&mut self, now_ms: u64) -> StateDelta {
        let t = logic::tick(&self.state, now_ms);
        self.commit(t, false)
    }

    /// Rows the active tab offers for purchase, in display order.
    pub fn tab_offers(&self) -> Vec<Offer> {
        match self.tab {
            Tab::Career => {
                let education = next_education_tier(&self.state).map(|t| Offer {
                    kind: PurchaseKind::Education,
                    id: t.id,
                });
                let jobs = JOB_TIERS
                    .iter()
                    .filter(|j| j.id != self.state.job_id)
                    .map(|j| Offer {
                        kind: PurchaseKind::Job,
                        id: j.id,
                    });
                let upgrades = UPGRADES.iter().map(|u| Offer {
                    kind: PurchaseKind::Upgrade,
                    id: u.id,
                });
                education.into_iter().chain(jobs).chain(upgrades).collect()
            }
            Tab::Assets => REAL_ESTATE
                .iter()
                .map(|a| Offer {
                    kind: PurchaseKind::Asset,
                    id: a.id,
                })
                .collect(),
            Tab::Stats | Tab::Achievements => Vec::new(),
        }
    }

    pub fn offer_list(&self) -> OfferList {
        OfferList::new(self.tab_offers(), self.offer_scroll, self.offer_height)
    }

    fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.offer_scroll = 0;
    }

    /// Move the offer list half a screen. Returns false if it all fits.
    fn scroll_offers(&mut self, down: bool) -> bool {
        let list = self.offer_list();
        let max_scroll = list.max_scroll();
        if max_scroll == 0 {
            return false;
        }
        let step = (list.height / 2).max(1);
        self.offer_scroll = if down {
            (list.scroll + step).min(max_scroll)
        } else {
            list.scroll.saturating_sub(step)
        };
        true
    }

    /// Only offers currently on screen can be bought.
    fn buy_offer(&mut self, index: usize, now_ms: u64) -> bool {
        let list = self.offer_list();
        let Some(offer) = list.offers.get(index).copied() else {
            return false;
        };
        if !list.is_on_screen(index) {
            return false;
        }
        // Rejections are already surfaced through the log.
        let _ = self.purchase(offer.kind, offer.id, now_ms);
        true
    }

    fn handle_click(&mut self, action_id: u16, now_ms: u64) -> bool {
        if action_id == CLICK_WORK {
            let _ = self.click(now_ms);
            return true;
        }
        if let Some(tab) = Tab::from_action(action_id) {
            self.select_tab(tab);
            return true;
        }
        match action_id {
            SCROLL_UP => return self.scroll_offers(false),
            SCROLL_DOWN => return self.scroll_offers(true),
            _ => {}
        }
        if action_id >= BUY_OFFER_BASE {
            return self.buy_offer((action_id - BUY_OFFER_BASE) as usize, now_ms);
        }
        false
    }

    fn handle_key(&mut self, key: char, now_ms: u64) -> bool {
        match key {
            ' ' => {
                let _ = self.click(now_ms);
                true
            }
            '1'..='4' => {
                self.select_tab(Tab::ALL[(key as u8 - b'1') as usize]);
                true
            }
            '-' => self.scroll_offers(false),
            '=' => self.scroll_offers(true),
            'a'..='z' => self.buy_offer((key as u8 - b'a') as usize, now_ms),
            _ => false,
        }
    }

    /// Map an input event to an intent. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: u64) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, now_ms),
            InputEvent::Click(action_id) => self.handle_click(*action_id, now_ms),
        }
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        now_ms: u64,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render(self, f, area, now_ms, click_state);
    }
}

/// Number of education tiers above the starting one.
pub fn degree_count() -> usize {
    EDUCATION_TIERS.len() - 1
}
