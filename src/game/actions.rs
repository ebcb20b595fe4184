//! Semantic action IDs for The Ascent click targets.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_WORK: u16 = 0;

// ── Tab navigation ──────────────────────────────────────────────
pub const TAB_CAREER: u16 = 10;
pub const TAB_ASSETS: u16 = 11;
pub const TAB_STATS: u16 = 12;
pub const TAB_ACHIEVEMENTS: u16 = 13;

// ── Offer list scrolling ────────────────────────────────────────
pub const SCROLL_UP: u16 = 20;
pub const SCROLL_DOWN: u16 = 21;

// ── Offer purchase (base + row index on the active tab) ─────────
pub const BUY_OFFER_BASE: u16 = 100;
