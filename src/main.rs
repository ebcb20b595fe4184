mod config;
mod game;
mod input;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use tracing::{debug, info, trace, warn};

use config::GameConfig;
use game::AscentGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::GameTime;

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Query the grid container's bounding rect and convert a pointer position to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    // Config decides the log level, so its errors are reported after init.
    let (config, config_error) = match config::load_overrides() {
        Ok(stored) => (stored.unwrap_or_default(), None),
        Err(err) => (GameConfig::default(), Some(err)),
    };
    logging::init(&config.log_level);
    if let Some(err) = config_error {
        warn!(key = config::STORAGE_KEY, error = %err, "stored config ignored");
    }
    info!(
        tick_interval_ms = config.tick_interval_ms,
        log_level = %config.log_level,
        "the ascent starting"
    );

    let game = Rc::new(RefCell::new(AscentGame::new(&config)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = RefCell::new(GameTime::new(config.tick_interval_ms));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                debug!(action_id, "click target hit");
                game.borrow_mut()
                    .handle_input(&InputEvent::Click(action_id), now_ms());
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let key = match key_event.code {
                KeyCode::Char(c) => c.to_ascii_lowercase(),
                KeyCode::Enter => ' ',
                _ => return,
            };
            game.borrow_mut().handle_input(&InputEvent::Key(key), now_ms());
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = now_ms();
            let (ticks, total_ticks) = {
                let mut clock = clock.borrow_mut();
                (clock.update(now as f64), clock.total_ticks)
            };
            if ticks > 0 {
                let mut g = game.borrow_mut();
                for _ in 0..ticks {
                    let delta = g.tick(now);
                    trace!(
                        tick = total_ticks,
                        cash_change = delta.cash_change(),
                        events = delta.notifications.len(),
                        "economy tick"
                    );
                }
            }

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow_mut().resize(size);
            game.borrow().render(f, size, now, &click_state);
        }
    });

    Ok(())
}
