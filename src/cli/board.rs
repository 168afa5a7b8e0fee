//! Terminal rendering of the card grid and the dashboard entry points

use super::{input, ui};
use crate::core::card::{Card, build_cards};
use crate::core::config::AppConfig;
use crate::core::format::format_last_update;
use crate::core::market::{DisplayState, MarketDataProvider};
use crate::core::presenter::Presenter;
use crate::core::tracker::{COMMAND_BUFFER, Tracker, TrackerSettings};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Color};
use console::Term;
use indicatif::ProgressBar;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

const ERROR_ICON: &str = "⚠";
const INPUT_HINT: &str = "Type usd, brl, eur, gbp or jpy to switch currency, r to refresh, q to quit";

/// Draws the dashboard on stdout. In interactive mode the screen is cleared
/// before every frame.
pub struct TerminalPresenter {
    term: Term,
    interactive: bool,
    spinner: Mutex<Option<ProgressBar>>,
    last_update: Mutex<Option<String>>,
}

impl TerminalPresenter {
    pub fn new(interactive: bool) -> Self {
        Self {
            term: Term::stdout(),
            interactive,
            spinner: Mutex::new(None),
            last_update: Mutex::new(None),
        }
    }

    fn draw(&self, body: &str) {
        if self.interactive {
            if let Err(e) = self.term.clear_screen() {
                debug!(error = %e, "Failed to clear terminal");
            }
        }
        let last_update = self
            .last_update
            .lock()
            .map(|l| l.clone())
            .unwrap_or_default()
            .unwrap_or_else(|| "-".to_string());

        let mut output = format!(
            "{}\n\n{}\n\nLast update: {}",
            ui::style_text("Crypto Tracker", ui::StyleType::Title),
            body,
            ui::style_text(&last_update, ui::StyleType::Label)
        );
        if self.interactive {
            output.push_str(&format!("\n{}", ui::style_text(INPUT_HINT, ui::StyleType::Subtle)));
        }
        println!("{output}");
    }
}

impl Presenter for TerminalPresenter {
    fn show_loading(&self, show: bool) {
        let Ok(mut spinner) = self.spinner.lock() else {
            return;
        };
        if show {
            if spinner.is_none() {
                *spinner = Some(ui::new_spinner("Loading market data..."));
            }
        } else if let Some(active) = spinner.take() {
            active.finish_and_clear();
        }
    }

    fn render(&self, state: &DisplayState) {
        if let (Some(ts), Ok(mut last_update)) = (state.last_update, self.last_update.lock()) {
            *last_update = Some(format_last_update(&ts));
        }
        self.draw(&render_board(state));
    }

    fn render_error(&self, message: &str) {
        self.draw(&render_error_panel(message));
    }
}

/// Renders one table row per card.
pub fn render_board(state: &DisplayState) -> String {
    let cards = build_cards(state);
    let title = format!(
        "Top {} by market cap ({})",
        cards.len(),
        ui::style_text(&state.currency.code().to_uppercase(), ui::StyleType::Label)
    );
    if cards.is_empty() {
        return format!("{title}\n\nNo market data available.");
    }

    let mut table = ui::new_styled_table();
    let mut header = vec![ui::header_cell("#"), ui::header_cell("Coin"), ui::header_cell("Price")];
    header.extend(cards[0].changes.iter().map(|c| ui::header_cell(c.label)));
    header.extend(cards[0].stats.iter().map(|s| ui::header_cell(s.label)));
    table.set_header(header);

    for card in &cards {
        table.add_row(card_row(card));
    }

    format!("{title}\n{table}")
}

fn card_row(card: &Card) -> Vec<Cell> {
    let mut row = vec![
        Cell::new(format!("#{}", card.rank)),
        Cell::new(format!("{}\n{}", card.name, card.symbol.to_uppercase())),
        ui::amount_cell(&card.price),
    ];
    row.extend(card.changes.iter().map(|c| ui::change_cell(&c.text, c.trend)));
    row.extend(card.stats.iter().map(|s| ui::amount_cell(&s.value)));
    row
}

/// Full-width panel replacing the grid when a fetch fails.
pub fn render_error_panel(message: &str) -> String {
    let mut table = ui::new_styled_table();
    table.add_row(vec![
        Cell::new(format!("{ERROR_ICON}\n{message}"))
            .fg(Color::Red)
            .set_alignment(CellAlignment::Center),
    ]);
    ui::style_text(&table.to_string(), ui::StyleType::Error)
}

/// Live dashboard: polls until the user quits.
pub async fn watch<M: MarketDataProvider>(provider: M, config: &AppConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let tracker = Tracker::new(
        provider,
        TerminalPresenter::new(true),
        TrackerSettings::from(config),
        tx.clone(),
    );

    input::spawn_stdin_reader(tx.clone());
    input::spawn_ctrl_c_handler(tx);

    tracker.run(rx).await;
    Ok(())
}

/// Fetches and renders a single frame.
pub async fn show<M: MarketDataProvider>(provider: M, config: &AppConfig) -> Result<()> {
    let (tx, _rx) = mpsc::channel(COMMAND_BUFFER);
    let mut tracker = Tracker::new(
        provider,
        TerminalPresenter::new(false),
        TrackerSettings::from(config),
        tx,
    );
    tracker.fetch_snapshot().await;
    Ok(())
}
