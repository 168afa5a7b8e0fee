//! Polling loop that keeps the dashboard in sync with the market

use crate::core::config::AppConfig;
use crate::core::currency::Currency;
use crate::core::market::{DisplayState, MarketDataProvider};
use crate::core::presenter::{LoadingGuard, Presenter};
use chrono::Local;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, error, info, instrument};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to load cryptocurrency data. Retrying...";
pub const COMMAND_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetCurrency(Currency),
    Tick,
    ManualRefresh,
    Quit,
}

#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub currency: Currency,
    pub refresh_interval: Duration,
    pub per_page: usize,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        TrackerSettings::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for TrackerSettings {
    fn from(config: &AppConfig) -> Self {
        TrackerSettings {
            currency: config.currency,
            refresh_interval: Duration::from_millis(config.refresh_interval_ms),
            per_page: config.per_page,
        }
    }
}

/// Owns the display state and the recurring timer. Commands are handled one
/// at a time, so fetches never overlap and responses land in request order.
pub struct Tracker<M: MarketDataProvider, P: Presenter> {
    provider: M,
    presenter: P,
    state: DisplayState,
    refresh_interval: Duration,
    per_page: usize,
    commands: mpsc::Sender<Command>,
    timer: Option<JoinHandle<()>>,
}

impl<M: MarketDataProvider, P: Presenter> Tracker<M, P> {
    /// `commands` is the sending half of the channel later passed to
    /// [`Tracker::run`]; the recurring timer delivers its ticks through it.
    pub fn new(
        provider: M,
        presenter: P,
        settings: TrackerSettings,
        commands: mpsc::Sender<Command>,
    ) -> Self {
        Self {
            provider,
            presenter,
            state: DisplayState::new(settings.currency),
            refresh_interval: settings.refresh_interval,
            per_page: settings.per_page,
            commands,
            timer: None,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn currency(&self) -> Currency {
        self.state.currency
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Fetches once, then arms the recurring timer.
    pub async fn initialize(&mut self) {
        self.fetch_snapshot().await;
        self.start_recurring_update();
    }

    /// Switches the quote currency and refetches right away. The timer keeps
    /// its phase.
    pub async fn set_currency(&mut self, currency: Currency) {
        debug!(from = %self.state.currency, to = %currency, "Currency changed");
        self.state.currency = currency;
        self.fetch_snapshot().await;
    }

    #[instrument(
        name = "FetchSnapshot",
        skip(self),
        fields(currency = %self.state.currency)
    )]
    pub async fn fetch_snapshot(&mut self) {
        let currency = self.state.currency;
        let result = {
            let _loading = LoadingGuard::show(&self.presenter);
            self.provider.fetch_markets(currency, self.per_page).await
        };

        match result {
            Ok(snapshots) => {
                debug!(count = snapshots.len(), "Fetched market snapshots");
                self.state.replace(snapshots, Local::now());
                self.presenter.render(&self.state);
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch market data");
                self.presenter.render_error(FETCH_ERROR_MESSAGE);
            }
        }
    }

    /// Arms the recurring timer, disarming any previous one first. The first
    /// tick fires one full interval from now.
    pub fn start_recurring_update(&mut self) {
        self.stop_recurring_update();

        let period = self.refresh_interval;
        let commands = self.commands.clone();
        let mut ticker = interval_at(Instant::now() + period, period);
        self.timer = Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                if commands.send(Command::Tick).await.is_err() {
                    debug!("Command channel closed, stopping timer");
                    break;
                }
            }
        }));

        info!(
            "Auto-update started, refreshing every {} seconds",
            period.as_secs_f64()
        );
    }

    pub fn stop_recurring_update(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            debug!("Recurring update stopped");
        }
    }

    pub async fn handle(&mut self, command: Command) -> ControlFlow<()> {
        debug!(?command, "Handling command");
        match command {
            Command::SetCurrency(currency) => self.set_currency(currency).await,
            Command::Tick => self.fetch_snapshot().await,
            Command::ManualRefresh => {
                self.fetch_snapshot().await;
                self.start_recurring_update();
            }
            Command::Quit => {
                self.stop_recurring_update();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Runs until a [`Command::Quit`] arrives or every sender is gone.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        self.initialize().await;
        while let Some(command) = commands.recv().await {
            if self.handle(command).await.is_break() {
                break;
            }
        }
        self.stop_recurring_update();
        info!("Tracker stopped");
    }
}

impl<M: MarketDataProvider, P: Presenter> Drop for Tracker<M, P> {
    fn drop(&mut self) {
        self.stop_recurring_update();
    }
}
