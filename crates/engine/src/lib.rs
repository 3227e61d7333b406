// In crates/engine/src/lib.rs

pub mod error;
pub mod status;
pub mod strategy_factory;
pub mod task;

use crate::strategy_factory::create_strategy;
use analytics::{TrendEntry, TrendRanker};
use core_types::{InstrumentConfig, InstrumentToken, Mode, OrderRequest, Symbol};
use execution::{Dispatched, ModeGate, OrderDispatcher, OrderQueue};
use risk::PositionLedger;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use strategies::{PriceWindow, Signal, Strategy};
use tokio::sync::Mutex;

pub use error::{Error, Result};
pub use status::{PositionView, StatusSnapshot};
pub use task::FeedTask;

/// One configured instrument and the strategy that trades it.
struct Instrument {
    config: Arc<InstrumentConfig>,
    strategy: Box<dyn Strategy + Send + Sync>,
}

/// Everything the engine mutates on a tick. Guarded by a single lock.
#[derive(Default)]
struct BotState {
    windows: HashMap<Symbol, PriceWindow>,
    ledger: PositionLedger,
    last_prices: HashMap<Symbol, Decimal>,
    /// Symbols in the order their first tick arrived; the trend ranking's tie order.
    seen: Vec<Symbol>,
    trends: Vec<TrendEntry>,
    /// One dispatch worker per symbol that has produced an order.
    queues: HashMap<Symbol, OrderQueue>,
}

/// The per-symbol trading strategy engine.
///
/// On every tick it advances the symbol's price window, refreshes the trend ranking,
/// runs the entry strategy and the position exits, and queues any resulting order
/// on the symbol's dispatch worker. A symbol's orders reach the venue in the order
/// they were decided.
pub struct Engine {
    instruments: HashMap<Symbol, Instrument>,
    /// Tokens in configuration order, for the feed subscription.
    tokens: Vec<InstrumentToken>,
    symbols_by_token: HashMap<InstrumentToken, Symbol>,
    state: Mutex<BotState>,
    ranker: TrendRanker,
    mode: ModeGate,
    dispatcher: OrderDispatcher,
}

impl Engine {
    /// Builds an engine for `instruments`, rejecting the whole list if any entry is invalid.
    pub fn new(
        instruments: Vec<InstrumentConfig>,
        mode: ModeGate,
        dispatcher: OrderDispatcher,
    ) -> Result<Self> {
        core_types::validate_instruments(&instruments)?;

        let mut by_symbol = HashMap::with_capacity(instruments.len());
        let mut tokens = Vec::with_capacity(instruments.len());
        let mut symbols_by_token = HashMap::with_capacity(instruments.len());

        for config in instruments {
            tracing::info!(
                symbol = %config.symbol,
                token = %config.token,
                short_period = config.short_period,
                long_period = config.long_period,
                "Instrument loaded."
            );
            tokens.push(config.token);
            symbols_by_token.insert(config.token, config.symbol.clone());
            let strategy = create_strategy(&config);
            by_symbol.insert(
                config.symbol.clone(),
                Instrument {
                    config: Arc::new(config),
                    strategy,
                },
            );
        }

        Ok(Self {
            instruments: by_symbol,
            tokens,
            symbols_by_token,
            state: Mutex::new(BotState::default()),
            ranker: TrendRanker::default(),
            mode,
            dispatcher,
        })
    }

    pub fn tokens(&self) -> &[InstrumentToken] {
        &self.tokens
    }

    pub fn symbol_for(&self, token: InstrumentToken) -> Option<&Symbol> {
        self.symbols_by_token.get(&token)
    }

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Switches the routing mode for orders decided from now on. Returns the previous mode.
    pub fn set_mode(&self, mode: Mode) -> Mode {
        let previous = self.mode.set(mode);
        tracing::info!(from = %previous, to = %mode, "Mode switched.");
        previous
    }

    /// Processes one price update for `symbol`.
    ///
    /// Returns one handle per order this tick produced, resolving once that order
    /// has been dispatched. Never waits on the venue; dropping the handles does not
    /// cancel anything.
    pub async fn on_tick(&self, symbol: &Symbol, price: Decimal) -> Vec<Dispatched> {
        let Some(instrument) = self.instruments.get(symbol) else {
            tracing::debug!(%symbol, "Tick for an unconfigured symbol ignored.");
            return Vec::new();
        };

        let mut state = self.state.lock().await;
        let orders = self.advance(&mut state, instrument, price);
        if orders.is_empty() {
            return Vec::new();
        }

        // Enqueued under the lock, so decision order is queue order.
        let mode = self.mode.get();
        let queue = state
            .queues
            .entry(symbol.clone())
            .or_insert_with(|| self.dispatcher.queue());
        orders
            .into_iter()
            .map(|order| queue.submit(order, mode))
            .collect()
    }

    fn advance(&self, state: &mut BotState, instrument: &Instrument, price: Decimal) -> Vec<OrderRequest> {
        let symbol = &instrument.config.symbol;

        let window = state
            .windows
            .entry(symbol.clone())
            .or_insert_with(|| PriceWindow::new(instrument.strategy.required_history()));
        window.push(price);

        if state.last_prices.insert(symbol.clone(), price).is_none() {
            state.seen.push(symbol.clone());
        }
        state.trends = self.ranker.rank(state.seen.iter().filter_map(|s| {
            let last = *state.last_prices.get(s)?;
            Some((s, last, state.windows.get(s).and_then(PriceWindow::oldest)))
        }));

        let mut orders = Vec::new();

        let has_open_position = state.ledger.is_open(symbol);
        if let Some(window) = state.windows.get(symbol) {
            if instrument.strategy.assess(window, has_open_position) == Signal::Buy {
                tracing::info!(%symbol, %price, strategy = instrument.strategy.name(), "BUY signal.");
                orders.extend(state.ledger.try_open(&instrument.config, price));
            }
        }

        if let Some(closed) = state.ledger.on_price(symbol, price) {
            tracing::info!(%symbol, reason = %closed.reason, %price, "Exit triggered.");
            orders.push(closed.order);
        }

        orders
    }

    /// A consistent copy of positions, prices, mode and trends.
    pub async fn status(&self) -> StatusSnapshot {
        let state = self.state.lock().await;
        StatusSnapshot {
            open_positions: state
                .ledger
                .iter()
                .map(|(symbol, position)| (symbol.clone(), PositionView::from(position)))
                .collect(),
            last_prices: state
                .last_prices
                .iter()
                .map(|(symbol, price)| (symbol.clone(), *price))
                .collect(),
            mode: self.mode.get(),
            trending_stocks: state.trends.clone(),
        }
    }
}
