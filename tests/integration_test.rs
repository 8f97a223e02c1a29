//! Integration tests over the domain pipeline with mock ports.
//!
//! Tests cover:
//! - Recommendation and backtest on generated daily history
//! - Portfolio risk scoring, classification and failure isolation
//! - Next-trade selection: held symbols, risk bonus, tie-break, Hold default
//! - Voice command interpretation against the live recommendation

mod common;

use approx::assert_relative_eq;
use common::*;
use sigtrader::domain::backtest::{BacktestConfig, run_backtest};
use sigtrader::domain::command::{Intent, TradeSide, interpret};
use sigtrader::domain::indicator::compute_indicators;
use sigtrader::domain::portfolio::{Portfolio, Position};
use sigtrader::domain::risk::{RiskConfig, RiskLevel, analyze_portfolio};
use sigtrader::domain::selector::{
    SelectorConfig, TradeAction, TradeSuggestion, suggest_next_trade,
};
use sigtrader::domain::signal::{Signal, latest_signal};

fn selector_with(universe: &[&str]) -> SelectorConfig {
    SelectorConfig {
        universe: universe.iter().map(|s| s.to_string()).collect(),
        ..SelectorConfig::default()
    }
}

mod recommendation_pipeline {
    use super::*;

    #[test]
    fn falling_history_recommends_buy() {
        let bars = daily_bars("AAPL", &falling_closes(80));
        let indicators = compute_indicators(&bars, 14, 50);
        assert_eq!(latest_signal(&bars, &indicators).unwrap(), Signal::Buy);
    }

    #[test]
    fn rising_history_recommends_sell() {
        let bars = daily_bars("AAPL", &rising_closes(80));
        let indicators = compute_indicators(&bars, 14, 50);
        assert_eq!(latest_signal(&bars, &indicators).unwrap(), Signal::Sell);
    }

    #[test]
    fn short_history_has_no_recommendation() {
        let bars = daily_bars("AAPL", &falling_closes(30));
        let indicators = compute_indicators(&bars, 14, 50);
        assert!(latest_signal(&bars, &indicators).is_err());
    }

    #[test]
    fn backtest_on_rally_goes_short_after_warmup() {
        let bars = daily_bars("AAPL", &rising_closes(120));
        let result = run_backtest(&bars, &BacktestConfig::default());

        // first signal on bar 49; returns run from bar 50 to the second-to-last bar
        assert_eq!(result.strategy_returns.len(), bars.len());
        assert!(result.strategy_returns[..50].iter().all(Option::is_none));
        assert_eq!(result.exposed_bars, 69);
        assert!(result.strategy_returns[119].is_none());
        // each close sits below the next open, so the short books a gain
        assert!(result.cumulative_return > 0.0);
    }

    #[test]
    fn backtest_without_signals_is_flat() {
        let bars = daily_bars("AAPL", &flat_closes(120));
        let result = run_backtest(&bars, &BacktestConfig::default());
        assert_eq!(result.exposed_bars, 0);
        assert_relative_eq!(result.cumulative_return, 0.0);
    }
}

mod risk_analysis {
    use super::*;

    #[test]
    fn two_percent_daily_moves_score_moderate() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &alternating_closes(90, 0.02)));
        let quotes = MockQuotePort::new().with_price("AAPL", 150.0);
        let portfolio = Portfolio::from_positions([Position::new("AAPL", 10)]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert_relative_eq!(profile.portfolio_value, 1500.0);
        assert!((profile.risk_score - 31.75).abs() < 0.5, "score {}", profile.risk_score);
        assert_eq!(profile.risk_level, RiskLevel::Moderate);
        assert_eq!(profile.suggestion, RiskLevel::Moderate.suggestion());
        assert_eq!(profile.holdings.len(), 1);
    }

    #[test]
    fn failing_symbol_is_isolated() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &alternating_closes(90, 0.01)))
            .with_bars("MSFT", Interval::Day, daily_bars("MSFT", &alternating_closes(90, 0.01)))
            .with_error("TSLA", "rate limited");
        let quotes = MockQuotePort::new()
            .with_price("AAPL", 100.0)
            .with_price("TSLA", 200.0)
            .with_error("MSFT", "timeout");
        let portfolio = Portfolio::from_positions([
            Position::new("AAPL", 2),
            Position::new("MSFT", 3),
            Position::new("TSLA", 4),
        ]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert_eq!(profile.holdings.len(), 1);
        assert_eq!(profile.holdings[0].symbol, "AAPL");
        assert_relative_eq!(profile.portfolio_value, 200.0);
        assert_eq!(profile.risk_level, RiskLevel::Low);
    }

    #[test]
    fn empty_portfolio_is_zero_and_low() {
        let profile = analyze_portfolio(
            &Portfolio::new(),
            &MockQuotePort::new(),
            &MockHistoryPort::new(),
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert_eq!(profile.portfolio_value, 0.0);
        assert!(!profile.portfolio_value.is_sign_negative());
        assert_relative_eq!(profile.risk_score, 0.0);
        assert_eq!(profile.risk_level, RiskLevel::Low);
        assert_eq!(profile.next_trade, TradeSuggestion::hold());
    }

    #[test]
    fn all_holdings_failing_gives_positive_zero() {
        let history = MockHistoryPort::new()
            .with_error("AAPL", "down")
            .with_error("MSFT", "down");
        let quotes = MockQuotePort::new()
            .with_price("AAPL", 100.0)
            .with_price("MSFT", 100.0);
        let portfolio =
            Portfolio::from_positions([Position::new("AAPL", 1), Position::new("MSFT", 1)]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert!(profile.holdings.is_empty());
        assert!(!profile.portfolio_value.is_sign_negative());
        assert!(!profile.avg_volatility.is_sign_negative());
        assert!(!profile.avg_return.is_sign_negative());
        assert_eq!(profile.risk_level, RiskLevel::Low);
    }

    #[test]
    fn holding_without_bars_is_skipped_before_quote() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &alternating_closes(90, 0.01)))
            .with_bars("NEW", Interval::Day, Vec::new());
        let quotes = MockQuotePort::new()
            .with_price("AAPL", 100.0)
            .with_price("NEW", 50.0);
        let portfolio =
            Portfolio::from_positions([Position::new("AAPL", 2), Position::new("NEW", 10)]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert_eq!(profile.holdings.len(), 1);
        assert!(profile.holdings.iter().all(|h| h.symbol != "NEW"));
        assert_relative_eq!(profile.portfolio_value, 200.0);
        assert!(quotes.requested("AAPL"));
        assert!(!quotes.requested("NEW"));
    }

    #[test]
    fn single_bar_counts_value_without_stats() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &[100.0]));
        let quotes = MockQuotePort::new().with_price("AAPL", 100.0);
        let portfolio = Portfolio::from_positions([Position::new("AAPL", 1)]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &selector_with(&[]),
        );

        assert_relative_eq!(profile.portfolio_value, 100.0);
        assert!(profile.holdings[0].volatility.is_none());
        assert_relative_eq!(profile.risk_score, 0.0);
    }

    #[test]
    fn history_uses_daily_bars_and_configured_window() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &alternating_closes(10, 0.01)));
        let quotes = MockQuotePort::new().with_price("AAPL", 100.0);
        let portfolio = Portfolio::from_positions([Position::new("AAPL", 1)]);

        analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig { history_days: 45 },
            &selector_with(&[]),
        );

        let requests = history.requests.borrow();
        assert_eq!(requests[0], ("AAPL".to_string(), Interval::Day, 45));
    }
}

mod trade_selection {
    use super::*;

    #[test]
    fn held_symbols_are_never_suggested() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Minute, minute_bars("AAPL", &falling_closes(80)))
            .with_bars("MSFT", Interval::Minute, minute_bars("MSFT", &flat_closes(80)));
        let portfolio = Portfolio::from_positions([Position::new("AAPL", 10)]);

        let trade = suggest_next_trade(
            &portfolio,
            RiskLevel::Low,
            &selector_with(&["AAPL", "MSFT"]),
            &history,
        );

        assert_eq!(trade, TradeSuggestion::hold());
        assert!(!history.requested("AAPL"));
    }

    #[test]
    fn high_risk_buy_wins() {
        let history = MockHistoryPort::new()
            .with_bars("GOOGL", Interval::Minute, minute_bars("GOOGL", &rising_closes(80)))
            .with_bars("AMZN", Interval::Minute, minute_bars("AMZN", &falling_closes(80)));

        let trade = suggest_next_trade(
            &Portfolio::new(),
            RiskLevel::High,
            &selector_with(&["GOOGL", "AMZN"]),
            &history,
        );

        assert_eq!(trade.action, TradeAction::Buy);
        assert_eq!(trade.symbol.as_deref(), Some("AMZN"));
        assert_eq!(trade.quantity, 1);
    }

    #[test]
    fn tie_goes_to_first_candidate() {
        let history = MockHistoryPort::new()
            .with_bars("GOOGL", Interval::Minute, minute_bars("GOOGL", &falling_closes(80)))
            .with_bars("AMZN", Interval::Minute, minute_bars("AMZN", &falling_closes(80)));

        let trade = suggest_next_trade(
            &Portfolio::new(),
            RiskLevel::Moderate,
            &selector_with(&["GOOGL", "AMZN"]),
            &history,
        );

        assert_eq!(trade, TradeSuggestion::buy("GOOGL", 1));
    }

    #[test]
    fn no_buy_signal_means_hold() {
        let history = MockHistoryPort::new()
            .with_bars("GOOGL", Interval::Minute, minute_bars("GOOGL", &rising_closes(80)))
            .with_bars("AMZN", Interval::Minute, minute_bars("AMZN", &flat_closes(80)))
            .with_error("TSLA", "unavailable");

        let trade = suggest_next_trade(
            &Portfolio::new(),
            RiskLevel::Low,
            &selector_with(&["GOOGL", "AMZN", "TSLA", "NFLX"]),
            &history,
        );

        assert_eq!(trade, TradeSuggestion::hold());
    }

    #[test]
    fn analyze_carries_next_trade() {
        let history = MockHistoryPort::new()
            .with_bars("AAPL", Interval::Day, daily_bars("AAPL", &alternating_closes(90, 0.005)))
            .with_bars("TSLA", Interval::Minute, minute_bars("TSLA", &falling_closes(80)));
        let quotes = MockQuotePort::new().with_price("AAPL", 100.0);
        let portfolio = Portfolio::from_positions([Position::new("AAPL", 1)]);

        let profile = analyze_portfolio(
            &portfolio,
            &quotes,
            &history,
            &RiskConfig::default(),
            &SelectorConfig::default(),
        );

        assert_eq!(profile.risk_level, RiskLevel::Low);
        assert_eq!(profile.next_trade, TradeSuggestion::buy("TSLA", 1));
    }
}

mod voice_commands {
    use super::*;

    #[test]
    fn sell_five_when_sell_recommended() {
        assert_eq!(
            interpret("Sell 5 shares", Some(Signal::Sell)),
            Intent::RequestSell { quantity: 5 }
        );
    }

    #[test]
    fn buy_while_holding_is_declined() {
        assert_eq!(
            interpret("buy apple", Some(Signal::Hold)),
            Intent::Declined {
                side: TradeSide::Buy,
                recommendation: Some(Signal::Hold),
            }
        );
    }

    #[test]
    fn balance_sheet_and_unknown() {
        assert_eq!(interpret("balance sheet", None), Intent::RequestBalanceSheet);
        assert_eq!(interpret("hello there", None), Intent::Unrecognized);
    }
}
