diesel::table! {
    assets (id) {
        id -> Integer,
        symbol -> Text,
        start_date -> Date,
        min_num_events -> Integer,
        percentage_downloaded -> Double,
        dividend -> Bool,
        dividend_checked -> Bool,
    }
}

diesel::table! {
    stocks (id) {
        id -> Integer,
        symbol -> Text,
        open -> Double,
        high -> Double,
        low -> Double,
        close -> Double,
        volume -> Double,
        date -> Date,
        trade_count -> Double,
        dividend -> Bool,
    }
}

diesel::table! {
    dividends (id) {
        id -> Integer,
        symbol -> Text,
        ex_dividend_date -> Date,
        pay_date -> Date,
        record_date -> Date,
        declared_date -> Date,
        cash_amount -> Double,
        currency -> Text,
        frequency -> Text,
        dividend_type -> Text,
    }
}

diesel::table! {
    correlations (id) {
        id -> Integer,
        left -> Text,
        right -> Text,
        correlation -> Double,
    }
}

diesel::table! {
    events (id) {
        id -> Integer,
        asset_id -> Integer,
        symbol -> Text,
        start_date -> Date,
        end_date -> Date,
        num_days -> Integer,
    }
}

diesel::table! {
    event_stocks (event_id, stock_id) {
        event_id -> Integer,
        stock_id -> Integer,
    }
}

diesel::table! {
    market_days (id) {
        id -> Integer,
        date -> Date,
    }
}

diesel::table! {
    assets_market_days (asset_id, market_day_id) {
        asset_id -> Integer,
        market_day_id -> Integer,
    }
}

diesel::table! {
    holidays (id) {
        id -> Integer,
        date -> Date,
    }
}

diesel::table! {
    risk_reward (id) {
        id -> Integer,
        symbol -> Text,
        win_rate -> Nullable<Double>,
        loss_rate -> Nullable<Double>,
        avg_gain -> Nullable<Double>,
        avg_loss -> Nullable<Double>,
        percentage_downloaded -> Double,
        avg_dividend -> Nullable<Double>,
        last_update -> Timestamp,
        div_multiplier -> Nullable<Double>,
        stop_loss_percentage -> Nullable<Double>,
        portion_to_risk -> Nullable<Double>,
    }
}

diesel::joinable!(events -> assets (asset_id));
diesel::joinable!(event_stocks -> events (event_id));
diesel::joinable!(event_stocks -> stocks (stock_id));
diesel::joinable!(assets_market_days -> assets (asset_id));
diesel::joinable!(assets_market_days -> market_days (market_day_id));

diesel::allow_tables_to_appear_in_same_query!(
    assets,
    stocks,
    dividends,
    correlations,
    events,
    event_stocks,
    market_days,
    assets_market_days,
    holidays,
    risk_reward,
);
