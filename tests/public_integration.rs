use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bithumb_api_client::rest::BithumbRestClient;
use bithumb_api_client::types::{ChartInterval, Currency, CurrencySelect};
use bithumb_api_client::{BithumbError, OrderSide};

fn build_client(server: &MockServer) -> BithumbRestClient {
    BithumbRestClient::builder().base_url(server.uri()).build()
}

fn currency(symbol: &str) -> Currency {
    Currency::new(symbol).unwrap()
}

fn ticker_json(open: &str, close: &str) -> serde_json::Value {
    json!({
        "opening_price": open,
        "closing_price": close,
        "min_price": "95",
        "max_price": "120",
        "units_traded": "3500.5",
        "acc_trade_value": "390000000",
        "prev_closing_price": "99",
        "units_traded_24H": "7200.25",
        "acc_trade_value_24H": "800000000",
        "fluctate_24H": "11",
        "fluctate_rate_24H": "10.0",
    })
}

#[tokio::test]
async fn test_get_ticker_all() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": {
            "date": "1500000000123",
            "btc": ticker_json("100", "110"),
            "eth": ticker_json("200", "210"),
        }
    });

    Mock::given(method("GET"))
        .and(path("/public/ticker/ALL_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let snapshot = client
        .get_ticker(&CurrencySelect::All, &Currency::krw())
        .await
        .unwrap();

    // The reserved `date` key is the snapshot timestamp, not a currency.
    assert_eq!(snapshot.timestamp.unix_timestamp(), 1_500_000_000);
    assert_eq!(snapshot.timestamp.millisecond(), 123);
    assert_eq!(snapshot.tickers.len(), 2);

    let btc = &snapshot.tickers[&currency("btc")];
    assert_eq!(btc.opening_price, 100.0);
    assert_eq!(btc.closing_price, 110.0);
    assert_eq!(snapshot.tickers[&currency("eth")].opening_price, 200.0);
}

#[tokio::test]
async fn test_get_ticker_single() {
    let server = MockServer::start().await;
    let mut data = ticker_json("100", "110");
    data["date"] = json!("1500000000123");
    let response = json!({"status": "0000", "data": data});

    Mock::given(method("GET"))
        .and(path("/public/ticker/BTC_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let btc = CurrencySelect::One(currency("btc"));
    let snapshot = client.get_ticker(&btc, &Currency::krw()).await.unwrap();

    assert_eq!(snapshot.tickers.len(), 1);
    assert_eq!(snapshot.tickers[&currency("btc")].closing_price, 110.0);
}

#[tokio::test]
async fn test_get_ticker_error_status() {
    let server = MockServer::start().await;
    let response = json!({"status": "5500", "message": "Invalid Parameter"});

    Mock::given(method("GET"))
        .and(path("/public/ticker/BTC_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let btc = CurrencySelect::One(currency("btc"));
    match client.get_ticker(&btc, &Currency::krw()).await {
        Err(BithumbError::Api(api)) => {
            assert_eq!(api.code, "5500");
            assert_eq!(api.message.as_deref(), Some("Invalid Parameter"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_ticker_malformed_field_fails_whole_call() {
    let server = MockServer::start().await;
    let mut bad = ticker_json("100", "110");
    bad["min_price"] = json!("not-a-number");
    let response = json!({
        "status": "0000",
        "data": {
            "date": "1500000000123",
            "btc": ticker_json("100", "110"),
            "eth": bad,
        }
    });

    Mock::given(method("GET"))
        .and(path("/public/ticker/ALL_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    match client.get_ticker(&CurrencySelect::All, &Currency::krw()).await {
        Err(BithumbError::Decode(e)) => assert_eq!(e.field, "min_price"),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_orderbook_all_excludes_reserved_keys() {
    let server = MockServer::start().await;
    let book = json!({
        "bids": [{"price": "500", "quantity": "1"}],
        "asks": [{"price": "501", "quantity": "2"}],
    });
    let response = json!({
        "status": "0000",
        "data": {
            "timestamp": "1500000000123",
            "payment_currency": "KRW",
            "btc": book,
        }
    });

    Mock::given(method("GET"))
        .and(path("/public/orderbook/ALL_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let snapshot = client
        .get_orderbook(&CurrencySelect::All, &Currency::krw())
        .await
        .unwrap();

    assert_eq!(snapshot.books.len(), 1);
    let btc = &snapshot.books[&currency("btc")];
    assert_eq!(btc.bids[0].price, 500.0);
    assert_eq!(btc.asks[0].quantity, 2.0);
}

#[tokio::test]
async fn test_get_transaction_history() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": [
            {
                "transaction_date": "2017-07-14 02:40:00",
                "type": "bid",
                "units_traded": "0.5",
                "price": "2500000",
                "total": "1250000",
            },
            {
                "transaction_date": "2017-07-14 02:40:01",
                "type": "ask",
                "units_traded": "0.2",
                "price": "2500100",
                "total": "500020",
            },
        ]
    });

    Mock::given(method("GET"))
        .and(path("/public/transaction_history/BTC_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let trades = client
        .get_transaction_history(&currency("btc"), &Currency::krw())
        .await
        .unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].side, OrderSide::Bid);
    assert_eq!(trades[1].side, OrderSide::Ask);
    assert_eq!(trades[1].price, 2_500_100.0);
}

#[tokio::test]
async fn test_get_assets_status() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": {"deposit_status": 1, "withdrawal_status": 0}
    });

    Mock::given(method("GET"))
        .and(path("/public/assetsstatus/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let status = client.get_assets_status(&currency("btc")).await.unwrap();

    assert!(status.deposit);
    assert!(!status.withdrawal);
}

#[tokio::test]
async fn test_get_btci() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": {
            "date": "1500000000123",
            "btai": {"market_index": "2000.5", "rate": "1.1", "width": "22"},
            "btmi": {"market_index": "3000.5", "rate": "-0.4", "width": "-12"},
        }
    });

    Mock::given(method("GET"))
        .and(path("/public/btci"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let snapshot = client.get_btci().await.unwrap();

    assert_eq!(snapshot.timestamp.unix_timestamp(), 1_500_000_000);
    assert_eq!(snapshot.btai.market_index, 2000.5);
    assert_eq!(snapshot.btmi.width, -12.0);
}

#[tokio::test]
async fn test_get_candlestick() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": [
            [1500000000000i64, "100", "110", "120", "95", "3500.5"],
            [1500000060000i64, "110", "112", "113", "109", "1200"],
        ]
    });

    Mock::given(method("GET"))
        .and(path("/public/candlestick/BTC_KRW/1m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let candles = client
        .get_candlestick(&currency("btc"), &Currency::krw(), ChartInterval::Min1)
        .await
        .unwrap();

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].time.unix_timestamp(), 1_500_000_000);
    assert_eq!(candles[1].closing_price, 112.0);
}

#[tokio::test]
async fn test_get_candlestick_integer_error_status() {
    let server = MockServer::start().await;
    let response = json!({"status": 5500, "message": "Invalid Parameter"});

    Mock::given(method("GET"))
        .and(path("/public/candlestick/BTC_KRW/24h"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    match client
        .get_candlestick(&currency("btc"), &Currency::krw(), ChartInterval::Hour24)
        .await
    {
        Err(BithumbError::Api(api)) => assert_eq!(api.code, "5500"),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_tradable_currencies_sorted_and_filtered() {
    let server = MockServer::start().await;
    let response = json!({
        "status": "0000",
        "data": {
            "date": "1500000000123",
            "xrp": ticker_json("1", "2"),
            "btc": ticker_json("100", "110"),
            "eth": ticker_json("200", "210"),
        }
    });

    Mock::given(method("GET"))
        .and(path("/public/ticker/ALL_KRW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let currencies = client.get_tradable_currencies().await.unwrap();

    assert_eq!(
        currencies,
        vec![currency("btc"), currency("eth"), currency("xrp")]
    );
}
