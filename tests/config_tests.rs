use std::io::Write;
use std::sync::Mutex;

use pricebeacon::error::{ConfigError, Error};
use pricebeacon::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

/// Serializes tests that read or modify `TELEGRAM_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes())
        .expect("write temp config");
    file
}

fn clear_telegram_env() {
    std::env::remove_var("TELEGRAM_BOT_TOKEN");
    std::env::remove_var("TELEGRAM_CHANNEL_ID");
}

fn assert_invalid(result: pricebeacon::error::Result<Config>, expected: &str) {
    match result {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) if field == expected => {}
        Err(err) => panic!("Expected invalid {expected}, got {err}"),
        Ok(_) => panic!("Expected {expected} to be rejected"),
    }
}

const FULL: &str = r#"
dry_run = true

[source]
url = "https://example.com/token/FPIBANK"
selectors = ["div.token-price", "div.big-price"]
page_load_timeout_ms = 20000
selector_timeout_ms = 1500
min_price = 0.0001
max_price = 2

[webdriver]
url = "http://127.0.0.1:4444"
browser = "firefox"
headless = false

[token]
total_supply = 500000000
decimal_places = 4

[watch]
poll_interval_secs = 5
heartbeat_secs = 300
max_in_flight = 1
rollback_on_publish_failure = false

[message]
symbol = "ABC"
currency_suffix = " USD"
channel_tag = "@abc_price"
show_mcap_indicator = false

[telegram]
enabled = true
channel_id = "@abc_price"

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn config_loads_every_section() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_telegram_env();

    let file = write_temp_config(FULL);
    let config = Config::load(file.path()).unwrap();

    assert!(config.dry_run);
    assert_eq!(
        config.source.selectors,
        vec!["div.token-price", "div.big-price"]
    );
    assert_eq!(config.source.page_load_timeout_ms, 20_000);
    assert_eq!(config.source.bounds().min, dec!(0.0001));
    assert_eq!(config.source.bounds().max, dec!(2));
    assert_eq!(config.webdriver.url, "http://127.0.0.1:4444");
    assert!(!config.webdriver.headless);
    assert_eq!(config.token.total_supply, 500_000_000);
    assert_eq!(config.watch.max_in_flight, 1);
    assert!(!config.watch.rollback_on_publish_failure);
    assert_eq!(config.message.currency_suffix, " USD");
    assert!(config.message.show_price_indicator);
    assert!(!config.message.show_mcap_indicator);
    assert!(config.logging.is_json());
    assert_eq!(config.destination(), "@abc_price");

    let settings = config.watch_settings();
    assert_eq!(settings.policy.decimal_places, 4);
    assert_eq!(settings.policy.heartbeat, chrono::Duration::seconds(300));
    assert_eq!(settings.template.symbol, "ABC");
    assert_eq!(settings.total_supply, 500_000_000);
    assert!(!settings.rollback_on_publish_failure);
}

#[test]
fn config_rejects_unreadable_file() {
    let result = Config::load("/nonexistent/pricebeacon.toml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn config_rejects_malformed_toml() {
    let result = Config::parse_toml("[source\nurl = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_rejects_invalid_url() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"not a url\""),
        "source.url",
    );
}

#[test]
fn config_rejects_empty_selectors() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\nselectors = [\" \"]"),
        "source.selectors",
    );
}

#[test]
fn config_rejects_inverted_bounds() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\nmin_price = 1\nmax_price = 0.5"),
        "source.max_price",
    );
}

#[test]
fn config_rejects_zero_supply() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\n[token]\ntotal_supply = 0"),
        "token.total_supply",
    );
}

#[test]
fn config_rejects_too_many_decimal_places() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\n[token]\ndecimal_places = 19"),
        "token.decimal_places",
    );
}

#[test]
fn config_rejects_zero_interval_and_concurrency() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\n[watch]\npoll_interval_secs = 0"),
        "watch.poll_interval_secs",
    );
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\n[watch]\nmax_in_flight = 0"),
        "watch.max_in_flight",
    );
}

#[test]
fn config_rejects_bad_webdriver_url() {
    assert_invalid(
        Config::parse_toml("[source]\nurl = \"https://x.io\"\n[webdriver]\nurl = \"::\""),
        "webdriver.url",
    );
}

#[test]
fn telegram_requires_token_unless_dry_run() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_telegram_env();

    let toml = "[source]\nurl = \"https://x.io\"\n[telegram]\nenabled = true\nchannel_id = \"@c\"";
    let result = Config::parse_toml(toml);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN"
        }))
    ));

    let dry = Config::parse_toml_with(toml, |c| c.dry_run = true);
    assert!(dry.is_ok());
}

#[test]
fn telegram_credentials_come_from_env() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("TELEGRAM_BOT_TOKEN", "123:abc");
    std::env::set_var("TELEGRAM_CHANNEL_ID", "-100999");

    let result = Config::parse_toml(
        "[source]\nurl = \"https://x.io\"\n[telegram]\nenabled = true\nchannel_id = \"@file\"",
    );
    clear_telegram_env();
    let config = result.unwrap();

    assert_eq!(config.telegram.bot_token.as_deref(), Some("123:abc"));
    assert_eq!(config.telegram.channel_id.as_deref(), Some("-100999"));
    assert_eq!(config.destination(), "-100999");
}

#[test]
fn bot_token_in_file_is_ignored() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_telegram_env();

    let config = Config::parse_toml(
        "[source]\nurl = \"https://x.io\"\n[telegram]\nbot_token = \"leaked\"",
    )
    .unwrap();
    assert!(config.telegram.bot_token.is_none());
}
