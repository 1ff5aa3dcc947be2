use std::env;

use serial_test::serial;
use task_relay::config::{GlobalConfig, DEFAULT_POLL_INTERVAL_SECONDS};
use task_relay::AppError;

const ALL_VARS: [&str; 6] = [
    "TELEGRAM_BOT_TOKEN",
    "TELEGRAM_CHAT_ID",
    "TELEGRAM_MESSAGE_THREAD_ID",
    "ASANA_PAT",
    "ASANA_PROJECT_ID",
    "POLLING_INTERVAL",
];

fn clear_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

fn set_required() {
    env::set_var("TELEGRAM_BOT_TOKEN", "123:abc");
    env::set_var("TELEGRAM_CHAT_ID", "-1001");
    env::set_var("ASANA_PAT", "pat-token");
    env::set_var("ASANA_PROJECT_ID", "7777");
}

#[test]
#[serial]
fn parses_full_environment() {
    clear_env();
    set_required();
    env::set_var("TELEGRAM_MESSAGE_THREAD_ID", "42");
    env::set_var("POLLING_INTERVAL", "15");

    let config = GlobalConfig::from_env().expect("config parses");

    assert_eq!(config.telegram.bot_token, "123:abc");
    assert_eq!(config.telegram.chat_id, "-1001");
    assert_eq!(config.telegram.message_thread_id, Some(42));
    assert_eq!(config.asana.access_token, "pat-token");
    assert_eq!(config.asana.project_gid, "7777");
    assert_eq!(config.poll_interval_seconds, 15);
}

#[test]
#[serial]
fn optional_vars_default() {
    clear_env();
    set_required();

    let config = GlobalConfig::from_env().expect("config parses");

    assert_eq!(config.telegram.message_thread_id, None);
    assert_eq!(
        config.poll_interval_seconds,
        DEFAULT_POLL_INTERVAL_SECONDS
    );
}

#[test]
#[serial]
fn missing_required_var_is_rejected() {
    clear_env();
    set_required();
    env::remove_var("ASANA_PAT");

    let err = GlobalConfig::from_env().expect_err("missing var rejected");
    match err {
        AppError::Config(msg) => assert!(msg.contains("ASANA_PAT"), "unexpected message: {msg}"),
        other => panic!("expected Config error, got {other}"),
    }
}

#[test]
#[serial]
fn empty_required_var_is_rejected() {
    clear_env();
    set_required();
    env::set_var("TELEGRAM_BOT_TOKEN", "  ");

    let err = GlobalConfig::from_env().expect_err("empty var rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
#[serial]
fn non_numeric_interval_is_rejected() {
    clear_env();
    set_required();
    env::set_var("POLLING_INTERVAL", "soon");

    let err = GlobalConfig::from_env().expect_err("bad interval rejected");
    match err {
        AppError::Config(msg) => {
            assert!(msg.contains("POLLING_INTERVAL"), "unexpected message: {msg}");
        }
        other => panic!("expected Config error, got {other}"),
    }
}

#[test]
#[serial]
fn zero_interval_is_rejected() {
    clear_env();
    set_required();
    env::set_var("POLLING_INTERVAL", "0");

    let err = GlobalConfig::from_env().expect_err("zero interval rejected");
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
#[serial]
fn non_numeric_thread_id_is_rejected() {
    clear_env();
    set_required();
    env::set_var("TELEGRAM_MESSAGE_THREAD_ID", "topic");

    let err = GlobalConfig::from_env().expect_err("bad thread id rejected");
    assert!(matches!(err, AppError::Config(_)));
}
