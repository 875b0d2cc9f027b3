//! Runs the real binary against a scrubbed environment. Every case here fails
//! during configuration, so no network access is needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn bot() -> Command {
    let mut cmd = Command::cargo_bin("factbot_api").expect("Failed to locate factbot_api binary");
    cmd.env_clear()
        .env("FACTBOT_SKIP_DOTENV", "1")
        .env("FACTBOT_LOG_FILTER", "info");
    cmd
}

#[test]
fn missing_telegram_token_exits_with_status_one() {
    bot()
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "missing required environment variable: TELEGRAM_TOKEN",
        ))
        .stdout(predicate::str::contains("server is running").not());
}

#[test]
fn missing_openai_key_exits_with_status_one() {
    bot()
        .env("TELEGRAM_TOKEN", "123:abc")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "missing required environment variable: OPENAI_API_KEY",
        ))
        .stdout(predicate::str::contains("server is running").not());
}

#[test]
fn production_without_webhook_url_exits_before_listening() {
    bot()
        .env("TELEGRAM_TOKEN", "123:abc")
        .env("OPENAI_API_KEY", "sk-test")
        .env("NODE_ENV", "production")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "WEBHOOK_URL is required in production mode",
        ))
        .stdout(predicate::str::contains("server is running").not());
}

#[test]
fn invalid_port_exits_with_status_one() {
    bot()
        .env("TELEGRAM_TOKEN", "123:abc")
        .env("OPENAI_API_KEY", "sk-test")
        .env("PORT", "not-a-port")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid integer in `PORT`"));
}
