//! Provision an API secret: prints the hex hash and hex salt to put in
//! `config.toml` (`[security]`) or the `API_SECRET_HASH` / `API_SECRET_SALT`
//! environment variables.
//!
//! Usage: `hash_secret <secret>` or pipe the secret on stdin.

use std::io::{self, BufRead};

use anyhow::{anyhow, Context};
use service::security::provision;

fn read_secret() -> anyhow::Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).context("reading secret from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> anyhow::Result<()> {
    let secret = read_secret()?;
    if secret.is_empty() {
        return Err(anyhow!("secret must not be empty"));
    }
    let provisioned = provision(&secret)?;
    println!("API_SECRET_HASH={}", provisioned.hash_hex);
    println!("API_SECRET_SALT={}", provisioned.salt_hex);
    Ok(())
}
