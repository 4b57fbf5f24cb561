//! # envfill demo
//!
//! A small runnable tour of [envfill](https://docs.rs/envfill): nested
//! records, tag overrides, ignore patterns, and typed coercion. The value
//! source is synthetic so the output is deterministic — swap the `.vars(...)`
//! call for nothing to read your real environment.
//!
//! ```sh
//! cargo run --example basic
//! ```

use std::time::Duration;

use envfill::Loader;

envfill::env_record! {
    #[derive(Debug, Default)]
    pub struct DbConfig {
        pub host: String,
        pub port: u16,
        #[rename("poolSize")]
        pub pool_size: u32,
        pub pass: String,
    }
}

envfill::env_record! {
    #[derive(Debug, Default)]
    pub struct AppConfig {
        pub host: String,
        pub port: u16,
        pub debug: bool,
        #[env("TIMEOUT")]
        pub idle_timeout: Duration,
        pub allowed_origins: Vec<String>,
        pub db: DbConfig,
    }
}

fn main() -> Result<(), envfill::EnvfillError> {
    let vars = [
        ("APP_HOST", "0.0.0.0"),
        ("APP_PORT", "8080"),
        ("APP_DEBUG", "true"),
        ("APP_TIMEOUT", "1h30m"),
        ("APP_ALLOWED_ORIGINS", "localhost, example.com ,api.example.com"),
        ("APP_DB_HOST", "db.internal"),
        ("APP_DB_PORT", "5432"),
        ("APP_DB_POOL_SIZE", "20"),
        ("APP_DB_PASS", "never-loaded"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()));

    let loader = Loader::builder()
        .prefix("app")
        .ignore("db.pass")
        .vars(vars)
        .build()?;

    let mut config = AppConfig::default();
    loader.load(&mut config)?;

    println!("listening on {}:{}", config.host, config.port);
    println!("debug: {}", config.debug);
    println!("idle timeout: {:?}", config.idle_timeout);
    println!("origins: {:?}", config.allowed_origins);
    println!(
        "db: {}:{} (pool {})",
        config.db.host, config.db.port, config.db.pool_size
    );
    println!("db pass loaded: {}", !config.db.pass.is_empty());

    Ok(())
}
