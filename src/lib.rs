//! Populate struct fields from environment variables. Define a record, build
//! a loader, and go.
//!
//! Envfill walks a struct's shape, derives one environment key per leaf
//! field, and writes whatever values it finds — typed, nested, and
//! filterable. `.env`-style overlay files merge into the environment
//! snapshot before anything is loaded.
//!
//! ```
//! use envfill::Loader;
//!
//! envfill::env_record! {
//!     #[derive(Debug, Default)]
//!     struct ServerConfig {
//!         host: String,
//!         port: u16,
//!     }
//! }
//!
//! # fn main() -> Result<(), envfill::EnvfillError> {
//! let loader = Loader::builder()
//!     .vars([
//!         ("HOST".to_string(), "0.0.0.0".to_string()),
//!         ("PORT".to_string(), "8080".to_string()),
//!     ])
//!     .build()?;
//!
//! let mut config = ServerConfig::default();
//! loader.load(&mut config)?;
//! assert_eq!(config.port, 8080);
//! # Ok(())
//! # }
//! ```
//!
//! Drop the `.vars(...)` call to read the real process environment.
//!
//! # Design: the record as source of truth
//!
//! The [`env_record!`] macro defines your struct and, alongside it, a static
//! field table the loader walks without ever inspecting a live instance.
//! There is no separate schema, no key registry, and no runtime reflection
//! beyond this crate's own small facility (the [`reflect`] module). Add a
//! field and its environment key exists; nest a record and its fields gain a
//! prefix.
//!
//! # Key derivation
//!
//! Each leaf's external name — the `#[env("...")]` override, else the
//! `#[rename("...")]` value, else the field identifier — is converted to
//! `UPPER_SNAKE` and prefixed:
//!
//! | Field | Derived key |
//! |-------|-------------|
//! | `port` | `PORT` |
//! | `databaseUrl` (rename) | `DATABASE_URL` |
//! | `HTTPServer` (rename) | `HTTP_SERVER` |
//! | `IPv4Config` (rename) | `IPV4_CONFIG` |
//! | `db.host` (nested) | `DB_HOST` |
//!
//! Word splitting is acronym-aware: a run of uppercase letters hands its
//! last letter to the following word, unless a digit keeps the run joined.
//! With `.prefix("app")`, every key above gains an `APP_` prefix.
//!
//! # Nesting and pointers
//!
//! Nested records flatten with an underscore (`db` + `host` → `DB_HOST`).
//! `Option<T>` behaves like a nullable pointer: resolution sees through it,
//! and a write through an unset `Option` allocates the zero value first —
//! but only when a matching key is actually present, so optional sections
//! stay `None` until the environment mentions them. A `#[flatten]` field
//! merges a nested record's fields without adding a name segment.
//!
//! # Filtering
//!
//! - `.ignore("db.pass")` excludes the dotted path — matched
//!   case-insensitively against the record's qualified field paths, along
//!   with every descendant — while siblings keep loading.
//! - `.only_tagged(true)` restricts loading to fields with an explicit
//!   `#[env("...")]` override.
//! - `#[skip]` keeps a field out of resolution entirely.
//!
//! Filtered fields are never an error; with `.verbose(true)` each skip and
//! each loaded field is reported through [`tracing`] at debug level.
//!
//! # Values
//!
//! Strings are assigned verbatim. Booleans accept `true`/`false`, `t`/`f`,
//! and `1`/`0` in their usual casings. Integers and floats parse at the
//! field's exact width. `std::time::Duration` fields parse literals like
//! `300ms` or `1h30m`; `chrono::DateTime<Utc>` fields parse RFC 3339
//! timestamps and nothing else. `Vec<T>` fields split on commas, trimming
//! each element. An empty value is treated as absent, and a missing key
//! leaves the field untouched — loading the same source twice is
//! indistinguishable from loading it once.
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfillError`]. A coercion failure
//! aborts the load at the failing field; fields already written keep their
//! new values. Unsupported field types are reported with the offending kind,
//! and [`EnvfillError::is_unsupported_kind`] lets callers special-case them
//! without matching variants.

pub mod error;
pub mod reflect;

mod case;
mod fields;
mod file;
mod loader;
mod macros;
mod source;
mod values;

pub use error::EnvfillError;
pub use loader::{Loader, LoaderBuilder};
pub use reflect::{FieldMeta, Kind, Mirror, OptSlot, Record, SeqSlot, Slot};
pub use source::Source;
