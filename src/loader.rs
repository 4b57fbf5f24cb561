//! The loader: builder, frozen configuration, and the write pass.
//!
//! A [`Loader`] is built once — snapshotting the environment and merging any
//! overlay files into a [`Source`] — and can then populate any number of
//! records. Each [`load`](Loader::load) call resolves the record type's leaf
//! fields, derives one lookup key per leaf, and writes the values it finds.
//! Loading never performs I/O and never mutates the process environment.

use std::path::PathBuf;

use tracing::debug;

use crate::case;
use crate::error::EnvfillError;
use crate::fields::{self, FieldDescriptor};
use crate::file;
use crate::reflect::{Mirror, Record, Slot};
use crate::source::Source;
use crate::values;

/// Engine configuration, frozen at build time.
pub(crate) struct Options {
    /// Prepended (with a `_` separator) to every derived key.
    pub prefix: String,
    /// Only honor fields carrying an explicit `#[env("...")]` override.
    pub only_tagged: bool,
    /// Emit per-field diagnostics through `tracing`.
    pub verbose: bool,
    /// Dotted-path ignore patterns, stored lowercased.
    pub ignore: Vec<String>,
}

impl Options {
    /// Check a qualified path against every ignore pattern,
    /// case-insensitively. Pattern order is irrelevant: any match excludes.
    pub(crate) fn is_ignored(&self, qualified: &str, parent: &str) -> bool {
        let target = qualified.to_lowercase();
        let parent = parent.to_lowercase();
        self.ignore
            .iter()
            .any(|pattern| fields::is_field_ignored(&target, &parent, pattern))
    }
}

/// Populates records from environment variables and `.env` overlays.
///
/// Created through [`Loader::builder`]; see the crate docs for the full
/// key-derivation and filtering rules.
pub struct Loader {
    options: Options,
    source: Source,
}

impl Loader {
    /// Start building a loader.
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Populate `target` from the captured key/value source.
    ///
    /// Every resolvable leaf whose derived key holds a non-empty value is
    /// overwritten; leaves with no matching key keep their prior value. The
    /// first coercion failure aborts the call — fields written before it
    /// keep their new values, fields after it are untouched.
    ///
    /// Errors: [`NilInput`](EnvfillError::NilInput) when the target sits
    /// behind an unset `Option`, [`InvalidInput`](EnvfillError::InvalidInput)
    /// when the target type is not a record, plus the per-field
    /// [`UnsupportedKind`](EnvfillError::UnsupportedKind) and
    /// [`Coerce`](EnvfillError::Coerce) failures.
    pub fn load<T: Mirror>(&self, target: &mut T) -> Result<(), EnvfillError> {
        let record = as_record(target.as_slot())?;
        if self.options.verbose {
            debug!(record = std::any::type_name::<T>(), "loading record");
        }
        let descriptors = fields::resolve_fields(record.table(), &self.options);
        self.apply(record, &descriptors)
    }

    fn apply(
        &self,
        record: &mut dyn Record,
        descriptors: &[FieldDescriptor],
    ) -> Result<(), EnvfillError> {
        for fd in descriptors {
            let key = self.env_key(&fd.name);
            let Some(raw) = self.source.get(&key) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            let Some(slot) = slot_at(record, &fd.path) else {
                continue;
            };
            let kind = slot.kind();
            values::assign(slot, raw)?;
            if self.options.verbose {
                debug!(field = %fd.name, key = %key, kind = %kind, "loaded field");
            }
        }
        Ok(())
    }

    /// Derive the lookup key for a resolved field name.
    fn env_key(&self, name: &str) -> String {
        if self.options.prefix.is_empty() {
            case::env_case(name)
        } else {
            format!("{}_{}", self.options.prefix, case::env_case(name)).to_uppercase()
        }
    }
}

/// Unwrap the target down to its record, refusing unset and non-record
/// targets.
fn as_record<'a>(slot: Slot<'a>) -> Result<&'a mut dyn Record, EnvfillError> {
    match slot {
        Slot::Record(record) => Ok(record),
        Slot::Opt(opt) => match opt.get_mut() {
            Some(inner) => as_record(inner),
            None => Err(EnvfillError::NilInput),
        },
        _ => Err(EnvfillError::InvalidInput),
    }
}

/// Borrow the leaf slot at `path`, allocating zero values when descending
/// through unset `Option` records.
fn slot_at<'a>(record: &'a mut dyn Record, path: &[usize]) -> Option<Slot<'a>> {
    let (&first, rest) = path.split_first()?;
    let slot = record.field_mut(first)?;
    if rest.is_empty() {
        return Some(slot);
    }
    slot_at(descend(slot)?, rest)
}

fn descend<'a>(slot: Slot<'a>) -> Option<&'a mut dyn Record> {
    match slot {
        Slot::Record(record) => Some(record),
        Slot::Opt(opt) => descend(opt.get_or_insert_zero()),
        _ => None,
    }
}

/// Builder for a [`Loader`].
///
/// All settings are optional; `Loader::builder().build()` yields a loader
/// over the bare process environment with no prefix and no filters.
pub struct LoaderBuilder {
    prefix: String,
    only_tagged: bool,
    verbose: bool,
    ignore: Vec<String>,
    env_files: Vec<PathBuf>,
    vars: Option<Vec<(String, String)>>,
}

impl LoaderBuilder {
    fn new() -> Self {
        Self {
            prefix: String::new(),
            only_tagged: false,
            verbose: false,
            ignore: Vec::new(),
            env_files: Vec::new(),
            vars: None,
        }
    }

    /// Prepend `prefix` (with a `_` separator) to every derived key.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_owned();
        self
    }

    /// Only honor fields carrying an explicit `#[env("...")]` override.
    pub fn only_tagged(mut self, only: bool) -> Self {
        self.only_tagged = only;
        self
    }

    /// Exclude a dotted field path (case-insensitive) and its descendants.
    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore.push(pattern.to_lowercase());
        self
    }

    /// Replace the ignore set wholesale.
    pub fn ignores<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignore = patterns
            .into_iter()
            .map(|p| p.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Emit per-field diagnostics through `tracing` while loading.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Merge a `.env`-style overlay file on top of the environment snapshot.
    ///
    /// Files are applied in the order given; later files win. A missing
    /// file is skipped silently.
    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_files.push(path.into());
        self
    }

    /// Replace the process-environment snapshot with synthetic pairs.
    ///
    /// Overlay files still apply on top. This keeps loading fully
    /// deterministic in tests — no process-global state involved.
    pub fn vars<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.vars = Some(vars.into_iter().collect());
        self
    }

    /// Capture the key/value source and freeze the configuration.
    ///
    /// All file I/O happens here; [`Loader::load`] never touches the
    /// filesystem.
    pub fn build(self) -> Result<Loader, EnvfillError> {
        let mut source = match self.vars {
            Some(vars) => Source::from_vars(vars),
            None => Source::from_env(),
        };

        for path in &self.env_files {
            let overlay = file::load_env_file(path)?;
            if self.verbose {
                debug!(path = %path.display(), entries = overlay.len(), "merged overlay file");
            }
            source.merge(overlay);
        }

        Ok(Loader {
            options: Options {
                prefix: self.prefix,
                only_tagged: self.only_tagged,
                verbose: self.verbose,
                ignore: self.ignore,
            },
            source,
        })
    }
}
