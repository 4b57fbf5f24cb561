//! Field resolution: the type-level walk that turns a record's static field
//! table into an ordered list of leaf descriptors.
//!
//! The walk is depth-first in declaration order and never touches a live
//! record instance. Nested records contribute their leaves with the parent
//! field's name prepended with an underscore (`db` + `host` → `db_host`),
//! while the dot-joined qualified path (`db.host`) exists only for ignore
//! matching — the two joins are deliberately different.

use tracing::debug;

use crate::loader::Options;
use crate::reflect::FieldMeta;

/// One settable leaf field, addressed from the record root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldDescriptor {
    /// Field indices from the record root to the leaf.
    pub path: Vec<usize>,
    /// Underscore-joined external name, before case conversion.
    pub name: String,
}

/// Walk `table` and produce a descriptor for every reachable leaf.
///
/// A record with no eligible fields yields an empty, non-error result.
pub(crate) fn resolve_fields(table: &'static [FieldMeta], opts: &Options) -> Vec<FieldDescriptor> {
    collect(table, "", opts)
}

fn collect(table: &'static [FieldMeta], parent: &str, opts: &Options) -> Vec<FieldDescriptor> {
    let mut out = Vec::with_capacity(table.len());

    for (index, meta) in table.iter().enumerate() {
        if meta.skip {
            if opts.verbose {
                debug!(field = meta.ident, "excluding (skip)");
            }
            continue;
        }
        if opts.only_tagged && meta.name_override.is_none() {
            if opts.verbose {
                debug!(field = meta.ident, "excluding (no override tag)");
            }
            continue;
        }

        let name = meta.resolved_name();

        // Flattened records contribute their children directly: no name
        // segment, no qualified-path segment.
        if meta.flatten && let Some(child_table) = (meta.nested)() {
            for mut fd in collect(child_table, parent, opts) {
                fd.path.insert(0, index);
                out.push(fd);
            }
            continue;
        }

        let qualified = join_parent(parent, name);
        if opts.is_ignored(&qualified, parent) {
            if opts.verbose {
                debug!(field = %qualified, "excluding (ignored)");
            }
            continue;
        }

        match (meta.nested)() {
            Some(child_table) => {
                let children = collect(child_table, &qualified, opts);
                if children.is_empty() {
                    continue;
                }
                for mut fd in children {
                    fd.path.insert(0, index);
                    fd.name = format!("{name}_{}", fd.name);
                    out.push(fd);
                }
            }
            None => out.push(FieldDescriptor {
                path: vec![index],
                name: name.to_owned(),
            }),
        }
    }

    out
}

/// Dot-join a parent path and a child name; an empty parent contributes
/// nothing.
pub(crate) fn join_parent(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else {
        format!("{parent}.{child}")
    }
}

/// One pattern check of the ignore rule. All inputs are expected lowercased.
///
/// A field is ignored when its qualified path equals the pattern, is a
/// dot-delimited descendant of it, or when its immediate parent path equals
/// the pattern.
pub(crate) fn is_field_ignored(target: &str, parent: &str, ignore: &str) -> bool {
    if parent == ignore {
        return true;
    }
    if target == ignore {
        return true;
    }
    target.starts_with(&format!("{ignore}."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::Mirror;

    fn opts() -> Options {
        Options {
            prefix: String::new(),
            only_tagged: false,
            verbose: false,
            ignore: Vec::new(),
        }
    }

    fn names(descriptors: &[FieldDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|fd| fd.name.as_str()).collect()
    }

    #[test]
    fn ignored_when_parent_matches() {
        assert!(is_field_ignored("field.child", "parent", "parent"));
    }

    #[test]
    fn ignored_when_target_matches() {
        assert!(is_field_ignored("field.child", "parent", "field.child"));
        assert!(is_field_ignored("field.child", "", "field.child"));
    }

    #[test]
    fn ignored_when_target_is_descendant() {
        assert!(is_field_ignored("field.child.subfield", "parent", "field.child"));
    }

    #[test]
    fn not_ignored_otherwise() {
        assert!(!is_field_ignored("field.child", "parent", "unrelated"));
        assert!(!is_field_ignored("field.child", "parent", ""));
        // A name-prefix match that is not a dot boundary does not count.
        assert!(!is_field_ignored("database.url", "", "data"));
    }

    #[test]
    fn join_parent_cases() {
        assert_eq!(join_parent("parent", "child"), "parent.child");
        assert_eq!(join_parent("", "child"), "child");
        assert_eq!(join_parent("parent.part", "child"), "parent.part.child");
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Flat {
            first: String,
            second: i32,
        }
    }

    #[test]
    fn flat_record_in_declaration_order() {
        let got = resolve_fields(<Flat as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["first", "second"]);
        assert_eq!(got[0].path, vec![0]);
        assert_eq!(got[1].path, vec![1]);
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Empty {}
    }

    #[test]
    fn empty_record_yields_empty_result() {
        let got = resolve_fields(<Empty as Mirror>::field_table().unwrap(), &opts());
        assert!(got.is_empty());
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Child {
            host: String,
            port: u16,
        }
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Parent {
            db: Child,
            name: String,
        }
    }

    #[test]
    fn nested_record_flattens_with_underscore() {
        let got = resolve_fields(<Parent as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["db_host", "db_port", "name"]);
        assert_eq!(got[0].path, vec![0, 0]);
        assert_eq!(got[1].path, vec![0, 1]);
        assert_eq!(got[2].path, vec![1]);
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Pointered {
            db: Option<Child>,
        }
    }

    #[test]
    fn option_wrapped_record_resolves_like_the_record() {
        let got = resolve_fields(<Pointered as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["db_host", "db_port"]);
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Tagged {
            #[env("custom_field")]
            first: String,
            second: String,
        }
    }

    #[test]
    fn override_tag_replaces_the_name() {
        let got = resolve_fields(<Tagged as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["custom_field", "second"]);
    }

    #[test]
    fn only_tagged_drops_untagged_fields() {
        let options = Options {
            only_tagged: true,
            ..opts()
        };
        let got = resolve_fields(<Tagged as Mirror>::field_table().unwrap(), &options);
        assert_eq!(names(&got), vec!["custom_field"]);
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct Skippy {
            kept: String,
            #[skip]
            hidden: String,
        }
    }

    #[test]
    fn skip_marker_excludes_the_field() {
        let got = resolve_fields(<Skippy as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["kept"]);
    }

    #[test]
    fn ignore_excludes_leaf_and_keeps_siblings() {
        let options = Options {
            ignore: vec!["db.pass".to_owned()],
            ..opts()
        };

        crate::env_record! {
            #[derive(Debug, Default)]
            struct Creds {
                pass: String,
                user: String,
            }
        }

        crate::env_record! {
            #[derive(Debug, Default)]
            struct Config {
                db: Creds,
            }
        }

        let got = resolve_fields(<Config as Mirror>::field_table().unwrap(), &options);
        assert_eq!(names(&got), vec!["db_user"]);
    }

    #[test]
    fn ignore_matching_is_case_insensitive() {
        let options = Options {
            ignore: vec!["db".to_owned()],
            ..opts()
        };

        crate::env_record! {
            #[derive(Debug, Default)]
            struct Cased {
                #[env("DB")]
                db: Child,
                other: String,
            }
        }

        let got = resolve_fields(<Cased as Mirror>::field_table().unwrap(), &options);
        assert_eq!(names(&got), vec!["other"]);
    }

    #[test]
    fn fully_ignored_nested_record_contributes_nothing() {
        let options = Options {
            ignore: vec!["db.host".to_owned(), "db.port".to_owned()],
            ..opts()
        };
        let got = resolve_fields(<Parent as Mirror>::field_table().unwrap(), &options);
        // No dangling "db_" entry survives once every child is excluded.
        assert_eq!(names(&got), vec!["name"]);
    }

    #[test]
    fn ignore_pattern_order_does_not_matter() {
        let forward = Options {
            ignore: vec!["db.host".to_owned(), "name".to_owned()],
            ..opts()
        };
        let backward = Options {
            ignore: vec!["name".to_owned(), "db.host".to_owned()],
            ..opts()
        };
        let table = <Parent as Mirror>::field_table().unwrap();
        assert_eq!(
            resolve_fields(table, &forward),
            resolve_fields(table, &backward)
        );
    }

    crate::env_record! {
        #[derive(Debug, Default)]
        struct WithCommon {
            #[flatten]
            common: Child,
            app: String,
        }
    }

    #[test]
    fn flattened_record_adds_no_name_segment() {
        let got = resolve_fields(<WithCommon as Mirror>::field_table().unwrap(), &opts());
        assert_eq!(names(&got), vec!["host", "port", "app"]);
        assert_eq!(got[0].path, vec![0, 0]);
        assert_eq!(got[1].path, vec![0, 1]);
        assert_eq!(got[2].path, vec![1]);
    }

    #[test]
    fn flattened_children_ignore_by_their_own_name() {
        let options = Options {
            ignore: vec!["host".to_owned()],
            ..opts()
        };
        let got = resolve_fields(<WithCommon as Mirror>::field_table().unwrap(), &options);
        assert_eq!(names(&got), vec!["port", "app"]);
    }
}
