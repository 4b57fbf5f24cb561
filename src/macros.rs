//! The `env_record!` struct-defining macro.
//!
//! Parsing happens in a token muncher: each field is peeled off the front of
//! the body, its markers (which must come before any other attribute) are
//! translated into [`FieldMeta`](crate::reflect::FieldMeta) values, and the
//! remaining attributes are passed through to the emitted struct unchanged.

/// Define a record struct and generate its [`Mirror`](crate::Mirror) and
/// [`Record`](crate::Record) impls.
///
/// Fields accept four markers, written before any other attribute:
///
/// - `#[env("NAME")]` — exact external name, wins over everything else.
/// - `#[rename("name")]` — serialization-style name, used when no `#[env]`
///   override is present. `#[env(..)]` and `#[rename(..)]` may be combined,
///   in that order.
/// - `#[skip]` — keep the field on the struct but never load it.
/// - `#[flatten]` — merge a nested record's fields into this record without
///   adding a name segment.
///
/// ```
/// envfill::env_record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct DbConfig {
///         pub host: String,
///         #[rename("poolSize")]
///         pub pool_size: u32,
///         #[skip]
///         pub dirty: bool,
///     }
/// }
///
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! env_record {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $crate::__env_record_munch! {
            attrs = [$(#[$attr])*],
            vis = $vis,
            name = $name,
            fields = [],
            rest = [$($body)*]
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __env_record_munch {
    // #[skip]
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [#[skip] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::None),
                rename = (::core::option::Option::None),
                skip = (true),
                flatten = (false),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // #[flatten]
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [#[flatten] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::None),
                rename = (::core::option::Option::None),
                skip = (false),
                flatten = (true),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // #[env("...")] #[rename("...")]
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [#[env($override:literal)] #[rename($rename:literal)] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::Some($override)),
                rename = (::core::option::Option::Some($rename)),
                skip = (false),
                flatten = (false),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // #[env("...")]
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [#[env($override:literal)] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::Some($override)),
                rename = (::core::option::Option::None),
                skip = (false),
                flatten = (false),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // #[rename("...")]
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [#[rename($rename:literal)] $(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::None),
                rename = (::core::option::Option::Some($rename)),
                skip = (false),
                flatten = (false),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // Unmarked field.
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = [$(#[$fattr:meta])* $fvis:vis $fname:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__env_record_munch! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)* {
                attrs = [$(#[$fattr])*],
                fvis = $fvis,
                ident = $fname,
                ty = $fty,
                name_override = (::core::option::Option::None),
                rename = (::core::option::Option::None),
                skip = (false),
                flatten = (false),
            }],
            rest = [$($($rest)*)?]
        }
    };

    // All fields consumed.
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$($fields:tt)*],
        rest = []
    ) => {
        $crate::__env_record_emit! {
            attrs = [$($attrs)*],
            vis = $vis,
            name = $name,
            fields = [$($fields)*]
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __env_record_emit {
    (
        attrs = [$($attrs:tt)*],
        vis = $vis:vis,
        name = $name:ident,
        fields = [$({
            attrs = [$($fattr:tt)*],
            fvis = $fvis:vis,
            ident = $fname:ident,
            ty = $fty:ty,
            name_override = ($name_override:expr),
            rename = ($rename:expr),
            skip = ($skip:expr),
            flatten = ($flatten:expr),
        })*]
    ) => {
        $($attrs)*
        $vis struct $name {
            $($($fattr)* $fvis $fname: $fty,)*
        }

        impl $crate::reflect::Mirror for $name {
            fn field_table() -> ::core::option::Option<&'static [$crate::reflect::FieldMeta]> {
                ::core::option::Option::Some($name::__ENVFILL_FIELDS)
            }

            fn zero() -> Self {
                Self {
                    $($fname: $crate::reflect::Mirror::zero(),)*
                }
            }

            fn as_slot(&mut self) -> $crate::reflect::Slot<'_> {
                $crate::reflect::Slot::Record(self)
            }
        }

        impl $crate::reflect::Record for $name {
            fn table(&self) -> &'static [$crate::reflect::FieldMeta] {
                $name::__ENVFILL_FIELDS
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<$crate::reflect::Slot<'_>> {
                let mut remaining = index;
                $(
                    if remaining == 0 {
                        return ::core::option::Option::Some(
                            $crate::reflect::Mirror::as_slot(&mut self.$fname),
                        );
                    }
                    remaining -= 1;
                )*
                ::core::option::Option::None
            }
        }

        impl $name {
            #[doc(hidden)]
            pub const __ENVFILL_FIELDS: &'static [$crate::reflect::FieldMeta] = &[
                $($crate::reflect::FieldMeta {
                    ident: ::core::stringify!($fname),
                    name_override: $name_override,
                    rename: $rename,
                    skip: $skip,
                    flatten: $flatten,
                    nested: <$fty as $crate::reflect::Mirror>::field_table,
                },)*
            ];
        }
    };
}
