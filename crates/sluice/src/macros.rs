/// Declare an entity struct together with its query metadata.
///
/// ```ignore
/// sluice::entity! {
///     pub struct Person in "person" {
///         personal_no: String,
///         #[column = "surname"]
///         last_name: String,
///         #[embedded]
///         info: PersonInfo,
///         #[collection]
///         phones: Phone,
///         #[temporal(Date)]
///         born: String,
///     }
/// }
/// ```
///
/// Generated per entity: the struct itself (`#[collection]` fields become
/// `Vec<T>`), an [`Entity`](crate::Entity) impl interning the descriptor,
/// one accessor function per field returning a typed
/// [`Getter`](crate::Getter) with an interned site token, and a
/// [`FromRow`](crate::FromRow) impl mapping scalar fields by property name.
///
/// Field options, one attribute each: `#[embedded]`, `#[collection]`,
/// `#[temporal(Date)]` / `#[temporal(Time)]` / `#[temporal(Timestamp)]`,
/// `#[column = "..."]`, `#[property = "..."]`.
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident in $table:literal {
            $(
                $( #[ $($fopt:tt)+ ] )*
                $field:ident : $ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $( pub $field: $crate::entity!(@struct_ty $ty $([ $($fopt)+ ])*), )+
        }

        impl $crate::Entity for $name {
            fn descriptor() -> &'static $crate::EntityDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<$crate::EntityDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    $crate::EntityDescriptor::new::<$name>(
                        ::core::stringify!($name),
                        $table,
                        ::std::vec![
                            $(
                                {
                                    let fd = $crate::FieldDescriptor::new(
                                        ::core::stringify!($field),
                                    );
                                    $( let fd = $crate::entity!(@field_opt fd, $($fopt)+); )*
                                    fd
                                },
                            )+
                        ],
                    )
                })
            }
        }

        impl $name {
            $(
                $vis fn $field() -> $crate::Getter<$name, $ty> {
                    static SITE: ::std::sync::OnceLock<::std::sync::Arc<$crate::SiteToken>> =
                        ::std::sync::OnceLock::new();
                    $crate::Getter::from_site(
                        SITE.get_or_init(|| {
                            $crate::SiteToken::new::<$name>(::core::stringify!($field))
                        })
                        .clone(),
                    )
                }
            )+
        }

        impl $crate::FromRow for $name {
            fn from_row(row: &$crate::Row) -> $crate::Result<Self> {
                let descriptor = <$name as $crate::Entity>::descriptor();
                let mut out = <$name as ::core::default::Default>::default();
                $( $crate::entity!(@from_row out, row, descriptor, $field $([ $($fopt)+ ])*); )+
                ::core::result::Result::Ok(out)
            }
        }
    };

    // The declared struct-field type: collections become Vec<T>.
    (@struct_ty $ty:ty) => { $ty };
    (@struct_ty $ty:ty [collection] $($rest:tt)*) => { ::std::vec::Vec<$ty> };
    (@struct_ty $ty:ty [$($skip:tt)+] $($rest:tt)*) => {
        $crate::entity!(@struct_ty $ty $($rest)*)
    };

    // Fold one field option onto the FieldDescriptor builder chain.
    (@field_opt $fd:expr, embedded) => { $fd.embedded() };
    (@field_opt $fd:expr, collection) => { $fd.collection() };
    (@field_opt $fd:expr, temporal($temporal:ident)) => {
        $fd.temporal($crate::TemporalType::$temporal)
    };
    (@field_opt $fd:expr, column = $column:literal) => { $fd.with_column($column) };
    (@field_opt $fd:expr, property = $property:literal) => { $fd.with_property($property) };
    // Doc comments on fields carry no query metadata.
    (@field_opt $fd:expr, doc = $($doc:tt)+) => { $fd };

    // Row mapping: scalar fields copy out by property name, embedded and
    // collection fields keep their defaults.
    (@from_row $out:ident, $row:ident, $descriptor:ident, $field:ident) => {
        if let ::core::option::Option::Some(field) =
            $descriptor.field(::core::stringify!($field))
        {
            let property = $descriptor.property_of(field);
            if let ::core::option::Option::Some(value) = $row.get(&property) {
                $out.$field = ::core::convert::TryFrom::try_from(value.clone())?;
            }
        }
    };
    (@from_row $out:ident, $row:ident, $descriptor:ident, $field:ident [embedded] $($rest:tt)*) => {};
    (@from_row $out:ident, $row:ident, $descriptor:ident, $field:ident [collection] $($rest:tt)*) => {};
    (@from_row $out:ident, $row:ident, $descriptor:ident, $field:ident [$($skip:tt)+] $($rest:tt)*) => {
        $crate::entity!(@from_row $out, $row, $descriptor, $field $($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Entity, FieldKind, FromRow, ResolverCaches, Row, TemporalType};

    crate::entity! {
        pub struct Widget in "widget" {
            serial_no: String,
            #[column = "weight_grams"]
            weight: i64,
            #[temporal(Date)]
            made_on: String,
            #[collection]
            parts: Part,
        }
    }

    crate::entity! {
        pub struct Part in "part" {
            part_no: String,
        }
    }

    #[test]
    fn descriptor_captures_field_metadata() {
        let descriptor = Widget::descriptor();
        assert_eq!(descriptor.name(), "Widget");
        assert_eq!(descriptor.table(), "widget");
        assert_eq!(descriptor.fields().len(), 4);

        let weight = descriptor.field("weight").unwrap();
        assert_eq!(descriptor.column_of(weight), "weight_grams");
        assert_eq!(descriptor.property_of(weight), "weight");

        let made_on = descriptor.field("made_on").unwrap();
        assert_eq!(made_on.temporal_type(), Some(TemporalType::Date));

        let parts = descriptor.field("parts").unwrap();
        assert_eq!(parts.kind(), FieldKind::Collection);
    }

    #[test]
    fn accessors_resolve_to_derived_properties() {
        let caches = ResolverCaches::new();
        let tuple = Widget::serial_no().resolve(&caches).unwrap();
        assert_eq!(tuple.entity(), "Widget");
        assert_eq!(tuple.property(), "serialNo");
        assert_eq!(tuple.column(), "serial_no");
    }

    #[test]
    fn interned_accessors_share_one_site() {
        let first = Widget::serial_no();
        let second = Widget::serial_no();
        assert_eq!(first.site().id(), second.site().id());
    }

    #[test]
    fn from_row_maps_scalars_and_defaults_the_rest() {
        let row: Row = [("serialNo", "w-1"), ("madeOn", "2024-01-01")]
            .into_iter()
            .collect();
        let widget = Widget::from_row(&row).unwrap();
        assert_eq!(widget.serial_no, "w-1");
        assert_eq!(widget.made_on, "2024-01-01");
        assert_eq!(widget.weight, 0);
        assert!(widget.parts.is_empty());
    }
}
