#[macro_export]
macro_rules! field_type_registry_entries {
    ($macro:ident $(, @args $($args:tt)+ )?) => {
        $macro! {
            $(
                @args $($args)+;
            )?
            @entries
            (
                Any,
                "any",
                strategy = Scalar,
                is_comparable = false,
                accepts = _
            ),
            (
                Unsigned,
                "unsigned",
                strategy = Numeric,
                is_comparable = true,
                accepts = $crate::ValueKind::Uint
            ),
            (
                String,
                "string",
                strategy = Text,
                is_comparable = true,
                accepts = $crate::ValueKind::Str
            ),
            (
                Number,
                "number",
                strategy = Numeric,
                is_comparable = true,
                accepts = $crate::ValueKind::Uint
                    | $crate::ValueKind::Int
                    | $crate::ValueKind::Float
                    | $crate::ValueKind::Double
                    | $crate::ValueKind::Decimal
            ),
            (
                Double,
                "double",
                strategy = Numeric,
                is_comparable = true,
                accepts = $crate::ValueKind::Float | $crate::ValueKind::Double
            ),
            (
                Integer,
                "integer",
                strategy = Numeric,
                is_comparable = true,
                accepts = $crate::ValueKind::Uint | $crate::ValueKind::Int
            ),
            (
                Boolean,
                "boolean",
                strategy = Bool,
                is_comparable = true,
                accepts = $crate::ValueKind::Bool
            ),
            (
                Varbinary,
                "varbinary",
                strategy = Binary,
                is_comparable = true,
                accepts = $crate::ValueKind::Bin
            ),
            (
                Scalar,
                "scalar",
                strategy = Scalar,
                is_comparable = true,
                accepts = $crate::ValueKind::Bool
                    | $crate::ValueKind::Uint
                    | $crate::ValueKind::Int
                    | $crate::ValueKind::Float
                    | $crate::ValueKind::Double
                    | $crate::ValueKind::Str
                    | $crate::ValueKind::Bin
                    | $crate::ValueKind::Decimal
                    | $crate::ValueKind::Uuid
                    | $crate::ValueKind::Datetime
                    | $crate::ValueKind::Ext
            ),
            (
                Decimal,
                "decimal",
                strategy = Numeric,
                is_comparable = true,
                accepts = $crate::ValueKind::Decimal
            ),
            (
                Uuid,
                "uuid",
                strategy = Uuid,
                is_comparable = true,
                accepts = $crate::ValueKind::Uuid
            ),
            (
                Datetime,
                "datetime",
                strategy = Datetime,
                is_comparable = true,
                accepts = $crate::ValueKind::Datetime
            ),
            (
                Array,
                "array",
                strategy = Scalar,
                is_comparable = false,
                accepts = $crate::ValueKind::Array
            ),
            (
                Map,
                "map",
                strategy = Scalar,
                is_comparable = false,
                accepts = $crate::ValueKind::Map
            ),
        }
    };
}

#[macro_export]
macro_rules! field_type_registry {
    ($macro:ident) => {
        $crate::field_type_registry_entries!($macro)
    };
    ($macro:ident, $($args:tt)+) => {
        $crate::field_type_registry_entries!($macro, @args $($args)+)
    };
}

macro_rules! metadata_from_registry {
    (
        @args $ty:expr;
        @entries $(
            (
                $variant:ident,
                $name:literal,
                strategy = $strategy:ident,
                is_comparable = $is_comparable:expr,
                accepts = $accepts:pat
            )
        ),* $(,)?
    ) => {
        match $ty {
            $(
                $crate::FieldType::$variant => $crate::FieldTypeMetadata {
                    name: $name,
                    strategy: $crate::CompareStrategy::$strategy,
                    is_comparable: $is_comparable,
                },
            )*
        }
    };
}

macro_rules! accepts_from_registry {
    (
        @args $ty:expr, $kind:expr;
        @entries $(
            (
                $variant:ident,
                $name:literal,
                strategy = $strategy:ident,
                is_comparable = $is_comparable:expr,
                accepts = $accepts:pat
            )
        ),* $(,)?
    ) => {
        match $ty {
            $(
                $crate::FieldType::$variant => matches!($kind, $accepts),
            )*
        }
    };
}

macro_rules! from_name_from_registry {
    (
        @args $name:expr;
        @entries $(
            (
                $variant:ident,
                $type_name:literal,
                strategy = $strategy:ident,
                is_comparable = $is_comparable:expr,
                accepts = $accepts:pat
            )
        ),* $(,)?
    ) => {
        match $name {
            $( $type_name => Some($crate::FieldType::$variant), )*
            _ => None,
        }
    };
}

macro_rules! all_types_from_registry {
    (
        @entries $(
            (
                $variant:ident,
                $name:literal,
                strategy = $strategy:ident,
                is_comparable = $is_comparable:expr,
                accepts = $accepts:pat
            )
        ),* $(,)?
    ) => {
        [ $( $crate::FieldType::$variant ),* ]
    };
}
