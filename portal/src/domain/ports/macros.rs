//! Helper macro generating port error enums with snake-case constructors.
//!
//! Every variant becomes a `thiserror` variant plus a constructor that takes
//! `impl Into<T>` for each field, so adapters can write
//! `IdentityProviderError::timeout(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Offline => "service offline",
            Refused { code: String } => "refused: {code}",
            Throttled { retry_after_secs: u64 } => "throttled for {retry_after_secs}s",
            Partial { message: String, received: usize } => "partial: {message} ({received} items)",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "service offline");
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        let err = SamplePortError::refused("auth/user-disabled");
        assert_eq!(err.to_string(), "refused: auth/user-disabled");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = SamplePortError::throttled(30_u64);
        assert!(matches!(err, SamplePortError::Throttled { retry_after_secs: 30 }));
    }

    #[test]
    fn mixed_fields_are_passed_in_declaration_order() {
        let err = SamplePortError::partial("truncated body", 3_usize);
        assert_eq!(err.to_string(), "partial: truncated body (3 items)");
    }
}
