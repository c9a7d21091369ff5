/// Declares a UUID newtype used to reference an entity.
///
/// A nil ID marks an entity that has not been stored yet.
macro_rules! entity_id {
    ($name: ident) => {
        #[derive(
            derive_more::Deref,
            derive_more::Display,
            Debug,
            Default,
            Clone,
            Copy,
            Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
        )]
        pub struct $name(uuid::Uuid);

        impl $name {
            #[must_use]
            pub fn nil() -> Self {
                Self(uuid::Uuid::nil())
            }

            #[must_use]
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<u128> for $name {
            fn from(value: u128) -> Self {
                Self(uuid::Uuid::from_bytes(value.to_be_bytes()))
            }
        }
    };
}

pub(crate) use entity_id;

#[cfg(test)]
mod tests {
    entity_id!(TestID);

    #[test]
    fn test_id_nil() {
        assert!(TestID::nil().is_nil());
        assert_eq!(TestID::nil(), TestID::default());
    }

    #[test]
    fn test_id_random() {
        assert!(!TestID::random().is_nil());
        assert_ne!(TestID::random(), TestID::random());
    }

    #[test]
    fn test_id_from_u128() {
        assert_eq!(
            TestID::from(1).to_string(),
            "00000000-0000-0000-0000-000000000001"
        );
    }
}
