/// Implements `Serialize` and `Deserialize` for records through their [`Model`](crate::Model)
/// mapping, so embedding a record in a larger serde payload yields the same wire form.
macro_rules! impl_serde_via_mapping {
    ( $( $ty:ty ),* $(,)? ) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.collect_map($crate::model::Model::to_mapping(self).iter())
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                    match <$ty as $crate::model::Model>::from_value(&value) {
                        Ok(Some(model)) => Ok(model),
                        Ok(None) => Err(serde::de::Error::custom(concat!(
                            "expected ",
                            stringify!($ty),
                            " object, found null"
                        ))),
                        Err(err) => Err(serde::de::Error::custom(err)),
                    }
                }
            }
        )*
    };
}

pub(crate) use impl_serde_via_mapping;
