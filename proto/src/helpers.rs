// Copyright (c) 2022-2023 The MobileCoin Foundation

/// serde helper module for optional hex-encoded byte fields
pub(crate) mod hex_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(b) => s.serialize_some(&hex::encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let s: Option<String> = Option::deserialize(d)?;

        s.map(|v| hex::decode(v).map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// serde helper module for amounts in stroops, accepting either an integer
/// or a decimal string (eg. `"10.5"`) and always serializing as an integer
pub(crate) mod stroops {
    use core::fmt;

    use serde::{
        de::{self, Visitor},
        Deserializer, Serializer,
    };

    use crate::amount::parse_amount;

    pub fn serialize<S: Serializer>(v: &i64, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(*v)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        d.deserialize_any(StroopsVisitor)
    }

    struct StroopsVisitor;

    impl<'de> Visitor<'de> for StroopsVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an amount in stroops or a decimal string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::custom(format!("amount {v} out of range")))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            parse_amount(v).map_err(E::custom)
        }
    }
}
