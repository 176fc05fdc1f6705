use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

// Post and comment ids are derived from the creation timestamp (epoch
// millis), so ordering by id is creation order.  They are serialized as
// strings because that is how the persisted records carry them.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl PostId {
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_id_serde {
    ($ty:ident) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                i64::from_str(&s).map($ty).map_err(de::Error::custom)
            }
        }
    };
}

string_id_serde!(PostId);
string_id_serde!(CommentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_round_trips_as_string() {
        let id = PostId::from_millis(1_700_000_000_123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1700000000123\"");

        let back: PostId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ids_order_by_creation_time() {
        let older = PostId::from_millis(1_000);
        let newer = PostId::from_millis(2_000);
        assert!(older < newer);
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(serde_json::from_str::<CommentId>("\"abc\"").is_err());
    }
}
