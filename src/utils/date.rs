use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn time_to_json(t: NaiveDateTime) -> String {
    Utc.from_utc_datetime(&t).to_rfc3339()
}

// accepts both the rfc3339 form we emit and the storage form
pub fn json_to_time(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(s) {
        return Ok(time.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, DATE_FMT).map_err(|e| format!("invalid date {}: {}", s, e))
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{json_to_time, time_to_json};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        json_to_time(&str_time).map_err(D::Error::custom)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{json_to_time, time_to_json};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(time_to_json).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(s) => json_to_time(&s).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}
