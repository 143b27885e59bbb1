// Database Models
//
// Document models for the ping collection, plus the response-shaping helper
// for the grouped query routes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One device ping: a device identifier and the epoch second it reported.
///
/// Stored verbatim as a MongoDB document. Nothing here is unique; duplicate
/// `(device_id, timestamp)` pairs are kept as separate documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ping {
    pub device_id: String,
    pub timestamp: i64,
}

/// Reshape a flat query result into `device_id -> timestamps`.
///
/// Timestamps keep the order the cursor returned them; no re-sort is applied.
/// Devices with no matching pings do not appear in the map at all.
pub fn group_by_device(pings: Vec<Ping>) -> HashMap<String, Vec<i64>> {
    let mut grouped: HashMap<String, Vec<i64>> = HashMap::new();
    for ping in pings {
        grouped.entry(ping.device_id).or_default().push(ping.timestamp);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ping(device_id: &str, timestamp: i64) -> Ping {
        Ping {
            device_id: device_id.to_string(),
            timestamp,
        }
    }

    #[test]
    fn groups_by_device_preserving_order_within_groups() {
        let grouped = group_by_device(vec![ping("d1", 100), ping("d2", 150), ping("d1", 200)]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["d1"], vec![100, 200]);
        assert_eq!(grouped["d2"], vec![150]);
    }

    #[test]
    fn input_order_wins_over_chronological_order() {
        let grouped = group_by_device(vec![ping("d1", 200), ping("d1", 100)]);
        assert_eq!(grouped["d1"], vec![200, 100]);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(group_by_device(Vec::new()).is_empty());
    }
}
