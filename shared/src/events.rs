//! Realtime push events
//!
//! Both WebSocket channels (`/ws/stock`, `/ws/ventas`) carry small
//! JSON objects tagged by an `event` field. One enum decodes both;
//! a feed reading a channel simply never sees the other channel's
//! variants.

use serde::{Deserialize, Serialize};

/// A push event from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum RealtimeEvent {
    /// External stock change for one producto
    #[serde(rename = "stock_update")]
    StockUpdate { producto_id: i64, new_stock: i64 },
    /// A sale was recorded somewhere; listings should refresh
    #[serde(rename = "new_sale")]
    NewSale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_stock_update() {
        let e: RealtimeEvent =
            serde_json::from_str(r#"{"event":"stock_update","producto_id":4,"new_stock":12}"#)
                .unwrap();
        assert_eq!(
            e,
            RealtimeEvent::StockUpdate {
                producto_id: 4,
                new_stock: 12
            }
        );
    }

    #[test]
    fn decodes_new_sale() {
        let e: RealtimeEvent = serde_json::from_str(r#"{"event":"new_sale"}"#).unwrap();
        assert_eq!(e, RealtimeEvent::NewSale);
    }

    #[test]
    fn unknown_event_is_an_error_not_a_panic() {
        let r: Result<RealtimeEvent, _> =
            serde_json::from_str(r#"{"event":"heartbeat","seq":9}"#);
        assert!(r.is_err());
    }
}
