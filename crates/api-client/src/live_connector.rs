// In crates/api-client/src/live_connector.rs

use crate::{Error, Result};
use app_config::types::KiteSettings;
use async_stream::stream;
use core_types::{InstrumentToken, Tick};
use futures::Stream;
use futures_util::{SinkExt, StreamExt};
use rust_decimal::Decimal;
use serde_json::json;
use std::time::Duration;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// The smallest packet that carries a token and a last traded price.
const LTP_PACKET_LEN: usize = 8;

/// A connector for the Kite ticker websocket.
#[derive(Clone)]
pub struct KiteTicker {
    url: String,
}

impl KiteTicker {
    pub fn new(settings: &KiteSettings) -> Self {
        let url = format!(
            "{}?api_key={}&access_token={}",
            settings.ws_base_url, settings.api_key, settings.access_token
        );
        Self { url }
    }

    /// Subscribes to last-traded-price updates for `tokens`.
    ///
    /// Each item holds the ticks of one websocket frame, in packet order. The
    /// connection is re-established (and the subscription re-sent) whenever it drops.
    pub fn subscribe_to_ticks(
        &self,
        tokens: Vec<InstrumentToken>,
    ) -> impl Stream<Item = Result<Vec<Tick>>> {
        let url = self.url.clone();
        let token_ids: Vec<u32> = tokens.iter().map(|t| t.0).collect();

        stream! {
            loop {
                tracing::info!(count = token_ids.len(), "Connecting to Kite ticker...");
                let (mut ws_stream, _) = match connect_async(url.as_str()).await {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::error!(error = %e, "Ticker connection failed. Retrying in 5s...");
                        tokio::time::sleep(RECONNECT_DELAY).await;
                        continue;
                    }
                };
                tracing::info!("Connected to Kite ticker.");

                let subscribe = json!({ "a": "subscribe", "v": token_ids }).to_string();
                let mode = json!({ "a": "mode", "v": ["ltp", token_ids] }).to_string();
                if let Err(e) = ws_stream.send(Message::Text(subscribe.into())).await {
                    tracing::error!(error = %e, "Failed to subscribe. Reconnecting...");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                    continue;
                }
                if let Err(e) = ws_stream.send(Message::Text(mode.into())).await {
                    tracing::error!(error = %e, "Failed to set ticker mode. Reconnecting...");
                    tokio::time::sleep(RECONNECT_DELAY).await;
                    continue;
                }

                while let Some(message) = ws_stream.next().await {
                    match message {
                        Ok(Message::Binary(frame)) => {
                            let ticks = decode_frame(&frame);
                            if !ticks.is_empty() {
                                yield Ok(ticks);
                            }
                        }
                        Ok(Message::Text(text)) => {
                            tracing::debug!(message = %text, "Ticker text message.");
                        }
                        Ok(Message::Close(frame)) => {
                            tracing::warn!(?frame, "Ticker connection closed. Trying to reconnect...");
                            break;
                        }
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "Error reading from ticker. Reconnecting...");
                            yield Err(Error::WebSocket(e.to_string()));
                            break;
                        }
                    }
                }

                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Decodes one binary ticker frame into ticks.
///
/// Layout: `u16` packet count, then for each packet a `u16` length and the packet
/// itself (all big-endian). One-byte frames are heartbeats. Decoding stops at the
/// first truncated packet, keeping what was read before it.
pub fn decode_frame(frame: &[u8]) -> Vec<Tick> {
    let mut ticks = Vec::new();
    let Some(count) = read_u16(frame, 0) else {
        return ticks;
    };

    let mut offset = 2;
    for _ in 0..count {
        let Some(len) = read_u16(frame, offset) else {
            break;
        };
        offset += 2;
        let Some(packet) = frame.get(offset..offset + len as usize) else {
            break;
        };
        offset += len as usize;

        if let Some(tick) = decode_packet(packet) {
            ticks.push(tick);
        }
    }
    ticks
}

fn read_u16(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw = bytes.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([raw[0], raw[1]]))
}

/// Token and last price from the head of a packet; every ticker mode starts with them.
fn decode_packet(packet: &[u8]) -> Option<Tick> {
    if packet.len() < LTP_PACKET_LEN {
        return None;
    }
    let token = u32::from_be_bytes(packet[0..4].try_into().ok()?);
    let raw_price = i32::from_be_bytes(packet[4..8].try_into().ok()?);

    Some(Tick {
        token: InstrumentToken(token),
        price: Decimal::new(i64::from(raw_price), price_scale(token)),
    })
}

/// Decimal places of the integer price, which depend on the exchange segment.
fn price_scale(token: u32) -> u32 {
    match token & 0xff {
        // Currency derivatives
        3 => 7,
        // BSE currency derivatives
        6 => 4,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn packet(token: u32, raw_price: i32) -> Vec<u8> {
        let mut bytes = token.to_be_bytes().to_vec();
        bytes.extend_from_slice(&raw_price.to_be_bytes());
        bytes
    }

    fn frame(packets: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = (packets.len() as u16).to_be_bytes().to_vec();
        for p in packets {
            bytes.extend_from_slice(&(p.len() as u16).to_be_bytes());
            bytes.extend_from_slice(p);
        }
        bytes
    }

    #[test]
    fn heartbeat_has_no_ticks() {
        assert!(decode_frame(&[0]).is_empty());
        assert!(decode_frame(&[]).is_empty());
    }

    #[test]
    fn decodes_ltp_packets_in_order() {
        let ticks = decode_frame(&frame(&[packet(738561, 2_245_065), packet(260105, 4_810_000)]));

        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].token, InstrumentToken(738561));
        assert_eq!(ticks[0].price, dec!(22450.65));
        assert_eq!(ticks[1].token, InstrumentToken(260105));
        assert_eq!(ticks[1].price, dec!(48100.00));
    }

    #[test]
    fn reads_only_the_head_of_longer_packets() {
        let mut quote = packet(408065, 150_025);
        quote.extend_from_slice(&[0u8; 36]);

        let ticks = decode_frame(&frame(&[quote]));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].price, dec!(1500.25));
    }

    #[test]
    fn currency_segment_uses_finer_scale() {
        // Low byte 3 marks the currency-derivatives segment.
        let token = (1234 << 8) | 3;
        let ticks = decode_frame(&frame(&[packet(token, 835_000_000)]));
        assert_eq!(ticks[0].price, dec!(83.5));
    }

    #[test]
    fn truncated_frame_keeps_complete_packets() {
        let mut bytes = frame(&[packet(1, 100), packet(2, 200)]);
        bytes.truncate(bytes.len() - 3);

        let ticks = decode_frame(&bytes);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].token, InstrumentToken(1));
    }

    #[test]
    fn short_packets_are_skipped() {
        let ticks = decode_frame(&frame(&[vec![0, 1, 2], packet(7, 700)]));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].price, dec!(7));
    }
}
