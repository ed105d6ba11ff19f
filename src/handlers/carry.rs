//! Carry Handler
//!
//! A small clipboard alternative: the cursor "carries" a text payload picked
//! up via `/carry <text>` and types it wherever it is dropped. `/drop` types
//! and clears, `/drop-keep` types and retains the payload for repeated
//! drops, `/carry-status` reports what is held without acting.

use super::Handler;
use crate::actuate::Actuator;
use crate::dispatch::Message;
use crate::Result;
use tracing::{debug, info};

#[derive(Default)]
pub struct CarryHandler {
    payload: Option<String>,
}

impl CarryHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn drop_payload(&mut self, keep: bool, actuator: &mut dyn Actuator) -> Result<()> {
        let Some(payload) = self.payload.clone() else {
            debug!("Drop with nothing carried");
            return Ok(());
        };
        actuator.type_text(&payload)?;
        if !keep {
            self.payload = None;
        }
        info!(len = payload.len(), keep, "Dropped carried text");
        Ok(())
    }
}

impl Handler for CarryHandler {
    fn name(&self) -> &str {
        "carry"
    }

    fn patterns(&self) -> Vec<String> {
        vec![
            "/carry".to_string(),
            "/drop".to_string(),
            "/drop-keep".to_string(),
            "/carry-status".to_string(),
        ]
    }

    fn handle(&mut self, message: &Message, actuator: &mut dyn Actuator) -> Result<()> {
        match message.address.as_str() {
            "/carry" => {
                let Some(text) = message.arg_str(0) else {
                    debug!("Carry without a text payload");
                    return Ok(());
                };
                info!(len = text.len(), "Carrying text");
                self.payload = Some(text.to_string());
                Ok(())
            }
            "/drop" => self.drop_payload(false, actuator),
            "/drop-keep" => self.drop_payload(true, actuator),
            "/carry-status" => {
                match &self.payload {
                    Some(payload) => info!(len = payload.len(), "Carrying"),
                    None => info!("Carrying nothing"),
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn reset(&mut self, _actuator: &mut dyn Actuator) {
        self.payload = None;
    }
}
