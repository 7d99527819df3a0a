pub mod branches;
pub mod root;
pub mod state;
pub mod status;

use serde::Serialize;

/// Acknowledgement body for writes that return nothing else
#[derive(Debug, Serialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
