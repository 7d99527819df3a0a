pub mod branch;
pub mod client_state;
pub mod status_check;

pub use branch::{Branch, Mnemonic, QuizQuestion, Resource};
pub use client_state::{ClientState, QuizRecord, TaskItem};
pub use status_check::StatusCheck;
