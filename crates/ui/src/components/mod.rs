pub mod help_button;
pub mod help_modal;
pub mod transcript;

pub use help_button::HelpButton;
pub use help_modal::{HelpModal, SPINNER_FRAMES};
pub use transcript::TranscriptView;
