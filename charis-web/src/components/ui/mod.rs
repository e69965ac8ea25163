pub mod debug_banner;
pub mod gift_breakdown;
pub mod progress_meter;
pub mod question_card;
