use crate::dom;

// Optional DOM text sinks. Missing elements are ignored so the demo runs
// with any stripped-down page.

pub fn set_state_text(state: &str) {
    dom::set_text("state-display", &format!("State: {state}"));
}

pub fn set_sword_count(count: usize) {
    dom::set_text("sword-count", &format!("Swords: {count}"));
}
