//! Helpers to check from tests how images were split into bands.
use std::cell::RefCell;

thread_local!(static TEST_LOGS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) });

pub fn log_message(msg: &str) {
    TEST_LOGS.with(|f| {
        let mut logs = f.borrow_mut();
        logs.push(msg.to_string());
    });
}

pub fn logs_contain(msg: &str) -> bool {
    TEST_LOGS.with(|f| f.borrow().iter().any(|line| line.contains(msg)))
}

pub fn clear_log() {
    TEST_LOGS.with(|f| f.borrow_mut().clear())
}
