use board_log::{BoardLogger, LogSink};
use log::LevelFilter;
use std::sync::{Mutex, Once};

struct Capture(Mutex<Vec<u8>>);

impl LogSink for Capture {
    fn write_bytes(&self, bytes: &[u8]) {
        self.0.lock().unwrap().extend_from_slice(bytes);
    }
}

static LOGGER: BoardLogger<Capture> =
    BoardLogger::new(Capture(Mutex::new(Vec::new())), LevelFilter::Debug);

fn install() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| LOGGER.init().unwrap());
}

fn captured() -> String {
    String::from_utf8(LOGGER.sink().0.lock().unwrap().clone()).unwrap()
}

#[test]
fn global_logger_receives_records() {
    install();
    log::info!(target: "tq2440", "map_io: {} regions", 4);
    log::trace!(target: "tq2440", "not recorded");
    let text = captured();
    assert!(text.contains("[INFO] tq2440: map_io: 4 regions\n"));
    assert!(!text.contains("not recorded"));
}

#[test]
fn second_install_is_refused() {
    install();
    assert!(LOGGER.init().is_err());
    assert_eq!(log::max_level(), LevelFilter::Debug);
}
