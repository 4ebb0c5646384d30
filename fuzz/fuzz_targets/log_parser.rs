#![no_main]

use libfuzzer_sys::fuzz_target;
use ssca1_times::parser::{elapsed_seconds_from_line, LogParser};
use ssca1_times::ParseError;

const MAX_INPUT_LEN: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_LEN {
        return;
    }

    // First byte picks which elapsed-time line is read
    let elapsed_index = (data[0] % 4) as usize;
    let text = String::from_utf8_lossy(&data[1..]);

    let parser = LogParser::new(elapsed_index);
    match parser.parse_str(&text) {
        Ok(record) => {
            assert!(record.thread_count >= 1, "zero thread count accepted");
        }
        Err(ParseError::MissingElapsedLine { wanted, found }) => {
            assert_eq!(wanted, elapsed_index + 1);
            assert!(found <= elapsed_index);
        }
        Err(_) => {}
    }

    for line in text.lines() {
        let _ = elapsed_seconds_from_line(line);
    }
});
