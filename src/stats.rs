use std::time::{Duration, Instant};

/// Statistics collected during a run
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub files_listed: usize,
    pub files_parsed: usize,
    pub records_written: usize,
    pub bytes_read: u64,
    pub workers: usize,
    pub processing_time: Duration,
    pub start_time: Option<Instant>,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            workers: 1,
            ..Default::default()
        }
    }

    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.processing_time = start.elapsed();
        }
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Files processed: {} listed, {} parsed; Records written: {}",
            self.files_listed, self.files_parsed, self.records_written
        );

        if self.bytes_read > 0 {
            output.push_str(&format!(", {} bytes read", self.bytes_read));
        }

        if self.workers > 1 {
            output.push_str(&format!(", {} workers", self.workers));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.files_parsed > 0 {
            let files_per_sec = (self.files_parsed as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} files/s)", files_per_sec));
        }

        output
    }
}
