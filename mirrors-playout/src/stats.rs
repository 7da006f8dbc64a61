//! Playout statistics tracking.

use std::time::Instant;

/// Get current process memory usage in bytes (RSS - Resident Set Size).
/// Returns None if unable to determine.
#[cfg(target_os = "macos")]
pub fn get_memory_usage() -> Option<u64> {
    use std::mem::MaybeUninit;

    // macOS: use mach APIs
    extern "C" {
        fn mach_task_self() -> u32;
        fn task_info(
            target_task: u32,
            flavor: i32,
            task_info_out: *mut libc::c_void,
            task_info_outCnt: *mut u32,
        ) -> i32;
    }

    #[repr(C)]
    struct TaskBasicInfo {
        suspend_count: i32,
        virtual_size: u64,
        resident_size: u64,
        user_time: (i32, i32),
        system_time: (i32, i32),
        policy: i32,
    }

    const TASK_BASIC_INFO_64: i32 = 5;
    const TASK_BASIC_INFO_64_COUNT: u32 = 10;

    unsafe {
        let mut info = MaybeUninit::<TaskBasicInfo>::uninit();
        let mut count = TASK_BASIC_INFO_64_COUNT;

        let result = task_info(
            mach_task_self(),
            TASK_BASIC_INFO_64,
            info.as_mut_ptr() as *mut libc::c_void,
            &mut count,
        );

        if result == 0 {
            Some(info.assume_init().resident_size)
        } else {
            None
        }
    }
}

#[cfg(target_os = "linux")]
pub fn get_memory_usage() -> Option<u64> {
    use std::fs;

    let status = fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn get_memory_usage() -> Option<u64> {
    None
}

/// Format bytes as human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Statistics collected over a batch of playouts.
#[derive(Debug, Default)]
pub struct PlayoutStats {
    /// Playouts run to completion (every cell destroyed)
    pub games_completed: u64,

    /// Casts kept on the board
    pub casts: u64,

    /// Casts that destroyed nothing and were restored right away
    pub empty_casts: u64,

    /// Cells destroyed by kept casts
    pub cells_destroyed: u64,

    /// Casts whose destroyed cells were left on empty crosses
    pub isolated_casts: u64,

    /// States whose fingerprint had been seen before
    pub duplicate_states: u64,

    /// Sum of empty-line counts sampled after every kept cast
    pub empty_lines_total: u64,

    /// Fewest / most casts needed to clear a board
    pub min_casts: Option<u64>,
    pub max_casts: u64,

    /// Round-trip and branch self-checks that passed / failed
    pub checks_passed: u64,
    pub checks_failed: u64,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_casts: u64,
}

impl PlayoutStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record a kept cast
    pub fn record_cast(&mut self, destroyed: usize, empty_lines: usize, isolated: bool) {
        self.casts += 1;
        self.cells_destroyed += destroyed as u64;
        self.empty_lines_total += empty_lines as u64;
        if isolated {
            self.isolated_casts += 1;
        }
    }

    /// Record a finished playout
    pub fn record_game(&mut self, casts: usize) {
        let casts = casts as u64;
        self.games_completed += 1;
        self.max_casts = self.max_casts.max(casts);
        self.min_casts = Some(self.min_casts.map_or(casts, |m| m.min(casts)));
    }

    /// Record a self-check outcome
    pub fn record_check(&mut self, passed: bool) {
        if passed {
            self.checks_passed += 1;
        } else {
            self.checks_failed += 1;
        }
    }

    /// Get current casts per second
    pub fn casts_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.casts as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self, unique_states: usize) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Calculate rate since last log
        let rate = if let Some(last) = self.last_log_time {
            let elapsed = last.elapsed().as_secs_f64();
            let casts = self.casts - self.last_log_casts;
            if elapsed > 0.0 {
                casts as f64 / elapsed
            } else {
                0.0
            }
        } else {
            self.casts_per_sec()
        };

        let mem_str = get_memory_usage()
            .map(|m| format!(" mem={}", format_bytes(m)))
            .unwrap_or_default();

        println!(
            "[{:02}:{:02}:{:02}] games={} casts={} unique={} dup={} rate={:.0}/s{}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games_completed,
            self.casts,
            unique_states,
            self.duplicate_states,
            rate,
            mem_str,
        );

        self.last_log_time = Some(now);
        self.last_log_casts = self.casts;
    }

    /// Mean empty lines per kept cast
    pub fn mean_empty_lines(&self) -> f64 {
        if self.casts == 0 {
            0.0
        } else {
            self.empty_lines_total as f64 / self.casts as f64
        }
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games completed: {}", self.games_completed);
        println!("Casts kept: {}", self.casts);
        println!("Empty casts restored: {}", self.empty_casts);
        println!("Cells destroyed: {}", self.cells_destroyed);
        println!("Isolated casts: {}", self.isolated_casts);
        println!("Duplicate states: {}", self.duplicate_states);
        println!("Mean empty lines: {:.2}", self.mean_empty_lines());
        if let Some(min) = self.min_casts {
            println!("Casts per game: min={} max={}", min, self.max_casts);
        }
        println!("Self-checks: {} passed, {} failed", self.checks_passed, self.checks_failed);

        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                println!("Average rate: {:.0} casts/sec", self.casts as f64 / elapsed);
            }
        }
    }
}
