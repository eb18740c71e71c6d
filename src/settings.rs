/// Days of design history kept on disk and scanned for tired aesthetics.
pub const DEFAULT_WINDOW_DAYS: usize = 10;
/// How many recent briefs are shown to the model verbatim.
pub const DEFAULT_RECENT_COUNT: usize = 3;
/// Display cap for a single brief in the recent-designs section.
pub const DEFAULT_BRIEF_MAX_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySettings {
    pub window_days: usize,
    pub recent_count: usize,
    pub brief_max_chars: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            recent_count: DEFAULT_RECENT_COUNT,
            brief_max_chars: DEFAULT_BRIEF_MAX_CHARS,
        }
    }
}
