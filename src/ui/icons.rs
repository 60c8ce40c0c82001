pub struct Icons;

impl Icons {
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const NEW: &str = "✨";
    pub const DEL: &str = "🗑️";
    pub const CLOCK: &str = "⏱️";
    pub const PERSON: &str = "👤";
    pub const PHONE: &str = "📱";
    pub const EYE: &str = "👀";
    pub const HEART: &str = "❤️";
    pub const COMMENT: &str = "💬";
    pub const UP: &str = "⬆️";
    pub const HOURGLASS: &str = "⏳";
    pub const EMPTY: &str = "∅";
}
