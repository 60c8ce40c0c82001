pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    count, delta, dim, error, header, muted, section, status, styled_delta, success, summary_row,
    warn,
};
pub use progress::{ProgressManager, Spinner};
pub use table::{history_table, stats_table, videos_table, TableBuilder};
pub use theme::{theme, Theme};
