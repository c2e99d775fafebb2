//! Services for turning a resolved movie and its release into a Telegram message.

mod file_info;
mod labels;
mod release_facade;

pub use file_info::{bitrate_mbps, format_bitrate, format_gib, FileSize};
pub use labels::Labels;
pub use release_facade::{format_release_message, movie_links, truncate_chars, FormatOptions};
