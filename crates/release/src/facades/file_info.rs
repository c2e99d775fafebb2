//! File size, runtime and bitrate helpers for the release info line.

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// The file size as passed in by the automation tool.
#[derive(Clone, Debug, PartialEq)]
pub enum FileSize {
    Bytes(u64),
    /// Anything that isn't a plain byte count, kept as written.
    Text(String),
}

impl FileSize {
    /// Returns [Option::None] given an empty or blank size.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<u64>() {
            Ok(bytes) => Some(FileSize::Bytes(bytes)),
            Err(_) => Some(FileSize::Text(String::from(raw))),
        }
    }

    pub fn bytes(&self) -> Option<u64> {
        match self {
            FileSize::Bytes(b) => Some(*b),
            FileSize::Text(_) => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            FileSize::Bytes(b) => format_gib(*b),
            FileSize::Text(t) => t.clone(),
        }
    }
}

pub fn format_gib(bytes: u64) -> String {
    format!("{:.2} GiB", bytes as f64 / BYTES_PER_GIB)
}

/// Average bitrate in megabits per second, or [Option::None] for a zero runtime.
pub fn bitrate_mbps(bytes: u64, runtime_minutes: u32) -> Option<f64> {
    if runtime_minutes == 0 {
        return None;
    }
    let seconds = f64::from(runtime_minutes) * 60.0;
    Some(bytes as f64 * 8.0 / seconds / 1_000_000.0)
}

pub fn format_bitrate(mbps: f64) -> String {
    format!("{:.2} Mbps", mbps)
}

#[cfg(test)]
mod tests {
    use crate::facades::file_info::{bitrate_mbps, format_bitrate, format_gib, FileSize};

    #[test]
    pub fn parse_reads_digits_as_bytes() {
        assert_eq!(
            Some(FileSize::Bytes(10737418240)),
            FileSize::parse(" 10737418240 ")
        );
    }

    #[test]
    pub fn parse_keeps_human_readable_sizes_verbatim() {
        // Arrange
        let input = "4.5 GiB";

        // Act
        let actual = FileSize::parse(input).unwrap();

        // Assert
        assert_eq!(None, actual.bytes());
        assert_eq!("4.5 GiB", actual.display());
    }

    #[test]
    pub fn parse_returns_none_given_blank_size() {
        assert_eq!(None, FileSize::parse("  "));
    }

    #[test]
    pub fn format_gib_uses_two_decimals() {
        assert_eq!("10.00 GiB", format_gib(10 * 1024 * 1024 * 1024));
        assert_eq!("1.50 GiB", format_gib(1610612736));
    }

    #[test]
    pub fn bitrate_mbps_divides_bits_by_runtime() {
        // Arrange
        let bytes = 9_300_000_000;

        // Act
        let actual = bitrate_mbps(bytes, 155).unwrap();

        // Assert
        assert_eq!("8.00 Mbps", format_bitrate(actual));
    }

    #[test]
    pub fn bitrate_mbps_returns_none_given_zero_runtime() {
        assert_eq!(None, bitrate_mbps(1_000, 0));
    }
}
