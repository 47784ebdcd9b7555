/// Format a byte count with fractional KB/MB/GB (e.g., "1.5 KB", "2.3 MB").
pub fn format_bytes_approx(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Left-justify `s` to `width` characters, padding with spaces.
pub fn ljust(s: &str, width: usize) -> String {
    format!("{s:<width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_approx() {
        assert_eq!(format_bytes_approx(512), "512 B");
        assert_eq!(format_bytes_approx(1536), "1.5 KB");
        assert_eq!(format_bytes_approx(1048696), "1.0 MB");
        assert_eq!(format_bytes_approx(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_ljust() {
        assert_eq!(ljust("abc", 8), "abc     ");
        assert_eq!(ljust("abcdefghij", 8), "abcdefghij");
    }
}
