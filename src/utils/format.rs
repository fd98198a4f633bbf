/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a timestamp string to a more readable form.
/// Falls back to the raw value when it does not parse as RFC 3339.
pub fn format_timestamp(ts: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(ts) {
        dt.format("%b %d, %Y %H:%M").to_string()
    } else if ts.len() >= 10 {
        ts.chars().take(10).collect()
    } else {
        ts.to_string()
    }
}

/// File extensions the analysis endpoint accepts.
const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Check whether a path names an image in a supported format,
/// judged by extension only.
pub fn is_supported_image(path: &str) -> bool {
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    ext != path.to_ascii_lowercase() && SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-01T12:30:00Z"),
            "May 01, 2024 12:30"
        );
        assert_eq!(format_timestamp("2024-05-01"), "2024-05-01");
        assert_eq!(format_timestamp("soon"), "soon");
    }

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image("/tmp/lunch.jpg"));
        assert!(is_supported_image("dinner.JPEG"));
        assert!(is_supported_image("salad.webp"));
        assert!(!is_supported_image("notes.txt"));
        assert!(!is_supported_image("noextension"));
    }
}
