//! Human-readable sizes and parameter counts

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;

/// Get a human-readable size string
pub fn format_size(bytes: u64) -> String {
    format_bytes(bytes as f64)
}

/// Like [`format_size`], for estimates that are not whole bytes
pub fn format_bytes(bytes: f64) -> String {
    if bytes < KB {
        format!("{} B", bytes as u64)
    } else if bytes < MB {
        format!("{:.2} KB", bytes / KB)
    } else if bytes < GB {
        format!("{:.2} MB", bytes / MB)
    } else {
        format!("{:.2} GB", bytes / GB)
    }
}

/// Parameter count with a B/M/K suffix
pub fn format_parameter_count(params: f64) -> String {
    if params >= 1e9 {
        format!("{:.2}B", params / 1e9)
    } else if params >= 1e6 {
        format!("{:.2}M", params / 1e6)
    } else if params >= 1e3 {
        format!("{:.2}K", params / 1e3)
    } else {
        format!("{}", params)
    }
}
