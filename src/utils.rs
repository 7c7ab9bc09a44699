pub fn suffix(num: usize) -> &'static str {
    let s = num.to_string();
    if s.ends_with('1') && !s.ends_with("11") {
        "st"
    } else if s.ends_with('2') && !s.ends_with("12") {
        "nd"
    } else if s.ends_with('3') && !s.ends_with("13") {
        "rd"
    } else {
        "th"
    }
}

pub fn format_rank(rank: usize) -> String {
    format!("{}{}", rank, suffix(rank))
}

const COUNT_UNITS: [&str; 3] = ["K", "M", "B"];

/// Compact display of large counters: 1.2M, 45.0K, 999.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let mut value = count as f64 / 1_000.0;
    let mut unit = 0;
    // Unit is picked on the rounded value, 999_950 reads 1.0M and not 1000.0K.
    while (value * 10.0).round() >= 10_000.0 && unit < COUNT_UNITS.len() - 1 {
        value /= 1_000.0;
        unit += 1;
    }
    format!("{:.1}{}", (value * 10.0).round() / 10.0, COUNT_UNITS[unit])
}
