//! Deterministic subject colors and icon slots.
//!
//! Selection is `palette[index % palette_len]`: the same dashboard position
//! always yields the same color, so the UI stays stable across refetches.

/// Subject card colors, applied by dashboard list position.
pub const SUBJECT_COLORS: [&str; 7] = [
    "#6B7280",
    "#BE185D",
    "#F97316",
    "#0891B2",
    "#10B981",
    "#3B82F6",
    "#FACC15",
];

/// Icon slot names matched to the palette by the same index rule.
pub const SUBJECT_ICONS: [&str; 4] = ["book-open", "flask", "calculator", "globe"];

/// Color for the subject at this dashboard position.
pub fn subject_color(index: usize) -> &'static str {
    SUBJECT_COLORS[index % SUBJECT_COLORS.len()]
}

/// Icon slot for the subject at this dashboard position.
pub fn subject_icon(index: usize) -> &'static str {
    SUBJECT_ICONS[index % SUBJECT_ICONS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_selection_is_deterministic() {
        assert_eq!(subject_color(0), subject_color(0));
        assert_eq!(subject_color(3), subject_color(3));
    }

    #[test]
    fn palette_wraps_by_modulo() {
        assert_eq!(subject_color(7), subject_color(0));
        assert_eq!(subject_color(9), subject_color(2));
        assert_eq!(subject_icon(4), subject_icon(0));
    }
}
