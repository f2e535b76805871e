//! Cell value to display color, for renderers.

/// Index 0 is the empty cell and has no color.
pub const COLORS: [Option<&str>; 8] = [
    None,
    Some("#FF0D72"),
    Some("#0DC2FF"),
    Some("#0DFF72"),
    Some("#F538FF"),
    Some("#FF8E0D"),
    Some("#FFE138"),
    Some("#3877FF"),
];

pub fn color_of(value: u8) -> Option<&'static str> {
    COLORS.get(value as usize).copied().flatten()
}
