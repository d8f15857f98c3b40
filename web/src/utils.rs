/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Grid-relative coordinates from JavaScript, where anything negative or too large is off the board.
pub(crate) fn to_position(row: i32, col: i32, (rows, cols): (u8, u8)) -> Option<sandmerge_core::Position> {
    let row = u8::try_from(row).ok().filter(|&row| row < rows)?;
    let col = u8::try_from(col).ok().filter(|&col| col < cols)?;
    Some(sandmerge_core::Position::new(row, col))
}
