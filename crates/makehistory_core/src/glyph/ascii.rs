//! 7-row bitmap font for a restricted ASCII repertoire.
//!
//! Each glyph is 7 rows tall with variable width. A `#` marks intensity 1,
//! a space marks a blank cell.

use crate::glyph::GlyphError;
use crate::model::matrix::IntensityMatrix;

/// Returns the intensity matrix for `symbol`.
///
/// Letters are case-folded, so `'a'` and `'A'` share one glyph.
///
/// # Errors
/// - Returns `GlyphError::NotFound` when the symbol has no bitmap.
pub fn lookup(symbol: char) -> Result<IntensityMatrix, GlyphError> {
    let art = glyph_art(symbol.to_ascii_uppercase()).ok_or(GlyphError::NotFound(symbol))?;
    Ok(IntensityMatrix::from_art(&art)?)
}

/// Symbols with a defined glyph, in canonical (upper-case) form.
pub fn supported_symbols() -> impl Iterator<Item = char> {
    (' '..='~').filter(|&symbol| glyph_art(symbol).is_some())
}

fn glyph_art(symbol: char) -> Option<[&'static str; 7]> {
    let art = match symbol {
        'A' => [" ### ", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#   #", "#### ", "#   #", "#   #", "#### "],
        'C' => [" ### ", "#   #", "#    ", "#    ", "#    ", "#   #", " ### "],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#####"],
        'F' => ["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#    "],
        'G' => [" ### ", "#   #", "#    ", "# ###", "#   #", "#   #", " ####"],
        'H' => ["#   #", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"],
        'I' => ["###", " # ", " # ", " # ", " # ", " # ", "###"],
        'J' => ["  ###", "   # ", "   # ", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "# #  ", "##   ", "# #  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "# # #", "#   #", "#   #", "#   #"],
        'N' => ["#   #", "#   #", "##  #", "# # #", "#  ##", "#   #", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#   #", "#### ", "#    ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "#   #", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#   #", "#### ", "# #  ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", "#    ", " ### ", "    #", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "#   #", "# # #", "# # #", "# # #", " # # "],
        'X' => ["#   #", "#   #", " # # ", "  #  ", " # # ", "#   #", "#   #"],
        'Y' => ["#   #", "#   #", " # # ", "  #  ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "    #", "   # ", "  #  ", " #   ", "#    ", "#####"],

        '0' => [" ### ", "#   #", "#  ##", "# # #", "##  #", "#   #", " ### "],
        '1' => [" # ", "## ", " # ", " # ", " # ", " # ", "###"],
        '2' => [" ### ", "#   #", "    #", "   # ", "  #  ", " #   ", "#####"],
        '3' => ["#####", "   # ", "  #  ", "   # ", "    #", "#   #", " ### "],
        '4' => ["   # ", "  ## ", " # # ", "#  # ", "#####", "   # ", "   # "],
        '5' => ["#####", "#    ", "#### ", "    #", "    #", "#   #", " ### "],
        '6' => ["  ## ", " #   ", "#    ", "#### ", "#   #", "#   #", " ### "],
        '7' => ["#####", "    #", "   # ", "  #  ", " #   ", " #   ", " #   "],
        '8' => [" ### ", "#   #", "#   #", " ### ", "#   #", "#   #", " ### "],
        '9' => [" ### ", "#   #", "#   #", " ####", "    #", "   # ", " ##  "],

        ' ' => ["   ", "   ", "   ", "   ", "   ", "   ", "   "],
        '!' => [" # ", " # ", " # ", " # ", " # ", "   ", " # "],
        '"' => ["# #", "# #", "   ", "   ", "   ", "   ", "   "],
        '#' => [" # # ", " # # ", "#####", " # # ", "#####", " # # ", " # # "],
        '\'' => ["#", "#", " ", " ", " ", " ", " "],
        '(' => ["  #", " # ", "#  ", "#  ", "#  ", " # ", "  #"],
        ')' => ["#  ", " # ", "  #", "  #", "  #", " # ", "#  "],
        '*' => ["     ", "# # #", " ### ", "#####", " ### ", "# # #", "     "],
        '+' => ["     ", "  #  ", "  #  ", "#####", "  #  ", "  #  ", "     "],
        '-' => ["     ", "     ", "     ", "#####", "     ", "     ", "     "],
        '.' => [" ", " ", " ", " ", " ", " ", "#"],
        '/' => ["    #", "    #", "   # ", "  #  ", " #   ", "#    ", "#    "],
        ':' => [" ", " ", "#", " ", " ", "#", " "],
        '<' => ["   #", "  # ", " #  ", "#   ", " #  ", "  # ", "   #"],
        '=' => ["     ", "     ", "#####", "     ", "#####", "     ", "     "],
        '>' => ["#   ", " #  ", "  # ", "   #", "  # ", " #  ", "#   "],
        '?' => [" ### ", "#   #", "    #", "   # ", "  #  ", "     ", "  #  "],
        '_' => ["     ", "     ", "     ", "     ", "     ", "     ", "#####"],

        _ => return None,
    };
    Some(art)
}

#[cfg(test)]
mod tests {
    use super::{lookup, supported_symbols};
    use crate::glyph::GlyphError;
    use crate::model::matrix::GRID_ROWS;

    #[test]
    fn every_supported_glyph_builds_a_valid_matrix() {
        let mut count = 0;
        for symbol in supported_symbols() {
            let matrix = lookup(symbol).expect("table glyphs must be valid");
            assert_eq!(matrix.rows(), GRID_ROWS);
            assert!(matrix.columns() <= 5, "glyph `{symbol}` is too wide");
            count += 1;
        }
        assert_eq!(count, 26 + 10 + 18);
    }

    #[test]
    fn lookup_is_case_folded() {
        assert_eq!(
            lookup('k').expect("lower-case k"),
            lookup('K').expect("upper-case K")
        );
    }

    #[test]
    fn hash_glyph_matches_reference_bitmap() {
        let matrix = lookup('#').expect("hash glyph");
        let expected: [[u8; 5]; 7] = [
            [0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0],
            [1, 1, 1, 1, 1],
            [0, 1, 0, 1, 0],
            [1, 1, 1, 1, 1],
            [0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0],
        ];
        for (row, values) in matrix.row_values().enumerate() {
            assert_eq!(values, expected[row]);
        }
        assert_eq!(matrix.non_zero_cells(), 20);
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        assert_eq!(lookup('~'), Err(GlyphError::NotFound('~')));
        assert_eq!(lookup('é'), Err(GlyphError::NotFound('é')));
    }
}
