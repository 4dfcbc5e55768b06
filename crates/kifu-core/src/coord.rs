use std::fmt;

/// Column letters used by GTP. `I` is skipped to avoid confusion with `J`.
const GTP_COLUMNS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Largest board size addressable in GTP notation.
pub const MAX_BOARD_SIZE: u8 = 25;

/// A board intersection, zero-based from the lower-left corner.
///
/// Parsed from GTP notation (`"D4"` is column 3, row 3).
///
/// # Example
///
/// ```
/// use kifu_core::Coord;
///
/// let coord = Coord::from_gtp("Q16").unwrap();
/// assert_eq!((coord.col, coord.row), (15, 15));
/// assert_eq!(coord.to_string(), "Q16");
/// assert_eq!(Coord::from_gtp("pass"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub col: u8,
    pub row: u8,
}

impl Coord {
    /// Parses a GTP vertex. Returns `None` for passes, resignations and anything malformed.
    #[must_use]
    pub fn from_gtp(gtp: &str) -> Option<Self> {
        let gtp = gtp.trim();
        let mut chars = gtp.chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let col = GTP_COLUMNS.iter().position(|&c| char::from(c) == letter)?;
        let row_text = chars.as_str();
        if row_text.is_empty() || !row_text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row = row_text.parse::<u8>().ok()?;
        if row == 0 || row > MAX_BOARD_SIZE {
            return None;
        }
        Some(Self {
            col: u8::try_from(col).ok()?,
            row: row - 1,
        })
    }

    /// Chebyshev distance: the number of king steps between two intersections.
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        self.col.abs_diff(other.col).max(self.row.abs_diff(other.row))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = char::from(GTP_COLUMNS[usize::from(self.col)]);
        write!(f, "{letter}{}", u16::from(self.row) + 1)
    }
}

/// Returns `true` for the GTP spellings of a pass or a resignation.
#[must_use]
pub fn is_pass_gtp(gtp: &str) -> bool {
    let gtp = gtp.trim();
    gtp.eq_ignore_ascii_case("pass") || gtp.eq_ignore_ascii_case("resign")
}
