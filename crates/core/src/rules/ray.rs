//! Line-of-sight scanning along ranks, files and diagonals

use crate::board::{Position, Square};

/// Unit step from `from` towards `to` when the two share a rank, file or
/// diagonal; `None` otherwise or when they coincide.
pub fn direction(from: Square, to: Square) -> Option<(i8, i8)> {
    let (df, dr) = from.delta(to);
    let straight = (df == 0) != (dr == 0);
    let diagonal = df != 0 && df.abs() == dr.abs();
    (straight || diagonal).then(|| (df.signum(), dr.signum()))
}

/// Squares strictly between two aligned squares, walking from `from`.
///
/// Yields nothing for squares that are not aligned.
pub fn between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let step = direction(from, to);
    let mut current = from;
    std::iter::from_fn(move || {
        let (df, dr) = step?;
        current = current.offset(df, dr)?;
        (current != to).then_some(current)
    })
}

/// True iff `from` and `to` are aligned and nothing stands strictly between them.
pub fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    direction(from, to).is_some() && between(from, to).all(|sq| !position.is_occupied(sq))
}
