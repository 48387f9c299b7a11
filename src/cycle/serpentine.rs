use crate::error::SetupError;
use crate::game::{CellType, Direction, Grid, Position};

/// Steps of the fixed serpentine cycle and the cell holding ordinal 0.
///
/// Rows are swept over columns `2..=C`, alternating right and left, moving
/// down one row at each end. The last row runs into column 1, which climbs
/// back to row 1 and turns right into `(1, 2)`.
pub(super) fn build_steps(grid: &Grid) -> Result<(Vec<Option<Direction>>, Position), SetupError> {
    let inner_rows = grid.rows() - 2;
    let inner_cols = grid.cols() - 2;

    if inner_rows % 2 != 0 {
        return Err(SetupError::UnsupportedShape(format!(
            "interior row count must be even, got {inner_rows}"
        )));
    }
    if grid
        .interior_points()
        .any(|p| grid.cell(p) == Some(CellType::Wall))
    {
        return Err(SetupError::UnsupportedShape(
            "interior must be free of walls".to_string(),
        ));
    }

    let last_row = inner_rows as i32;
    let last_col = inner_cols as i32;
    let mut steps = vec![None; grid.area()];
    let mut set = |row: i32, col: i32, direction: Direction| {
        if let Some(i) = grid.index(Position::new(row, col)) {
            steps[i] = Some(direction);
        }
    };

    for row in 1..=last_row {
        if row % 2 == 1 {
            for col in 2..last_col {
                set(row, col, Direction::Right);
            }
            set(row, last_col, Direction::Down);
        } else {
            for col in 3..=last_col {
                set(row, col, Direction::Left);
            }
            let turn = if row < last_row {
                Direction::Down
            } else {
                Direction::Left
            };
            set(row, 2, turn);
        }
    }

    // Return column
    for row in 2..=last_row {
        set(row, 1, Direction::Up);
    }
    set(1, 1, Direction::Right);

    Ok((steps, Position::new(1, 2)))
}
