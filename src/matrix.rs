// src/matrix.rs
// Grid generation: weighted standard symbols per cell, then one bonus cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::defs::SymbolId;
use crate::error::{Result, ScratchError};
use crate::logging::log_info;
use crate::weighted::WeightedTable;

/// rows x columns grid of symbol ids, serialized as an array of rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix(Vec<Vec<SymbolId>>);

impl Matrix {
    pub fn from_rows(rows: Vec<Vec<SymbolId>>) -> Self {
        Matrix(rows)
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    pub fn columns(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.0.get(row)?.get(column).map(String::as_str)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flatten().map(String::as_str)
    }

    pub fn as_rows(&self) -> &[Vec<SymbolId>] {
        &self.0
    }

    /// The first bonus-type symbol in row-major order
    pub fn bonus_symbol(&self, config: &GameConfig) -> Result<&str> {
        self.cells()
            .find(|symbol| config.is_bonus(symbol))
            .ok_or(ScratchError::MissingBonus)
    }
}

pub struct MatrixGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> MatrixGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Fill the grid, then overwrite one random cell with a bonus symbol.
    ///
    /// Random values are consumed in this order, and only this order:
    /// one draw per cell in row-major order, the bonus row, the bonus
    /// column, the bonus symbol. A seeded `rng` therefore always yields
    /// the same matrix for the same configuration.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Matrix> {
        if self.config.rows == 0 || self.config.columns == 0 {
            return Err(ScratchError::invalid("grid must be at least 1x1"));
        }
        let probabilities = &self.config.probabilities;
        let default = probabilities
            .default_standard()
            .ok_or_else(|| ScratchError::invalid("no standard symbol probabilities defined"))?;

        let mut grid = Vec::with_capacity(self.config.rows);
        for row in 0..self.config.rows {
            let mut cells = Vec::with_capacity(self.config.columns);
            for column in 0..self.config.columns {
                let table = probabilities.cell_override(row, column).unwrap_or(default);
                cells.push(draw(table, rng, "standard")?);
            }
            grid.push(cells);
        }

        let bonus_row = rng.random_range(0..self.config.rows);
        let bonus_column = rng.random_range(0..self.config.columns);
        let bonus = draw(probabilities.bonus(), rng, "bonus")?;
        log_info(&format!("Bonus symbol {bonus} placed at {bonus_row}:{bonus_column}"));
        grid[bonus_row][bonus_column] = bonus;

        Ok(Matrix(grid))
    }
}

fn draw<R: Rng + ?Sized>(table: &WeightedTable, rng: &mut R, kind: &str) -> Result<SymbolId> {
    table.choose(rng).map(str::to_string).ok_or_else(|| {
        ScratchError::invalid(format!("{kind} probabilities have zero total weight"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample_config;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn matrix(rows: &[&[&str]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn bonus_cells(matrix: &Matrix, config: &GameConfig) -> usize {
        matrix.cells().filter(|symbol| config.is_bonus(symbol)).count()
    }

    #[test]
    fn test_matrix_dimensions_and_single_bonus() {
        let config = sample_config();
        let generator = MatrixGenerator::new(&config);
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let matrix = generator.generate(&mut rng).unwrap();
            assert_eq!(matrix.rows(), 3);
            assert_eq!(matrix.columns(), 3);
            assert!(matrix.as_rows().iter().all(|row| row.len() == 3));
            assert_eq!(bonus_cells(&matrix, &config), 1, "seed {seed}: {matrix:?}");
            assert_eq!(
                matrix.cells().filter(|symbol| config.is_standard(symbol)).count(),
                8
            );
        }
    }

    #[test]
    fn test_non_square_grid() {
        let mut config = sample_config();
        config.rows = 2;
        config.columns = 5;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let matrix = MatrixGenerator::new(&config).generate(&mut rng).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.columns(), 5);
        assert_eq!(bonus_cells(&matrix, &config), 1);
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let config = sample_config();
        let generator = MatrixGenerator::new(&config);
        let first = generator.generate(&mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let second = generator.generate(&mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_cell_override_is_used() {
        // Cell 1:1 only ever draws A unless the bonus lands there
        let config = sample_config();
        let generator = MatrixGenerator::new(&config);
        for seed in 0..100 {
            let matrix = generator.generate(&mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            let center = matrix.get(1, 1).unwrap();
            assert!(center == "A" || config.is_bonus(center), "seed {seed}: {center}");
        }
    }

    #[test]
    fn test_default_distribution_for_cells_without_override() {
        let mut config = sample_config();
        config.probabilities.standard_symbols[0].symbols = WeightedTable::new().with("C", 1);
        let matrix = MatrixGenerator::new(&config)
            .generate(&mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();
        for row in 0..3 {
            for column in 0..3 {
                let symbol = matrix.get(row, column).unwrap();
                if (row, column) == (1, 1) || config.is_bonus(symbol) {
                    continue;
                }
                assert_eq!(symbol, "C");
            }
        }
    }

    #[test]
    fn test_random_stream_order() {
        // Replaying the documented draw order by hand gives the same grid
        let config = sample_config();
        let matrix = MatrixGenerator::new(&config)
            .generate(&mut ChaCha8Rng::seed_from_u64(42))
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let default = config.probabilities.default_standard().unwrap();
        let mut expected = Vec::new();
        for row in 0..3 {
            let mut cells = Vec::new();
            for column in 0..3 {
                let table = config.probabilities.cell_override(row, column).unwrap_or(default);
                cells.push(table.choose(&mut rng).unwrap().to_string());
            }
            expected.push(cells);
        }
        let bonus_row = rng.random_range(0..3usize);
        let bonus_column = rng.random_range(0..3usize);
        expected[bonus_row][bonus_column] =
            config.probabilities.bonus().choose(&mut rng).unwrap().to_string();

        assert_eq!(matrix, Matrix::from_rows(expected));
    }

    #[test]
    fn test_bonus_symbol_lookup() {
        let config = sample_config();
        let m = matrix(&[&["A", "B", "A"], &["B", "A", "B"], &["A", "B", "+1000"]]);
        assert_eq!(m.bonus_symbol(&config).unwrap(), "+1000");

        let no_bonus = matrix(&[&["A", "B"], &["B", "A"]]);
        assert!(matches!(no_bonus.bonus_symbol(&config), Err(ScratchError::MissingBonus)));
    }

    #[test]
    fn test_matrix_serializes_as_nested_arrays() {
        let m = matrix(&[&["A", "10x"], &["B", "C"]]);
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"[["A","10x"],["B","C"]]"#);
    }
}
