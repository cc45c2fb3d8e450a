//! Constraint generation for the bounded-horizon Sokoban encoding

use super::level::{Direction, Level, Position};
use super::variables::SokobanVariables;
use crate::error::PuzzleError;
use crate::sat::{Clause, ClauseSet};

/// Generates the CNF for one level and horizon
#[derive(Debug)]
pub struct SokobanEncoder<'a> {
    level: &'a Level,
    horizon: usize,
    variables: SokobanVariables,
    floor: Vec<Position>,
}

impl<'a> SokobanEncoder<'a> {
    pub fn new(level: &'a Level, horizon: usize) -> Result<Self, PuzzleError> {
        let variables = SokobanVariables::new(level.rows, level.cols, horizon, level.box_count())?;
        Ok(Self {
            level,
            horizon,
            variables,
            floor: level.floor_cells(),
        })
    }

    /// The allocator shared with the decoder
    pub fn variables(&self) -> &SokobanVariables {
        &self.variables
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Generate all constraints for the level
    pub fn encode(&self) -> ClauseSet {
        let mut clauses = ClauseSet::new();

        self.generate_initial_state(&mut clauses);
        self.generate_goal_condition(&mut clauses);

        for t in 0..=self.horizon {
            self.generate_wall_constraints(&mut clauses, t);
            self.generate_exclusivity_constraints(&mut clauses, t);
            self.generate_uniqueness_constraints(&mut clauses, t);
        }

        for t in 1..=self.horizon {
            self.generate_agent_transitions(&mut clauses, t);
            for id in 0..self.level.box_count() {
                self.generate_box_transitions(&mut clauses, id, t);
            }
        }

        clauses
    }

    /// Agent and boxes start where the level puts them
    fn generate_initial_state(&self, clauses: &mut ClauseSet) {
        clauses.push(Clause::unit(self.variables.agent(self.level.agent, 0)));
        for (id, &pos) in self.level.boxes.iter().enumerate() {
            clauses.push(Clause::unit(self.variables.box_at(id, pos, 0)));
        }
    }

    /// Each box ends on some goal (not necessarily a particular one)
    fn generate_goal_condition(&self, clauses: &mut ClauseSet) {
        for id in 0..self.level.box_count() {
            let on_goal: Vec<i32> = self
                .level
                .goals
                .iter()
                .map(|&goal| self.variables.box_at(id, goal, self.horizon))
                .collect();
            clauses.at_least_one(&on_goal);
        }
    }

    /// Walls never hold the agent or a box
    fn generate_wall_constraints(&self, clauses: &mut ClauseSet, t: usize) {
        for pos in self.level.cells().filter(|&pos| self.level.is_wall(pos)) {
            clauses.push(Clause::unit(-self.variables.agent(pos, t)));
            for id in 0..self.level.box_count() {
                clauses.push(Clause::unit(-self.variables.box_at(id, pos, t)));
            }
        }
    }

    /// At most one entity per cell
    fn generate_exclusivity_constraints(&self, clauses: &mut ClauseSet, t: usize) {
        for &pos in &self.floor {
            let agent = self.variables.agent(pos, t);
            let boxes: Vec<i32> = (0..self.level.box_count())
                .map(|id| self.variables.box_at(id, pos, t))
                .collect();

            for &b in &boxes {
                clauses.push(Clause::binary(-agent, -b));
            }
            clauses.at_most_one(&boxes);
        }
    }

    /// The agent and every box occupy exactly one cell.
    ///
    /// Wall cells are left out: their unit clauses already rule them out.
    fn generate_uniqueness_constraints(&self, clauses: &mut ClauseSet, t: usize) {
        let agent: Vec<i32> = self
            .floor
            .iter()
            .map(|&pos| self.variables.agent(pos, t))
            .collect();
        clauses.exactly_one(&agent);

        for id in 0..self.level.box_count() {
            let cells: Vec<i32> = self
                .floor
                .iter()
                .map(|&pos| self.variables.box_at(id, pos, t))
                .collect();
            clauses.exactly_one(&cells);
        }
    }

    /// The agent stays put or steps to an orthogonal neighbour
    fn generate_agent_transitions(&self, clauses: &mut ClauseSet, t: usize) {
        for &pos in &self.floor {
            let mut literals = vec![
                -self.variables.agent(pos, t - 1),
                self.variables.agent(pos, t),
            ];
            literals.extend(
                self.level
                    .neighbors(pos)
                    .into_iter()
                    .filter(|&next| !self.level.is_wall(next))
                    .map(|next| self.variables.agent(next, t)),
            );
            clauses.add(literals);
        }
    }

    /// Frame axiom and push rule for one box between `t - 1` and `t`
    fn generate_box_transitions(&self, clauses: &mut ClauseSet, id: usize, t: usize) {
        for &pos in &self.floor {
            let was_here = self.variables.box_at(id, pos, t - 1);
            let still_here = self.variables.box_at(id, pos, t);

            if self.level.is_corner(pos) {
                // Nothing can get behind a box in a grid corner.
                clauses.push(Clause::binary(-was_here, still_here));
                continue;
            }

            // The box only leaves its cell when the agent walks into it.
            let agent_enters = self.variables.agent(pos, t);
            clauses.add(vec![-was_here, still_here, agent_enters]);

            for dir in Direction::ALL {
                // The agent pushes in `dir` from the cell on the opposite side.
                let Some(from) = self.level.step(pos, dir.opposite()) else {
                    continue;
                };
                let mut literals = vec![
                    -was_here,
                    -self.variables.agent(from, t - 1),
                    -agent_enters,
                ];
                // Off-grid destination: the push is impossible.
                if let Some(to) = self.level.step(pos, dir) {
                    literals.push(self.variables.box_at(id, to, t));
                }
                clauses.add(literals);
            }
        }
    }

    /// Get constraint generation statistics
    pub fn statistics(&self, clauses: &ClauseSet) -> EncodingStatistics {
        EncodingStatistics {
            rows: self.level.rows,
            cols: self.level.cols,
            boxes: self.level.box_count(),
            horizon: self.horizon,
            total_variables: self.variables.max_variable() as usize,
            total_clauses: clauses.len(),
        }
    }
}

/// Statistics about the Sokoban encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub rows: usize,
    pub cols: usize,
    pub boxes: usize,
    pub horizon: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Sokoban Encoding Statistics:")?;
        writeln!(f, "  Grid: {}x{}", self.rows, self.cols)?;
        writeln!(f, "  Boxes: {}", self.boxes)?;
        writeln!(f, "  Horizon: {}", self.horizon)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::{solve_clause_set, Model, SolverOptions};
    use crate::sokoban::io::parse_level;

    fn corridor() -> Level {
        parse_level("#####\n#PBG#\n#####").unwrap()
    }

    fn model_for(encoder: &SokobanEncoder<'_>, states: &[(Position, Vec<Position>)]) -> Model {
        let vars = encoder.variables();
        let level = encoder.level;
        let mut literals = Vec::new();
        for (t, (agent, boxes)) in states.iter().enumerate() {
            for pos in level.cells() {
                let var = vars.agent(pos, t);
                literals.push(if pos == *agent { var } else { -var });
                for (id, &b) in boxes.iter().enumerate() {
                    let var = vars.box_at(id, pos, t);
                    literals.push(if pos == b { var } else { -var });
                }
            }
        }
        Model::from_literals(literals)
    }

    #[test]
    fn test_initial_and_goal_clauses() {
        let level = corridor();
        let encoder = SokobanEncoder::new(&level, 1).unwrap();
        let clauses = encoder.encode();
        let vars = encoder.variables();

        assert!(clauses.clauses().contains(&Clause::unit(vars.agent((1, 1), 0))));
        assert!(clauses.clauses().contains(&Clause::unit(vars.box_at(0, (1, 2), 0))));
        assert!(clauses.clauses().contains(&Clause::unit(vars.box_at(0, (1, 3), 1))));
        assert!(clauses.clauses().contains(&Clause::unit(-vars.agent((0, 0), 1))));
        assert_eq!(clauses.max_variable(), vars.max_variable());
    }

    #[test]
    fn test_legal_push_satisfies_encoding() {
        let level = corridor();
        let encoder = SokobanEncoder::new(&level, 1).unwrap();
        let clauses = encoder.encode();

        let push = model_for(&encoder, &[((1, 1), vec![(1, 2)]), ((1, 2), vec![(1, 3)])]);
        assert!(push.satisfies(&clauses));
    }

    #[test]
    fn test_walking_through_box_violates_encoding() {
        let level = parse_level("######\n#PB.G#\n######").unwrap();
        let encoder = SokobanEncoder::new(&level, 1).unwrap();
        let clauses = encoder.encode();

        // Agent steps onto the box cell while the box stays put.
        let ghost = model_for(&encoder, &[((1, 1), vec![(1, 2)]), ((1, 2), vec![(1, 2)])]);
        assert!(!ghost.satisfies(&clauses));

        // Box moves without being pushed.
        let drift = model_for(&encoder, &[((1, 1), vec![(1, 2)]), ((1, 1), vec![(1, 3)])]);
        assert!(!drift.satisfies(&clauses));

        // Agent jumps two cells.
        let jump = model_for(&encoder, &[((1, 1), vec![(1, 2)]), ((1, 3), vec![(1, 2)])]);
        assert!(!jump.satisfies(&clauses));
    }

    #[test]
    fn test_push_into_wall_is_unsatisfiable() {
        let level = parse_level("#####\n#PB#G\n#####").unwrap();
        let encoder = SokobanEncoder::new(&level, 4).unwrap();
        let outcome = solve_clause_set(&encoder.encode(), &SolverOptions::default()).unwrap();
        assert!(!outcome.is_satisfiable());
    }

    #[test]
    fn test_corner_box_never_moves() {
        // Open grid without surrounding walls: (0, 0) is a true grid corner.
        let level = parse_level("B..\n.P.\n..G").unwrap();
        let encoder = SokobanEncoder::new(&level, 6).unwrap();
        let outcome = solve_clause_set(&encoder.encode(), &SolverOptions::default()).unwrap();
        assert!(!outcome.is_satisfiable());
    }

    #[test]
    fn test_edge_push_off_grid_is_forbidden() {
        // Centre box: pushing right lands on (1, 2).
        let level = parse_level("...\nPB.\n...").unwrap();
        let encoder = SokobanEncoder::new(&level, 1).unwrap();
        let clauses = encoder.encode();
        let vars = encoder.variables();

        let from = vars.agent((1, 0), 0);
        let into = vars.agent((1, 1), 1);
        let was = vars.box_at(0, (1, 1), 0);
        assert!(clauses
            .clauses()
            .iter()
            .any(|c| c.literals == vec![-was, -from, -into, vars.box_at(0, (1, 2), 1)]));

        // Box on the right edge: the same push would leave the grid.
        let level = parse_level("...\n.PB\n...").unwrap();
        let encoder = SokobanEncoder::new(&level, 1).unwrap();
        let clauses = encoder.encode();
        let vars = encoder.variables();
        let forbidden = vec![
            -vars.box_at(0, (1, 2), 0),
            -vars.agent((1, 1), 0),
            -vars.agent((1, 2), 1),
        ];
        assert!(clauses.clauses().iter().any(|c| c.literals == forbidden));
    }

    #[test]
    fn test_statistics() {
        let level = corridor();
        let encoder = SokobanEncoder::new(&level, 2).unwrap();
        let clauses = encoder.encode();
        let stats = encoder.statistics(&clauses);
        assert_eq!((stats.rows, stats.cols, stats.boxes, stats.horizon), (3, 5, 1, 2));
        assert_eq!(stats.total_variables, 3 * 5 * 3 * 2);
        assert_eq!(stats.total_clauses, clauses.len());
    }
}
