//! Partitioning of empty points into territories.
//!
//! A territory is a maximal set of empty points connected through empty
//! neighbours. Each territory remembers which stone colors touch it, which is
//! all the scorer needs to decide who owns it.

use crate::board::{BoardState, Color, Point, Stone};

/// A connected region of empty points and the stone colors bordering it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Territory {
    /// Points in discovery order.
    pub points: Vec<Point>,
    pub borders_black: bool,
    pub borders_white: bool,
}

impl Territory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The single color bordering this region, if there is exactly one.
    ///
    /// Regions touching both colors (dame) or no stones at all have no owner.
    pub fn owner(&self) -> Option<Color> {
        match (self.borders_black, self.borders_white) {
            (true, false) => Some(Color::Black),
            (false, true) => Some(Color::White),
            _ => None,
        }
    }

    /// Colors of the stones adjacent to the region.
    pub fn bordering(&self) -> Vec<Color> {
        let mut colors = Vec::with_capacity(2);
        if self.borders_black {
            colors.push(Color::Black);
        }
        if self.borders_white {
            colors.push(Color::White);
        }
        colors
    }
}

/// Split the empty points of `board` into territories.
///
/// Points are taken in board order; each unvisited empty point starts a
/// depth-first flood fill over empty neighbours. Every empty point ends up in
/// exactly one territory.
pub fn partition<B: BoardState + ?Sized>(board: &B) -> Vec<Territory> {
    let points = board.points();
    let mut visited = vec![false; points.iter().max().map_or(0, |&m| m + 1)];
    let mut territories = Vec::new();

    for &start in &points {
        if visited[start] || board.color_at(start) != Stone::Empty {
            continue;
        }

        let mut territory = Territory {
            points: Vec::new(),
            borders_black: false,
            borders_white: false,
        };
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(pt) = stack.pop() {
            territory.points.push(pt);
            for n in board.neighbors(pt) {
                match board.color_at(n) {
                    Stone::Empty => {
                        if !visited[n] {
                            visited[n] = true;
                            stack.push(n);
                        }
                    }
                    Stone::Black => territory.borders_black = true,
                    Stone::White => territory.borders_white = true,
                    Stone::Border => {}
                }
            }
        }

        territories.push(territory);
    }

    territories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use std::collections::HashSet;

    #[test]
    fn test_empty_board_is_one_region() {
        let pos = Position::new(5);
        let territories = partition(&pos);
        assert_eq!(territories.len(), 1);
        assert_eq!(territories[0].len(), 25);
        assert_eq!(territories[0].owner(), None);
        assert!(territories[0].bordering().is_empty());
    }

    #[test]
    fn test_wall_splits_regions() {
        let pos = Position::from_diagram(
            "
            . X . O .
            . X . O .
            . X . O .
            . X . O .
            . X . O .
            ",
        )
        .unwrap();
        let territories = partition(&pos);
        assert_eq!(territories.len(), 3);

        let owners: Vec<Option<Color>> = territories.iter().map(Territory::owner).collect();
        assert_eq!(owners, [Some(Color::Black), None, Some(Color::White)]);
        assert!(territories.iter().all(|t| t.len() == 5));
        assert_eq!(territories[1].bordering(), [Color::Black, Color::White]);
    }

    #[test]
    fn test_partition_covers_empty_points_once() {
        let pos = Position::from_diagram(
            "
            . X . O .
            X X O . O
            . O X X .
            O . X . .
            . O . X .
            ",
        )
        .unwrap();
        let territories = partition(&pos);

        let empties: HashSet<Point> = pos
            .points()
            .into_iter()
            .filter(|&p| pos.color_at(p) == Stone::Empty)
            .collect();
        let total: usize = territories.iter().map(Territory::len).sum();
        assert_eq!(total, empties.len());

        let mut seen = HashSet::new();
        for t in &territories {
            for &p in &t.points {
                assert!(seen.insert(p), "point {p} in two territories");
                assert!(empties.contains(&p));
            }
        }
    }

    #[test]
    fn test_full_board_has_no_territory() {
        let pos = Position::from_diagram("XO/OX").unwrap();
        assert!(partition(&pos).is_empty());
    }
}
