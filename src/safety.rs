//! Unconditional life (Benson's algorithm).
//!
//! A block of stones is unconditionally alive when it cannot be captured even
//! if its owner always passes. The test works on enclosed regions: maximal
//! connected sets of points not occupied by the block owner's stones.

use std::collections::BTreeSet;

use crate::board::{BoardState, Color, Point, Stone};

struct Block {
    stones: Vec<Point>,
    liberties: BTreeSet<Point>,
}

struct Region {
    points: Vec<Point>,
    empties: Vec<Point>,
    /// Indices of the blocks adjacent to the region.
    blocks: BTreeSet<usize>,
}

impl Region {
    /// A region is vital to a block when every empty point in it is a
    /// liberty of that block.
    fn is_vital_to(&self, b: usize, block: &Block) -> bool {
        self.blocks.contains(&b) && self.empties.iter().all(|p| block.liberties.contains(p))
    }
}

/// Flood-fill from `start` over points accepted by `inside`.
fn flood<B, F>(board: &B, start: Point, visited: &mut [bool], inside: F) -> Vec<Point>
where
    B: BoardState + ?Sized,
    F: Fn(Stone) -> bool,
{
    let mut out = Vec::new();
    let mut stack = vec![start];
    visited[start] = true;
    while let Some(pt) = stack.pop() {
        out.push(pt);
        for n in board.neighbors(pt) {
            if !visited[n] && inside(board.color_at(n)) {
                visited[n] = true;
                stack.push(n);
            }
        }
    }
    out
}

/// Points of `color` that are safe: stones of unconditionally alive blocks
/// and the regions vital to them. Sorted by point index.
pub fn find_safety<B: BoardState + ?Sized>(board: &B, color: Color) -> Vec<Point> {
    let own = Stone::from(color);
    let points = board.points();
    let len = points.iter().max().map_or(0, |&m| m + 1);

    let mut block_of = vec![None; len];
    let mut blocks = Vec::new();
    let mut visited = vec![false; len];
    for &pt in &points {
        if visited[pt] || board.color_at(pt) != own {
            continue;
        }
        let stones = flood(board, pt, &mut visited, |s| s == own);
        let mut liberties = BTreeSet::new();
        for &s in &stones {
            block_of[s] = Some(blocks.len());
            for n in board.neighbors(s) {
                if board.color_at(n) == Stone::Empty {
                    liberties.insert(n);
                }
            }
        }
        blocks.push(Block { stones, liberties });
    }

    let mut regions = Vec::new();
    let mut visited = vec![false; len];
    for &pt in &points {
        if visited[pt] || board.color_at(pt) == own {
            continue;
        }
        let region_points = flood(board, pt, &mut visited, |s| s != own);
        let mut adjacent = BTreeSet::new();
        for &p in &region_points {
            for n in board.neighbors(p) {
                if let Some(b) = block_of[n] {
                    adjacent.insert(b);
                }
            }
        }
        let empties = region_points
            .iter()
            .copied()
            .filter(|&p| board.color_at(p) == Stone::Empty)
            .collect();
        regions.push(Region {
            points: region_points,
            empties,
            blocks: adjacent,
        });
    }

    let mut alive = vec![true; blocks.len()];
    let mut live = vec![true; regions.len()];
    loop {
        let mut changed = false;

        for (b, block) in blocks.iter().enumerate() {
            if !alive[b] {
                continue;
            }
            let vital = regions
                .iter()
                .enumerate()
                .filter(|&(r, region)| live[r] && region.is_vital_to(b, block))
                .count();
            if vital < 2 {
                alive[b] = false;
                changed = true;
            }
        }

        for (r, region) in regions.iter().enumerate() {
            if live[r] && region.blocks.iter().any(|&b| !alive[b]) {
                live[r] = false;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    let mut safe = BTreeSet::new();
    for (b, block) in blocks.iter().enumerate() {
        if alive[b] {
            safe.extend(block.stones.iter().copied());
        }
    }
    for (r, region) in regions.iter().enumerate() {
        let vital_to_alive = region
            .blocks
            .iter()
            .any(|&b| alive[b] && region.is_vital_to(b, &blocks[b]));
        if live[r] && vital_to_alive {
            safe.extend(region.points.iter().copied());
        }
    }
    safe.into_iter().collect()
}
