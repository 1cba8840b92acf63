// Copyright (c) 2019-present Dmitry Stepanov and Fyrox Engine contributors.
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! All-pairs shortest path over the color-compatibility graph, via
//! Floyd–Warshall. Colors are 1-based ids; the produced matrices are padded
//! so `matrix[id]` addresses color `id` directly (index 0 is unused).

const UNREACHABLE: i32 = -1;
const INF: i32 = i32::MAX / 2;

/// Result of running the distance engine over a color-compatibility graph:
/// `distance[a][b]` is the shortest-path edge count from `a` to `b`
/// (`-1` if unreachable, `0` on the diagonal), and `next_hop[a][b]` is the
/// first color to step to on a shortest path from `a` to `b` (`-1` if
/// unreachable or `a == b`).
#[derive(Debug, Clone)]
pub struct DistanceMatrices {
    pub distance: Vec<Vec<i32>>,
    pub next_hop: Vec<Vec<i32>>,
}

/// Compute all-pairs shortest paths over `n` colors (ids `1..=n`), given an
/// adjacency predicate `is_adjacent(a, b)` for directly-compatible color
/// pairs. The adjacency relation is symmetrized internally (Wang-tile
/// compatibility is always mutual).
pub fn floyd_warshall(n: usize, mut is_adjacent: impl FnMut(u32, u32) -> bool) -> DistanceMatrices {
    let size = n + 1;
    let mut dist = vec![vec![INF; size]; size];
    let mut next = vec![vec![UNREACHABLE; size]; size];

    for i in 1..size {
        dist[i][i] = 0;
    }
    for a in 1..size {
        for b in (a + 1)..size {
            if is_adjacent(a as u32, b as u32) || is_adjacent(b as u32, a as u32) {
                dist[a][b] = 1;
                dist[b][a] = 1;
                next[a][b] = b as i32;
                next[b][a] = a as i32;
            }
        }
    }

    for k in 1..size {
        for i in 1..size {
            if dist[i][k] >= INF {
                continue;
            }
            for j in 1..size {
                let via_k = dist[i][k] + dist[k][j];
                if via_k < dist[i][j] {
                    dist[i][j] = via_k;
                    next[i][j] = next[i][k];
                }
            }
        }
    }

    for row in dist.iter_mut() {
        for v in row.iter_mut() {
            if *v >= INF {
                *v = UNREACHABLE;
            }
        }
    }

    DistanceMatrices { distance: dist, next_hop: next }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_distance_is_additive() {
        // 1-2-3-4 chain: adjacency only between consecutive ids.
        let m = floyd_warshall(4, |a, b| (a as i32 - b as i32).abs() == 1);
        assert_eq!(m.distance[1][2], 1);
        assert_eq!(m.distance[1][3], 2);
        assert_eq!(m.distance[1][4], 3);
        assert_eq!(m.distance[4][1], 3);
        assert_eq!(m.distance[1][1], 0);
    }

    #[test]
    fn disconnected_colors_are_unreachable() {
        let m = floyd_warshall(4, |a, b| (a == 1 && b == 2) || (a == 3 && b == 4));
        assert_eq!(m.distance[1][2], 1);
        assert_eq!(m.distance[1][3], -1);
        assert_eq!(m.next_hop[1][3], -1);
    }

    #[test]
    fn next_hop_follows_shortest_path() {
        let m = floyd_warshall(4, |a, b| (a as i32 - b as i32).abs() == 1);
        // From 1 to 4 the first hop must be 2.
        assert_eq!(m.next_hop[1][4], 2);
        let mut cur = 1;
        let mut steps = 0;
        while cur != 4 {
            cur = m.next_hop[cur as usize][4];
            steps += 1;
            assert!(steps <= 4, "next-hop chain did not converge");
        }
        assert_eq!(steps, 3);
    }

    #[test]
    fn triangle_shortcuts_the_chain() {
        // 1-2-3-4 chain plus a direct 1-4 edge: shortest path becomes length 1.
        let m = floyd_warshall(4, |a, b| {
            (a as i32 - b as i32).abs() == 1 || (a == 1 && b == 4)
        });
        assert_eq!(m.distance[1][4], 1);
        assert_eq!(m.next_hop[1][4], 4);
    }
}
