//! Visibility graph over pivots, rebuilt every tick.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::boundary::VirtualWall;
use crate::core::{Segment, WorldPoint};
use crate::environment::Environment;
use crate::grid::OccupancyGrid;

use super::pivots::polyline_pivots;

/// Whether the straight line `a`–`b` is unobstructed.
///
/// Every wall blocks on any bounded contact, endpoints included, except
/// walls that have `a` or `b` as an exact endpoint: a sight line may touch
/// the wall it starts from.
pub fn is_visible(a: WorldPoint, b: WorldPoint, walls: &[Segment]) -> bool {
    let sight = Segment::new(a, b);
    !walls
        .iter()
        .any(|w| !(w.has_endpoint(&a) || w.has_endpoint(&b)) && sight.intersects(w))
}

/// Undirected graph of mutually visible waypoints.
///
/// Adjacency is symmetric by construction: every edge is inserted in both
/// directions with its Euclidean length.
///
/// # Example
///
/// ```rust,ignore
/// use anveshan::visibility::VisibilityGraph;
///
/// let graph = VisibilityGraph::build(pivots, walls);
/// for (j, dist) in graph.neighbors(0) {
///     println!("0 -> {} ({:.1})", j, dist);
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct VisibilityGraph {
    /// Waypoints, duplicates removed, in insertion order
    nodes: Vec<WorldPoint>,

    /// Adjacency list: edges[i] = [(neighbor_idx, distance), ...]
    edges: Vec<Vec<(usize, f32)>>,

    /// Walls every edge was tested against
    walls: Vec<Segment>,

    /// Exact point -> node index
    index: HashMap<(u32, u32), usize>,
}

impl VisibilityGraph {
    /// Build the graph: one node per distinct point, one edge per visible pair.
    ///
    /// O(N²·M) for N nodes and M walls.
    pub fn build(points: Vec<WorldPoint>, walls: Vec<Segment>) -> Self {
        let mut nodes = Vec::with_capacity(points.len());
        let mut index = HashMap::with_capacity(points.len());
        for p in points {
            if let std::collections::hash_map::Entry::Vacant(slot) = index.entry(p.key()) {
                slot.insert(nodes.len());
                nodes.push(p);
            }
        }

        let mut graph = Self {
            edges: vec![Vec::new(); nodes.len()],
            nodes,
            walls,
            index,
        };
        graph.build_edges();
        graph
    }

    fn build_edges(&mut self) {
        let n = self.nodes.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.nodes[i], self.nodes[j]);
                if is_visible(a, b, &self.walls) {
                    let dist = a.distance(&b);
                    self.edges[i].push((j, dist));
                    self.edges[j].push((i, dist));
                }
            }
        }
    }

    /// Whether `a` and `b` can see each other through this graph's walls
    #[inline]
    pub fn is_visible(&self, a: WorldPoint, b: WorldPoint) -> bool {
        is_visible(a, b, &self.walls)
    }

    /// Node positions
    #[inline]
    pub fn nodes(&self) -> &[WorldPoint] {
        &self.nodes
    }

    /// Number of nodes
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Walls the graph was built against
    #[inline]
    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    /// Neighbors of node `i` with edge lengths (empty for unknown indices)
    #[inline]
    pub fn neighbors(&self, i: usize) -> &[(usize, f32)] {
        self.edges.get(i).map_or(&[], Vec::as_slice)
    }

    /// Index of the node at exactly `p`
    #[inline]
    pub fn node_index(&self, p: &WorldPoint) -> Option<usize> {
        self.index.get(&p.key()).copied()
    }

    /// Positions visible from the node at exactly `p`
    pub fn neighbors_of(&self, p: &WorldPoint) -> Option<Vec<WorldPoint>> {
        let i = self.node_index(p)?;
        Some(self.neighbors(i).iter().map(|&(j, _)| self.nodes[j]).collect())
    }

    /// Whether nodes `i` and `j` are connected
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.neighbors(i).iter().any(|&(k, _)| k == j)
    }
}

/// Builds the per-tick [`VisibilityGraph`].
///
/// Static obstacle pivots (both sides) and solid walls are computed once at
/// construction. Each [`build`](Self::build) adds the pivots of the current
/// virtual walls, keeping only those that land in discovered space.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    pivot_offset: f32,
    width: f32,
    height: f32,
    static_pivots: Vec<WorldPoint>,
    static_walls: Vec<Segment>,
}

impl GraphBuilder {
    /// Cache static pivots and walls for `environment`
    pub fn new(environment: &Environment, pivot_offset: f32) -> Self {
        let mut seen = HashSet::new();
        let static_pivots: Vec<WorldPoint> = environment
            .obstacles()
            .iter()
            .flat_map(|o| polyline_pivots(o, pivot_offset))
            .filter(|p| environment.contains_strict(p))
            .filter(|p| seen.insert(p.key()))
            .collect();
        let static_walls = environment.solid_walls();

        debug!(
            "[Graph] cached {} static pivots, {} solid walls",
            static_pivots.len(),
            static_walls.len()
        );

        Self {
            pivot_offset,
            width: environment.width(),
            height: environment.height(),
            static_pivots,
            static_walls,
        }
    }

    /// Cached static pivots
    #[inline]
    pub fn static_pivots(&self) -> &[WorldPoint] {
        &self.static_pivots
    }

    /// Solid walls, bounding edges included
    #[inline]
    pub fn static_walls(&self) -> &[Segment] {
        &self.static_walls
    }

    fn inside(&self, p: &WorldPoint) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }

    /// Pivots of the virtual walls on their discovered side.
    pub fn virtual_pivots(&self, walls: &[VirtualWall], grid: &OccupancyGrid) -> Vec<WorldPoint> {
        walls
            .iter()
            .flat_map(|w| polyline_pivots(&w.outline, self.pivot_offset))
            .filter(|p| self.inside(p) && grid.is_discovered(grid.world_to_cell(*p)))
            .collect()
    }

    /// Build the graph for the current virtual walls
    pub fn build(&self, virtual_walls: &[VirtualWall], grid: &OccupancyGrid) -> VisibilityGraph {
        let mut points = self.static_pivots.clone();
        points.extend(self.virtual_pivots(virtual_walls, grid));

        let mut walls = self.static_walls.clone();
        walls.extend(virtual_walls.iter().flat_map(|w| w.outline.segments()));

        let graph = VisibilityGraph::build(points, walls);
        debug!(
            "[Graph] nodes={} edges={} walls={} (virtual walls: {})",
            graph.node_count(),
            graph.edge_count(),
            graph.walls().len(),
            virtual_walls.len()
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryTracer;
    use crate::core::{GridCoord, Polyline};

    fn p(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn rect_env() -> Environment {
        let rect = Polyline::rectangle(p(40.0, 40.0), p(60.0, 60.0));
        Environment::new(100.0, 100.0, vec![rect]).unwrap()
    }

    #[test]
    fn test_wall_blocks_sight() {
        let wall = [Segment::new(p(50.0, 0.0), p(50.0, 100.0))];
        assert!(!is_visible(p(10.0, 50.0), p(90.0, 50.0), &wall));
        assert!(is_visible(p(10.0, 50.0), p(40.0, 50.0), &wall));
    }

    #[test]
    fn test_shared_endpoint_is_exempt() {
        let wall = [Segment::new(p(0.0, 0.0), p(100.0, 0.0))];
        assert!(is_visible(p(0.0, 0.0), p(50.0, 50.0), &wall));
        // Touching the same wall elsewhere still blocks
        assert!(!is_visible(p(50.0, 0.0), p(50.0, 50.0), &wall));
    }

    #[test]
    fn test_graph_is_symmetric() {
        let env = rect_env();
        let builder = GraphBuilder::new(&env, 5.0);
        let grid = OccupancyGrid::new(100.0, 100.0, 10.0, 2);
        let graph = builder.build(&[], &grid);

        assert_eq!(graph.node_count(), 8);
        assert!(graph.edge_count() > 0);
        for i in 0..graph.node_count() {
            for &(j, dist) in graph.neighbors(i) {
                assert!(graph.has_edge(j, i));
                assert!((dist - graph.nodes()[i].distance(&graph.nodes()[j])).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_inner_and_outer_pivots_disconnected() {
        let env = rect_env();
        let graph = GraphBuilder::new(&env, 5.0).build(&[], &OccupancyGrid::new(100.0, 100.0, 10.0, 2));
        let inner_pivots: Vec<WorldPoint> = graph
            .nodes()
            .iter()
            .copied()
            .filter(|q| q.x > 40.0 && q.x < 60.0 && q.y > 40.0 && q.y < 60.0)
            .collect();
        assert_eq!(inner_pivots.len(), 4);
        // Pivots inside the rectangle only see each other
        for q in &inner_pivots {
            for seen in graph.neighbors_of(q).unwrap() {
                assert!(seen.x > 40.0 && seen.x < 60.0 && seen.y > 40.0 && seen.y < 60.0);
            }
        }
    }

    #[test]
    fn test_duplicate_points_collapse() {
        let graph = VisibilityGraph::build(vec![p(1.0, 1.0), p(1.0, 1.0), p(5.0, 5.0)], vec![]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors_of(&p(1.0, 1.0)), Some(vec![p(5.0, 5.0)]));
        assert!(graph.neighbors_of(&p(2.0, 2.0)).is_none());
    }

    #[test]
    fn test_virtual_pivots_face_discovered_side() {
        let env = Environment::empty(200.0, 200.0).unwrap();
        let mut grid = OccupancyGrid::new(200.0, 200.0, 10.0, 2);
        for x in 9..=11 {
            for y in 9..=11 {
                grid.mark_discovered(GridCoord::new(x, y));
            }
        }
        let walls = BoundaryTracer::default().trace(&grid);
        let builder = GraphBuilder::new(&env, 10.0);
        let pivots = builder.virtual_pivots(&walls, &grid);

        assert_eq!(pivots.len(), 4);
        for q in &pivots {
            assert!(grid.is_discovered(grid.world_to_cell(*q)));
            assert!(q.x > 80.0 && q.x < 120.0 && q.y > 80.0 && q.y < 120.0);
        }

        // The pivots sit inside the square wall and see each other
        let graph = builder.build(&walls, &grid);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
    }
}
