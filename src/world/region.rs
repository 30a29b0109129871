//! Region bookkeeping
//!
//! `RegionIndex` mirrors a grid and records which carved region every cell
//! belongs to. `MergeTable` tracks which regions have been joined.

use super::Grid;

/// Region id of cells that belong to no region
pub const UNASSIGNED: i32 = -1;

/// Per-cell region ids, parallel to a [`Grid`]
#[derive(Debug, Clone)]
pub struct RegionIndex {
    width: i32,
    height: i32,
    ids: Vec<i32>,
    /// Number of region ids handed out so far
    count: i32,
}

impl RegionIndex {
    /// Create an index with every cell unassigned
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ids: vec![UNASSIGNED; (width * height) as usize],
            count: 0,
        }
    }

    /// Create an index matching the dimensions of `grid`
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.width(), grid.height())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if this index can mirror `grid`
    pub fn matches(&self, grid: &Grid) -> bool {
        self.width == grid.width() && self.height == grid.height()
    }

    #[inline]
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Hand out the next region id
    pub fn next_region(&mut self) -> i32 {
        let id = self.count;
        self.count += 1;
        id
    }

    /// Number of regions created so far
    pub fn region_count(&self) -> usize {
        self.count as usize
    }

    /// Region of a cell; [`UNASSIGNED`] outside the index
    pub fn get(&self, x: i32, y: i32) -> i32 {
        if self.is_valid(x, y) {
            self.ids[(y * self.width + x) as usize]
        } else {
            UNASSIGNED
        }
    }

    pub fn set(&mut self, x: i32, y: i32, region: i32) {
        debug_assert!(self.is_valid(x, y), "({}, {}) outside region index", x, y);
        self.ids[(y * self.width + x) as usize] = region;
    }

    /// Forget all assignments and restart ids from zero
    pub fn clear(&mut self) {
        self.ids.fill(UNASSIGNED);
        self.count = 0;
    }
}

/// Union-find over region ids
#[derive(Debug, Clone)]
pub struct MergeTable {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl MergeTable {
    /// Every region starts as its own group
    pub fn new(regions: usize) -> Self {
        Self {
            parent: (0..regions).collect(),
            rank: vec![0; regions],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Current representative of `region`
    pub fn find(&mut self, region: usize) -> usize {
        let mut root = region;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut current = region;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Join the groups of `a` and `b`. Returns false if they were already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    /// True if both regions belong to the same group
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
