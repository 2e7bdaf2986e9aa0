//! The dancing-links arena.
//!
//! Every node lives in one `Vec` and points at its four neighbours by index,
//! forming two circular doubly-linked rings: one per matrix row and one per
//! column (anchored by the column header). Node `0` is the root sentinel and
//! nodes `1..=num_cols` are the column headers, linked left-right in column
//! order. Row nodes follow in row-major order.
//!
//! The type is crate-private: only the search driver mutates it, and every
//! `cover` it issues is undone by a matching `uncover` in LIFO order.

use super::matrix::Matrix;

/// Index of the root sentinel.
pub(crate) const ROOT: usize = 0;

/// Row id carried by the root and the column headers.
const NO_ROW: usize = usize::MAX;

/// A slot in the arena. `left`/`right` thread the row ring (the header ring
/// for headers), `up`/`down` the column ring.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    column: usize, // header index; headers point at themselves
    row: usize,
}

impl Node {
    fn detached(index: usize, column: usize, row: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
            row,
        }
    }
}

/// Per-header counter of the row nodes still linked under it, kept in step
/// by `cover` and `uncover`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Column {
    size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Links {
    nodes: Vec<Node>,
    cols: Vec<Column>,
    num_cols: usize,
    /// First node of each matrix row, `None` for rows without 1-entries.
    row_heads: Vec<Option<usize>>,
}

impl Links {
    /// Builds the linked structure mirroring `matrix`.
    pub(crate) fn new(matrix: &Matrix) -> Self {
        let num_cols = matrix.num_cols();
        let ones: usize = matrix.rows().map(|r| r.count_ones()).sum();

        let mut links = Links {
            nodes: Vec::with_capacity(1 + num_cols + ones),
            cols: Vec::with_capacity(1 + num_cols),
            num_cols,
            row_heads: Vec::with_capacity(matrix.num_rows()),
        };

        links.nodes.push(Node::detached(ROOT, ROOT, NO_ROW));
        links.cols.push(Column { size: 0 });

        // Link column headers in a left-right ring with the root
        for c in 1..=num_cols {
            let mut header = Node::detached(c, c, NO_ROW);
            header.left = c - 1;
            header.right = if c == num_cols { ROOT } else { c + 1 };
            links.nodes.push(header);
            links.cols.push(Column { size: 0 });
        }
        links.nodes[ROOT].left = num_cols;
        links.nodes[ROOT].right = if num_cols == 0 { ROOT } else { 1 };

        for (r, row) in matrix.rows().enumerate() {
            let mut first_in_row: Option<usize> = None;
            for c in row.iter_ones() {
                let header = c + 1;
                let node = links.nodes.len();

                // Append at the bottom of the column ring
                let mut n = Node::detached(node, header, r);
                n.up = links.nodes[header].up;
                n.down = header;
                let up = n.up;
                links.nodes.push(n);
                links.nodes[up].down = node;
                links.nodes[header].up = node;
                links.cols[header].size += 1;

                // Insert to the left of the row's first node to close the ring
                if let Some(first) = first_in_row {
                    let last = links.nodes[first].left;
                    links.nodes[node].right = first;
                    links.nodes[node].left = last;
                    links.nodes[last].right = node;
                    links.nodes[first].left = node;
                } else {
                    first_in_row = Some(node);
                }
            }
            links.row_heads.push(first_in_row);
        }

        links
    }

    pub(crate) fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub(crate) fn right(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes[node].down
    }

    /// Header index of the column owning `node`.
    pub(crate) fn column(&self, node: usize) -> usize {
        self.nodes[node].column
    }

    /// Matrix row of a row node.
    pub(crate) fn row(&self, node: usize) -> usize {
        self.nodes[node].row
    }

    pub(crate) fn size(&self, header: usize) -> usize {
        self.cols[header].size
    }

    /// First node of matrix row `row`, if the row has any 1-entries.
    pub(crate) fn row_head(&self, row: usize) -> Option<usize> {
        self.row_heads.get(row).copied().flatten()
    }

    /// True once every column has been covered.
    pub(crate) fn is_solved(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Headers still present in the header ring, left to right.
    pub(crate) fn active_headers(&self) -> Vec<usize> {
        let mut headers = Vec::new();
        let mut c = self.nodes[ROOT].right;
        while c != ROOT {
            headers.push(c);
            c = self.nodes[c].right;
        }
        headers
    }

    /// A covered header keeps its own links, but its left neighbour no
    /// longer points back at it.
    pub(crate) fn is_active(&self, header: usize) -> bool {
        header != ROOT && self.nodes[self.nodes[header].left].right == header
    }

    /// Leftmost column with the fewest active nodes.
    pub(crate) fn choose_column(&self) -> Option<usize> {
        let mut c = self.nodes[ROOT].right;
        if c == ROOT {
            return None;
        }
        let mut best = c;
        let mut best_size = self.cols[c].size;
        c = self.nodes[c].right;
        while c != ROOT && best_size > 0 {
            if self.cols[c].size < best_size {
                best = c;
                best_size = self.cols[c].size;
            }
            c = self.nodes[c].right;
        }
        Some(best)
    }

    fn detach_vertical(&mut self, node: usize) {
        let Node { up, down, column, .. } = self.nodes[node];
        self.nodes[up].down = down;
        self.nodes[down].up = up;
        self.cols[column].size -= 1;
    }

    fn attach_vertical(&mut self, node: usize) {
        let Node { up, down, column, .. } = self.nodes[node];
        self.nodes[up].down = node;
        self.nodes[down].up = node;
        self.cols[column].size += 1;
    }

    /// Removes `col` from the header ring and every row intersecting it from
    /// the other columns. The nodes of `col` itself stay linked to it.
    pub(crate) fn cover(&mut self, col: usize) {
        let Node { left, right, .. } = self.nodes[col];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut row_node = self.nodes[col].down;
        while row_node != col {
            let mut node = self.nodes[row_node].right;
            while node != row_node {
                self.detach_vertical(node);
                node = self.nodes[node].right;
            }
            row_node = self.nodes[row_node].down;
        }
    }

    /// Exact inverse of [`Links::cover`]; must be called in LIFO order.
    pub(crate) fn uncover(&mut self, col: usize) {
        let mut row_node = self.nodes[col].up;
        while row_node != col {
            let mut node = self.nodes[row_node].left;
            while node != row_node {
                self.attach_vertical(node);
                node = self.nodes[node].left;
            }
            row_node = self.nodes[row_node].up;
        }

        let Node { left, right, .. } = self.nodes[col];
        self.nodes[left].right = col;
        self.nodes[right].left = col;
    }

    /// Covers every other column of `node`'s row, walking right.
    pub(crate) fn select(&mut self, node: usize) {
        let mut n = self.nodes[node].right;
        while n != node {
            self.cover(self.nodes[n].column);
            n = self.nodes[n].right;
        }
    }

    /// Undoes [`Links::select`], walking left.
    pub(crate) fn deselect(&mut self, node: usize) {
        let mut n = self.nodes[node].left;
        while n != node {
            self.uncover(self.nodes[n].column);
            n = self.nodes[n].left;
        }
    }

    /// Forces the row starting at `head` into the solution by covering all
    /// of its columns.
    pub(crate) fn seed(&mut self, head: usize) {
        self.cover(self.nodes[head].column);
        self.select(head);
    }

    pub(crate) fn unseed(&mut self, head: usize) {
        self.deselect(head);
        self.uncover(self.nodes[head].column);
    }

    /// Walks every ring reachable from the root and checks the link symmetry
    /// and the size counters.
    pub(crate) fn check_consistency(&self) -> bool {
        let limit = self.nodes.len();

        let mut steps = 0;
        let mut c = ROOT;
        loop {
            let next = self.nodes[c].right;
            if self.nodes[next].left != c {
                return false;
            }
            c = next;
            steps += 1;
            if c == ROOT {
                break;
            }
            if steps > limit || self.nodes[c].column != c {
                return false;
            }
        }

        for header in self.active_headers() {
            let mut count = 0;
            let mut n = header;
            loop {
                let next = self.nodes[n].down;
                if self.nodes[next].up != n {
                    return false;
                }
                n = next;
                if n == header {
                    break;
                }
                count += 1;
                if count > limit || self.nodes[n].column != header {
                    return false;
                }
                let (l, r) = (self.nodes[n].left, self.nodes[n].right);
                if self.nodes[r].left != n || self.nodes[l].right != n {
                    return false;
                }
            }
            if count != self.cols[header].size {
                return false;
            }
        }

        true
    }
}
