//! Union-find grouping of overlapping raw detections.
//!
//! Two boxes join the same cluster when their intersection covers at least
//! `regions_overlap` of *each* box's own area. Clusters are formed by
//! transitive closure over that relation and collapse to one box whose
//! geometry is the count-weighted average of its members.

use crate::types::Rect;

/// Disjoint-set forest over `[0, n)` with path compression and union by size.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Returns `false` if `a` and `b` were already in the same set.
    pub fn unite(&mut self, a: usize, b: usize) -> bool {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
        true
    }
}

/// Half-open intersection test: boxes that only share an edge are disjoint.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// Intersection area of two boxes, zero when they are disjoint.
#[inline]
pub fn overlap_area(a: &Rect, b: &Rect) -> usize {
    let w = a.right().min(b.right()).saturating_sub(a.x.max(b.x));
    let h = a.bottom().min(b.bottom()).saturating_sub(a.y.max(b.y));
    w * h
}

fn should_merge(a: &Rect, b: &Rect, regions_overlap: f64) -> bool {
    if !intersects(a, b) {
        return false;
    }
    let overlap = overlap_area(a, b) as f64;
    overlap / a.area() as f64 >= regions_overlap && overlap / b.area() as f64 >= regions_overlap
}

#[derive(Clone, Copy, Default)]
struct ClusterSum {
    count: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl ClusterSum {
    fn add(&mut self, r: &Rect) {
        self.count += r.count;
        self.x += r.x * r.count;
        self.y += r.y * r.count;
        self.width += r.width * r.count;
        self.height += r.height * r.count;
    }

    fn average(&self) -> Rect {
        let avg = |sum: usize| (sum as f64 / self.count as f64).round() as usize;
        Rect {
            count: self.count,
            width: avg(self.width),
            height: avg(self.height),
            x: avg(self.x),
            y: avg(self.y),
        }
    }
}

/// Merge overlapping detections.
///
/// Output follows the first appearance of each cluster in `rects`. A list
/// without qualifying pairs comes back unchanged.
pub fn merge_detections(rects: &[Rect], regions_overlap: f64) -> Vec<Rect> {
    let n = rects.len();
    let mut sets = DisjointSet::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if should_merge(&rects[i], &rects[j], regions_overlap) {
                sets.unite(i, j);
            }
        }
    }

    // Cluster slot per root, allocated in order of first appearance.
    let mut slot_of_root = vec![usize::MAX; n];
    let mut clusters: Vec<ClusterSum> = Vec::new();
    for (i, r) in rects.iter().enumerate() {
        let root = sets.find(i);
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = clusters.len();
            clusters.push(ClusterSum::default());
        }
        clusters[slot_of_root[root]].add(r);
    }
    clusters.iter().map(ClusterSum::average).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_set_tracks_components() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.unite(0, 1));
        assert!(sets.unite(3, 4));
        assert!(sets.unite(1, 4));
        assert!(!sets.unite(0, 3));
        assert_eq!(sets.find(0), sets.find(4));
        assert_ne!(sets.find(2), sets.find(0));
        assert_eq!(sets.len(), 5);
    }

    #[test]
    fn edge_touching_boxes_do_not_intersect() {
        let a = Rect::raw(0, 0, 10, 10);
        let b = Rect::raw(10, 0, 10, 10);
        assert!(!intersects(&a, &b));
        assert_eq!(overlap_area(&a, &b), 0);
        assert!(intersects(&a, &Rect::raw(9, 9, 10, 10)));
    }

    #[test]
    fn overlap_uses_inner_corners() {
        let a = Rect::raw(0, 0, 10, 10);
        let b = Rect::raw(2, 2, 10, 10);
        assert_eq!(overlap_area(&a, &b), 64);
        assert_eq!(overlap_area(&b, &a), 64);
        // Containment.
        assert_eq!(overlap_area(&a, &Rect::raw(3, 3, 2, 2)), 4);
    }

    #[test]
    fn averaging_of_two_overlapping_boxes() {
        let merged = merge_detections(&[Rect::raw(0, 0, 10, 10), Rect::raw(2, 2, 10, 10)], 0.5);
        assert_eq!(
            merged,
            vec![Rect {
                count: 2,
                width: 10,
                height: 10,
                x: 1,
                y: 1
            }]
        );
    }

    #[test]
    fn small_box_inside_large_box_stays_separate() {
        // 4/4 of the small box is covered, but only 4/100 of the large one.
        let rects = [Rect::raw(0, 0, 10, 10), Rect::raw(3, 3, 2, 2)];
        assert_eq!(merge_detections(&rects, 0.5), rects.to_vec());
    }

    #[test]
    fn non_overlapping_list_is_returned_unchanged() {
        let rects = vec![
            Rect::raw(0, 0, 8, 8),
            Rect::raw(8, 0, 8, 8),
            Rect::raw(30, 30, 12, 12),
        ];
        let merged = merge_detections(&rects, 0.5);
        assert_eq!(merged, rects);
        assert_eq!(merge_detections(&merged, 0.5), merged);
    }

    #[test]
    fn merging_twice_is_stable() {
        let rects = vec![
            Rect::raw(0, 0, 10, 10),
            Rect::raw(1, 0, 10, 10),
            Rect::raw(2, 1, 10, 10),
            Rect::raw(40, 40, 10, 10),
        ];
        let once = merge_detections(&rects, 0.5);
        assert_eq!(once.len(), 2);
        assert_eq!(once[0].count, 3);
        assert_eq!(merge_detections(&once, 0.5), once);
    }

    #[test]
    fn clusters_form_by_transitive_closure() {
        // a~b and b~c overlap enough, a and c do not.
        let rects = [
            Rect::raw(0, 0, 10, 10),
            Rect::raw(4, 0, 10, 10),
            Rect::raw(8, 0, 10, 10),
        ];
        let merged = merge_detections(&rects, 0.5);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].count, 3);
        assert_eq!(merged[0].x, 4);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(merge_detections(&[], 0.5).is_empty());
    }
}
