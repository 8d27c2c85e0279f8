use crate::models::BoundingBox;
use rstar::{Envelope, RTree, RTreeObject, SelectionFunction, AABB};

/// A keyed plot bounding box stored in the index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedBox<K> {
    pub key: K,
    pub bbox: BoundingBox,
    envelope: AABB<[f64; 2]>,
}

impl<K> IndexedBox<K> {
    pub fn new(key: K, bbox: BoundingBox) -> Self {
        let envelope = AABB::from_corners(bbox.lower(), bbox.upper());
        Self { key, bbox, envelope }
    }
}

impl<K> RTreeObject for IndexedBox<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Selects entries whose box intersects the query box, edges included
struct IntersectingBox {
    query: AABB<[f64; 2]>,
}

impl<K> SelectionFunction<IndexedBox<K>> for IntersectingBox {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        self.query.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &IndexedBox<K>) -> bool {
        self.query.intersects(&leaf.envelope)
    }
}

/// Bounding-box prefilter for overlap detection.
///
/// Narrows the plots that need an exact polygon test to those whose boxes
/// intersect on both axes, boundaries included.
pub struct OverlapIndex<K> {
    tree: RTree<IndexedBox<K>>,
}

impl<K> Default for OverlapIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OverlapIndex<K> {
    /// Create a new empty index
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load an index from keyed boxes
    pub fn from_entries(entries: impl IntoIterator<Item = (K, BoundingBox)>) -> Self {
        let boxes: Vec<IndexedBox<K>> =
            entries.into_iter().map(|(key, bbox)| IndexedBox::new(key, bbox)).collect();

        Self { tree: RTree::bulk_load(boxes) }
    }

    pub fn insert(&mut self, key: K, bbox: BoundingBox) {
        self.tree.insert(IndexedBox::new(key, bbox));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: PartialEq> OverlapIndex<K> {
    /// Keys whose boxes intersect `bbox`, optionally leaving one key out
    pub fn candidates(&self, bbox: &BoundingBox, exclude: Option<&K>) -> Vec<&K> {
        let selection = IntersectingBox { query: AABB::from_corners(bbox.lower(), bbox.upper()) };

        self.tree
            .locate_with_selection_function(selection)
            .map(|entry| &entry.key)
            .filter(|key| exclude != Some(*key))
            .collect()
    }
}
