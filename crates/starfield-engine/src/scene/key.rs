use core::cmp::Ordering;

use super::ZIndex;

/// Paint-order key: layer first, then recording order within the layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    /// Position in the draw list when recorded. Breaks ties inside a layer.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

impl Ord for SortKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.z.cmp(&other.z).then(self.order.cmp(&other.order))
    }
}

impl PartialOrd for SortKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_wins_over_order() {
        let back = SortKey::new(ZIndex(0), 9);
        let front = SortKey::new(ZIndex(1), 0);
        assert!(back < front);
    }

    #[test]
    fn order_breaks_ties() {
        assert!(SortKey::new(ZIndex(2), 1) < SortKey::new(ZIndex(2), 2));
        assert_eq!(SortKey::new(ZIndex(2), 1).cmp(&SortKey::new(ZIndex(2), 1)), Ordering::Equal);
    }
}
