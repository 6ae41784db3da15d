use crate::{Group, LaunchItem};

/// Anything with a display position.
pub trait Ordered {
    fn order(&self) -> i64;
}

impl Ordered for Group {
    fn order(&self) -> i64 {
        self.order
    }
}

impl Ordered for LaunchItem {
    fn order(&self) -> i64 {
        self.order
    }
}

/// Stable sort by `order`; equal positions keep their original sequence.
pub fn sorted_by_order<T: Ordered + Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort_by_key(Ordered::order);
    out
}
