//! Integer lattice enumeration.

/// Iterator over every `[i, j, k]` in `[-h, h]^3`, lexicographic with `i`
/// outermost.
#[derive(Clone, Debug)]
pub struct LatticeIndices {
    half_extent: i64,
    next: Option<[i64; 3]>,
}

impl LatticeIndices {
    pub fn new(half_extent: u32) -> Self {
        let h = half_extent as i64;
        Self {
            half_extent: h,
            next: Some([-h, -h, -h]),
        }
    }
}

impl Iterator for LatticeIndices {
    type Item = [i64; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let h = self.half_extent;
        let [i, j, k] = current;

        self.next = if k < h {
            Some([i, j, k + 1])
        } else if j < h {
            Some([i, j + 1, -h])
        } else if i < h {
            Some([i + 1, -h, -h])
        } else {
            None
        };

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some([i, j, k]) = self.next else {
            return (0, Some(0));
        };
        let side = (2 * self.half_extent + 1) as u64;
        let offset = |v: i64| (v + self.half_extent) as u64;
        let consumed = offset(i) * side * side + offset(j) * side + offset(k);
        let remaining = side.pow(3) - consumed;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Enumerate the lattice for a given half-extent.
pub fn lattice_indices(half_extent: u32) -> LatticeIndices {
    LatticeIndices::new(half_extent)
}
