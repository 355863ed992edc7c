/// Out-of-range index policy for neighborhood reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Snap to the nearest in-range index.
    Clamp,
    /// Toroidal wraparound: `-1` reads the last element, `len` the first.
    Wrap,
}

pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some((i as usize).min(len - 1))
            }
        }
        BorderMode::Wrap => Some(i.rem_euclid(len as isize) as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, map_index};

    #[test]
    fn clamp_snaps_to_edges() {
        let mapped: Vec<_> = (-2..=5)
            .map(|i| map_index(i, 3, BorderMode::Clamp))
            .collect();
        assert_eq!(
            mapped,
            [0, 0, 0, 1, 2, 2, 2, 2].map(Some).to_vec()
        );
    }

    #[test]
    fn wrap_mapping_is_toroidal() {
        let mode = BorderMode::Wrap;

        assert_eq!(map_index(-1, 5, mode), Some(4));
        assert_eq!(map_index(5, 5, mode), Some(0));
        assert_eq!(map_index(2, 5, mode), Some(2));
        for i in -3..=3 {
            assert_eq!(map_index(i, 1, mode), Some(0));
        }
    }

    #[test]
    fn empty_axis_maps_nowhere() {
        assert_eq!(map_index(0, 0, BorderMode::Clamp), None);
        assert_eq!(map_index(0, 0, BorderMode::Wrap), None);
    }
}
