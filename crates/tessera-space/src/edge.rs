//! Boundary policy for neighbor lookups past the grid edge.

/// How a grid treats neighbors that fall outside its extents.
///
/// # Examples
///
/// ```
/// use tessera_space::BoundaryPolicy;
///
/// assert_eq!(BoundaryPolicy::Zero.resolve_axis(-1, 5), None);
/// assert_eq!(BoundaryPolicy::Wrap.resolve_axis(-1, 5), Some(4));
/// assert_eq!(BoundaryPolicy::Wrap.resolve_axis(5, 5), Some(0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Out-of-bounds neighbors are padding with code 0: they count toward
    /// no state.
    #[default]
    Zero,
    /// Out-of-bounds neighbors wrap to the opposite side (torus).
    Wrap,
}

impl BoundaryPolicy {
    /// Resolve a single axis position under this policy.
    ///
    /// Returns `Some(resolved)` or `None` for a padded position.
    pub fn resolve_axis(self, val: i64, len: usize) -> Option<usize> {
        let len_i = len as i64;
        if (0..len_i).contains(&val) {
            return Some(val as usize);
        }
        match self {
            Self::Zero => None,
            Self::Wrap => Some(val.rem_euclid(len_i) as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_bounds_passes_through() {
        assert_eq!(BoundaryPolicy::Zero.resolve_axis(2, 5), Some(2));
        assert_eq!(BoundaryPolicy::Wrap.resolve_axis(0, 5), Some(0));
    }

    #[test]
    fn zero_policy_pads() {
        assert_eq!(BoundaryPolicy::Zero.resolve_axis(-1, 5), None);
        assert_eq!(BoundaryPolicy::Zero.resolve_axis(5, 5), None);
    }

    #[test]
    fn wrap_policy_is_periodic() {
        assert_eq!(BoundaryPolicy::Wrap.resolve_axis(-1, 5), Some(4));
        assert_eq!(BoundaryPolicy::Wrap.resolve_axis(7, 5), Some(2));
        assert_eq!(BoundaryPolicy::Wrap.resolve_axis(-6, 5), Some(4));
    }

    #[test]
    fn default_is_zero_padding() {
        assert_eq!(BoundaryPolicy::default(), BoundaryPolicy::Zero);
    }
}
