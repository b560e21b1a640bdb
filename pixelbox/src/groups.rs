/*!
Collision-group bitmasks.

Each shape's collider carries a (membership, filter) pair of 32-bit masks.
Two colliders generate contacts only if each one's membership intersects
the other's filter. The engine evaluates the test symmetrically; this
module's job is to make the category/mask contract explicit and testable.

The mask is a fixed-width newtype with named constants rather than a
generic flag facility: the "all categories" value is the bitwise complement
of the empty mask, and custom categories are single bits.
*/

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use rapier2d::prelude::{Group, InteractionGroups, InteractionTestMode};

/// A 32-bit collision category mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupMask(pub u32);

impl GroupMask {
    /// No categories. A shape filtering on `NONE` collides with nothing.
    pub const NONE: GroupMask = GroupMask(0);

    /// The default category every shape starts in.
    pub const DEFAULT: GroupMask = GroupMask(1);

    /// Every category, computed as the complement of the empty mask.
    pub const ALL: GroupMask = GroupMask(!0);

    /// A single-category mask for bit `index` (0..=31).
    ///
    /// Index 0 is [`GroupMask::DEFAULT`]. Panics on out-of-range indices;
    /// category allocation is a compile-time decision, not runtime input.
    #[inline]
    pub const fn category(index: u32) -> GroupMask {
        assert!(index < 32, "collision categories are limited to 32 bits");
        GroupMask(1 << index)
    }

    /// Does this mask share at least one category with `other`?
    #[inline]
    pub const fn intersects(self, other: GroupMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Does this mask contain every category in `other`?
    #[inline]
    pub const fn contains(self, other: GroupMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl Default for GroupMask {
    /// Matches the engine default: member of [`GroupMask::DEFAULT`] is the
    /// shape-side default membership, but a bare mask defaults to `ALL` so
    /// filters start permissive.
    fn default() -> Self {
        GroupMask::ALL
    }
}

impl BitOr for GroupMask {
    type Output = GroupMask;

    fn bitor(self, rhs: GroupMask) -> GroupMask {
        GroupMask(self.0 | rhs.0)
    }
}

impl BitAnd for GroupMask {
    type Output = GroupMask;

    fn bitand(self, rhs: GroupMask) -> GroupMask {
        GroupMask(self.0 & rhs.0)
    }
}

impl Not for GroupMask {
    type Output = GroupMask;

    fn not(self) -> GroupMask {
        GroupMask(!self.0)
    }
}

impl fmt::Debug for GroupMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupMask({:#010x})", self.0)
    }
}

/// A shape's collision-filtering state: the categories it belongs to and
/// the categories it is willing to touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionGroup {
    /// Categories this shape is a member of.
    pub membership: GroupMask,
    /// Categories this shape generates contacts with.
    pub filter: GroupMask,
}

impl CollisionGroup {
    #[inline]
    pub const fn new(membership: GroupMask, filter: GroupMask) -> Self {
        Self { membership, filter }
    }

    /// Convert to the engine's interaction-group pair.
    #[inline]
    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(self.membership.0),
            Group::from_bits_truncate(self.filter.0),
            InteractionTestMode::And,
        )
    }

    /// Rebuild from the engine's interaction-group pair.
    #[inline]
    pub fn from_interaction_groups(groups: InteractionGroups) -> Self {
        Self {
            membership: GroupMask(groups.memberships.bits()),
            filter: GroupMask(groups.filter.bits()),
        }
    }

    /// Would the engine let these two groups touch? Requires the membership
    /// ↔ filter test to pass in both directions.
    #[inline]
    pub fn compatible_with(self, other: CollisionGroup) -> bool {
        self.membership.intersects(other.filter) && other.membership.intersects(self.filter)
    }
}

impl Default for CollisionGroup {
    /// Every shape starts in the default category, collidable with all.
    fn default() -> Self {
        Self {
            membership: GroupMask::DEFAULT,
            filter: GroupMask::ALL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_complement_of_none() {
        assert_eq!(GroupMask::ALL, !GroupMask::NONE);
        for index in 0..32 {
            assert!(GroupMask::ALL.contains(GroupMask::category(index)));
        }
        assert!(!GroupMask::NONE.intersects(GroupMask::ALL));
    }

    #[test]
    fn categories_are_disjoint_single_bits() {
        let a = GroupMask::category(1);
        let b = GroupMask::category(2);
        assert!(!a.intersects(b));
        assert!((a | b).contains(a));
        assert!((a | b).contains(b));
        assert_eq!(a & b, GroupMask::NONE);
    }

    #[test]
    fn default_group_is_compatible_with_itself() {
        let d = CollisionGroup::default();
        assert!(d.compatible_with(d));
    }

    #[test]
    fn disjoint_pairs_are_incompatible_symmetrically() {
        // Category 2 filtering on 1, against category 4 filtering on 1:
        // neither filter admits the other's membership.
        let a = CollisionGroup::new(GroupMask(2), GroupMask(1));
        let b = CollisionGroup::new(GroupMask(4), GroupMask(1));
        assert!(!a.compatible_with(b));
        assert!(!b.compatible_with(a));
    }

    #[test]
    fn probe_isolation_pattern() {
        // A cursor probe in its own category, filtering on DEFAULT only:
        // touches default-configured shapes but not engine-default (ALL/ALL)
        // geometry placed outside the default category.
        let probe = CollisionGroup::new(GroupMask::category(3), GroupMask::DEFAULT);
        let regular = CollisionGroup::default();
        let outsider = CollisionGroup::new(GroupMask::category(5), GroupMask::ALL);

        assert!(probe.compatible_with(regular));
        assert!(!probe.compatible_with(outsider));
    }

    #[test]
    fn interaction_groups_round_trip() {
        let group = CollisionGroup::new(GroupMask(0b110), GroupMask::DEFAULT);
        let back = CollisionGroup::from_interaction_groups(group.to_interaction_groups());
        assert_eq!(back, group);
    }
}
