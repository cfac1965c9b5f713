//! Pairwise collision detection and resolution
//!
//! Two bodies collide when their centers are closer than the sum of their
//! radii. Colliding pairs either bounce (an elastic impulse along the contact
//! normal plus a positional split of the overlap) or, in merge mode and only
//! when they overlap by more than half, merge into the heavier of the two.

use crate::engine::{Body, BodyId};
use glam::DVec3;
use tracing::debug;

/// Outcome of a shallow contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Contact {
    Bounced,
    /// Touching but already separating, left alone
    Separating,
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub bounces: usize,
    pub merges: Vec<MergeEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    pub survivor: BodyId,
    pub absorbed: BodyId,
}

/// Whether two bodies interpenetrate
pub fn is_colliding(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) < a.radius + b.radius
}

/// Whether two bodies overlap deeply enough to merge
pub fn is_merge_depth(a: &Body, b: &Body) -> bool {
    a.position.distance(b.position) < (a.radius + b.radius) / 2.0
}

/// Bounce two colliding bodies off each other
///
/// Returns `false` without touching either body when they are already moving
/// apart along the contact normal.
pub fn resolve_bounce(a: &mut Body, b: &mut Body) -> bool {
    let delta = b.position - a.position;
    let dist = delta.length();
    let normal = if dist > 0.0 { delta / dist } else { DVec3::X };

    let speed = (b.velocity - a.velocity).dot(normal);
    if speed >= 0.0 {
        return false;
    }

    let impulse = 2.0 * speed / (a.mass + b.mass);
    a.velocity += normal * (impulse * b.mass);
    b.velocity -= normal * (impulse * a.mass);

    let overlap = a.radius + b.radius - dist;
    let correction = normal * (overlap / 2.0);
    a.position -= correction;
    b.position += correction;
    true
}

/// Fold `absorbed` into `survivor`, conserving mass and momentum
///
/// Radii add rather than volumes. The survivor keeps its position.
pub fn merge_into(survivor: &mut Body, absorbed: &Body) {
    let mass = survivor.mass + absorbed.mass;
    let momentum = survivor.momentum() + absorbed.momentum();
    survivor.velocity = momentum / mass;
    survivor.mass = mass;
    survivor.radius += absorbed.radius;
}

/// Borrow two distinct bodies mutably, `i < j`
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

enum PairOutcome {
    Untouched,
    Contact(Contact),
    Absorbed { index: usize, event: MergeEvent },
}

/// Resolve the collision between bodies `i` and `j` (`i < j`) if there is one
fn resolve_pair(bodies: &mut [Body], i: usize, j: usize, merge_mode: bool) -> PairOutcome {
    let (a, b) = pair_mut(bodies, i, j);
    if !is_colliding(a, b) {
        return PairOutcome::Untouched;
    }

    if merge_mode && is_merge_depth(a, b) {
        // Ties go to the later body
        let (survivor, absorbed, index) = if a.mass > b.mass { (a, b, j) } else { (b, a, i) };
        merge_into(survivor, absorbed);
        debug!(
            survivor = survivor.id.0,
            absorbed = absorbed.id.0,
            mass = survivor.mass,
            radius = survivor.radius,
            "bodies merged"
        );
        let event = MergeEvent {
            survivor: survivor.id,
            absorbed: absorbed.id,
        };
        return PairOutcome::Absorbed { index, event };
    }

    if resolve_bounce(a, b) {
        PairOutcome::Contact(Contact::Bounced)
    } else {
        PairOutcome::Contact(Contact::Separating)
    }
}

/// Run one detection and resolution pass over every unordered pair
///
/// Absorbed bodies are only marked during the pass: they take part in no
/// later pair and are dropped in one compaction at the end, so no body is
/// visited twice or skipped. Survivors keep their relative order.
pub fn resolve_collisions(bodies: &mut Vec<Body>, merge_mode: bool) -> CollisionReport {
    let n = bodies.len();
    let mut report = CollisionReport::default();
    let mut alive = vec![true; n];

    for i in 0..n {
        for j in (i + 1)..n {
            if !alive[i] {
                break;
            }
            if !alive[j] {
                continue;
            }
            match resolve_pair(bodies, i, j, merge_mode) {
                PairOutcome::Absorbed { index, event } => {
                    alive[index] = false;
                    report.merges.push(event);
                }
                PairOutcome::Contact(Contact::Bounced) => report.bounces += 1,
                PairOutcome::Contact(_) | PairOutcome::Untouched => {}
            }
        }
    }

    if !report.merges.is_empty() {
        let mut flags = alive.into_iter();
        bodies.retain(|_| flags.next().unwrap_or(true));
    }

    report
}
