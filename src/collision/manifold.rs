use crate::math::vec2::Vec2;

/// Contacts whose depth is within this distance of the deepest one are kept.
pub const CONTACT_DEPTH_TOLERANCE: f64 = 0.01;

/// Collision record for one pair of bodies, rebuilt every step.
///
/// Bodies are referred to by their index in the slice handed to the detector.
/// `normal` is a unit vector pointing from the reference body to the incident
/// body.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifold {
    /// Index of the body that owns the separating axis.
    pub reference: usize,
    /// Index of the other body.
    pub incident: usize,
    pub normal: Vec2,
    pub penetration: f64,
    all_contacts: Vec<Vec2>,
    contacts: Vec<Vec2>,
}

impl Manifold {
    /// A manifold with no contact, meaning the pair does not collide.
    pub fn empty(reference: usize, incident: usize) -> Self {
        Manifold {
            reference,
            incident,
            normal: Vec2::ZERO,
            penetration: 0.0,
            all_contacts: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Builds a manifold and reduces the raw contacts to at most two.
    ///
    /// `reference_vertices` are the world vertices of the reference body, used
    /// to measure each contact's depth along the normal.
    pub fn new(
        reference: usize,
        incident: usize,
        normal: Vec2,
        penetration: f64,
        all_contacts: Vec<Vec2>,
        reference_vertices: &[Vec2],
    ) -> Self {
        let contacts = select_best_contacts(&all_contacts, normal, reference_vertices);
        Manifold {
            reference,
            incident,
            normal,
            penetration,
            all_contacts,
            contacts,
        }
    }

    /// True when the pair has at least one contact and positive penetration.
    pub fn is_valid(&self) -> bool {
        !self.contacts.is_empty() && self.penetration > 0.0
    }

    /// Minimum translation vector: the normal scaled by the penetration.
    pub fn mtv(&self) -> Vec2 {
        self.normal * self.penetration
    }

    /// At most two contacts used by the solver.
    pub fn contacts(&self) -> &[Vec2] {
        &self.contacts
    }

    /// Every contact point produced by the narrow phase.
    pub fn all_contacts(&self) -> &[Vec2] {
        &self.all_contacts
    }
}

fn select_best_contacts(all: &[Vec2], normal: Vec2, reference_vertices: &[Vec2]) -> Vec<Vec2> {
    if all.len() <= 2 {
        return all.to_vec();
    }

    let depths: Vec<f64> = all
        .iter()
        .map(|&point| contact_depth(point, normal, reference_vertices))
        .collect();
    let max_depth = depths.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let deepest: Vec<Vec2> = all
        .iter()
        .zip(&depths)
        .filter(|(_, depth)| (**depth - max_depth).abs() < CONTACT_DEPTH_TOLERANCE)
        .map(|(point, _)| *point)
        .collect();

    if deepest.len() <= 2 {
        deepest
    } else {
        farthest_pair(&deepest)
    }
}

/// `|min over reference vertices of normal . (point - vertex)|`
fn contact_depth(point: Vec2, normal: Vec2, reference_vertices: &[Vec2]) -> f64 {
    reference_vertices
        .iter()
        .map(|&vertex| normal.dot(point - vertex))
        .fold(f64::INFINITY, f64::min)
        .abs()
}

fn farthest_pair(points: &[Vec2]) -> Vec<Vec2> {
    let mut best = (points[0], points[1]);
    let mut max_distance = 0.0;
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            let distance = a.distance(b);
            if distance > max_distance {
                max_distance = distance;
                best = (a, b);
            }
        }
    }
    vec![best.0, best.1]
}
