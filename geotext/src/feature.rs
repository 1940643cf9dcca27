//! Features and their storage.

use geotext_types::cartesian::Envelope;
use geotext_types::impls::{
    GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use geotext_types::{Geom, Geometry};

/// A feature is an arbitrary object with geometry.
pub trait Feature {
    /// Type of the geometry the feature returns.
    type Geom: Geometry;
    /// Returns the geometry of the feature.
    fn geometry(&self) -> &Self::Geom;
}

macro_rules! impl_feature {
    ($geom:ident) => {
        impl Feature for $geom {
            type Geom = Self;
            fn geometry(&self) -> &Self::Geom {
                self
            }
        }
    };
}

impl_feature!(Geom);
impl_feature!(Point);
impl_feature!(LineString);
impl_feature!(Polygon);
impl_feature!(MultiPoint);
impl_feature!(MultiLineString);
impl_feature!(MultiPolygon);
impl_feature!(GeometryCollection);

/// Ordered list of features.
///
/// Features keep their insertion order. Queries are linear scans, no spatial index is built.
#[derive(Debug, Clone)]
pub struct FeatureStore<F> {
    features: Vec<F>,
}

impl<F> FeatureStore<F> {
    /// Creates a new store with the given feature set.
    pub fn new(features: impl IntoIterator<Item = F>) -> Self {
        Self {
            features: features.into_iter().collect(),
        }
    }

    /// Number of features in the store.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the store has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All features as a slice.
    pub fn as_slice(&self) -> &[F] {
        &self.features
    }

    /// Consumes the store returning the features.
    pub fn into_vec(self) -> Vec<F> {
        self.features
    }
}

impl<F: Feature> FeatureStore<F> {
    /// Iterates over the features whose geometry envelope intersects the given envelope.
    ///
    /// Touching envelopes intersect. Features with empty geometry never match.
    pub fn intersecting(&self, envelope: &Envelope) -> impl Iterator<Item = &F> + '_ {
        let envelope = *envelope;
        self.features.iter().filter(move |feature| {
            feature
                .geometry()
                .envelope()
                .is_some_and(|feature_envelope| feature_envelope.intersects(&envelope))
        })
    }
}
